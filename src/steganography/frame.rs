//! # 帧的构建与解析
//!
//! 嵌入图像的数据结构为 `[长度: 4 字节大端序 u32] ++ [载荷字节]`。
//! 帧只在一次编码或解码过程中短暂存在。

use crate::constants::{BITS_PER_BYTE, LENGTH_HEADER_BYTES};
use crate::error::{Result, StegoError};
use crate::steganography::bits::Bits;

/// 带长度前缀的载荷，即编码器的比特来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
}

impl Frame {
    /// 在 `payload` 前加上其长度的大端序编码。
    ///
    /// # Errors
    ///
    /// 载荷长度超出 `u32` 范围时返回 [`StegoError::LengthOverflow`]。
    pub fn build(payload: &[u8]) -> Result<Self> {
        let length =
            u32::try_from(payload.len()).map_err(|_| StegoError::LengthOverflow(payload.len()))?;

        let mut bytes = Vec::with_capacity(LENGTH_HEADER_BYTES + payload.len());
        bytes.extend_from_slice(&encode_length(length));
        bytes.extend_from_slice(payload);

        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[LENGTH_HEADER_BYTES..]
    }

    pub fn bit_len(&self) -> usize {
        self.bytes.len() * BITS_PER_BYTE
    }

    /// 以 MSB 优先的顺序逐位遍历整个帧 (头部在前)。
    pub fn bits(&self) -> Bits<'_> {
        Bits::new(&self.bytes)
    }
}

pub fn encode_length(length: u32) -> [u8; LENGTH_HEADER_BYTES] {
    length.to_be_bytes()
}

/// 把解码得到的前 4 个字节解释为大端序的载荷长度。
pub fn parse_length(header: [u8; LENGTH_HEADER_BYTES]) -> u32 {
    u32::from_be_bytes(header)
}
