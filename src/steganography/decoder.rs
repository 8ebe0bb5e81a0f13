use tracing::debug;

use crate::constants::LENGTH_HEADER_BYTES;
use crate::error::{Result, StegoError};
use crate::steganography::bits::ByteAssembler;
use crate::steganography::capacity::max_payload_bytes;
use crate::steganography::frame::parse_length;
use crate::steganography::grid::{PixelGrid, channel_bits};

/// 沿遍历顺序读取通道最低位的读取器。两次读取之间保持位置，
/// 因此第二阶段紧接在头部之后继续。
struct ChannelReader<I> {
    bits: I,
}

impl<I: Iterator<Item = u8>> ChannelReader<I> {
    fn new(bits: I) -> Self {
        Self { bits }
    }

    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut assembler = ByteAssembler::new(count);

        while !assembler.is_complete() {
            let bit = self.bits.next().ok_or_else(|| StegoError::TruncatedImage {
                expected: assembler.expected(),
                recovered: assembler.completed_bytes(),
            })?;
            assembler.push(bit);
        }

        Ok(assembler.into_bytes())
    }

    fn read_header(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(LENGTH_HEADER_BYTES)?;
        let mut header = [0u8; LENGTH_HEADER_BYTES];
        header.copy_from_slice(&bytes);
        Ok(parse_length(header))
    }
}

/// 从 `grid` 中恢复载荷，返回的字节不包含长度头部。
///
/// 第一阶段从遍历起点读取 32 位得到声明长度 `L`，
/// 第二阶段从头部之后的位置继续读取恰好 `L` 个字节。
///
/// # Errors
///
/// * [`StegoError::InvalidHeader`]：`L` 超过该网格的理论容量，不会尝试分配。
/// * [`StegoError::TruncatedImage`]：网格连头部都容纳不下。
pub fn decode<G: PixelGrid + ?Sized>(grid: &G) -> Result<Vec<u8>> {
    let mut reader = ChannelReader::new(channel_bits(grid));

    let declared = reader.read_header()?;
    let capacity = max_payload_bytes(grid.width(), grid.height());
    debug!(declared, capacity, "read length header");

    if declared as usize > capacity {
        return Err(StegoError::InvalidHeader { declared, capacity });
    }

    reader.read_bytes(declared as usize)
}

/// 只读取长度头部，返回图像中声明的载荷长度。
///
/// 不校验该长度是否合理，可用于检查一张图像是否携带数据。
pub fn read_declared_length<G: PixelGrid + ?Sized>(grid: &G) -> Result<u32> {
    ChannelReader::new(channel_bits(grid)).read_header()
}

/// 跳过长度头部，按调用方给定的 `len` 读取载荷。
///
/// 不与容量比较；像素在读满 `len` 字节前耗尽时返回 [`StegoError::TruncatedImage`]。
pub fn decode_exact<G: PixelGrid + ?Sized>(grid: &G, len: usize) -> Result<Vec<u8>> {
    let mut reader = ChannelReader::new(channel_bits(grid));
    reader.read_bytes(LENGTH_HEADER_BYTES)?;
    reader.read_bytes(len)
}
