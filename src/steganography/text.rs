//! 基于字节编解码器的文本便捷接口。

use crate::error::Result;
use crate::steganography::decoder::decode;
use crate::steganography::encoder::encode;
use crate::steganography::grid::PixelGrid;

/// 以 UTF-8 字节的形式隐藏 `text`。
pub fn encode_text<G: PixelGrid + ?Sized>(grid: &mut G, text: &str) -> Result<()> {
    encode(grid, text.as_bytes())
}

/// 恢复载荷并按 UTF-8 解释。
///
/// # Errors
///
/// 除 [`decode`] 的错误外，载荷不是合法 UTF-8 时返回 [`crate::error::StegoError::InvalidUtf8`]。
pub fn decode_text<G: PixelGrid + ?Sized>(grid: &G) -> Result<String> {
    Ok(String::from_utf8(decode(grid)?)?)
}

/// 截取到第一个不可打印字节 (小于 32 或大于 127) 之前的部分。
pub fn printable_prefix(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .position(|&b| !(32..=127).contains(&b))
        .unwrap_or(bytes.len());
    &bytes[..end]
}
