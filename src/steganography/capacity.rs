use crate::constants::{BITS_PER_BYTE, CHANNELS_PER_PIXEL, LENGTH_HEADER_BYTES, MIN_PAYLOAD_CAPACITY};
use crate::steganography::grid::PixelGrid;

/// 计算 `width` x `height` 的像素网格最多能隐藏的载荷字节数。
///
/// 公式为 `floor(width * height * 3 / 8) - 4`：每个像素 3 个可用通道，
/// 每个载荷字节 8 位，再扣除 4 字节的长度头部。
/// 扣除后不足 [`MIN_PAYLOAD_CAPACITY`] 时结果为 0；结果同时不超过 `u32::MAX`，
/// 保证任何被接受的载荷长度都能写入长度头部。
///
/// 这是一个只依赖尺寸的纯函数。
pub fn max_payload_bytes(width: u32, height: u32) -> usize {
    let channels = u128::from(width) * u128::from(height) * CHANNELS_PER_PIXEL as u128;
    let raw = channels / BITS_PER_BYTE as u128;

    let capacity = raw
        .checked_sub(LENGTH_HEADER_BYTES as u128)
        .filter(|&available| available >= MIN_PAYLOAD_CAPACITY as u128)
        .unwrap_or(0)
        .min(u128::from(u32::MAX));

    usize::try_from(capacity).unwrap_or(usize::MAX)
}

/// [`max_payload_bytes`] 作用于网格自身的尺寸。
pub fn capacity_of<G: PixelGrid + ?Sized>(grid: &G) -> usize {
    max_payload_bytes(grid.width(), grid.height())
}
