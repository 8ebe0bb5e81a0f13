use tracing::debug;

use crate::error::{Result, StegoError};
use crate::steganography::bits::set_least_significant_bit;
use crate::steganography::capacity::max_payload_bytes;
use crate::steganography::frame::Frame;
use crate::steganography::grid::{PixelGrid, raster_order};

/// 将 `payload` 连同长度头部就地写入 `grid`。
///
/// 按 [`raster_order`] 遍历像素，对每个像素依次处理 R、G、B 通道，
/// 每个通道的最低位写入帧的下一位。帧写完后立即停止，之后的像素保持原值。
/// 空载荷是合法的，此时只写入全零的 4 字节头部。
///
/// # Errors
///
/// 载荷超过 [`max_payload_bytes`] 时返回 [`StegoError::CapacityExceeded`]，
/// 此时网格没有被修改。
pub fn encode<G: PixelGrid + ?Sized>(grid: &mut G, payload: &[u8]) -> Result<()> {
    let (width, height) = (grid.width(), grid.height());
    let capacity = max_payload_bytes(width, height);

    if payload.len() > capacity {
        return Err(StegoError::CapacityExceeded {
            required: payload.len(),
            capacity,
        });
    }

    let frame = Frame::build(payload)?;
    debug!(
        payload_bytes = payload.len(),
        frame_bits = frame.bit_len(),
        capacity,
        "embedding frame"
    );

    let mut bits = frame.bits();

    for (x, y) in raster_order(width, height) {
        if bits.len() == 0 {
            break;
        }

        let mut rgb = grid.rgb_at(x, y);
        for (channel, bit) in rgb.iter_mut().zip(bits.by_ref()) {
            *channel = set_least_significant_bit(*channel, bit);
        }
        grid.set_rgb_at(x, y, rgb);
    }

    debug_assert_eq!(bits.len(), 0, "capacity check admitted a frame that does not fit");
    debug!(bits_written = bits.cursor().bits_consumed(), "frame embedded");

    Ok(())
}
