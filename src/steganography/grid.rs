//! # 像素网格
//!
//! 编解码器与外部图像解码器之间的边界。核心只需要宽、高以及按 `(x, y)`
//! 读写每个像素的 R、G、B 三个 8 位通道；alpha 通道 (若存在) 从不改动。

use image::{ImageBuffer, RgbImage, RgbaImage};

use crate::steganography::bits::least_significant_bit;

/// 可按坐标读写 RGB 通道的像素网格。
///
/// 调用方独占网格；编码时借出可变引用，解码时借出只读引用。
pub trait PixelGrid {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// 返回 `(x, y)` 处像素的 `[R, G, B]`。
    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3];

    /// 覆盖 `(x, y)` 处像素的 R、G、B 通道，其余通道保持不变。
    fn set_rgb_at(&mut self, x: u32, y: u32, rgb: [u8; 3]);
}

impl PixelGrid for RgbaImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }

    fn set_rgb_at(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.get_pixel_mut(x, y).0[..3].copy_from_slice(&rgb);
    }
}

impl PixelGrid for RgbImage {
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }

    fn set_rgb_at(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.get_pixel_mut(x, y).0 = rgb;
    }
}

/// 编码器与解码器共用的固定遍历顺序。
///
/// 外层循环为 x，内层循环为 y：先访问 `x = 0` 的整列，再访问 `x = 1` 的整列，依此类推。
pub fn raster_order(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
}

/// 按遍历顺序依次产出每个 R、G、B 通道的最低有效位。
pub fn channel_bits<G: PixelGrid + ?Sized>(grid: &G) -> impl Iterator<Item = u8> {
    raster_order(grid.width(), grid.height())
        .flat_map(move |(x, y)| grid.rgb_at(x, y))
        .map(least_significant_bit)
}
