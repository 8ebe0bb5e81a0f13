use image::ImageFormat;

/// 长度头部占用的字节数。
/// 载荷长度以大端序 `u32` 写入，位于所有载荷字节之前。
pub const LENGTH_HEADER_BYTES: usize = 4;

/// 每个像素参与隐写的颜色通道数 (R, G, B)。alpha 通道从不改动。
pub const CHANNELS_PER_PIXEL: usize = 3;

pub const BITS_PER_BYTE: usize = 8;

/// 扣除长度头部后，若剩余容量小于该值，则整张图像的容量视为 0。
pub const MIN_PAYLOAD_CAPACITY: usize = 4;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";

pub const DEFAULT_IMAGE_EXTENSION: &str = "png";
pub const DEFAULT_TEXT_EXTENSION: &str = "txt";

/// 允许作为隐写结果的无损格式。有损格式会破坏最低有效位。
pub const LOSSLESS_OUTPUT_FORMATS: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Qoi,
];
