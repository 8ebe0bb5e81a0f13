//! # LSB 隐写编解码核心
//!
//! 每个 R、G、B 通道的最低有效位承载一位数据，每个像素 3 位。
//! 嵌入的数据为带 4 字节大端序长度前缀的帧，字节内按 MSB 优先写入，
//! 像素按列优先的固定顺序访问。alpha 通道从不改动。
//!
//! 编码和解码都是对像素网格的一次同步、确定性遍历，不持有任何跨调用的状态。

pub mod bits;
pub mod capacity;
pub mod decoder;
pub mod encoder;
pub mod frame;
pub mod grid;
pub mod text;

pub use capacity::{capacity_of, max_payload_bytes};
pub use decoder::{decode, decode_exact, read_declared_length};
pub use encoder::encode;
pub use grid::{PixelGrid, channel_bits, raster_order};
pub use text::{decode_text, encode_text, printable_prefix};
