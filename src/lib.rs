//! # lsb_stego 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：带长度前缀的帧在像素网格中的嵌入与恢复，
//! 以及命令行工具所需的处理函数。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod logging;
pub mod steganography;

pub use error::{Result, StegoError};
