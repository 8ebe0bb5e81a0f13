//! # 错误类型
//!
//! 隐写编解码核心可能返回的全部错误。命令行层使用 `anyhow` 为其附加上下文。

/// 编码或解码过程中可能出现的错误。
#[derive(Debug, thiserror::Error)]
pub enum StegoError {
    /// 载荷加上长度头部后超出图像的可用比特数。在修改任何像素之前检测。
    #[error("payload too large for image ({required} bytes, capacity {capacity})")]
    CapacityExceeded { required: usize, capacity: usize },

    /// 读取到声明的长度之前像素已经耗尽。
    #[error("image exhausted after {recovered} of {expected} bytes")]
    TruncatedImage { expected: usize, recovered: usize },

    /// 长度头部声明的载荷大于该图像理论上能容纳的最大值。
    #[error("declared payload length {declared} exceeds image capacity {capacity}")]
    InvalidHeader { declared: u32, capacity: usize },

    /// 载荷长度无法写入 32 位长度头部。
    #[error("payload length {0} does not fit the 32-bit length header")]
    LengthOverflow(usize),

    #[error("recovered payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
