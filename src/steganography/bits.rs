//! # 比特打包原语
//!
//! 字节内的比特按 MSB 优先编号：索引 0 是最高位，索引 7 是最低位。
//! 这一顺序决定了比特写入图像的先后，编码端和解码端必须一致。

use crate::constants::BITS_PER_BYTE;

/// 返回 `byte` 中第 `index` 位 (0 为最高位) 的值，结果为 0 或 1。
///
/// `index` 只取低 3 位，因此函数对任意输入都有定义。
pub fn bit_at(byte: u8, index: u8) -> u8 {
    (byte >> (7 - (index & 7))) & 1
}

/// 返回把 `byte` 第 `index` 位替换为 `bit` 后的新字节，其余位保持不变。
///
/// `bit` 只取最低位。
pub fn set_bit_at(byte: u8, index: u8, bit: u8) -> u8 {
    let mask = 0x80u8 >> (index & 7);
    if bit & 1 == 1 { byte | mask } else { byte & !mask }
}

pub fn least_significant_bit(channel: u8) -> u8 {
    channel & 1
}

/// 将通道值的最低位强制为 `bit`，其余 7 位保持不变。
pub fn set_least_significant_bit(channel: u8, bit: u8) -> u8 {
    (channel & 0xFE) | (bit & 1)
}

/// 在字节序列中的位置：字节索引加上字节内的比特索引 (0..=7)。
///
/// 每次操作都创建自己的游标，从不在调用之间共享。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitCursor {
    byte: usize,
    bit: u8,
}

impl BitCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn byte_index(&self) -> usize {
        self.byte
    }

    pub fn bit_index(&self) -> u8 {
        self.bit
    }

    /// 已经走过的比特总数。
    pub fn bits_consumed(&self) -> usize {
        self.byte * BITS_PER_BYTE + self.bit as usize
    }

    /// 前进一位。若刚好填满一个字节 (写完第 8 位) 则返回 `true`。
    pub fn advance(&mut self) -> bool {
        self.bit += 1;
        if self.bit as usize == BITS_PER_BYTE {
            self.bit = 0;
            self.byte += 1;
            true
        } else {
            false
        }
    }
}

/// 按 MSB 优先顺序逐位产出字节切片内容的惰性序列。
///
/// 序列是有限的，且不可重启：消费完毕后需重新创建。
#[derive(Debug, Clone)]
pub struct Bits<'a> {
    bytes: &'a [u8],
    cursor: BitCursor,
}

impl<'a> Bits<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            cursor: BitCursor::new(),
        }
    }

    pub fn cursor(&self) -> BitCursor {
        self.cursor
    }
}

impl Iterator for Bits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.cursor.byte_index())?;
        let bit = bit_at(byte, self.cursor.bit_index());
        self.cursor.advance();
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.bytes.len() * BITS_PER_BYTE).saturating_sub(self.cursor.bits_consumed());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}

/// 把逐位读出的比特重新拼装成固定数量的字节。
///
/// 每个字节按位置 0..=7 依次调用 [`set_bit_at`] 写入，写完第 8 位即视为完成。
#[derive(Debug)]
pub struct ByteAssembler {
    buf: Vec<u8>,
    cursor: BitCursor,
    expected: usize,
}

impl ByteAssembler {
    /// 预分配上限，防止损坏的长度值触发巨大的内存申请。
    const MAX_PREALLOC: usize = 64 * 1024;

    pub fn new(expected: usize) -> Self {
        Self {
            buf: Vec::with_capacity(expected.min(Self::MAX_PREALLOC)),
            cursor: BitCursor::new(),
            expected,
        }
    }

    /// 写入下一位。已经拼装完成时忽略多余的比特。
    pub fn push(&mut self, bit: u8) {
        if self.is_complete() {
            return;
        }
        if self.cursor.bit_index() == 0 {
            self.buf.push(0);
        }
        if let Some(byte) = self.buf.last_mut() {
            *byte = set_bit_at(*byte, self.cursor.bit_index(), bit);
        }
        self.cursor.advance();
    }

    pub fn is_complete(&self) -> bool {
        self.cursor.byte_index() >= self.expected
    }

    /// 已经完整写满 8 位的字节数。
    pub fn completed_bytes(&self) -> usize {
        self.cursor.byte_index()
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
