use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use lsb_stego::StegoError;
use lsb_stego::steganography::bits::{
    BitCursor, Bits, ByteAssembler, bit_at, least_significant_bit, set_bit_at,
    set_least_significant_bit,
};
use lsb_stego::steganography::frame::{Frame, parse_length};
use lsb_stego::steganography::{
    PixelGrid, capacity_of, channel_bits, decode, decode_exact, decode_text, encode, encode_text,
    max_payload_bytes, printable_prefix, raster_order, read_declared_length,
};
use rand::{Rng, RngCore};

/// 一个辅助函数，用于创建一个带有随机像素的 RGB 网格
fn random_grid(width: u32, height: u32) -> RgbImage {
    let mut raw = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw);
    RgbImage::from_raw(width, height, raw).expect("buffer matches dimensions")
}

/// 按遍历顺序展开所有 R/G/B 通道值
fn channels_in_order<G: PixelGrid>(grid: &G) -> Vec<u8> {
    raster_order(grid.width(), grid.height())
        .flat_map(|(x, y)| grid.rgb_at(x, y))
        .collect()
}

#[test]
fn test_bit_at_is_msb_first() {
    assert_eq!(bit_at(0b1000_0000, 0), 1);
    assert_eq!(bit_at(0b1000_0000, 7), 0);
    assert_eq!(bit_at(0b0000_0001, 7), 1);
    assert_eq!(bit_at(0x41, 1), 1);
    assert_eq!(bit_at(0x41, 2), 0);
}

#[test]
fn test_set_bit_at_only_touches_one_position() {
    assert_eq!(set_bit_at(0x00, 0, 1), 0x80);
    assert_eq!(set_bit_at(0xFF, 0, 0), 0x7F);
    assert_eq!(set_bit_at(0xFF, 7, 0), 0xFE);
    assert_eq!(set_bit_at(0x41, 1, 1), 0x41);

    let byte = (0..8).fold(0u8, |acc, i| set_bit_at(acc, i, bit_at(0xA5, i)));
    assert_eq!(byte, 0xA5);
}

#[test]
fn test_least_significant_bit_helpers() {
    assert_eq!(least_significant_bit(0xFE), 0);
    assert_eq!(least_significant_bit(0x03), 1);
    assert_eq!(set_least_significant_bit(0xFE, 1), 0xFF);
    assert_eq!(set_least_significant_bit(0xFF, 0), 0xFE);
    assert_eq!(set_least_significant_bit(0x80, 0), 0x80);
}

#[test]
fn test_bit_cursor_advances_through_bytes() {
    let mut cursor = BitCursor::new();
    for _ in 0..7 {
        assert!(!cursor.advance());
    }
    assert!(cursor.advance());
    assert_eq!(cursor.byte_index(), 1);
    assert_eq!(cursor.bit_index(), 0);
    assert_eq!(cursor.bits_consumed(), 8);
}

#[test]
fn test_bits_and_assembler_agree() {
    let source = [0x41u8, 0x00, 0xFF, 0x5A];
    let bits = Bits::new(&source);
    assert_eq!(bits.len(), 32);

    let mut assembler = ByteAssembler::new(source.len());
    bits.for_each(|bit| assembler.push(bit));
    assert!(assembler.is_complete());
    assert_eq!(assembler.into_bytes(), source);
}

#[test]
fn test_frame_prefixes_big_endian_length() -> anyhow::Result<()> {
    let frame = Frame::build(&[0xAA; 258])?;
    assert_eq!(&frame.as_bytes()[..4], &[0x00, 0x00, 0x01, 0x02]);
    assert_eq!(frame.payload().len(), 258);
    assert_eq!(frame.bit_len(), (258 + 4) * 8);
    assert_eq!(parse_length([0x00, 0x00, 0x01, 0x02]), 258);
    Ok(())
}

#[test]
fn test_capacity_boundaries() {
    assert_eq!(max_payload_bytes(24, 1), 5);
    assert_eq!(max_payload_bytes(23, 1), 4);
    assert_eq!(max_payload_bytes(18, 1), 0);
    assert_eq!(max_payload_bytes(3, 8), 5);
    assert_eq!(max_payload_bytes(0, 100), 0);
    assert_eq!(max_payload_bytes(1, 1), 0);
    assert_eq!(max_payload_bytes(100, 100), 3746);
}

#[test]
fn test_capacity_depends_only_on_dimensions() {
    let black = RgbImage::new(24, 1);
    let noisy = random_grid(24, 1);
    assert_eq!(capacity_of(&black), capacity_of(&noisy));
    assert_eq!(capacity_of(&noisy), max_payload_bytes(24, 1));
    assert_eq!(max_payload_bytes(24, 1), max_payload_bytes(24, 1));
}

#[test]
fn test_capacity_is_capped_to_length_header() {
    assert_eq!(max_payload_bytes(u32::MAX, u32::MAX), u32::MAX as usize);
}

#[test]
fn test_end_to_end_small_grid() -> anyhow::Result<()> {
    let mut grid = random_grid(3, 8);
    assert_eq!(capacity_of(&grid), 5);

    encode(&mut grid, &[0x41, 0x42, 0x43])?;
    assert_eq!(decode(&grid)?, vec![0x41, 0x42, 0x43]);
    Ok(())
}

#[test]
fn test_round_trip_random_payloads() -> anyhow::Result<()> {
    let mut rng = rand::rng();
    for (width, height) in [(24, 1), (3, 8), (7, 13), (40, 25), (100, 100)] {
        let capacity = max_payload_bytes(width, height);
        for len in [0, 1, capacity / 2, capacity] {
            let mut payload = vec![0u8; len];
            rng.fill_bytes(&mut payload);
            let mut grid = random_grid(width, height);

            encode(&mut grid, &payload)?;
            assert_eq!(decode(&grid)?, payload, "{width}x{height}, {len} bytes");
        }

        let len = rng.random_range(0..=capacity);
        let mut payload = vec![0u8; len];
        rng.fill_bytes(&mut payload);
        let mut grid = random_grid(width, height);
        encode(&mut grid, &payload)?;
        assert_eq!(decode(&grid)?, payload);
    }
    Ok(())
}

#[test]
fn test_empty_payload_touches_only_header_channels() -> anyhow::Result<()> {
    let mut grid = random_grid(10, 10);
    let before = channels_in_order(&grid);

    encode(&mut grid, &[])?;
    let after = channels_in_order(&grid);

    assert_eq!(&before[32..], &after[32..]);
    assert!(after[..32].iter().all(|&c| c & 1 == 0));
    for (b, a) in before[..32].iter().zip(&after[..32]) {
        assert_eq!(b & 0xFE, a & 0xFE);
    }
    assert!(decode(&grid)?.is_empty());
    Ok(())
}

#[test]
fn test_channels_beyond_frame_keep_original_values() -> anyhow::Result<()> {
    let mut grid = random_grid(20, 20);
    let before = channels_in_order(&grid);
    let payload = b"hidden";

    encode(&mut grid, payload)?;
    let after = channels_in_order(&grid);

    let frame_bits = (payload.len() + 4) * 8;
    assert_eq!(&before[frame_bits..], &after[frame_bits..]);
    Ok(())
}

#[test]
fn test_overflow_is_rejected_without_mutation() {
    let mut grid = random_grid(24, 1);
    let original = grid.clone();
    let payload = vec![0x55; max_payload_bytes(24, 1) + 1];

    let result = encode(&mut grid, &payload);
    assert!(matches!(
        result,
        Err(StegoError::CapacityExceeded {
            required: 6,
            capacity: 5
        })
    ));
    assert_eq!(grid, original);
}

#[test]
fn test_too_small_grid_rejects_any_payload() {
    let mut grid = random_grid(18, 1);
    assert!(matches!(
        encode(&mut grid, b"x"),
        Err(StegoError::CapacityExceeded { .. })
    ));
}

#[test]
fn test_bits_follow_column_major_raster_order() -> anyhow::Result<()> {
    let mut grid = RgbImage::new(2, 20);
    // 头部 00 00 00 01 中唯一的 1 是第 31 位，载荷 0x80 的最高位是第 32 位。
    encode(&mut grid, &[0x80])?;

    let ones: Vec<usize> = channel_bits(&grid)
        .enumerate()
        .filter(|&(_, bit)| bit == 1)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(ones, vec![31, 32]);

    // 第 31 个通道位于 (0, 10) 的 G，第 32 个位于 (0, 10) 的 B：仍在第一列。
    assert_eq!(grid.get_pixel(0, 10).0, [0, 1, 1]);
    assert_eq!(grid.get_pixel(1, 0).0, [0, 0, 0]);
    Ok(())
}

#[test]
fn test_alpha_channel_is_never_touched() -> anyhow::Result<()> {
    let mut grid: RgbaImage = ImageBuffer::from_fn(16, 16, |x, y| Rgba([x as u8, y as u8, 0xFF, 0x33]));
    encode(&mut grid, b"alpha stays")?;

    assert!(grid.pixels().all(|p| p.0[3] == 0x33));
    assert_eq!(decode(&grid)?, b"alpha stays");
    Ok(())
}

#[test]
fn test_decode_reports_truncated_image() {
    let grid = random_grid(2, 2);
    assert!(matches!(
        decode(&grid),
        Err(StegoError::TruncatedImage {
            expected: 4,
            recovered: 1
        })
    ));
    assert!(matches!(
        read_declared_length(&grid),
        Err(StegoError::TruncatedImage { .. })
    ));
}

#[test]
fn test_decode_exact_detects_exhaustion() -> anyhow::Result<()> {
    let mut grid = random_grid(3, 8);
    encode(&mut grid, b"abc")?;

    assert_eq!(decode_exact(&grid, 3)?, b"abc");
    assert!(matches!(
        decode_exact(&grid, 6),
        Err(StegoError::TruncatedImage {
            expected: 6,
            recovered: 5
        })
    ));
    Ok(())
}

#[test]
fn test_decode_rejects_oversized_header() {
    let grid: RgbImage = ImageBuffer::from_pixel(10, 10, Rgb([0xFF, 0xFF, 0xFF]));
    assert_eq!(read_declared_length(&grid).ok(), Some(u32::MAX));
    assert!(matches!(
        decode(&grid),
        Err(StegoError::InvalidHeader {
            declared: u32::MAX,
            capacity: 33
        })
    ));
}

#[test]
fn test_read_declared_length_matches_payload() -> anyhow::Result<()> {
    let mut grid = random_grid(30, 30);
    encode(&mut grid, &[7u8; 42])?;
    assert_eq!(read_declared_length(&grid)?, 42);
    Ok(())
}

#[test]
fn test_text_wrappers_round_trip() -> anyhow::Result<()> {
    let mut grid = random_grid(64, 64);
    let message = "Hidden in plain sight. 藏在显眼处。";

    encode_text(&mut grid, message)?;
    assert_eq!(decode_text(&grid)?, message);
    Ok(())
}

#[test]
fn test_decode_text_rejects_invalid_utf8() -> anyhow::Result<()> {
    let mut grid = random_grid(16, 16);
    encode(&mut grid, &[0xFF, 0xFE, 0xFD])?;
    assert!(matches!(decode_text(&grid), Err(StegoError::InvalidUtf8(_))));
    Ok(())
}

#[test]
fn test_printable_prefix_stops_at_control_bytes() {
    assert_eq!(printable_prefix(b"hello\x01world"), b"hello");
    assert_eq!(printable_prefix(b"plain text"), b"plain text");
    assert_eq!(printable_prefix(&[0x80, b'a']), b"");
    assert_eq!(printable_prefix(b""), b"");
}
