//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `inspect` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、图像解码与编码、调用核心隐写算法以及向用户报告结果。

use crate::cli::{HideArgs, InspectArgs, RecoverArgs};
use crate::constants::{
    DEFAULT_IMAGE_EXTENSION, DEFAULT_TEXT_EXTENSION, HIDDEN_IMAGE_PREFIX, LOSSLESS_OUTPUT_FORMATS,
    RECOVERED_TEXT_PREFIX,
};
use crate::error::StegoError;
use crate::steganography::{capacity_of, decode, encode, encode_text, printable_prefix, read_declared_length};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和待隐藏的内容、检查隐写空间是否足够、调用隐写核心函数写入帧，
/// 最后将结果以无损格式写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`，或目标格式不是无损格式。
/// * 无法读取输入的图像或文本文件。
/// * 图像没有足够的空间来隐藏内容。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_hidden_path(&args.image));

    ensure_lossless_target(&dest)?;
    ensure_writable(&dest, args.force)?;

    let mut pixels = open_rgba(&args.image)?;
    let capacity = capacity_of(&pixels);

    match (&args.text, &args.message) {
        (_, Some(message)) => {
            report_embed_error(
                encode_text(&mut pixels, message),
                "Failed to hide the message in the image.",
            )?;
        }
        (Some(text_path), None) => {
            let text = fs::read(text_path).with_context(|| {
                format!(
                    "Unable to read text file: {}",
                    text_path.to_string_lossy().red().bold()
                )
            })?;
            report_embed_error(
                encode(&mut pixels, &text),
                "Failed to hide the text in the image.",
            )?;
        }
        (None, None) => anyhow::bail!("Nothing to hide: pass either --text or --message."),
    }

    pixels.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    info!(image = %args.image.display(), dest = %dest.display(), capacity, "payload hidden");
    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数读取长度头部和载荷，
/// 最后将恢复的内容写入目标文件；指定 `--stdout` 时改为原样写到标准输出。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像文件。
/// * 图像中没有有效的隐藏数据 (长度头部越界或像素不足)。
/// * 无法写入到目标文件或标准输出。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let text_path = (!args.stdout).then(|| {
        args.text
            .clone()
            .unwrap_or_else(|| default_recovered_path(&args.image))
    });

    if let Some(path) = &text_path {
        ensure_writable(path, args.force)?;
    }

    let pixels = open_rgba(&args.image)?;

    let mut payload = decode(&pixels).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    if args.ascii {
        let printable = printable_prefix(&payload).len();
        if printable < payload.len() {
            warn!(
                kept = printable,
                dropped = payload.len() - printable,
                "truncated recovered data at first non-printable byte"
            );
        }
        payload.truncate(printable);
    }

    info!(image = %args.image.display(), bytes = payload.len(), "payload recovered");

    let Some(text_path) = text_path else {
        // 标准输出只承载载荷本身，不附加任何提示信息。
        return write_payload(&mut io::stdout().lock(), &payload);
    };

    fs::write(&text_path, &payload).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text_path.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully recovered and saved: {}",
        text_path.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 将恢复的载荷原样写入 `writer` 并刷新。
pub fn write_payload<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    writer
        .write_all(payload)
        .and_then(|()| writer.flush())
        .context("Unable to write the recovered data to standard output.")
}

/// 长度头部的检查结果。
#[derive(Debug)]
pub enum DeclaredLength {
    /// 声明的长度不超过容量，图像很可能携带数据。
    Plausible(u32),
    /// 声明的长度超过容量，图像很可能没有隐藏数据。
    ExceedsCapacity(u32),
    /// 图像太小，连长度头部都读不出来。
    Unreadable(StegoError),
}

/// 一张图像的尺寸、容量以及长度头部信息。
#[derive(Debug)]
pub struct InspectReport {
    pub width: u32,
    pub height: u32,
    pub capacity: usize,
    pub declared: DeclaredLength,
}

/// 读取图像并汇总 inspect 命令需要展示的信息。
pub fn inspect_image(path: &Path) -> Result<InspectReport> {
    let pixels = open_rgba(path)?;
    let capacity = capacity_of(&pixels);

    let declared = match read_declared_length(&pixels) {
        Ok(declared) if declared as usize <= capacity => DeclaredLength::Plausible(declared),
        Ok(declared) => DeclaredLength::ExceedsCapacity(declared),
        Err(e) => DeclaredLength::Unreadable(e),
    };

    Ok(InspectReport {
        width: pixels.width(),
        height: pixels.height(),
        capacity,
        declared,
    })
}

/// 处理 'Inspect' 命令的执行逻辑。
///
/// 打印图像尺寸、可隐藏的最大字节数，以及长度头部中声明的载荷大小。
pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    let report = inspect_image(&args.image)?;

    println!(
        "Image: {} ({}x{})",
        args.image.to_string_lossy().bold(),
        report.width,
        report.height
    );
    println!("Capacity: {} bytes", report.capacity.to_string().green().bold());

    match report.declared {
        DeclaredLength::Plausible(declared) => {
            println!("Declared payload: {} bytes", declared.to_string().green().bold());
        }
        DeclaredLength::ExceedsCapacity(declared) => {
            println!(
                "Declared payload: {} bytes (exceeds capacity, probably no hidden data)",
                declared.to_string().red().bold()
            );
        }
        DeclaredLength::Unreadable(e) => {
            println!("Declared payload: {}", e.to_string().red().bold());
        }
    }

    Ok(())
}

/// 输入图像同目录下的 `doctored_<名称>.png`。
pub fn default_hidden_path(image: &Path) -> PathBuf {
    prefixed_sibling(image, HIDDEN_IMAGE_PREFIX, DEFAULT_IMAGE_EXTENSION)
}

/// 图像同目录下的 `recovered_<名称>.txt`。
pub fn default_recovered_path(image: &Path) -> PathBuf {
    prefixed_sibling(image, RECOVERED_TEXT_PREFIX, DEFAULT_TEXT_EXTENSION)
}

fn prefixed_sibling(path: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn open_rgba(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(image.to_rgba8())
}

/// 容量不足时给出与用户相关的提示，其余错误附加 `context`。
fn report_embed_error(result: crate::Result<()>, context: &'static str) -> Result<()> {
    result.map_err(|e| match e {
        StegoError::CapacityExceeded { required, capacity } => anyhow::anyhow!(
            "Not enough space in the image to hide the text. \nRequired: {}, Available: {}",
            required.to_string().red().bold(),
            capacity.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context(context),
    })
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn ensure_lossless_target(path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Output path must name a lossless image format (PNG, BMP, TIFF, WebP or QOI): {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        LOSSLESS_OUTPUT_FORMATS.contains(&format),
        "Output format {:?} is not a supported lossless format. \nLossy formats destroy the hidden bits; use PNG, BMP, TIFF, WebP or QOI.",
        format
    );
    Ok(())
}
