// 该文件是 Dengse （灯色） 项目的一部分。
// src/input/mod.rs - 图片目录输入源
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageReader, RgbImage, imageops};
use tracing::debug;

use crate::detector::{INPUT_HEIGHT, INPUT_WIDTH};

/// 帧数据
pub struct Frame {
  /// 已缩放到模型输入尺寸的 RGB 图像
  pub image: RgbImage,
  /// 原始文件名，输出时沿用
  pub name: String,
}

/// 图片目录输入源，按文件名顺序逐张产出帧
pub struct ImageFolderSource {
  entries: std::vec::IntoIter<PathBuf>,
}

impl ImageFolderSource {
  /// 扫描目录并按文件名排序，仅保留 JPEG 扩展名的文件
  pub fn new(dir: &Path) -> Result<Self> {
    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir)
      .with_context(|| format!("无法读取图片目录: {}", dir.display()))?;
    for entry in entries {
      let path = entry
        .with_context(|| format!("无法读取目录项: {}", dir.display()))?
        .path();
      if is_jpeg_path(&path) {
        files.push(path);
      } else {
        debug!("跳过非 JPEG 文件: {}", path.display());
      }
    }
    files.sort();

    Ok(Self {
      entries: files.into_iter(),
    })
  }
}

impl Iterator for ImageFolderSource {
  type Item = Result<Frame>;

  fn next(&mut self) -> Option<Self::Item> {
    let path = self.entries.next()?;
    Some(load_frame(&path))
  }
}

fn is_jpeg_path(path: &Path) -> bool {
  let lower = path.to_string_lossy().to_lowercase();
  lower.ends_with(".jpg") || lower.ends_with(".jpeg")
}

fn load_frame(path: &Path) -> Result<Frame> {
  let img = ImageReader::open(path)
    .with_context(|| format!("无法打开图片文件: {}", path.display()))?
    .decode()
    .with_context(|| format!("无法解码图片文件: {}", path.display()))?
    .to_rgb8();

  // 模型输入为固定尺寸，读取时统一缩放
  let image = imageops::resize(
    &img,
    INPUT_WIDTH,
    INPUT_HEIGHT,
    imageops::FilterType::Triangle,
  );

  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();

  Ok(Frame { image, name })
}
