// 该文件是 Dengse （灯色） 项目的一部分。
// src/output/mod.rs - 标注图片输出
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

mod draw;
mod font;

pub use draw::Draw;
pub use font::{FontError, load_label_font};

use std::path::PathBuf;

use anyhow::{Context, Result};
use image::RgbImage;
use tracing::debug;

use crate::parse::BoundingBox;

/// 标注图片输出，每张图片绘制检测框后保存为 JPEG
pub struct ImageOutput {
  out_dir: PathBuf,
  draw: Draw,
}

impl ImageOutput {
  /// 创建输出写入器，输出目录的存在由调用方保证
  pub fn new(out_dir: PathBuf) -> Result<Self> {
    Ok(Self {
      out_dir,
      draw: Draw::new()?,
    })
  }

  /// 使用指定的绘制工具创建输出写入器
  pub fn with_draw(out_dir: PathBuf, draw: Draw) -> Self {
    Self { out_dir, draw }
  }

  /// 在图像上绘制检测框并以原文件名保存
  pub fn write(&self, name: &str, mut image: RgbImage, boxes: &[BoundingBox]) -> Result<()> {
    self.draw.draw_boxes_on_image(&mut image, boxes);

    let path = self.out_dir.join(name);
    image
      .save(&path)
      .with_context(|| format!("无法保存图片: {}", path.display()))?;
    debug!("保存标注图片: {}", path.display());

    Ok(())
  }
}
