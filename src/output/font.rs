// 该文件是 Dengse （灯色） 项目的一部分。
// src/output/font.rs - 标签字体加载
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::Path;

use ab_glyph::FontArc;
use thiserror::Error;
use tracing::debug;

// 标签使用系统自带的粗体无衬线字体，按常见安装位置依次查找
const FONT_CANDIDATES: &[&str] = &[
  "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
  "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
  "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
  "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
  "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
  "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
  "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
  "C:/Windows/Fonts/arialbd.ttf",
];

#[derive(Error, Debug)]
pub enum FontError {
  #[error("系统中找不到可用的粗体无衬线字体")]
  NotFound,
  #[error("无法读取字体文件 {0}: {1}")]
  Read(&'static str, std::io::Error),
  #[error("字体文件无效: {0}")]
  Invalid(&'static str),
}

/// 加载第一个可用的系统字体
pub fn load_label_font() -> Result<FontArc, FontError> {
  for &path in FONT_CANDIDATES {
    if !Path::new(path).exists() {
      continue;
    }

    debug!("加载标签字体: {}", path);
    let data = std::fs::read(path).map_err(|err| FontError::Read(path, err))?;
    return FontArc::try_from_vec(data).map_err(|_| FontError::Invalid(path));
  }

  Err(FontError::NotFound)
}
