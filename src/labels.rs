// 该文件是 Dengse （灯色） 项目的一部分。
// src/labels.rs - 信号灯类别标签与显示颜色
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

use image::Rgb;
use thiserror::Error;

/// 单个类别的标签与显示颜色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassStyle {
  pub label: &'static str,
  pub color: Rgb<u8>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
  #[error("未知的类别编号: {0}（有效范围 1..=6）")]
  UnknownClass(i64),
}

// 模型输出的类别编号从 1 起
const CLASS_TABLE: [ClassStyle; 6] = [
  ClassStyle { label: "y", color: Rgb([240, 230, 140]) },  // Khaki
  ClassStyle { label: "o", color: Rgb([255, 0, 255]) },    // Fuchsia
  ClassStyle { label: "w3", color: Rgb([192, 192, 192]) }, // Silver
  ClassStyle { label: "w2", color: Rgb([65, 105, 225]) },  // RoyalBlue
  ClassStyle { label: "r", color: Rgb([0, 128, 0]) },      // Green
  ClassStyle { label: "w1", color: Rgb([255, 140, 0]) },   // DarkOrange
];

/// 查找类别编号对应的标签与颜色，编号越界返回错误
pub fn class_style(class_id: i64) -> Result<&'static ClassStyle, LabelError> {
  if !(1..=CLASS_TABLE.len() as i64).contains(&class_id) {
    return Err(LabelError::UnknownClass(class_id));
  }

  Ok(&CLASS_TABLE[(class_id - 1) as usize])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_class_is_khaki_y() {
    let style = class_style(1).unwrap();
    assert_eq!(style.label, "y");
    assert_eq!(style.color, Rgb([240, 230, 140]));
  }

  #[test]
  fn last_class_is_dark_orange_w1() {
    let style = class_style(6).unwrap();
    assert_eq!(style.label, "w1");
    assert_eq!(style.color, Rgb([255, 140, 0]));
  }

  #[test]
  fn out_of_range_class_is_an_error() {
    assert_eq!(class_style(0), Err(LabelError::UnknownClass(0)));
    assert_eq!(class_style(7), Err(LabelError::UnknownClass(7)));
    assert_eq!(class_style(-3), Err(LabelError::UnknownClass(-3)));
  }
}
