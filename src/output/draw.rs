// 该文件是 Dengse （灯色） 项目的一部分。
// src/output/draw.rs - 检测框绘制
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::parse::BoundingBox;

use super::font::{self, FontError};

// 文本渲染常量
const LABEL_FONT_SIZE: f32 = 16.0; // 12pt 粗体在 96 DPI 下的像素高度
const LABEL_TAG_GAP: i32 = 1; // 标签底边与检测框锚点的间距
const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const BOX_STROKE: i32 = 3; // 边框线宽（像素）

/// 检测框绘制工具
pub struct Draw {
  font: FontArc,
  font_scale: PxScale,
}

impl Draw {
  /// 使用系统字体创建绘制工具
  pub fn new() -> Result<Self, FontError> {
    Ok(Self::with_font(font::load_label_font()?))
  }

  /// 使用指定字体创建绘制工具
  pub fn with_font(font: FontArc) -> Self {
    Self {
      font,
      font_scale: PxScale::from(LABEL_FONT_SIZE),
    }
  }

  /// 标签文字，如 "w3 (95%)"
  pub fn label_text(bounding_box: &BoundingBox) -> String {
    format!(
      "{} ({}%)",
      bounding_box.label,
      (bounding_box.score * 100.0).round() as i32
    )
  }

  /// 按序绘制检测框与标签，后绘制的框可以覆盖先绘制的
  pub fn draw_boxes_on_image(&self, image: &mut RgbImage, boxes: &[BoundingBox]) {
    for bounding_box in boxes {
      self.draw_box_with_label(image, bounding_box);
    }
  }

  fn draw_box_with_label(&self, image: &mut RgbImage, bounding_box: &BoundingBox) {
    let text = Self::label_text(bounding_box);

    // 锚点钳制到画布内，标签与边框均可部分越界，越界部分由画布裁剪
    let x = bounding_box.rect.x.max(0.0) as i32;
    let y = bounding_box.rect.y.max(0.0) as i32;

    // 标签底边位于锚点上方 1 像素
    let (text_width, text_height) = text_size(self.font_scale, &self.font, &text);
    let tag_y = y - text_height as i32 - LABEL_TAG_GAP;
    if text_width > 0 && text_height > 0 {
      let tag = Rect::at(x, tag_y).of_size(text_width, text_height);
      draw_filled_rect_mut(image, tag, bounding_box.color);
      draw_text_mut(
        image,
        LABEL_TEXT_COLOR,
        x,
        tag_y,
        self.font_scale,
        &self.font,
        &text,
      );
    }

    let width = bounding_box.rect.width as i32;
    let height = bounding_box.rect.height as i32;
    for inset in 0..BOX_STROKE {
      let rect_width = width - 2 * inset;
      let rect_height = height - 2 * inset;
      if rect_width <= 0 || rect_height <= 0 {
        break;
      }

      let rect = Rect::at(x + inset, y + inset).of_size(rect_width as u32, rect_height as u32);
      draw_hollow_rect_mut(image, rect, bounding_box.color);
    }
  }
}
