// 该文件是 Dengse （灯色） 项目的一部分。
// src/parse.rs - 模型输出解析
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

use crate::detector::{INPUT_HEIGHT, INPUT_WIDTH, RawDetections};
use crate::labels::{self, LabelError};

/// 置信度阈值，低于该分数的检测不参与绘制
pub const SCORE_THRESHOLD: f32 = 0.80;

/// 像素坐标下的矩形框，(x, y) 为左上角
#[derive(Debug, Clone, PartialEq)]
pub struct BoxRect {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
}

/// 一个待绘制的检测框
#[derive(Debug, Clone)]
pub struct BoundingBox {
  pub label: &'static str,
  pub color: Rgb<u8>,
  pub score: f32,
  pub rect: BoxRect,
}

#[derive(Error, Debug)]
pub enum ParseError {
  #[error(transparent)]
  Label(#[from] LabelError),
  #[error("模型输出不完整: 第 {0} 个检测缺少数据")]
  TruncatedOutput(usize),
}

/// 将模型原始输出解析为检测框序列。
///
/// 检测按序号遍历，序号上界为 `num_detection[0]`；遇到第一个低于
/// [`SCORE_THRESHOLD`] 的分数立即终止（分数降序是 [`RawDetections`]
/// 的前提），归一化坐标按模型输入尺寸换算为像素坐标。
/// 没有任何检测达到阈值时返回空序列。
pub fn parse_detections(raw: &RawDetections) -> Result<Vec<BoundingBox>, ParseError> {
  let total = raw.num_detection.first().copied().unwrap_or(0.0) as usize;
  let mut parsed = Vec::new();

  for index in 0..total {
    let score = *raw
      .scores
      .get(index)
      .ok_or(ParseError::TruncatedOutput(index))?;
    if score < SCORE_THRESHOLD {
      break;
    }

    let class_id = *raw
      .classes
      .get(index)
      .ok_or(ParseError::TruncatedOutput(index))?;
    let style = labels::class_style(class_id as i64)?;

    let bbox = raw
      .boxes
      .get(index * 4..index * 4 + 4)
      .ok_or(ParseError::TruncatedOutput(index))?;
    let ymin = bbox[0] * INPUT_HEIGHT as f32;
    let xmin = bbox[1] * INPUT_WIDTH as f32;
    let ymax = bbox[2] * INPUT_HEIGHT as f32;
    let xmax = bbox[3] * INPUT_WIDTH as f32;

    parsed.push(BoundingBox {
      label: style.label,
      color: style.color,
      score,
      rect: BoxRect {
        x: xmin,
        y: ymin,
        width: xmax - xmin,
        height: ymax - ymin,
      },
    });
  }

  Ok(parsed)
}

#[cfg(test)]
mod tests {
  use super::*;

  const EPS: f32 = 1e-3;

  fn raw(num: f32, boxes: &[f32], scores: &[f32], classes: &[f32]) -> RawDetections {
    RawDetections {
      num_detection: Box::from([num]),
      boxes: Box::from(boxes),
      scores: Box::from(scores),
      classes: Box::from(classes),
    }
  }

  #[test]
  fn normalized_box_scales_to_pixel_rect() {
    let raw = raw(1.0, &[0.1, 0.2, 0.5, 0.6], &[0.95], &[1.0]);
    let boxes = parse_detections(&raw).unwrap();

    assert_eq!(boxes.len(), 1);
    let rect = &boxes[0].rect;
    assert!((rect.x - 128.0).abs() < EPS);
    assert!((rect.y - 48.0).abs() < EPS);
    assert!((rect.width - 256.0).abs() < EPS);
    assert!((rect.height - 192.0).abs() < EPS);
  }

  #[test]
  fn keeps_leading_detections_in_model_order() {
    let raw = raw(
      3.0,
      &[
        0.0, 0.0, 0.5, 0.5, //
        0.5, 0.5, 1.0, 1.0, //
        0.0, 0.0, 1.0, 1.0,
      ],
      &[0.99, 0.85, 0.81],
      &[1.0, 5.0, 6.0],
    );
    let boxes = parse_detections(&raw).unwrap();

    let labels: Vec<_> = boxes.iter().map(|b| b.label).collect();
    assert_eq!(labels, vec!["y", "r", "w1"]);
  }

  #[test]
  fn stops_at_first_low_score_even_if_later_scores_pass() {
    let raw = raw(
      4.0,
      &[
        0.0, 0.0, 1.0, 1.0, //
        0.0, 0.0, 1.0, 1.0, //
        0.0, 0.0, 1.0, 1.0, //
        0.0, 0.0, 1.0, 1.0,
      ],
      &[0.95, 0.90, 0.70, 0.99],
      &[1.0, 2.0, 3.0, 4.0],
    );
    let boxes = parse_detections(&raw).unwrap();

    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].label, "y");
    assert_eq!(boxes[1].label, "o");
  }

  #[test]
  fn num_detection_bounds_the_scan() {
    let raw = raw(
      1.0,
      &[
        0.0, 0.0, 1.0, 1.0, //
        0.0, 0.0, 1.0, 1.0,
      ],
      &[0.90, 0.99],
      &[1.0, 1.0],
    );
    let boxes = parse_detections(&raw).unwrap();

    assert_eq!(boxes.len(), 1);
  }

  #[test]
  fn all_detections_below_threshold_yield_empty_sequence() {
    let raw = raw(2.0, &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0], &[0.79, 0.5], &[1.0, 2.0]);
    let boxes = parse_detections(&raw).unwrap();

    assert!(boxes.is_empty());
  }

  #[test]
  fn unknown_class_id_is_a_loud_error() {
    let class_seven = raw(1.0, &[0.0, 0.0, 1.0, 1.0], &[0.95], &[7.0]);
    assert!(matches!(
      parse_detections(&class_seven),
      Err(ParseError::Label(LabelError::UnknownClass(7)))
    ));

    let class_zero = raw(1.0, &[0.0, 0.0, 1.0, 1.0], &[0.95], &[0.0]);
    assert!(matches!(
      parse_detections(&class_zero),
      Err(ParseError::Label(LabelError::UnknownClass(0)))
    ));
  }

  #[test]
  fn truncated_output_is_an_error() {
    // num_detection 声称两个检测，但 scores 只有一个
    let short_scores = raw(2.0, &[0.0, 0.0, 1.0, 1.0], &[0.95], &[1.0]);
    assert!(matches!(
      parse_detections(&short_scores),
      Err(ParseError::TruncatedOutput(1))
    ));

    // boxes 数组不足 4 个坐标
    let short_boxes = raw(1.0, &[0.0, 0.0], &[0.95], &[1.0]);
    assert!(matches!(
      parse_detections(&short_boxes),
      Err(ParseError::TruncatedOutput(0))
    ));
  }
}
