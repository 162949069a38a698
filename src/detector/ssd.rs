// 该文件是 Dengse （灯色） 项目的一部分。
// src/detector/ssd.rs - SSD 目标检测器（ONNX 推理）
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use image::RgbImage;
use tracing::{debug, info};
use tract_onnx::prelude::*;

use super::{INPUT_HEIGHT, INPUT_WIDTH, RawDetections};

// 张量名沿用 TensorFlow 导出模型的命名
const INPUT_TENSOR: &str = "image_tensor:0";
const OUTPUT_NUM: &str = "num_detections:0";
const OUTPUT_BOXES: &str = "detection_boxes:0";
const OUTPUT_SCORES: &str = "detection_scores:0";
const OUTPUT_CLASSES: &str = "detection_classes:0";

/// SSD 目标检测器
///
/// 输入为 640x480 的 RGB 图像，像素按 uint8 交错排列，
/// 输出为四个按检测序号对齐的数组。
pub struct SsdDetector {
  plan: TypedRunnableModel<TypedModel>,
}

impl SsdDetector {
  /// 加载 ONNX 模型并构建推理计划，模型文件缺失或无效时直接失败
  pub fn new(model_path: &Path) -> Result<Self> {
    info!("加载模型文件: {}", model_path.display());

    let plan = tract_onnx::onnx()
      .model_for_path(model_path)
      .with_context(|| format!("无法加载模型: {}", model_path.display()))?
      .with_input_names([INPUT_TENSOR])
      .context("无法设置输入张量名")?
      .with_input_fact(
        0,
        InferenceFact::dt_shape(
          u8::datum_type(),
          tvec!(1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize, 3),
        ),
      )
      .context("无法设置输入张量形状")?
      .with_output_names([OUTPUT_NUM, OUTPUT_BOXES, OUTPUT_SCORES, OUTPUT_CLASSES])
      .context("无法设置输出张量名")?
      .into_optimized()
      .context("模型优化失败")?
      .into_runnable()
      .context("无法构建推理计划")?;

    info!("模型加载完成");

    Ok(Self { plan })
  }

  /// 对单张图片执行推理，返回模型的原始输出
  pub fn detect(&self, image: &RgbImage) -> Result<RawDetections> {
    if image.width() != INPUT_WIDTH || image.height() != INPUT_HEIGHT {
      return Err(anyhow!(
        "输入图片尺寸 {}x{} 与模型输入 {}x{} 不符",
        image.width(),
        image.height(),
        INPUT_WIDTH,
        INPUT_HEIGHT
      ));
    }

    debug!("构建输入张量");
    let input = tract_ndarray::Array4::from_shape_vec(
      (1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize, 3),
      image.as_raw().clone(),
    )
    .context("像素数据长度与张量形状不符")?;

    debug!("执行模型推理");
    let outputs = self.plan.run(tvec!(input.into_tensor().into()))?;

    Ok(RawDetections {
      num_detection: output_to_f32(&outputs, 0).context("读取 num_detections 输出失败")?,
      boxes: output_to_f32(&outputs, 1).context("读取 detection_boxes 输出失败")?,
      scores: output_to_f32(&outputs, 2).context("读取 detection_scores 输出失败")?,
      classes: output_to_f32(&outputs, 3).context("读取 detection_classes 输出失败")?,
    })
  }
}

fn output_to_f32(outputs: &TVec<TValue>, index: usize) -> Result<Box<[f32]>> {
  let tensor = outputs
    .get(index)
    .ok_or_else(|| anyhow!("模型缺少第 {} 个输出", index))?;
  let view = tensor
    .to_array_view::<f32>()
    .context("输出张量不是 f32 类型")?;

  Ok(view.iter().copied().collect())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_model_file_fails_at_construction() {
    let result = SsdDetector::new(Path::new("/no/such/model.onnx"));
    assert!(result.is_err());
  }
}
