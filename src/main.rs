// 该文件是 Dengse （灯色） 项目的一部分。
// src/main.rs - 项目主程序
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

mod args;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use dengse::detector::SsdDetector;
use dengse::input::ImageFolderSource;
use dengse::output::ImageOutput;
use dengse::parse::parse_detections;
use dengse::utils;

const DEFAULT_MODEL: &str = "assets/model/model.onnx";
const DEFAULT_INPUT: &str = "assets/img";
const DEFAULT_OUTPUT: &str = "assets/output";

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  let model_path = resolve(args.model, DEFAULT_MODEL)?;
  let input_dir = resolve(args.input, DEFAULT_INPUT)?;
  let output_dir = resolve(args.output, DEFAULT_OUTPUT)?;

  println!("Dengse 信号灯检测");
  println!("================");
  println!("模型文件路径: {}", model_path.display());
  println!("输入目录: {}", input_dir.display());
  println!("输出目录: {}", output_dir.display());
  println!();

  // 模型与字体在处理任何图片前加载，缺失即退出
  let now = Instant::now();
  let detector = SsdDetector::new(&model_path)?;
  let output = ImageOutput::new(output_dir.clone())?;
  println!("模型加载耗时: {:.2}ms", elapsed_ms(&now));

  std::fs::create_dir_all(&output_dir)
    .with_context(|| format!("无法创建输出目录: {}", output_dir.display()))?;

  let mut image_count = 0u64;
  let mut box_count = 0usize;

  for frame_result in ImageFolderSource::new(&input_dir)? {
    let frame = match frame_result {
      Ok(frame) => frame,
      Err(err) => {
        warn!("读取图片失败，跳过: {:#}", err);
        continue;
      }
    };

    let now = Instant::now();
    let raw = detector.detect(&frame.image)?;
    let boxes = parse_detections(&raw)?;
    let top_score = raw.scores.first().copied().unwrap_or(0.0);
    box_count += boxes.len();

    let name = frame.name;
    output.write(&name, frame.image, &boxes)?;
    println!("{}: 最高分 {:.4}, 耗时 {:.2}ms", name, top_score, elapsed_ms(&now));
    image_count += 1;
  }

  println!();
  println!("处理完成!");
  println!("总图片数: {}", image_count);
  println!("总检测框数: {}", box_count);

  Ok(())
}

fn resolve(arg: Option<PathBuf>, default_relative: &str) -> Result<PathBuf> {
  match arg {
    Some(path) => Ok(path),
    None => utils::exe_relative(default_relative)
      .with_context(|| format!("无法定位缺省路径: {}", default_relative)),
  }
}

fn elapsed_ms(start: &Instant) -> f64 {
  start.elapsed().as_secs_f64() * 1000.0
}
