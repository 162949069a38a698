// 该文件是 Dengse （灯色） 项目的一部分。
// src/args.rs - 项目参数配置
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::PathBuf;

use clap::Parser;

/// Dengse 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// ONNX 模型文件路径（缺省为程序目录下的 assets/model/model.onnx）
  #[arg(long, value_name = "FILE")]
  pub model: Option<PathBuf>,

  /// 输入图片目录，仅处理 JPEG 文件（缺省为 assets/img）
  #[arg(long, value_name = "DIR")]
  pub input: Option<PathBuf>,

  /// 标注结果输出目录（缺省为 assets/output）
  #[arg(long, value_name = "DIR")]
  pub output: Option<PathBuf>,
}
