// 该文件是 Dengse （灯色） 项目的一部分。
// src/utils.rs - 路径工具
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

use std::io;
use std::path::PathBuf;

/// 以可执行文件所在目录为基准解析相对路径
pub fn exe_relative(relative: &str) -> io::Result<PathBuf> {
  let exe = std::env::current_exe()?;
  let dir = exe
    .parent()
    .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "可执行文件没有父目录"))?;

  Ok(dir.join(relative))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exe_relative_joins_the_exe_directory() {
    let path = exe_relative("assets/img").unwrap();
    assert!(path.ends_with("assets/img"));
    assert!(path.is_absolute());
  }
}
