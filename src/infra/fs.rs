//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as preparing report output locations.
//!
//! 此模块提供文件系统操作的实用功能，如准备报告输出位置。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Creates the parent directory of an output file if it does not exist yet,
/// so report writers can target paths like `reports/run/junit.xml` directly.
///
/// 如果输出文件的父目录尚不存在则创建它，
/// 使报告写入器可以直接使用类似 `reports/run/junit.xml` 的路径。
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}
