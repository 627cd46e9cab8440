//! # Commands Module / 命令模块
//!
//! One submodule per CLI subcommand: `run` drives a validation pass over a
//! case matrix, `init` scaffolds a starter matrix file.
//!
//! 每个 CLI 子命令一个子模块：`run` 在用例矩阵上驱动一次验证，
//! `init` 搭建一个入门矩阵文件。

pub mod init;
pub mod run;
