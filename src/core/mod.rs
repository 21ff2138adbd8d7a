//! 核心模块：配置与错误

pub mod config;
pub mod error;
