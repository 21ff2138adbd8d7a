//! 基础设施：HTTP 传输与日志

pub mod http;
pub mod logger;
