//! 客户端错误类型

use crate::core::config::ConfigError;

/// 客户端错误类型
///
/// 状态码类错误的显示文本即为用户可见的错误信息（如 `Error: 500`）。
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 网络层失败（连接、超时等）
    #[error("{0}")]
    Network(String),
    /// 列表请求返回了非成功状态码
    #[error("Error: {0}")]
    Status(u16),
    /// 响应体无法解析
    #[error("invalid response: {0}")]
    Decode(String),
    /// 严格模式下变更请求返回了非成功状态码
    #[error("Error: {0}")]
    Mutation(u16),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Status(status.as_u16())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
