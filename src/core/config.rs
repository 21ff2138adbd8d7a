//! 客户端配置
//!
//! 加载顺序：默认值 → TOML 配置文件 → 环境变量 `API_BASE`。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 覆盖 `api.base_url` 的环境变量
pub const API_BASE_ENV: &str = "API_BASE";
/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "PRODUCT_CLIENT_CONFIG";

/// 客户端配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 远程 API 配置
    pub api: ApiConfig,
    /// 同步策略配置
    pub sync: SyncConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 展示配置
    pub display: DisplayConfig,
}

/// 远程 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API 根地址
    pub base_url: String,
    pub list_path: String,
    pub create_path: String,
    pub update_path: String,
    pub delete_path: String,
    /// 更新请求使用的 HTTP 方法
    pub update_method: UpdateMethod,
    /// 删除请求使用的 HTTP 方法
    pub delete_method: DeleteMethod,
    /// 请求超时时间（秒），0 表示不设置超时
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateMethod {
    #[default]
    Post,
    Put,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeleteMethod {
    #[default]
    Post,
    Delete,
}

/// 变更请求的响应状态检查方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationCheck {
    /// 忽略状态码，始终清空表单并重新加载
    #[default]
    Lenient,
    /// 非 2xx 状态码视为失败
    Strict,
}

/// 变更成功后本地快照的同步方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// 每次变更后全量重新拉取
    #[default]
    Reload,
    /// 将服务端返回的实体合并进快照，无返回实体时退回全量拉取
    Merge,
}

/// 同步策略配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub mutation_check: MutationCheck,
    pub policy: SyncPolicy,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 展示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 价格前的货币符号
    pub currency: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3001/api".to_string(),
            list_path: "getProduct.php".to_string(),
            create_path: "addProduct.php".to_string(),
            update_path: "updateProduct.php".to_string(),
            delete_path: "deleteProduct.php".to_string(),
            update_method: UpdateMethod::default(),
            delete_method: DeleteMethod::default(),
            timeout_seconds: 15,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "₱".to_string(),
        }
    }
}

impl ApiConfig {
    /// 拼接根地址与端点文件名
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl ClientConfig {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: ClientConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("使用环境变量 {} 覆盖 API 地址: {}", API_BASE_ENV, base);
            self.api.base_url = base.trim().to_string();
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::Validation(format!("无效的 API 地址: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "API 地址必须使用 http 或 https: {}",
                self.api.base_url
            )));
        }

        let paths = [
            ("list_path", &self.api.list_path),
            ("create_path", &self.api.create_path),
            ("update_path", &self.api.update_path),
            ("delete_path", &self.api.delete_path),
        ];
        for (key, value) in paths {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{} 不能为空", key)));
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 查找配置文件：显式路径 → `PRODUCT_CLIENT_CONFIG` → 默认位置
fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    ["config.toml", "./config/config.toml"]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// 从文件或默认值加载配置，并应用环境变量覆盖与校验
pub fn load_config(explicit: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let mut config = match locate_config_file(explicit) {
        Some(path) => {
            info!("从配置文件加载: {}", path.display());
            ClientConfig::load_from_file(&path)?
        }
        None => {
            info!("未找到配置文件，使用默认配置");
            ClientConfig::default()
        }
    };

    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}
