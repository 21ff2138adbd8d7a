//! # 产品列表客户端
//!
//! 将本地产品列表与远程 CRUD 接口保持同步：
//! - 每次变更后全量重新拉取（或合并服务端返回的实体）
//! - 变更响应状态码的宽松 / 严格检查
//! - 每个操作可配置 HTTP 方法
//! - 用于开发与测试的内存桩服务

pub mod app;
pub mod backend;
pub mod core;
pub mod infrastructure;

pub use app::product::{
    ControllerOptions, Draft, ListState, Product, ProductApi, ProductListController,
    SubmitOutcome,
};
pub use crate::core::config::{load_config, ClientConfig};
pub use crate::core::error::{ClientError, Result};
pub use infrastructure::http::HttpProductApi;
pub use infrastructure::logger::Logger;

/// 根据配置构建连接远程接口的控制器
pub fn connect(config: &ClientConfig) -> Result<ProductListController<HttpProductApi>> {
    let api = HttpProductApi::new(&config.api)?;
    Ok(ProductListController::new(
        api,
        ControllerOptions::from(&config.sync),
    ))
}
