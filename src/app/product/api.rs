//! 远程产品 API 抽象

use async_trait::async_trait;

use super::model::{Product, ProductPayload};
use crate::core::error::Result;

/// 变更请求的结果
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// HTTP 状态码
    pub status: u16,
    /// 响应体能解析为产品时，服务端返回的实体表示
    pub product: Option<Product>,
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 产品 CRUD 接口
///
/// 列表请求的非成功状态码返回 `Err`；变更请求只有网络层失败才返回 `Err`，
/// 状态码交由调用方按检查策略处理。
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>>;

    async fn create(&self, payload: &ProductPayload) -> Result<MutationOutcome>;

    async fn update(&self, payload: &ProductPayload) -> Result<MutationOutcome>;

    async fn delete(&self, id: i64) -> Result<MutationOutcome>;
}

#[async_trait]
impl<T: ProductApi + ?Sized> ProductApi for std::sync::Arc<T> {
    async fn list(&self) -> Result<Vec<Product>> {
        (**self).list().await
    }

    async fn create(&self, payload: &ProductPayload) -> Result<MutationOutcome> {
        (**self).create(payload).await
    }

    async fn update(&self, payload: &ProductPayload) -> Result<MutationOutcome> {
        (**self).update(payload).await
    }

    async fn delete(&self, id: i64) -> Result<MutationOutcome> {
        (**self).delete(id).await
    }
}
