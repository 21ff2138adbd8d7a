//! 桩服务处理器
//!
//! 行为与远程 PHP 接口一致：列表中 `price` 以文本返回，请求中的数值字段可为数字或文本。

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::{error::BackendError, store::ProductStore};
use crate::app::product::model::{NumberOrText, Product};

/// 列表行，模拟 MySQL DECIMAL 列以字符串输出
#[derive(Serialize)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: String,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        Self {
            price: product.display_price(),
            id: product.id,
            name: product.name,
        }
    }
}

/// 新建 / 更新请求
#[derive(Debug, Deserialize)]
pub struct SaveProductRequest {
    #[serde(default)]
    pub id: Option<NumberOrText>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<NumberOrText>,
}

/// 删除请求
#[derive(Debug, Deserialize)]
pub struct DeleteProductRequest {
    #[serde(default)]
    pub id: Option<NumberOrText>,
}

fn require_id(id: Option<&NumberOrText>) -> Result<i64, BackendError> {
    id.ok_or_else(|| BackendError::BadRequest("缺少 id".to_string()))?
        .to_id()
        .map_err(BackendError::BadRequest)
}

fn require_fields(req: &SaveProductRequest) -> Result<(String, f64), BackendError> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| BackendError::BadRequest("名称不能为空".to_string()))?;

    let price = req
        .price
        .as_ref()
        .ok_or_else(|| BackendError::BadRequest("缺少价格".to_string()))?
        .to_price()
        .map_err(BackendError::BadRequest)?;
    if price < 0.0 {
        return Err(BackendError::BadRequest("价格不能为负数".to_string()));
    }

    Ok((name.to_string(), price))
}

/// 获取全部产品
pub async fn list_products(State(store): State<ProductStore>) -> Json<Vec<ProductRow>> {
    Json(store.list().into_iter().map(ProductRow::from).collect())
}

/// 新建产品
pub async fn add_product(
    State(store): State<ProductStore>,
    Json(req): Json<SaveProductRequest>,
) -> Result<(StatusCode, Json<Product>), BackendError> {
    let (name, price) = require_fields(&req)?;
    let product = store.create(name, price);
    Ok((StatusCode::CREATED, Json(product)))
}

/// 更新产品
pub async fn update_product(
    State(store): State<ProductStore>,
    Json(req): Json<SaveProductRequest>,
) -> Result<Json<Product>, BackendError> {
    let id = require_id(req.id.as_ref())?;
    let (name, price) = require_fields(&req)?;
    store
        .update(id, name, price)
        .map(Json)
        .ok_or_else(|| BackendError::NotFound(format!("产品 {} 不存在", id)))
}

/// 删除产品
pub async fn delete_product(
    State(store): State<ProductStore>,
    Json(req): Json<DeleteProductRequest>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let id = require_id(req.id.as_ref())?;
    if store.delete(id) {
        Ok(Json(serde_json::json!({ "deleted": id })))
    } else {
        Err(BackendError::NotFound(format!("产品 {} 不存在", id)))
    }
}

/// 健康检查
pub async fn health_check(State(store): State<ProductStore>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "products_count": store.len(),
    }))
}
