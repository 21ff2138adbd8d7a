//! 基于 reqwest 的远程产品 API

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::app::product::api::{MutationOutcome, ProductApi};
use crate::app::product::model::{DeletePayload, Product, ProductPayload};
use crate::core::config::{ApiConfig, DeleteMethod, UpdateMethod};
use crate::core::error::{ClientError, Result};

/// 远程 PHP 产品接口的 HTTP 实现
#[derive(Clone)]
pub struct HttpProductApi {
    client: Client,
    config: ApiConfig,
}

impl HttpProductApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(format!("创建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn update_method(&self) -> Method {
        match self.config.update_method {
            UpdateMethod::Post => Method::POST,
            UpdateMethod::Put => Method::PUT,
        }
    }

    fn delete_method(&self) -> Method {
        match self.config.delete_method {
            DeleteMethod::Post => Method::POST,
            DeleteMethod::Delete => Method::DELETE,
        }
    }

    /// 发送带 JSON 请求体的变更请求，状态码原样返回
    async fn mutate<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<MutationOutcome> {
        let url = self.config.endpoint(path);
        debug!("{} {}", method, url);

        let response = self.client.request(method.clone(), &url).json(body).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let product = serde_json::from_slice::<Product>(&bytes).ok();

        if !(200..300).contains(&status) {
            warn!("{} {} 返回状态码 {}", method, url, status);
        }

        Ok(MutationOutcome { status, product })
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<Product>> {
        let url = self.config.endpoint(&self.config.list_path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let products = serde_json::from_slice::<Vec<Product>>(&bytes)?;
        Ok(products)
    }

    async fn create(&self, payload: &ProductPayload) -> Result<MutationOutcome> {
        self.mutate(Method::POST, &self.config.create_path, payload)
            .await
    }

    async fn update(&self, payload: &ProductPayload) -> Result<MutationOutcome> {
        self.mutate(self.update_method(), &self.config.update_path, payload)
            .await
    }

    async fn delete(&self, id: i64) -> Result<MutationOutcome> {
        self.mutate(self.delete_method(), &self.config.delete_path, &DeletePayload { id })
            .await
    }
}
