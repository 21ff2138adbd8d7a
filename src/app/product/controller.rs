//! 产品列表控制器
//!
//! 维护两个相互独立的状态切片：列表状态（远程集合的快照）与表单草稿，
//! 二者只通过 `start_edit` 关联。

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::api::{MutationOutcome, ProductApi};
use super::model::{Draft, Product};
use crate::core::config::{MutationCheck, SyncConfig, SyncPolicy};
use crate::core::error::{ClientError, Result};

/// 控制器行为选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    pub mutation_check: MutationCheck,
    pub sync_policy: SyncPolicy,
}

impl From<&SyncConfig> for ControllerOptions {
    fn from(config: &SyncConfig) -> Self {
        Self {
            mutation_check: config.mutation_check,
            sync_policy: config.policy,
        }
    }
}

/// 列表状态切片
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    /// 最近一次成功拉取的完整快照
    pub products: Vec<Product>,
    pub loading: bool,
    /// 用户可见的错误信息
    pub error: Option<String>,
    /// 最近一次成功全量拉取的时间
    pub synced_at: Option<DateTime<Utc>>,
}

/// 表单状态切片
pub type DraftState = Draft;

/// `submit` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 草稿不完整，未发送任何请求
    Skipped,
    Created,
    Updated,
}

enum Change {
    Upsert,
    Remove(i64),
}

pub struct ProductListController<A> {
    api: A,
    options: ControllerOptions,
    list: ListState,
    draft: DraftState,
    state: watch::Sender<ListState>,
}

impl<A: ProductApi> ProductListController<A> {
    pub fn new(api: A, options: ControllerOptions) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self {
            api,
            options,
            list: ListState::default(),
            draft: DraftState::default(),
            state,
        }
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn products(&self) -> &[Product] {
        &self.list.products
    }

    pub fn is_loading(&self) -> bool {
        self.list.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error.as_deref()
    }

    /// 订阅列表状态；每次变更都会发布最新快照，界面据此重新渲染
    ///
    /// 请求进行中也能读到 `loading == true` 的状态。
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    fn notify(&self) {
        self.state.send_replace(self.list.clone());
    }

    /// 全量拉取列表并替换本地快照
    ///
    /// 失败时保留原快照并记录错误信息；无论成功与否都会清除 `loading`。
    pub async fn load(&mut self) -> Result<()> {
        self.list.loading = true;
        self.notify();

        let result = self.api.list().await;

        let result = match result {
            Ok(products) => {
                info!("产品列表已同步: {} 条", products.len());
                self.list.products = products;
                self.list.error = None;
                self.list.synced_at = Some(Utc::now());
                Ok(())
            }
            Err(err) => {
                warn!("产品列表加载失败: {}", err);
                self.list.error = Some(error_message(&err));
                Err(err)
            }
        };

        self.list.loading = false;
        self.notify();
        result
    }

    /// 提交草稿：编辑模式下更新，否则新建
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if !self.draft.is_submittable() {
            debug!("草稿不完整，跳过提交");
            return Ok(SubmitOutcome::Skipped);
        }

        let payload = self.draft.to_payload();
        let (kind, result) = match payload.id {
            Some(id) => {
                debug!("更新产品 #{}", id);
                (SubmitOutcome::Updated, self.api.update(&payload).await)
            }
            None => {
                debug!("新建产品 {}", payload.name);
                (SubmitOutcome::Created, self.api.create(&payload).await)
            }
        };

        let outcome = self.check(result)?;

        self.draft.clear();
        self.notify();

        self.resync(Change::Upsert, &outcome).await?;
        Ok(kind)
    }

    /// 删除产品，不做确认，也不做乐观移除
    pub async fn remove(&mut self, id: i64) -> Result<()> {
        debug!("删除产品 #{}", id);
        let result = self.api.delete(id).await;
        let outcome = self.check(result)?;
        self.resync(Change::Remove(id), &outcome).await
    }

    /// 进入编辑模式，纯本地操作
    pub fn start_edit(&mut self, product: &Product) {
        self.draft.seed_from(product);
        self.notify();
    }

    /// 退出编辑模式并清空表单
    pub fn cancel_edit(&mut self) {
        self.draft.clear();
        self.notify();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.notify();
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.draft.price = price.into();
        self.notify();
    }

    /// 按检查策略处理变更结果；失败时写入错误信息，草稿保持不变
    fn check(&mut self, result: Result<MutationOutcome>) -> Result<MutationOutcome> {
        let err = match result {
            Ok(outcome) if outcome.is_success() => return Ok(outcome),
            Ok(outcome) => match self.options.mutation_check {
                MutationCheck::Lenient => {
                    warn!("变更请求返回状态码 {}，宽松模式下忽略", outcome.status);
                    return Ok(outcome);
                }
                MutationCheck::Strict => ClientError::Mutation(outcome.status),
            },
            Err(err) => err,
        };

        warn!("变更请求失败: {}", err);
        self.list.error = Some(error_message(&err));
        self.notify();
        Err(err)
    }

    /// 变更后的同步：合并模式下直接应用服务端返回的实体，否则全量拉取
    async fn resync(&mut self, change: Change, outcome: &MutationOutcome) -> Result<()> {
        if self.options.sync_policy == SyncPolicy::Merge && outcome.is_success() {
            let merged = match change {
                Change::Upsert => match &outcome.product {
                    Some(product) => {
                        self.upsert(product.clone());
                        true
                    }
                    None => false,
                },
                Change::Remove(id) => {
                    self.list.products.retain(|p| p.id != id);
                    true
                }
            };

            if merged {
                self.list.error = None;
                self.notify();
                return Ok(());
            }
            debug!("响应中没有产品实体，退回全量拉取");
        }

        self.load().await
    }

    fn upsert(&mut self, product: Product) {
        match self.list.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.list.products.push(product),
        }
    }
}

fn error_message(err: &ClientError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}
