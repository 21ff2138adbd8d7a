//! 产品列表：模型、远程接口抽象、控制器与视图

pub mod api;
pub mod controller;
pub mod model;
pub mod view;

pub use api::{MutationOutcome, ProductApi};
pub use controller::{ControllerOptions, DraftState, ListState, ProductListController, SubmitOutcome};
pub use model::{Draft, Product, ProductPayload};
