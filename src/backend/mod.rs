//! 远程产品接口的内存实现
//!
//! 用于本地开发与集成测试，路由与 PHP 端点同名。

pub mod error;
pub mod handler;
pub mod middleware;
pub mod store;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use store::ProductStore;

use handler::{add_product, delete_product, health_check, list_products, update_product};
use middleware::request_logging_middleware;

/// 构建路由
pub fn router(store: ProductStore) -> Router {
    Router::new()
        .route("/api/getProduct.php", get(list_products))
        .route("/api/getProducts.php", get(list_products))
        .route("/api/addProduct.php", post(add_product))
        .route(
            "/api/updateProduct.php",
            post(update_product).put(update_product),
        )
        .route(
            "/api/deleteProduct.php",
            post(delete_product).delete(delete_product),
        )
        .route("/health", get(health_check))
        .layer(from_fn(request_logging_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// 在已绑定的监听器上运行服务
pub async fn serve(listener: TcpListener, store: ProductStore) -> std::io::Result<()> {
    axum::serve(listener, router(store)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_textual_prices() {
        let app = router(ProductStore::seeded([("Pen", 15.5)]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/getProducts.php")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([{"id": 1, "name": "Pen", "price": "15.50"}])
        );
    }

    #[tokio::test]
    async fn test_add_accepts_textual_price() {
        let store = ProductStore::new();
        let app = router(store.clone());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/addProduct.php",
                json!({"name": "Ink", "price": "3.5"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"id": 1, "name": "Ink", "price": 3.5})
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_add_validation() {
        let app = router(ProductStore::new());

        for body in [
            json!({"name": "", "price": 1}),
            json!({"name": "Pen", "price": null}),
            json!({"name": "Pen", "price": -2}),
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/addProduct.php", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_update_with_put_and_post() {
        let store = ProductStore::seeded([("Pen", 15.5)]);
        let app = router(store.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/updateProduct.php",
                json!({"id": 1, "name": "Pen", "price": 16}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/updateProduct.php",
                json!({"id": "9", "name": "Ghost", "price": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "NOT_FOUND");

        assert_eq!(store.list()[0].price, 16.0);
    }

    #[tokio::test]
    async fn test_delete_with_body() {
        let store = ProductStore::seeded([("Pen", 15.5), ("Ink", 3.0)]);
        let app = router(store.clone());

        let response = app
            .clone()
            .oneshot(json_request("DELETE", "/api/deleteProduct.php", json!({"id": 1})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/deleteProduct.php", json!({"id": 2})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request("POST", "/api/deleteProduct.php", json!({"id": 2})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(store.is_empty());
    }
}
