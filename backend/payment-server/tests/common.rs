#![allow(dead_code, clippy::expect_used)]

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use connector_integration::connectors::Phonepe;
use domain_types::types::{PhonepeConnectorParams, Proxy};
use hyperswitch_masking::Secret;
use payment_server::app::{self, AppState};
use tower::ServiceExt;

pub const MERCHANT_ID: &str = "M123";
pub const SALT_KEY: &str = "SECRET";

pub fn phonepe_params(base_url: &str) -> PhonepeConnectorParams {
    PhonepeConnectorParams {
        base_url: base_url.to_string(),
        merchant_id: MERCHANT_ID.to_string(),
        salt_key: Secret::new(SALT_KEY.to_string()),
        salt_index: 1,
        redirect_url: "https://shop.example.com/payment/result".to_string(),
        webhook_url: "https://api.example.com/webhooks/phonepe".to_string(),
    }
}

/// Router wired to a real adapter that talks to `base_url`.
pub fn router_for(base_url: &str) -> Router {
    let adapter = Phonepe::new(phonepe_params(base_url), Proxy::default())
        .expect("valid connector configuration");
    app::router(AppState::new(Arc::new(adapter)))
}

/// Drives one request through the router and returns the status and JSON body.
pub async fn call(router: Router, request: Request<Body>) -> (http::StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).to_string()));
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}
