#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use axum::{body::Body, http::Request};
use http::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{header, header_exists, method, path, path_regex},
    Mock, MockServer, ResponseTemplate,
};

mod common;

fn create_payment_body(merchant_transaction_id: Option<&str>, amount: i64) -> serde_json::Value {
    json!({
        "payer_user_id": "64f1c0ffee",
        "payer_phone": "9999999999",
        "amount": amount,
        "return_path": "/courses/rust-101",
        "merchant_transaction_id": merchant_transaction_id,
    })
}

#[tokio::test]
async fn create_payment_returns_the_pay_page_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pg/v1/pay"))
        .and(header_exists("X-VERIFY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": "PAYMENT_INITIATED",
            "data": {
                "instrumentResponse": {
                    "type": "PAY_PAGE",
                    "redirectInfo": { "url": "https://pay.example/abc", "method": "GET" }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = common::call(
        common::router_for(&server.uri()),
        common::json_request("POST", "/payments", create_payment_body(Some("TXN_100"), 49900)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["merchant_transaction_id"], "TXN_100");
    assert_eq!(body["payment_url"], "https://pay.example/abc");
    assert_eq!(body["gateway_response"]["code"], "PAYMENT_INITIATED");
}

#[tokio::test]
async fn create_payment_mints_a_transaction_id_when_absent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pg/v1/pay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let (status, body) = common::call(
        common::router_for(&server.uri()),
        common::json_request("POST", "/payments", create_payment_body(None, 100)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["merchant_transaction_id"]
        .as_str()
        .unwrap()
        .starts_with("TXN_"));
    assert!(body["payment_url"].is_null());
}

#[tokio::test]
async fn invalid_amount_is_a_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = common::call(
        common::router_for(&server.uri()),
        common::json_request("POST", "/payments", create_payment_body(Some("TXN_101"), 0)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn gateway_rejection_is_a_bad_gateway_with_the_gateway_body() {
    let server = MockServer::start().await;
    let gateway_body = json!({
        "success": false,
        "code": "BAD_REQUEST",
        "message": "Please check the inputs you have provided."
    });
    Mock::given(method("POST"))
        .and(path("/pg/v1/pay"))
        .respond_with(ResponseTemplate::new(400).set_body_json(gateway_body.clone()))
        .mount(&server)
        .await;

    let (status, body) = common::call(
        common::router_for(&server.uri()),
        common::json_request("POST", "/payments", create_payment_body(Some("TXN_102"), 100)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["type"], "gateway_rejected");
    assert_eq!(body["error"]["gateway_response"], gateway_body);
}

#[tokio::test]
async fn unreachable_gateway_is_a_bad_gateway() {
    let (status, body) = common::call(
        common::router_for("http://127.0.0.1:9/"),
        common::json_request("POST", "/payments", create_payment_body(Some("TXN_103"), 100)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["type"], "network_failure");
}

#[tokio::test]
async fn payment_status_maps_the_gateway_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/pg/v1/status/{}/TXN_104", common::MERCHANT_ID)))
        .and(header("X-MERCHANT-ID", common::MERCHANT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": "PAYMENT_SUCCESS",
            "data": { "merchantTransactionId": "TXN_104", "state": "COMPLETED" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = common::call(
        common::router_for(&server.uri()),
        Request::builder()
            .uri("/payments/TXN_104/status")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["merchant_transaction_id"], "TXN_104");
    assert_eq!(body["status"], "charged");
    assert_eq!(body["gateway_response"]["data"]["state"], "COMPLETED");
}

#[tokio::test]
async fn payment_status_rejection_carries_the_gateway_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/pg/v1/status/.*$"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let (status, body) = common::call(
        common::router_for(&server.uri()),
        Request::builder()
            .uri("/payments/TXN_105/status")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["gateway_response"], "internal error");
}
