use axum::{
    extract::{Path, State},
    Json,
};
use common_enums::AttemptStatus;
use common_utils::types::MinorUnit;
use domain_types::router_request_types::PaymentRequest;
use hyperswitch_masking::Secret;
use interfaces::connector_types::{PaymentAuthorize, PaymentSync, TransactionIdGenerator};
use serde::{Deserialize, Serialize};

use crate::{app::AppState, consts, error::ApiError, logger};

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub payer_user_id: String,
    pub payer_phone: Secret<String>,
    pub amount: MinorUnit,
    pub return_path: Option<String>,
    /// Minted by the server when the caller does not bring its own
    pub merchant_transaction_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub merchant_transaction_id: String,
    pub payment_url: Option<String>,
    pub gateway_response: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct PaymentStatusResponse {
    pub merchant_transaction_id: String,
    pub status: AttemptStatus,
    pub gateway_response: serde_json::Value,
}

#[logger::instrument(skip_all, fields(merchant_transaction_id = tracing::field::Empty))]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<Json<CreatePaymentResponse>, ApiError> {
    let merchant_transaction_id = payload
        .merchant_transaction_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| {
            state
                .adapter
                .generate_transaction_id(consts::TRANSACTION_ID_PREFIX)
        });
    tracing::Span::current().record(
        "merchant_transaction_id",
        merchant_transaction_id.as_str(),
    );

    let request = PaymentRequest {
        merchant_transaction_id: merchant_transaction_id.clone(),
        amount: payload.amount,
        payer_user_id: payload.payer_user_id,
        payer_phone: payload.payer_phone,
        return_path: payload.return_path,
    };

    let response = state.adapter.initiate_payment(request).await?;
    logger::info!(
        has_payment_url = response.payment_url.is_some(),
        "payment initiated"
    );

    Ok(Json(CreatePaymentResponse {
        merchant_transaction_id,
        payment_url: response.payment_url,
        gateway_response: response.raw_response,
    }))
}

#[logger::instrument(skip(state))]
pub async fn payment_status(
    State(state): State<AppState>,
    Path(merchant_transaction_id): Path<String>,
) -> Result<Json<PaymentStatusResponse>, ApiError> {
    let response = state.adapter.check_status(&merchant_transaction_id).await?;
    logger::info!(status = ?response.status, "payment status fetched");

    Ok(Json(PaymentStatusResponse {
        merchant_transaction_id,
        status: response.status,
        gateway_response: response.raw_response,
    }))
}
