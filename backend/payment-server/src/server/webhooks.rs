use axum::{extract::State, http::HeaderMap, Json};
use common_enums::AttemptStatus;
use domain_types::router_request_types::WebhookEnvelope;
use interfaces::{api::ConnectorCommon, connector_types::IncomingWebhook};
use serde::{Deserialize, Serialize};
use shared_metrics as metrics;

use crate::{app::AppState, consts, error::ApiError, logger};

/// Body the gateway posts to the callback url.
#[derive(Debug, Deserialize)]
pub struct PhonepeWebhookBody {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: AttemptStatus,
    pub payload: serde_json::Value,
}

#[logger::instrument(skip_all)]
pub async fn phonepe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<PhonepeWebhookBody>,
) -> Result<Json<WebhookAck>, ApiError> {
    let Some(received_signature) = headers
        .get(consts::X_VERIFY)
        .and_then(|value| value.to_str().ok())
    else {
        metrics::WEBHOOK_VERIFICATION_FAILURES
            .with_label_values(&[state.adapter.id(), "missing_signature"])
            .inc();
        logger::warn!(security_event = "webhook_signature_missing", "webhook without X-VERIFY");
        return Err(ApiError::MissingSignature);
    };

    let envelope = WebhookEnvelope {
        base64_payload: body.response,
        received_signature: received_signature.to_string(),
    };

    let decoded = state.adapter.verify_and_decode_webhook(&envelope)?;
    logger::info!(
        status = %decoded.status,
        terminal = decoded.status.is_terminal(),
        "webhook accepted"
    );

    Ok(Json(WebhookAck {
        status: decoded.status,
        payload: decoded.payload,
    }))
}
