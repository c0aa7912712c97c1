use common_utils::types::MinorUnit;
use hyperswitch_masking::Secret;

/// One checkout attempt, as supplied by the calling application.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Caller-unique id, also the gateway's idempotency key for the transaction
    pub merchant_transaction_id: String,
    pub amount: MinorUnit,
    pub payer_user_id: String,
    pub payer_phone: Secret<String>,
    /// Appended to the redirect url so the frontend can resume where checkout started
    pub return_path: Option<String>,
}

/// Signed webhook exactly as received from the gateway.
#[derive(Debug, Clone)]
pub struct WebhookEnvelope {
    pub base64_payload: String,
    pub received_signature: String,
}
