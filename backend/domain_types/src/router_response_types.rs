use common_enums::AttemptStatus;

/// Raw HTTP response from a connector.
#[derive(Clone, Debug)]
pub struct Response {
    pub headers: Option<http::HeaderMap>,
    pub response: bytes::Bytes,
    pub status_code: u16,
}

/// Result of creating a payment on the gateway.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PaymentInitiationResponse {
    pub raw_response: serde_json::Value,
    /// Hosted pay page the payer must be sent to. Absent when the gateway
    /// accepted the request but did not return one.
    pub payment_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PaymentStatusResponse {
    pub raw_response: serde_json::Value,
    pub status: AttemptStatus,
}

/// Webhook payload that passed signature verification.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DecodedWebhook {
    pub payload: serde_json::Value,
    pub status: AttemptStatus,
}
