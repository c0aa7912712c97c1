#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ApiClientError {
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("URL encoding of request payload failed")]
    UrlEncodingFailed,
    #[error("Failed to send request to connector {0}")]
    RequestNotSent(String),
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("connection closed before a message could complete")]
    ConnectionClosedIncompleteMessage,
}

/// Failure kinds surfaced by a payment gateway adapter.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ConnectorError {
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Invalid value for field {field_name}: {reason}")]
    InvalidRequestField {
        field_name: &'static str,
        reason: String,
    },
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Could not reach the payment gateway: {message}")]
    NetworkFailure { message: String },
    #[error("Payment gateway rejected the request with status {status_code}")]
    GatewayRejected {
        status_code: u16,
        body: Option<String>,
    },
    #[error("Webhook signature does not match the expected checksum")]
    InvalidSignature,
    #[error("Webhook payload could not be decoded: {reason}")]
    MalformedPayload { reason: String },
}

impl ConnectorError {
    /// Failures caused by the request contents rather than the gateway or transport.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. } | Self::InvalidRequestField { .. }
        )
    }

    /// The gateway's error body parsed as JSON, or wrapped as a string when it is not JSON.
    pub fn gateway_body(&self) -> Option<serde_json::Value> {
        match self {
            Self::GatewayRejected {
                body: Some(body), ..
            } => Some(
                serde_json::from_str(body)
                    .unwrap_or_else(|_| serde_json::Value::String(body.clone())),
            ),
            _ => None,
        }
    }
}
