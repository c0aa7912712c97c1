use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_types::errors::{ApiClientError, ConnectorError};
use error_stack::Report;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid host for socket: {0}")]
    AddressError(#[from] std::net::AddrParseError),
    #[error("Invalid connector configuration: {0}")]
    InvalidConnectorConfig(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failure returned by a route, rendered as a JSON error body.
#[derive(Debug)]
pub enum ApiError {
    Connector(Report<ConnectorError>),
    MissingSignature,
}

impl From<Report<ConnectorError>> for ApiError {
    fn from(report: Report<ConnectorError>) -> Self {
        Self::Connector(report)
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingSignature => StatusCode::UNAUTHORIZED,
            Self::Connector(report) => match report.current_context() {
                ConnectorError::MissingRequiredField { .. }
                | ConnectorError::InvalidRequestField { .. }
                | ConnectorError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
                ConnectorError::InvalidSignature => StatusCode::UNAUTHORIZED,
                ConnectorError::GatewayRejected { .. }
                | ConnectorError::ResponseDeserializationFailed => StatusCode::BAD_GATEWAY,
                ConnectorError::NetworkFailure { .. } => {
                    match report.downcast_ref::<ApiClientError>() {
                        Some(ApiClientError::RequestTimeoutReceived) => {
                            StatusCode::GATEWAY_TIMEOUT
                        }
                        _ => StatusCode::BAD_GATEWAY,
                    }
                }
                ConnectorError::RequestEncodingFailed => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Self::MissingSignature => "invalid_signature",
            Self::Connector(report) => match report.current_context() {
                ConnectorError::MissingRequiredField { .. }
                | ConnectorError::InvalidRequestField { .. } => "invalid_request",
                ConnectorError::MalformedPayload { .. } => "malformed_payload",
                ConnectorError::InvalidSignature => "invalid_signature",
                ConnectorError::GatewayRejected { .. } => "gateway_rejected",
                ConnectorError::NetworkFailure { .. } => "network_failure",
                ConnectorError::ResponseDeserializationFailed => "invalid_gateway_response",
                ConnectorError::RequestEncodingFailed => "internal_error",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let (message, gateway_response) = match &self {
            Self::MissingSignature => ("Missing X-VERIFY header".to_string(), None),
            Self::Connector(report) => {
                if status_code.is_server_error() {
                    tracing::error!(error = ?report, "request failed");
                } else if report.current_context().is_validation_error() {
                    tracing::info!(error = %report.current_context(), "request failed validation");
                } else {
                    tracing::warn!(error = %report.current_context(), "request rejected");
                }
                (
                    report.current_context().to_string(),
                    report.current_context().gateway_body(),
                )
            }
        };

        let mut body = json!({
            "error": {
                "type": self.error_type(),
                "message": message,
            }
        });
        if let Some(gateway_response) = gateway_response {
            body["error"]["gateway_response"] = gateway_response;
        }

        (status_code, Json(body)).into_response()
    }
}
