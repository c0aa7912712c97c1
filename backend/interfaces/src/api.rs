use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    CustomResult,
};
use domain_types::{errors::ConnectorError, router_response_types::Response};

/// Error details extracted from a non-2xx connector response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub code: String,
    pub message: String,
    pub raw_connector_response: Option<String>,
}

pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// HTTP `Content-Type` to be used for requests.
    /// Defaults to `application/json`.
    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// The base URL for interacting with the connector's API.
    fn base_url(&self) -> &str;

    /// common error response for a connector if it is same in all case
    fn build_error_response(&self, res: Response) -> CustomResult<ErrorResponse, ConnectorError> {
        let raw = (!res.response.is_empty())
            .then(|| String::from_utf8_lossy(&res.response).to_string());
        Ok(ErrorResponse {
            status_code: res.status_code,
            code: NO_ERROR_CODE.to_string(),
            message: NO_ERROR_MESSAGE.to_string(),
            raw_connector_response: raw,
        })
    }
}
