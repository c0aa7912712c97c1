use common_utils::{errors::ValidationError, fp_utils::when, CustomResult};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};

pub const PHONEPE_SANDBOX_BASE_URL: &str = "https://api-preprod.phonepe.com/apis/pg-sandbox/";

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Connectors {
    pub phonepe: PhonepeConnectorParams,
}

/// Merchant credentials and endpoints for the PhonePe gateway.
#[derive(Clone, serde::Deserialize, Debug)]
pub struct PhonepeConnectorParams {
    /// base url, expected to end with `/`
    #[serde(default = "default_phonepe_base_url")]
    pub base_url: String,
    pub merchant_id: String,
    pub salt_key: Secret<String>,
    /// Which salt key version is active on the gateway side
    #[serde(default = "default_salt_index")]
    pub salt_index: u32,
    /// Where the gateway sends the payer back after checkout
    pub redirect_url: String,
    /// Where the gateway posts asynchronous payment notifications
    pub webhook_url: String,
}

fn default_phonepe_base_url() -> String {
    PHONEPE_SANDBOX_BASE_URL.to_string()
}

const fn default_salt_index() -> u32 {
    1
}

impl PhonepeConnectorParams {
    pub fn validate(&self) -> CustomResult<(), ValidationError> {
        when(self.merchant_id.trim().is_empty(), || {
            Err(report!(ValidationError::MissingRequiredField {
                field_name: "connectors.phonepe.merchant_id".to_string(),
            }))
        })?;

        when(self.salt_key.peek().trim().is_empty(), || {
            Err(report!(ValidationError::MissingRequiredField {
                field_name: "connectors.phonepe.salt_key".to_string(),
            }))
        })?;

        for (field_name, value) in [
            ("connectors.phonepe.base_url", &self.base_url),
            ("connectors.phonepe.redirect_url", &self.redirect_url),
            ("connectors.phonepe.webhook_url", &self.webhook_url),
        ] {
            url::Url::parse(value)
                .change_context(ValidationError::IncorrectValueProvided { field_name })
                .attach_printable_lazy(|| format!("`{value}` is not an absolute url"))?;
        }

        Ok(())
    }

    /// Base url with exactly one trailing slash, so endpoint paths can be appended.
    pub fn normalized_base_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, serde::Deserialize, Clone, Default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    /// Upper bound in seconds for a single outgoing call; unset means no limit
    pub request_timeout: Option<u64>,
    #[serde(default)]
    pub bypass_proxy_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PhonepeConnectorParams {
        PhonepeConnectorParams {
            base_url: PHONEPE_SANDBOX_BASE_URL.to_string(),
            merchant_id: "M123".to_string(),
            salt_key: Secret::new("SECRET".to_string()),
            salt_index: 1,
            redirect_url: "https://courses.test/payment/return".to_string(),
            webhook_url: "https://courses.test/api/payments/webhook".to_string(),
        }
    }

    #[test]
    fn valid_params_pass() {
        assert!(params().validate().is_ok());
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let mut missing_merchant = params();
        missing_merchant.merchant_id = " ".to_string();
        assert!(missing_merchant.validate().is_err());

        let mut missing_salt = params();
        missing_salt.salt_key = Secret::new(String::new());
        let error = missing_salt.validate().unwrap_err();
        assert!(matches!(
            error.current_context(),
            ValidationError::MissingRequiredField { field_name } if field_name.ends_with("salt_key")
        ));
    }

    #[test]
    fn relative_redirect_url_is_rejected() {
        let mut relative = params();
        relative.redirect_url = "/payment/return".to_string();
        assert!(relative.validate().is_err());
    }

    #[test]
    fn salt_index_defaults_to_one() {
        let parsed: PhonepeConnectorParams = serde_json::from_value(serde_json::json!({
            "merchant_id": "M123",
            "salt_key": "SECRET",
            "redirect_url": "https://courses.test/r",
            "webhook_url": "https://courses.test/w",
        }))
        .unwrap();
        assert_eq!(parsed.salt_index, 1);
        assert_eq!(parsed.base_url, PHONEPE_SANDBOX_BASE_URL);
    }

    #[test]
    fn base_url_is_normalized() {
        let mut no_slash = params();
        no_slash.base_url = "https://gateway.test/apis".to_string();
        assert_eq!(no_slash.normalized_base_url(), "https://gateway.test/apis/");
        assert_eq!(
            params().normalized_base_url(),
            PHONEPE_SANDBOX_BASE_URL.to_string()
        );
    }
}
