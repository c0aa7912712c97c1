use base64::Engine;
use common_enums::{AttemptStatus, PaymentInstrumentType, RedirectMode};
use common_utils::{
    crypto::{self, VerifySignature},
    errors::CryptoError,
    ext_traits::Encode,
    fp_utils::generate_id_with_default_len,
    types::MinorUnit,
    CustomResult,
};
use domain_types::{
    errors, router_request_types::PaymentRequest, types::PhonepeConnectorParams,
};
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use super::constants;
use crate::utils;

type Error = error_stack::Report<errors::ConnectorError>;

// ===== ROUTER DATA =====

pub struct PhonepeRouterData<'a> {
    pub params: &'a PhonepeConnectorParams,
    pub request: &'a PaymentRequest,
}

// ===== REQUEST STRUCTURES =====

/// Body of the pay call together with the checksum that goes into `X-VERIFY`.
#[derive(Debug, Serialize)]
pub struct PhonepePaymentsRequest {
    request: Secret<String>,
    #[serde(skip)]
    pub checksum: String,
}

impl PhonepePaymentsRequest {
    pub fn base64_payload(&self) -> &str {
        self.request.peek()
    }
}

#[derive(Debug, Serialize)]
struct PhonepePaymentRequestPayload {
    #[serde(rename = "merchantId")]
    merchant_id: Secret<String>,
    #[serde(rename = "merchantTransactionId")]
    merchant_transaction_id: String,
    #[serde(rename = "merchantUserId")]
    merchant_user_id: String,
    amount: MinorUnit,
    #[serde(rename = "redirectUrl")]
    redirect_url: String,
    #[serde(rename = "redirectMode")]
    redirect_mode: RedirectMode,
    #[serde(rename = "callbackUrl")]
    callback_url: String,
    #[serde(rename = "mobileNumber", skip_serializing_if = "Option::is_none")]
    mobile_number: Option<Secret<String>>,
    #[serde(rename = "paymentInstrument")]
    payment_instrument: PhonepePaymentInstrument,
}

#[derive(Debug, Serialize)]
struct PhonepePaymentInstrument {
    #[serde(rename = "type")]
    instrument_type: PaymentInstrumentType,
}

// ===== RESPONSE STRUCTURES =====

/// Envelope shared by the pay, status and webhook payloads. Every field is
/// optional so a partially filled body still yields what it does contain.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PhonepePaymentsResponse {
    pub success: Option<bool>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub data: Option<PhonepeResponseData>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PhonepeResponseData {
    #[serde(rename = "merchantId", skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    #[serde(rename = "merchantTransactionId", skip_serializing_if = "Option::is_none")]
    pub merchant_transaction_id: Option<String>,
    #[serde(rename = "transactionId", skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "responseCode", skip_serializing_if = "Option::is_none")]
    pub response_code: Option<String>,
    #[serde(rename = "instrumentResponse", skip_serializing_if = "Option::is_none")]
    pub instrument_response: Option<PhonepeInstrumentResponse>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PhonepeInstrumentResponse {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub instrument_type: Option<String>,
    #[serde(rename = "redirectInfo", skip_serializing_if = "Option::is_none")]
    pub redirect_info: Option<PhonepeRedirectInfo>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PhonepeRedirectInfo {
    pub url: Option<String>,
    pub method: Option<String>,
}

impl PhonepePaymentsResponse {
    /// `data.instrumentResponse.redirectInfo.url`
    pub fn redirect_url(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.instrument_response.as_ref())
            .and_then(|instrument| instrument.redirect_info.as_ref())
            .and_then(|redirect| redirect.url.as_deref())
    }

    pub fn attempt_status(&self) -> AttemptStatus {
        self.code
            .as_deref()
            .map(PhonepeResponseCode::from_code)
            .map(AttemptStatus::from)
            .unwrap_or(AttemptStatus::Pending)
    }
}

/// Gateway result codes carried in the `code` field.
#[derive(Debug, Clone, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PhonepeResponseCode {
    PaymentInitiated,
    PaymentSuccess,
    PaymentPending,
    PaymentError,
    PaymentDeclined,
    PaymentCancelled,
    TimedOut,
    TransactionNotFound,
    BadRequest,
    AuthorizationFailed,
    InternalServerError,
    #[strum(default)]
    Unknown(String),
}

impl PhonepeResponseCode {
    pub fn from_code(code: &str) -> Self {
        code.parse()
            .unwrap_or_else(|_| Self::Unknown(code.to_string()))
    }
}

impl From<PhonepeResponseCode> for AttemptStatus {
    fn from(code: PhonepeResponseCode) -> Self {
        match code {
            PhonepeResponseCode::PaymentInitiated => Self::AuthenticationPending,
            PhonepeResponseCode::PaymentSuccess => Self::Charged,
            PhonepeResponseCode::PaymentPending | PhonepeResponseCode::InternalServerError => {
                Self::Pending
            }
            PhonepeResponseCode::PaymentError
            | PhonepeResponseCode::PaymentDeclined
            | PhonepeResponseCode::PaymentCancelled
            | PhonepeResponseCode::TimedOut
            | PhonepeResponseCode::TransactionNotFound
            | PhonepeResponseCode::BadRequest
            | PhonepeResponseCode::AuthorizationFailed => Self::Failure,
            PhonepeResponseCode::Unknown(code) => {
                tracing::warn!(code = %code, "unrecognised PhonePe response code");
                Self::Pending
            }
        }
    }
}

// ===== REQUEST BUILDING =====

impl TryFrom<&PhonepeRouterData<'_>> for PhonepePaymentsRequest {
    type Error = Error;

    fn try_from(item: &PhonepeRouterData<'_>) -> Result<Self, Self::Error> {
        let request = item.request;
        let auth = PhonepeAuthType::from(item.params);

        utils::validate_url_safe_identifier(
            "merchant_transaction_id",
            &request.merchant_transaction_id,
            constants::MAX_MERCHANT_TRANSACTION_ID_LENGTH,
        )?;

        let amount = request.amount.validate_positive().map_err(|error| {
            let reason = error.current_context().to_string();
            error.change_context(errors::ConnectorError::InvalidRequestField {
                field_name: "amount",
                reason,
            })
        })?;

        let redirect_url = build_redirect_url(
            &item.params.redirect_url,
            &request.merchant_transaction_id,
            request.return_path.as_deref(),
        )?;

        let mobile_number = Some(request.payer_phone.peek().trim())
            .filter(|phone| !phone.is_empty())
            .map(|phone| Secret::new(phone.to_string()));

        let payload = PhonepePaymentRequestPayload {
            merchant_id: auth.merchant_id.clone(),
            merchant_transaction_id: request.merchant_transaction_id.clone(),
            merchant_user_id: merchant_user_id(&request.payer_user_id),
            amount,
            redirect_url,
            redirect_mode: RedirectMode::Post,
            callback_url: item.params.webhook_url.clone(),
            mobile_number,
            payment_instrument: PhonepePaymentInstrument {
                instrument_type: PaymentInstrumentType::PayPage,
            },
        };

        let json_payload = payload
            .encode_to_string_of_json()
            .change_context(errors::ConnectorError::RequestEncodingFailed)?;

        let base64_payload = base64::engine::general_purpose::STANDARD.encode(&json_payload);

        let api_path = format!("/{}", constants::API_PAY_ENDPOINT);
        let checksum =
            generate_phonepe_checksum(&base64_payload, &api_path, &auth.salt_key, &auth.key_index)?;

        Ok(Self {
            request: Secret::new(base64_payload),
            checksum,
        })
    }
}

/// Configured redirect url with the transaction id (and optional return
/// path) appended as query parameters.
fn build_redirect_url(
    redirect_url: &str,
    merchant_transaction_id: &str,
    return_path: Option<&str>,
) -> Result<String, Error> {
    let mut url = url::Url::parse(redirect_url)
        .change_context(errors::ConnectorError::RequestEncodingFailed)
        .attach_printable("configured redirect url is not a valid url")?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair(
            constants::REDIRECT_TRANSACTION_ID_PARAM,
            merchant_transaction_id,
        );
        if let Some(path) = return_path.filter(|path| !path.is_empty()) {
            query.append_pair(constants::REDIRECT_RETURN_PATH_PARAM, path);
        }
    }

    Ok(url.to_string())
}

/// Payer identifier sent as `merchantUserId`, derived from the caller's user id.
fn merchant_user_id(payer_user_id: &str) -> String {
    let sanitized: String = payer_user_id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(constants::MAX_MERCHANT_USER_ID_LENGTH - constants::MERCHANT_USER_ID_PREFIX.len())
        .collect();

    if sanitized.is_empty() {
        generate_id_with_default_len(constants::MERCHANT_USER_ID_PREFIX)
    } else {
        format!("{}{}", constants::MERCHANT_USER_ID_PREFIX, sanitized)
    }
}

// ===== AUTHENTICATION =====

#[derive(Debug)]
pub struct PhonepeAuthType {
    pub merchant_id: Secret<String>,
    pub salt_key: Secret<String>,
    pub key_index: String,
}

impl From<&PhonepeConnectorParams> for PhonepeAuthType {
    fn from(params: &PhonepeConnectorParams) -> Self {
        Self {
            merchant_id: Secret::new(params.merchant_id.clone()),
            salt_key: params.salt_key.clone(),
            key_index: params.salt_index.to_string(),
        }
    }
}

// ===== CHECKSUM =====

/// `hex(SHA256(payload || api_path || salt_key)) + "###" + key_index`
///
/// Status calls pass an empty payload; webhook checks pass an empty path.
pub fn generate_phonepe_checksum(
    payload: &str,
    api_path: &str,
    salt_key: &Secret<String>,
    key_index: &str,
) -> Result<String, Error> {
    let checksum_input = format!("{}{}{}", payload, api_path, salt_key.peek());

    let hash = crypto::Sha256
        .hex_digest(checksum_input.as_bytes())
        .change_context(errors::ConnectorError::RequestEncodingFailed)?;

    Ok(format!(
        "{}{}{}",
        hash,
        constants::CHECKSUM_SEPARATOR,
        key_index
    ))
}

/// Webhook checksum check: the expected header is recomputed from the raw
/// payload and the salt key, and compared in constant time.
#[derive(Debug, Clone)]
pub struct PhonepeWebhookChecksum {
    pub key_index: String,
}

impl VerifySignature for PhonepeWebhookChecksum {
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError> {
        let mut input = Vec::with_capacity(msg.len() + secret.len());
        input.extend_from_slice(msg);
        input.extend_from_slice(secret);

        let expected = format!(
            "{}{}{}",
            crypto::Sha256.hex_digest(&input)?,
            constants::CHECKSUM_SEPARATOR,
            self.key_index
        );

        Ok(crypto::constant_time_eq(expected.as_bytes(), signature))
    }
}

/// Decodes a webhook payload whose signature has already been verified.
pub fn decode_webhook_payload(base64_payload: &str) -> Result<serde_json::Value, Error> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(base64_payload.trim())
        .map_err(|error| {
            error_stack::report!(errors::ConnectorError::MalformedPayload {
                reason: format!("invalid base64: {error}"),
            })
        })?;

    serde_json::from_slice::<serde_json::Value>(&decoded).map_err(|error| {
        error_stack::report!(errors::ConnectorError::MalformedPayload {
            reason: format!("invalid json: {error}"),
        })
    })
}
