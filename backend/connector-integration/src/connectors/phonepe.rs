pub mod constants;
pub mod headers;
pub mod transformers;


use common_utils::{
    errors::{CustomResult, ValidationError},
    ext_traits::{BytesExt, ValueExt},
    request::{Method, Request, RequestBuilder, RequestContent},
};
use domain_types::{
    errors::{self, ApiClientError},
    router_request_types::{PaymentRequest, WebhookEnvelope},
    router_response_types::{
        DecodedWebhook, PaymentInitiationResponse, PaymentStatusResponse, Response,
    },
    types::{PhonepeConnectorParams, Proxy},
};
use error_stack::{report, ResultExt};
use external_services::service::execute_connector_request;
use hyperswitch_masking::{Mask, Maskable, PeekInterface};
use interfaces::{
    api::{ConnectorCommon, ErrorResponse},
    connector_types,
    verification::SourceVerification,
};
use serde_json::Value;
use shared_metrics as metrics;
use transformers as phonepe;

use self::transformers::{PhonepePaymentsRequest, PhonepePaymentsResponse};
use crate::utils;

/// PhonePe hosted pay page adapter.
///
/// Holds only configuration, so one instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Phonepe {
    params: PhonepeConnectorParams,
    proxy: Proxy,
}

impl Phonepe {
    pub fn new(params: PhonepeConnectorParams, proxy: Proxy) -> CustomResult<Self, ValidationError> {
        params.validate()?;
        Ok(Self { params, proxy })
    }

    fn connector_base_url(&self) -> String {
        self.params.normalized_base_url()
    }

    fn auth(&self) -> phonepe::PhonepeAuthType {
        phonepe::PhonepeAuthType::from(&self.params)
    }

    /// Signed pay call for `request`, ready to be sent.
    pub fn build_payment_request(
        &self,
        request: &PaymentRequest,
    ) -> CustomResult<Request, errors::ConnectorError> {
        let router_data = phonepe::PhonepeRouterData {
            params: &self.params,
            request,
        };
        let connector_req = PhonepePaymentsRequest::try_from(&router_data)?;

        let headers = vec![
            (
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            ),
            (
                headers::X_VERIFY.to_string(),
                connector_req.checksum.clone().into_masked(),
            ),
        ];

        Ok(RequestBuilder::new()
            .method(Method::Post)
            .url(&format!(
                "{}{}",
                self.connector_base_url(),
                constants::API_PAY_ENDPOINT
            ))
            .headers(headers)
            .set_body(RequestContent::Json(Box::new(connector_req)))
            .build())
    }

    /// Signed status query for `merchant_transaction_id`, ready to be sent.
    pub fn build_status_request(
        &self,
        merchant_transaction_id: &str,
    ) -> CustomResult<Request, errors::ConnectorError> {
        utils::validate_url_safe_identifier(
            "merchant_transaction_id",
            merchant_transaction_id,
            constants::MAX_MERCHANT_TRANSACTION_ID_LENGTH,
        )?;

        let auth = self.auth();
        let merchant_id = auth.merchant_id.peek();
        let api_path = format!(
            "/{}/{}/{}",
            constants::API_STATUS_ENDPOINT,
            merchant_id,
            merchant_transaction_id
        );
        let checksum =
            phonepe::generate_phonepe_checksum("", &api_path, &auth.salt_key, &auth.key_index)?;

        let headers: Vec<(String, Maskable<String>)> = vec![
            (
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            ),
            (headers::X_VERIFY.to_string(), checksum.into_masked()),
            (headers::X_MERCHANT_ID.to_string(), merchant_id.clone().into()),
        ];

        Ok(RequestBuilder::new()
            .method(Method::Get)
            .url(&format!(
                "{}{}",
                self.connector_base_url(),
                api_path.trim_start_matches('/')
            ))
            .headers(headers)
            .build())
    }

    async fn send(
        &self,
        flow_name: &'static str,
        request: Request,
    ) -> CustomResult<Response, errors::ConnectorError> {
        let response = execute_connector_request(&self.proxy, self.id(), flow_name, request)
            .await
            .map_err(|error| {
                let context = match error.current_context() {
                    ApiClientError::ResponseDecodingFailed => {
                        errors::ConnectorError::ResponseDeserializationFailed
                    }
                    other => errors::ConnectorError::NetworkFailure {
                        message: network_failure_message(other),
                    },
                };
                error.change_context(context)
            })?;

        match response {
            Ok(response) => Ok(response),
            Err(response) => {
                let error_response = self.build_error_response(response)?;
                tracing::warn!(
                    connector = self.id(),
                    flow = flow_name,
                    status_code = error_response.status_code,
                    code = %error_response.code,
                    message = %error_response.message,
                    "gateway rejected the request"
                );
                Err(report!(errors::ConnectorError::GatewayRejected {
                    status_code: error_response.status_code,
                    body: error_response.raw_connector_response,
                }))
            }
        }
    }
}

fn network_failure_message(error: &ApiClientError) -> String {
    match error {
        ApiClientError::RequestNotSent(reason) => reason.clone(),
        other => other.to_string(),
    }
}

/// Body of a 2xx response. Anything that is not JSON is kept as a string.
fn parse_raw_body(response: &Response) -> (Value, PhonepePaymentsResponse) {
    if response.response.is_empty() {
        return (Value::Null, PhonepePaymentsResponse::default());
    }

    match response.response.parse_struct::<Value>("PhonepeRawResponse") {
        Ok(raw) => {
            let parsed = raw
                .clone()
                .parse_value("PhonepePaymentsResponse")
                .unwrap_or_else(|error| {
                    tracing::warn!(?error, "gateway response does not match the expected shape");
                    PhonepePaymentsResponse::default()
                });
            (raw, parsed)
        }
        Err(_) => (
            Value::String(String::from_utf8_lossy(&response.response).to_string()),
            PhonepePaymentsResponse::default(),
        ),
    }
}

impl ConnectorCommon for Phonepe {
    fn id(&self) -> &'static str {
        "phonepe"
    }

    fn common_get_content_type(&self) -> &'static str {
        constants::APPLICATION_JSON
    }

    fn base_url(&self) -> &str {
        &self.params.base_url
    }

    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let raw_connector_response = (!res.response.is_empty())
            .then(|| String::from_utf8_lossy(&res.response).to_string());

        let parsed: PhonepePaymentsResponse = res
            .response
            .parse_struct("PhonepePaymentsResponse")
            .unwrap_or_default();

        Ok(ErrorResponse {
            status_code: res.status_code,
            code: parsed
                .code
                .unwrap_or_else(|| common_utils::consts::NO_ERROR_CODE.to_string()),
            message: parsed
                .message
                .unwrap_or_else(|| common_utils::consts::NO_ERROR_MESSAGE.to_string()),
            raw_connector_response,
        })
    }
}

#[async_trait::async_trait]
impl connector_types::PaymentAuthorize for Phonepe {
    async fn initiate_payment(
        &self,
        request: PaymentRequest,
    ) -> CustomResult<PaymentInitiationResponse, errors::ConnectorError> {
        let connector_request = self.build_payment_request(&request)?;
        let response = self
            .send(constants::FLOW_AUTHORIZE, connector_request)
            .await?;

        let (raw_response, parsed) = parse_raw_body(&response);
        let payment_url = parsed.redirect_url().map(str::to_string);

        if payment_url.is_none() {
            tracing::warn!(
                merchant_transaction_id = %request.merchant_transaction_id,
                "gateway accepted the payment without a redirect url"
            );
        }

        Ok(PaymentInitiationResponse {
            raw_response,
            payment_url,
        })
    }
}

#[async_trait::async_trait]
impl connector_types::PaymentSync for Phonepe {
    async fn check_status(
        &self,
        merchant_transaction_id: &str,
    ) -> CustomResult<PaymentStatusResponse, errors::ConnectorError> {
        let connector_request = self.build_status_request(merchant_transaction_id)?;
        let response = self.send(constants::FLOW_PSYNC, connector_request).await?;

        let (raw_response, parsed) = parse_raw_body(&response);

        Ok(PaymentStatusResponse {
            raw_response,
            status: parsed.attempt_status(),
        })
    }
}

impl SourceVerification for Phonepe {
    fn get_secrets(&self) -> CustomResult<Vec<u8>, errors::ConnectorError> {
        Ok(self.params.salt_key.peek().as_bytes().to_vec())
    }

    fn get_algorithm(
        &self,
    ) -> CustomResult<Box<dyn common_utils::crypto::VerifySignature + Send>, errors::ConnectorError>
    {
        Ok(Box::new(phonepe::PhonepeWebhookChecksum {
            key_index: self.params.salt_index.to_string(),
        }))
    }
}

impl connector_types::IncomingWebhook for Phonepe {
    fn verify_and_decode_webhook(
        &self,
        envelope: &WebhookEnvelope,
    ) -> CustomResult<DecodedWebhook, errors::ConnectorError> {
        let verified = self.verify(
            envelope.base64_payload.as_bytes(),
            envelope.received_signature.as_bytes(),
        )?;

        if !verified {
            metrics::WEBHOOK_VERIFICATION_FAILURES
                .with_label_values(&[self.id(), "checksum_mismatch"])
                .inc();
            tracing::warn!(
                connector = self.id(),
                security_event = "webhook_signature_mismatch",
                "rejected webhook with an invalid checksum"
            );
            return Err(report!(errors::ConnectorError::InvalidSignature));
        }

        let payload = phonepe::decode_webhook_payload(&envelope.base64_payload)
            .inspect_err(|_| {
                metrics::WEBHOOK_VERIFICATION_FAILURES
                    .with_label_values(&[self.id(), "malformed_payload"])
                    .inc();
            })
            .attach_printable("webhook passed verification but could not be decoded")?;

        let status = payload
            .clone()
            .parse_value::<PhonepePaymentsResponse>("PhonepePaymentsResponse")
            .map(|parsed| parsed.attempt_status())
            .unwrap_or_default();

        Ok(DecodedWebhook { payload, status })
    }
}

impl connector_types::TransactionIdGenerator for Phonepe {}

impl connector_types::ConnectorServiceTrait for Phonepe {}
