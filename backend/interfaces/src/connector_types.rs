use std::sync::Arc;

use common_utils::CustomResult;
use domain_types::{
    errors::ConnectorError,
    router_request_types::{PaymentRequest, WebhookEnvelope},
    router_response_types::{DecodedWebhook, PaymentInitiationResponse, PaymentStatusResponse},
};

use crate::api::ConnectorCommon;

pub type BoxedConnector = Arc<dyn ConnectorServiceTrait>;

/// Creating a payment on the gateway.
#[async_trait::async_trait]
pub trait PaymentAuthorize {
    async fn initiate_payment(
        &self,
        request: PaymentRequest,
    ) -> CustomResult<PaymentInitiationResponse, ConnectorError>;
}

/// Querying the gateway for the state of an earlier payment.
#[async_trait::async_trait]
pub trait PaymentSync {
    async fn check_status(
        &self,
        merchant_transaction_id: &str,
    ) -> CustomResult<PaymentStatusResponse, ConnectorError>;
}

pub trait IncomingWebhook {
    /// Verifies the envelope signature and only then decodes the payload.
    fn verify_and_decode_webhook(
        &self,
        envelope: &WebhookEnvelope,
    ) -> CustomResult<DecodedWebhook, ConnectorError>;
}

pub trait TransactionIdGenerator {
    fn generate_transaction_id(&self, prefix: &str) -> String {
        common_utils::fp_utils::generate_time_ordered_id(prefix)
    }
}

pub trait ConnectorServiceTrait:
    ConnectorCommon
    + PaymentAuthorize
    + PaymentSync
    + IncomingWebhook
    + TransactionIdGenerator
    + Send
    + Sync
{
}
