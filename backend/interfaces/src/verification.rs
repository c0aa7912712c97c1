use common_utils::{crypto, CustomResult};
use domain_types::errors::ConnectorError;
use error_stack::ResultExt;

/// Verifies that an inbound payload was produced by the connector.
pub trait SourceVerification {
    fn get_secrets(&self) -> CustomResult<Vec<u8>, ConnectorError>;

    /// Get the verification algorithm being used
    fn get_algorithm(&self)
        -> CustomResult<Box<dyn crypto::VerifySignature + Send>, ConnectorError>;

    /// Get the signature/hash value from what was received alongside the payload
    fn get_signature(&self, received_signature: &[u8]) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(received_signature.to_owned())
    }

    /// Get the message/payload that should be verified
    fn get_message(&self, payload: &[u8]) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(payload.to_owned())
    }

    /// Perform the verification
    fn verify(
        &self,
        payload: &[u8],
        received_signature: &[u8],
    ) -> CustomResult<bool, ConnectorError> {
        let algorithm = self.get_algorithm()?;
        let extracted_secrets = self.get_secrets()?;
        let signature = self.get_signature(received_signature)?;
        let message = self.get_message(payload)?;

        algorithm
            .verify_signature(&extracted_secrets, &signature, &message)
            .change_context(ConnectorError::InvalidSignature)
    }
}
