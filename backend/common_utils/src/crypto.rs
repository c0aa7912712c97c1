//! Hashing and comparison primitives used for gateway checksums.

use subtle::ConstantTimeEq;

use crate::errors::{CryptoError, CustomResult};

/// Computes a message digest over raw bytes.
pub trait GenerateDigest {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, CryptoError>;
}

/// Checks a signature that was produced over `msg`.
pub trait VerifySignature {
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError>;
}

/// SHA-256 digest backed by `ring`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256;

impl GenerateDigest for Sha256 {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, CryptoError> {
        let digest = ring::digest::digest(&ring::digest::SHA256, message);
        Ok(digest.as_ref().to_vec())
    }
}

impl Sha256 {
    /// Lowercase hex rendering of the SHA-256 digest of `message`.
    pub fn hex_digest(&self, message: &[u8]) -> CustomResult<String, CryptoError> {
        self.generate_digest(message).map(hex::encode)
    }
}

/// Compares two byte strings without short-circuiting on the first mismatch.
///
/// Only the lengths are compared in variable time.
pub fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.ct_eq(right).into()
}

#[cfg(test)]
mod tests {
    use sha2::Digest;

    use super::*;

    #[test]
    fn sha256_matches_reference_implementation() {
        let message = b"eyJhbW91bnQiOjEwMH0=/pg/v1/paySECRET";
        let ours = Sha256.hex_digest(message).unwrap();
        let reference = hex::encode(sha2::Sha256::digest(message));
        assert_eq!(ours, reference);
    }

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            Sha256.hex_digest(b"").unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn constant_time_eq_handles_mismatches() {
        assert!(constant_time_eq(b"abc###1", b"abc###1"));
        assert!(!constant_time_eq(b"abc###1", b"abc###2"));
        assert!(!constant_time_eq(b"abc", b"abc###1"));
        assert!(!constant_time_eq(b"", b"a"));
    }
}
