//! Constants for PhonePe connector

// ===== API ENDPOINTS =====
pub const API_PAY_ENDPOINT: &str = "pg/v1/pay";
pub const API_STATUS_ENDPOINT: &str = "pg/v1/status";

// ===== FLOW NAMES =====
pub const FLOW_AUTHORIZE: &str = "authorize";
pub const FLOW_PSYNC: &str = "psync";

// ===== IDENTIFIERS =====
/// Longest merchant transaction id the gateway accepts
pub const MAX_MERCHANT_TRANSACTION_ID_LENGTH: usize = 38;
pub const MERCHANT_USER_ID_PREFIX: &str = "MUID";
/// Longest merchant user id the gateway accepts
pub const MAX_MERCHANT_USER_ID_LENGTH: usize = 36;

// ===== REDIRECT QUERY PARAMETERS =====
pub const REDIRECT_TRANSACTION_ID_PARAM: &str = "transactionId";
pub const REDIRECT_RETURN_PATH_PARAM: &str = "returnPath";

// ===== CHECKSUM =====
pub const CHECKSUM_SEPARATOR: &str = "###";

// ===== CONTENT TYPES =====
pub const APPLICATION_JSON: &str = "application/json";
