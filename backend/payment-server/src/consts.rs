/// Prefix of merchant transaction ids minted by the server
pub const TRANSACTION_ID_PREFIX: &str = "TXN";

/// Header carrying the gateway's webhook checksum
pub const X_VERIFY: &str = "x-verify";

// Environment keys read on top of the layered configuration
pub const PHONEPE_MERCHANT_ID: &str = "PHONEPE_MERCHANT_ID";
pub const PHONEPE_SALT_KEY: &str = "PHONEPE_SALT_KEY";
pub const PHONEPE_SALT_INDEX: &str = "PHONEPE_SALT_INDEX";
pub const PHONEPE_BASE_URL: &str = "PHONEPE_BASE_URL";
pub const PHONEPE_REDIRECT_URL: &str = "PHONEPE_REDIRECT_URL";
pub const PHONEPE_WEBHOOK_URL: &str = "PHONEPE_WEBHOOK_URL";
