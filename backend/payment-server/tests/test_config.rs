#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::{collections::HashMap, io::Write};

use hyperswitch_masking::PeekInterface;
use payment_server::configs::Config;

const BASE_CONFIG: &str = r#"
[common]
environment = "development"

[server]
host = "127.0.0.1"
port = 8000

[metrics]
host = "127.0.0.1"
port = 8080

[log.console]
enabled = false

[connectors.phonepe]
merchant_id = "FROM_FILE"
salt_key = "file-salt"
redirect_url = "https://shop.example.com/payment/result"
webhook_url = "https://api.example.com/webhooks/phonepe"
"#;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

fn load(contents: &str, env: &[(&str, &str)]) -> Result<Config, config::ConfigError> {
    let file = config_file(contents);
    let env: HashMap<String, String> = env
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Config::load(Some(file.path().to_path_buf()), |key| env.get(key).cloned())
}

#[test]
fn file_values_and_defaults() {
    let config = load(BASE_CONFIG, &[]).unwrap();
    let phonepe = &config.connectors.phonepe;

    assert_eq!(phonepe.merchant_id, "FROM_FILE");
    assert_eq!(phonepe.salt_key.peek(), "file-salt");
    assert_eq!(phonepe.salt_index, 1);
    assert_eq!(
        phonepe.base_url,
        "https://api-preprod.phonepe.com/apis/pg-sandbox/"
    );
    assert_eq!(config.proxy.request_timeout, None);
}

#[test]
fn phonepe_environment_keys_override_the_file() {
    let config = load(
        BASE_CONFIG,
        &[
            ("PHONEPE_MERCHANT_ID", "FROM_ENV"),
            ("PHONEPE_SALT_KEY", "env-salt"),
            ("PHONEPE_SALT_INDEX", "3"),
            ("PHONEPE_BASE_URL", "https://api.phonepe.com/apis/hermes/"),
        ],
    )
    .unwrap();
    let phonepe = &config.connectors.phonepe;

    assert_eq!(phonepe.merchant_id, "FROM_ENV");
    assert_eq!(phonepe.salt_key.peek(), "env-salt");
    assert_eq!(phonepe.salt_index, 3);
    assert_eq!(phonepe.base_url, "https://api.phonepe.com/apis/hermes/");
}

#[test]
fn non_numeric_salt_index_is_rejected() {
    assert!(load(BASE_CONFIG, &[("PHONEPE_SALT_INDEX", "one")]).is_err());
}

#[test]
fn missing_merchant_id_is_fatal() {
    let without_merchant = BASE_CONFIG.replace("merchant_id = \"FROM_FILE\"\n", "");
    assert!(load(&without_merchant, &[]).is_err());

    // present but empty only fails once the adapter is built
    let empty_merchant = BASE_CONFIG.replace("FROM_FILE", "");
    let config = load(&empty_merchant, &[]).unwrap();
    assert!(payment_server::app::AppState::from_config(&config).is_err());
}

#[test]
fn unknown_environment_is_rejected() {
    let staging = BASE_CONFIG.replace("\"development\"", "\"staging\"");
    assert!(load(&staging, &[]).is_err());
}
