use std::{str::FromStr, time::Duration};

use common_utils::{
    request::{Headers, Method, Request, RequestContent},
    CustomResult,
};
use domain_types::{errors::ApiClientError, router_response_types::Response, types::Proxy};
use error_stack::{report, ResultExt};
use hyperswitch_masking::Maskable;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use shared_metrics as metrics;
use tracing::{field::Empty, Instrument};

/// Sends `request` to a connector and records the exchange.
///
/// The outer result fails only when no HTTP response was obtained. A
/// response is `Ok` for 2xx statuses and `Err` otherwise.
pub async fn execute_connector_request(
    proxy: &Proxy,
    connector: &'static str,
    flow_name: &'static str,
    request: Request,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let span = tracing::info_span!(
        "outgoing_gateway_call",
        connector,
        flow = flow_name,
        method = %request.method,
        url = %request.url,
        request_headers = Empty,
        request_body = Empty,
        status_code = Empty,
        latency = Empty,
    );

    let masked_headers = mask_headers(&request.headers);
    let masked_body = request
        .body
        .as_ref()
        .map(RequestContent::get_inner_value)
        .unwrap_or(Value::Null);
    span.record("request_headers", tracing::field::display(&masked_headers));
    span.record("request_body", tracing::field::display(&masked_body));

    let method = request.method.to_string();
    metrics::EXTERNAL_SERVICE_TOTAL_API_CALLS
        .with_label_values(&[method.as_str(), flow_name, connector])
        .inc();

    let start = tokio::time::Instant::now();
    let result = call_connector_api(proxy, request)
        .instrument(span.clone())
        .await;
    let elapsed = start.elapsed();

    metrics::EXTERNAL_SERVICE_API_CALLS_LATENCY
        .with_label_values(&[method.as_str(), flow_name, connector])
        .observe(elapsed.as_secs_f64());
    span.record("latency", elapsed.as_millis());

    {
        let _entered = span.enter();
        match &result {
            Ok(Ok(response)) | Ok(Err(response)) => {
                span.record("status_code", response.status_code);
                tracing::info!(tag = ?Tag::OutgoingApi, log_type = "api", "Outgoing request completed");
            }
            Err(error) => {
                metrics::EXTERNAL_SERVICE_API_CALLS_ERRORS
                    .with_label_values(&[
                        method.as_str(),
                        flow_name,
                        connector,
                        error.current_context().to_string().as_str(),
                    ])
                    .inc();
                error_log(
                    "NETWORK_ERROR",
                    &json!(format!(
                        "Failed getting response from connector. Error: {:?}",
                        error
                    )),
                );
            }
        }
    }

    result
}

pub async fn call_connector_api(
    proxy: &Proxy,
    request: Request,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = proxy.bypass_proxy_urls.contains(&url.to_string());

    let client = create_client(proxy, should_bypass_proxy)?;

    let headers = request.headers.construct_header_map()?;

    let request_builder = match request.method {
        Method::Get => client.get(url),
        Method::Post => {
            let client = client.post(url);
            match request.body {
                Some(RequestContent::Json(payload)) => client.json(&payload),
                None => client,
            }
        }
    }
    .add_headers(headers);

    let request_builder = match proxy.request_timeout {
        Some(timeout) => request_builder.timeout(Duration::from_secs(timeout)),
        None => request_builder,
    };

    let response = request_builder.send().await.map_err(|error| {
        let api_error = match error {
            error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
            error if error.is_body() => ApiClientError::ConnectionClosedIncompleteMessage,
            _ => ApiClientError::RequestNotSent(error.to_string()),
        };
        info_log(
            "REQUEST_FAILURE",
            &json!("Unable to send request to connector."),
        );
        report!(api_error)
    })?;

    handle_response(response).await
}

pub fn create_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    get_base_client(proxy_config, should_bypass_proxy)
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_base_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(if should_bypass_proxy
        || (proxy_config.http_url.is_none() && proxy_config.https_url.is_none())
    {
        &NON_PROXIED_CLIENT
    } else {
        &PROXIED_CLIENT
    }
    .get_or_try_init(|| {
        get_client_builder(proxy_config, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                info_log(
                    "ERROR",
                    &json!(format!("Failed to construct base client. Error: {:?}", err)),
                );
            })
    })?
    .clone())
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .attach_printable("HTTPS proxy configuration error")?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .attach_printable("HTTP proxy configuration error")?,
        );
    }

    Ok(client_builder)
}

async fn handle_response(
    resp: reqwest::Response,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let status_code = resp.status().as_u16();
    let is_success = resp.status().is_success();
    let headers = Some(resp.headers().to_owned());

    let response = resp
        .bytes()
        .await
        .change_context(ApiClientError::ResponseDecodingFailed)?;

    let response = Response {
        headers,
        response,
        status_code,
    };

    Ok(if is_success {
        Ok(response)
    } else {
        Err(response)
    })
}

fn mask_headers(headers: &Headers) -> Value {
    let masked = headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (key, value)| {
            let value = match value {
                Maskable::Masked(_) => Value::String("*** alloc::string::String ***".to_string()),
                Maskable::Normal(inner) => Value::String(inner.to_owned()),
            };
            acc.insert(key.clone(), value);
            acc
        });
    Value::Object(masked)
}

pub(crate) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(crate) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}

#[derive(Debug, Clone, strum::EnumString)]
pub enum Tag {
    /// Api Outgoing Request
    OutgoingApi,
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[inline]
pub fn error_log(action: &str, message: &Value) {
    tracing::error!(tags = %action, json_value= %message);
}

#[cfg(test)]
mod tests {
    use common_utils::request::RequestBuilder;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    #[derive(Debug, serde::Serialize)]
    struct Body {
        request: String,
    }

    #[tokio::test]
    async fn post_sends_headers_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pg/v1/pay"))
            .and(header("X-VERIFY", "abc###1"))
            .and(body_json(json!({ "request": "cGF5bG9hZA==" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&format!("{}/pg/v1/pay", server.uri()))
            .header("Content-Type", "application/json")
            .headers(vec![(
                "X-VERIFY".to_string(),
                Maskable::new_masked("abc###1".to_string().into()),
            )])
            .set_body(RequestContent::Json(Box::new(Body {
                request: "cGF5bG9hZA==".to_string(),
            })))
            .build();

        let response = execute_connector_request(&Proxy::default(), "test", "authorize", request)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.response.as_ref(), br#"{"success":true}"#);
    }

    #[tokio::test]
    async fn non_success_status_is_returned_as_inner_err() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pg/v1/status/M123/TXN_1"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let request = RequestBuilder::new()
            .method(Method::Get)
            .url(&format!("{}/pg/v1/status/M123/TXN_1", server.uri()))
            .build();

        let response = call_connector_api(&Proxy::default(), request)
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(response.status_code, 400);
        assert_eq!(response.response.as_ref(), b"bad request");
    }

    #[tokio::test]
    async fn unreachable_host_is_an_outer_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let request = RequestBuilder::new()
            .method(Method::Get)
            .url("http://127.0.0.1:9/pg/v1/status/M123/TXN_1")
            .build();

        let error = call_connector_api(&Proxy::default(), request)
            .await
            .unwrap_err();
        assert!(matches!(
            error.current_context(),
            ApiClientError::RequestNotSent(_) | ApiClientError::RequestTimeoutReceived
        ));
    }

    #[test]
    fn masked_header_values_are_hidden() {
        let headers: Headers = vec![
            ("Content-Type".to_string(), "application/json".to_string().into()),
            (
                "X-VERIFY".to_string(),
                Maskable::new_masked("abc###1".to_string().into()),
            ),
        ];
        let masked = mask_headers(&headers);
        assert_eq!(masked["Content-Type"], json!("application/json"));
        assert_ne!(masked["X-VERIFY"], json!("abc###1"));
    }

    #[test]
    fn invalid_header_name_fails_header_map_construction() {
        let headers: Headers = vec![("bad header".to_string(), "x".to_string().into())];
        let error = headers.construct_header_map().unwrap_err();
        assert_eq!(
            *error.current_context(),
            ApiClientError::HeaderMapConstructionFailed
        );
    }
}
