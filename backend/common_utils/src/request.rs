//! Outgoing request description, independent of the HTTP client in use.

use hyperswitch_masking::{ErasedMaskSerialize, Maskable};
use serde::{Deserialize, Serialize};

pub type Headers = Vec<(String, Maskable<String>)>;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

pub enum RequestContent {
    Json(Box<dyn ErasedMaskSerialize + Send>),
}

impl RequestContent {
    /// Body rendered with every secret field replaced, for logging.
    pub fn get_inner_value(&self) -> serde_json::Value {
        match self {
            Self::Json(body) => body
                .masked_serialize()
                .unwrap_or(serde_json::json!({ "error": "failed to mask serialize request" })),
        }
    }
}

impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
        })
    }
}

#[derive(Debug)]
pub struct Request {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

#[derive(Debug)]
pub struct RequestBuilder {
    pub url: String,
    pub headers: Headers,
    pub method: Method,
    pub body: Option<RequestContent>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(1024),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, header: &str, value: &str) -> Self {
        self.headers.push((header.into(), value.to_string().into()));
        self
    }

    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn set_body<T: Into<RequestContent>>(mut self, body: T) -> Self {
        self.body.replace(body.into());
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize)]
    struct Body {
        request: hyperswitch_masking::Secret<String>,
    }

    #[test]
    fn builder_collects_headers_and_body() {
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url("https://gateway.test/pg/v1/pay")
            .header("Content-Type", "application/json")
            .headers(vec![(
                "X-VERIFY".to_string(),
                Maskable::new_masked("abc###1".to_string().into()),
            )])
            .set_body(RequestContent::Json(Box::new(Body {
                request: "payload".to_string().into(),
            })))
            .build();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.headers.len(), 2);
        assert!(request.headers.iter().any(|(_, value)| value.is_masked()));
        let logged = request.body.as_ref().map(RequestContent::get_inner_value);
        assert_ne!(
            logged,
            Some(serde_json::json!({ "request": "payload" })),
            "secret body fields must not be logged in clear"
        );
    }

    #[test]
    fn method_renders_uppercase() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
