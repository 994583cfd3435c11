//! JSON request/response mapping for the extract endpoint.
//!
//! Transport-agnostic: a web server hands the raw request body to
//! [`handle_request`] and writes back `status` and `body`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::content::ExtractionResult;
use crate::error::{Error, Result};
use crate::page::PageSource;
use crate::service::ExtractionService;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractRequest {
    pub url: Option<String>,
}

impl ExtractRequest {
    /// Decode a request body.
    ///
    /// A body that is not a JSON object fails the extraction. An empty or
    /// zero-like `url` counts as absent; any other non-string `url` cannot
    /// be fetched.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Error::Extraction(format!("invalid request body: {}", e)))?;

        let Value::Object(mut fields) = value else {
            return Err(Error::Extraction("request body is not a JSON object".to_string()));
        };

        let url = match fields.remove("url") {
            Some(value) if is_empty_value(&value) => None,
            Some(Value::String(url)) => Some(url),
            Some(other) => {
                return Err(Error::Fetch(format!("URL must be a string, got {}", other)));
            }
            None => None,
        };

        Ok(Self { url })
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

#[derive(Debug, Serialize)]
struct SuccessBody<'a> {
    status: &'static str,
    #[serde(flatten)]
    result: &'a ExtractionResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn success(result: &ExtractionResult) -> Result<Self> {
        let body = serde_json::to_value(SuccessBody { status: "success", result })?;
        Ok(Self { status: 200, body })
    }

    pub fn error(error: &Error) -> Self {
        Self {
            status: error.http_status(),
            body: json!({ "error": error.to_string() }),
        }
    }

    pub fn from_outcome(outcome: Result<ExtractionResult>) -> Self {
        match outcome.and_then(|result| Self::success(&result)) {
            Ok(response) => response,
            Err(e) => Self::error(&e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Decode `body`, run the extraction and build the response.
pub async fn handle_request<S: PageSource>(service: &ExtractionService<S>, body: &[u8]) -> ApiResponse {
    let outcome = match ExtractRequest::from_body(body) {
        Ok(request) => service.extract(request.url.as_deref()).await,
        Err(e) => Err(e),
    };
    ApiResponse::from_outcome(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentBlock;

    #[test]
    fn test_success_body_shape() {
        let result = ExtractionResult {
            title: "T".to_string(),
            images: vec!["http://example.com/a.jpg".to_string()],
            content: vec![ContentBlock::Text { content: "Body text".to_string() }],
            ..Default::default()
        };

        let response = ApiResponse::success(&result).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            json!({
                "status": "success",
                "title": "T",
                "subtitle": "",
                "mainImage": "",
                "favicon": "",
                "images": ["http://example.com/a.jpg"],
                "content": [{"type": "text", "content": "Body text"}]
            })
        );
    }

    #[test]
    fn test_error_bodies() {
        let response = ApiResponse::error(&Error::missing_url());
        assert_eq!(response.status, 400);
        assert_eq!(response.body, json!({"error": "No URL provided"}));

        let response = ApiResponse::error(&Error::Fetch("HTTP 503".to_string()));
        assert_eq!(response.status, 500);
        assert_eq!(response.body, json!({"error": "Failed to fetch URL: HTTP 503"}));

        let response = ApiResponse::from_outcome(Err(Error::Extraction("boom".to_string())));
        assert_eq!(response.status, 500);
        assert_eq!(response.body, json!({"error": "Extraction failed: boom"}));
    }

    #[test]
    fn test_request_decoding() {
        let request = ExtractRequest::from_body(br#"{"url": "http://example.com"}"#).unwrap();
        assert_eq!(request.url.as_deref(), Some("http://example.com"));

        assert_eq!(ExtractRequest::from_body(b"{}").unwrap().url, None);
        assert_eq!(ExtractRequest::from_body(br#"{"url": null}"#).unwrap().url, None);

        for empty in [r#"{"url": ""}"#, r#"{"url": false}"#, r#"{"url": 0}"#, r#"{"url": []}"#] {
            assert_eq!(ExtractRequest::from_body(empty.as_bytes()).unwrap().url, None, "body {}", empty);
        }

        // Undecodable or non-object bodies fail the extraction
        for body in [&b"not json"[..], &b"null"[..], &b"[]"[..], &br#""http://example.com""#[..]] {
            assert!(matches!(ExtractRequest::from_body(body), Err(Error::Extraction(_))));
        }

        // A non-string URL cannot be fetched
        assert!(matches!(ExtractRequest::from_body(br#"{"url": 42}"#), Err(Error::Fetch(_))));
        assert!(matches!(ExtractRequest::from_body(br#"{"url": ["a"]}"#), Err(Error::Fetch(_))));
    }
}
