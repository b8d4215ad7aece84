//! HTTP response handling

use crate::error::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    elapsed: Duration,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self::with_elapsed(status, headers, body, Duration::ZERO)
    }

    /// Create a new response recording how long the exchange took.
    pub fn with_elapsed(
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
        elapsed: Duration,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            elapsed,
        }
    }

    /// Convenience constructor for a `200 OK` JSON response.
    pub fn json_ok(value: &serde_json::Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static(super::CONTENT_TYPE_JSON),
        );
        Self::new(StatusCode::OK, headers, value.to_string().into_bytes())
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Time elapsed for the request/response exchange.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the body as a string.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.clone()).map_err(|e| Error::ResponseValidation(e.to_string()))
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::Serialization)
    }

    /// Parse the body as JSON, or return `T::default()` when the body is empty.
    pub fn json_or_default<T: DeserializeOwned + Default>(&self) -> Result<T> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        self.json()
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the response is an error (4xx or 5xx status).
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }

    /// Turn a non-2xx response into the matching [`Error`].
    ///
    /// Executors call this before handing a response to the bindings, so bindings only
    /// ever see successful responses.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(Error::from_response(
            self.status.as_u16(),
            &String::from_utf8_lossy(&self.body),
            &self.headers,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Ack {
        msg: Option<String>,
    }

    #[test]
    fn test_json_parsing() {
        let response = Response::json_ok(&serde_json::json!({"msg": "ok"}));
        let ack: Ack = response.json().unwrap();
        assert_eq!(ack.msg.as_deref(), Some("ok"));
        assert!(response.is_success());
    }

    #[test]
    fn test_json_or_default_on_empty_body() {
        let response = Response::new(StatusCode::NO_CONTENT, HeaderMap::new(), Vec::new());
        let ack: Ack = response.json_or_default().unwrap();
        assert_eq!(ack, Ack::default());
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let response = Response::new(StatusCode::OK, HeaderMap::new(), b"<html>".to_vec());
        assert!(matches!(
            response.json::<Ack>(),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_error_for_status() {
        let ok = Response::new(StatusCode::OK, HeaderMap::new(), b"{}".to_vec());
        assert!(ok.error_for_status().is_ok());

        let not_found = Response::new(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            br#"{"detail":"missing"}"#.to_vec(),
        );
        assert!(not_found.is_error());
        match not_found.error_for_status() {
            Err(Error::NotFound(msg)) => assert_eq!(msg, "missing"),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }
}
