//! Request executor trait for abstracting the transport
//!
//! The resource bindings never talk to the network themselves. They describe each call
//! as an [`ApiRequest`] and hand it to a `RequestExecutor`, which owns base URL
//! resolution, headers, encoding and status handling.

use super::{ApiRequest, Method, RequestBody, Response};
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Executor trait for performing API requests.
///
/// Implementations:
/// - [`ReqwestExecutor`](super::ReqwestExecutor) for real HTTP
/// - test doubles that record requests and return canned responses
///
/// # Contract
///
/// `execute` returns `Ok` only for successful (2xx) exchanges. Network failures and
/// error statuses are reported as `Err`, and callers forward that error unchanged.
#[async_trait]
pub trait RequestExecutor: Send + Sync + fmt::Debug {
    /// Perform a single request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request fails (network, timeout, etc.)
    /// - The backend returns an error status code
    async fn execute(&self, request: ApiRequest) -> Result<Response>;

    /// Get the base URL requests are resolved against (for debugging).
    fn base_url(&self) -> &str;

    /// Get the executor name for debugging/logging.
    fn executor_name(&self) -> &'static str;

    /// `GET path?query`.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        let mut request = ApiRequest::new(Method::GET, path);
        for (key, value) in query {
            request = request.query(*key, value);
        }
        self.execute(request).await
    }

    /// `POST path` with a body.
    async fn post(&self, path: &str, body: RequestBody) -> Result<Response> {
        self.execute(ApiRequest::new(Method::POST, path).body(body))
            .await
    }

    /// `DELETE path`.
    async fn delete(&self, path: &str) -> Result<Response> {
        self.execute(ApiRequest::new(Method::DELETE, path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Capture {
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl RequestExecutor for Capture {
        async fn execute(&self, request: ApiRequest) -> Result<Response> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::json_ok(&serde_json::json!({})))
        }

        fn base_url(&self) -> &str {
            "http://capture.invalid"
        }

        fn executor_name(&self) -> &'static str {
            "capture"
        }
    }

    #[tokio::test]
    async fn test_provided_methods_build_requests() {
        let executor = Capture::default();

        executor
            .get("/image/list", &[("project_id", "9".to_string())])
            .await
            .unwrap();
        executor
            .post("/project/create", RequestBody::Json(serde_json::json!({"name": "p"})))
            .await
            .unwrap();
        executor.delete("/project/labels/4").await.unwrap();

        let seen = executor.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].method, Method::GET);
        assert_eq!(seen[0].query_value("project_id"), Some("9"));
        assert_eq!(seen[1].method, Method::POST);
        assert!(seen[1].body.is_some());
        assert_eq!(seen[2].method, Method::DELETE);
        assert_eq!(seen[2].path, "/project/labels/4");
        assert!(seen[2].body.is_none());
    }
}
