//! Default `reqwest`-backed executor
//!
//! Resolves request paths against a base URL, encodes JSON and multipart bodies, applies
//! default headers and a timeout, and turns error statuses into [`Error`]s.

use super::{ApiRequest, RequestBody, RequestExecutor, Response};
use crate::{
    error::{Error, Result},
    observability::{RequestMetadata, RequestTimer, ResponseMetadata},
};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use url::Url;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP executor backed by `reqwest`.
///
/// # Example
///
/// ```rust,no_run
/// use panolabel::http::ReqwestExecutor;
/// use std::sync::Arc;
///
/// let executor = Arc::new(ReqwestExecutor::builder()
///     .base_url("http://127.0.0.1:8000/api/v1")
///     .build()
///     .unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    pub(crate) inner: Arc<ExecutorInner>,
}

#[derive(Debug)]
pub(crate) struct ExecutorInner {
    /// HTTP client for making requests
    pub(crate) http_client: reqwest::Client,
    /// Base URL, including any path prefix such as `/api/v1`
    pub(crate) base_url: Url,
    /// Timeout for requests
    pub(crate) timeout: Duration,
    /// Custom headers to include with every request
    pub(crate) default_headers: http::HeaderMap,
}

impl ReqwestExecutor {
    /// Create a new builder for configuring the executor.
    pub fn builder() -> ReqwestExecutorBuilder {
        ReqwestExecutorBuilder::default()
    }

    /// Resolve a relative API path against the base URL.
    ///
    /// Unlike [`Url::join`], the base URL's own path is kept: with a base of
    /// `http://host/api/v1`, the path `/image/list` resolves to
    /// `http://host/api/v1/image/list`.
    pub fn resolve(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, path)).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                path, e
            ))
        })?;

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(url)
    }
}

#[async_trait]
impl RequestExecutor for ReqwestExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<Response> {
        let url = self.resolve(&request.path, &request.query)?;
        let mut metadata = RequestMetadata::new(request.method.as_str(), request.path.clone());

        let mut builder = self
            .inner
            .http_client
            .request(request.method.clone(), url.as_str())
            .timeout(self.inner.timeout)
            .headers(self.inner.default_headers.clone());

        match request.body {
            Some(RequestBody::Json(value)) => {
                let bytes = serde_json::to_vec(&value)?;
                metadata = metadata
                    .with_content_type(super::CONTENT_TYPE_JSON)
                    .with_body_size(bytes.len());
                builder = builder
                    .header(http::header::CONTENT_TYPE, super::CONTENT_TYPE_JSON)
                    .body(bytes);
            }
            Some(RequestBody::Multipart(form)) => {
                metadata = metadata.with_content_type(super::CONTENT_TYPE_MULTIPART);
                // reqwest sets the content type, including the boundary
                builder = builder.multipart(form.into_reqwest()?);
            }
            None => {}
        }

        metadata.log_request();
        let timer = RequestTimer::start();

        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let error = if e.is_timeout() {
                    Error::Timeout(self.inner.timeout)
                } else {
                    Error::Connection(e.to_string())
                };
                ResponseMetadata::new(None, timer.elapsed()).log_error(&metadata, &error.to_string());
                return Err(error);
            }
        };

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?
            .to_vec();

        let elapsed = timer.elapsed();
        let response_metadata =
            ResponseMetadata::new(Some(status.as_u16()), elapsed).with_body_size(body.len());

        match Response::with_elapsed(status, headers, body, elapsed).error_for_status() {
            Ok(response) => {
                response_metadata.log_success(&metadata);
                Ok(response)
            }
            Err(error) => {
                response_metadata.log_error(&metadata, &error.to_string());
                Err(error)
            }
        }
    }

    fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    fn executor_name(&self) -> &'static str {
        "reqwest"
    }
}

/// Builder for creating a `ReqwestExecutor` with custom configuration.
///
/// # Example
///
/// ```rust,no_run
/// use panolabel::http::ReqwestExecutor;
///
/// let executor = ReqwestExecutor::builder()
///     .base_url("http://annotation.internal:8000/api/v1")
///     .timeout(std::time::Duration::from_secs(120))
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct ReqwestExecutorBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: http::HeaderMap,
}

impl ReqwestExecutorBuilder {
    /// Set the base URL for the API.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 60 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add a custom header to include with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<http::HeaderName>()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value = value_str
            .parse::<http::HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.default_headers.insert(key, value);
        Ok(self)
    }

    /// Merge a whole header map into the defaults.
    pub fn headers(mut self, headers: http::HeaderMap) -> Self {
        for (key, value) in headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }
        self
    }

    /// Build the executor with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is empty, unparsable, or not http/https
    /// - HTTP client creation fails
    pub fn build(self) -> Result<ReqwestExecutor> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("panolabel-rust/{}", crate::VERSION));

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let base_url = parse_base_url(
            self.base_url
                .as_deref()
                .unwrap_or(crate::DEFAULT_BASE_URL),
        )?;

        Ok(ReqwestExecutor {
            inner: Arc::new(ExecutorInner {
                http_client,
                base_url,
                timeout,
                default_headers: self.default_headers,
            }),
        })
    }
}

/// Validate a base URL: non-empty, parsable, http or https.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
    }

    let base_url: Url = raw
        .trim()
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

    match base_url.scheme() {
        "http" | "https" => Ok(base_url),
        scheme => Err(Error::InvalidUrl(format!(
            "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
            scheme
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_executor(base: &str) -> ReqwestExecutor {
        ReqwestExecutor::builder().base_url(base).build().unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let executor = ReqwestExecutor::builder().build().unwrap();

        assert_eq!(executor.executor_name(), "reqwest");
        assert_eq!(executor.inner.timeout, DEFAULT_TIMEOUT);
        assert!(executor.base_url().starts_with(crate::DEFAULT_BASE_URL));
    }

    #[test]
    fn test_builder_with_custom_config() {
        let executor = ReqwestExecutor::builder()
            .base_url("https://labels.example.com/api/v1")
            .timeout(Duration::from_secs(5))
            .header("X-Workspace", "lab-3")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(executor.base_url(), "https://labels.example.com/api/v1");
        assert_eq!(executor.inner.timeout, Duration::from_secs(5));
        assert!(executor.inner.default_headers.contains_key("x-workspace"));
    }

    #[test]
    fn test_builder_rejects_bad_header() {
        let result = ReqwestExecutor::builder().header("bad header", "v");
        assert!(matches!(result, Err(Error::InvalidHeaderName(_))));
    }

    #[test]
    fn test_resolve_keeps_base_path_prefix() {
        let executor = build_executor("http://localhost:8000/api/v1");
        let url = executor.resolve("/image/list", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/image/list");

        let executor = build_executor("http://localhost:8000/api/v1/");
        let url = executor.resolve("/project/7/labels", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/project/7/labels");
    }

    #[test]
    fn test_resolve_appends_query() {
        let executor = build_executor("http://localhost:8000/api/v1");
        let url = executor
            .resolve("/image/list", &[("project_id".to_string(), "42".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/image/list?project_id=42"
        );
    }

    #[test]
    fn test_parse_base_url_validation() {
        assert!(matches!(parse_base_url("   "), Err(Error::InvalidUrl(msg)) if msg.contains("empty")));
        assert!(matches!(parse_base_url("ftp://host"), Err(Error::InvalidUrl(msg)) if msg.contains("ftp")));
        assert!(parse_base_url("https://host/api").is_ok());
    }
}
