//! Main client implementation for the annotation API

use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    http::{ApiRequest, RequestBody, RequestExecutor, ReqwestExecutor, Response},
    resources::{Images, Projects},
};

/// Main client for the annotation API.
///
/// The client is a cheap handle around an injected [`RequestExecutor`]; clone it freely
/// and share it across tasks. It holds no other state.
///
/// # Example
///
/// ```rust,no_run
/// use panolabel::Client;
///
/// # async fn example() -> panolabel::Result<()> {
/// let client = Client::new("http://127.0.0.1:8000/api/v1")?;
/// for project in client.projects().list().await? {
///     println!("{}: {}", project.id, project.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    executor: Arc<dyn RequestExecutor>,
}

impl Client {
    /// Create a client talking to `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> PanolabelClientBuilder {
        PanolabelClientBuilder::default()
    }

    /// Create a client around any executor.
    ///
    /// This is how tests substitute a recording executor, and how applications plug in
    /// their own transport (custom auth, proxies, retries).
    pub fn from_executor(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Create a client from a configuration object, using [`ReqwestExecutor`].
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut builder = ReqwestExecutor::builder()
            .timeout(config.timeout)
            .headers(config.default_headers);

        if let Some(base_url) = config.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self::from_executor(Arc::new(builder.build()?)))
    }

    /// Create a client configured from `PANOLABEL_*` environment variables.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Access the project and label endpoints.
    pub fn projects(&self) -> Projects {
        Projects::new(self.clone())
    }

    /// Access the image, crop and annotation endpoints.
    pub fn images(&self) -> Images {
        Images::new(self.clone())
    }

    /// Issue a `GET` to an arbitrary path.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        self.executor.get(path, query).await
    }

    /// Issue a `POST` with a JSON body to an arbitrary path.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Response>
    where
        B: serde::Serialize + ?Sized,
    {
        self.executor.post(path, RequestBody::json(body)?).await
    }

    /// Issue a `DELETE` to an arbitrary path.
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.executor.delete(path).await
    }

    /// Hand a prepared request to the executor.
    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<Response> {
        self.executor.execute(request).await
    }

    /// Get the base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// Get the executor name (for debugging).
    pub fn executor_name(&self) -> &'static str {
        self.executor.executor_name()
    }
}

/// Builder for creating a configured Client.
#[derive(Default)]
pub struct PanolabelClientBuilder {
    config: ClientConfig,
}

impl PanolabelClientBuilder {
    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the default timeout for requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Start from an existing configuration; later builder calls override it.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = self.config.merge(config);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        if let Some(base_url) = &self.config.base_url {
            crate::http::parse_base_url(base_url)?;
        }
        Client::from_config(self.config)
    }
}
