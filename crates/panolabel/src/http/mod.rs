//! HTTP layer: the executor seam and the default `reqwest` executor
//!
//! Resources describe calls as [`ApiRequest`]s; a [`RequestExecutor`] performs them.

pub use executor::RequestExecutor;
pub use request::{
    ApiRequest, CONTENT_TYPE_JSON, CONTENT_TYPE_MULTIPART, FormPart, MultipartForm, RequestBody,
};
pub use reqwest_executor::{DEFAULT_TIMEOUT, ReqwestExecutor, ReqwestExecutorBuilder};
pub use response::Response;

pub mod executor;
mod request;
mod reqwest_executor;
mod response;

pub(crate) use reqwest_executor::parse_base_url;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
