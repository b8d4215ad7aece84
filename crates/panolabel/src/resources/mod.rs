//! API resource endpoints
//!
//! One struct per backend router. Every method maps its arguments to a single
//! [`ApiRequest`](crate::http::ApiRequest) and forwards any executor error unchanged.

pub mod images;
pub mod projects;

pub use images::{ImageUpload, Images};
pub use projects::Projects;

use crate::client::Client;

/// Base trait for API resources.
pub(crate) trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}
