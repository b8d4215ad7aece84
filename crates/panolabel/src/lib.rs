//! # panolabel
//!
//! Typed Rust client for the panoramic image annotation API:
//! - Projects and their labels
//! - Equirectangular image upload and listing
//! - Perspective crops of a panorama
//! - Saving annotations (returned in spherical RBFoV form)
//!
//! Every binding issues exactly one request through an injectable
//! [`RequestExecutor`](http::RequestExecutor). Errors from the executor reach the
//! caller unchanged; the bindings add no retries or caching.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use panolabel::{Client, LabelCreate, ProjectCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("http://127.0.0.1:8000/api/v1")?;
//!
//!     let project = client.projects().create(&ProjectCreate::new("Office floor 3")).await?;
//!     client
//!         .projects()
//!         .create_label(project.id, &LabelCreate::new("chair"))
//!         .await?;
//!
//!     let image = client.images().upload_file(project.id, "office.jpg").await?;
//!     println!("uploaded {} ({:?})", image.filename, image.dimensions());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, PanolabelClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use resources::{ImageUpload, Images, Projects};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod types;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use serde_json::Value as JsonValue;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use panolabel::prelude::*;
/// ```
pub mod prelude {

    pub use crate::{
        Client, ClientConfig, Error, ImageUpload, Result,
        http::{ApiRequest, MultipartForm, RequestBody, RequestExecutor, Response},
        types::{
            Annotation, AnnotationCreate, Image, Label, LabelCreate,
            PerspectiveCrop, PerspectiveRequest, Project, ProjectCreate,
        },
    };
}

/// SDK version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL (local development server)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
