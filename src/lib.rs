//! # ng-serve
//!
//! Serve local volumetric datasets over HTTP and open them in Neuroglancer.
//!
//! The hosted Neuroglancer viewer can read Zarr/N5 stores and NIfTI volumes
//! straight over HTTP, but it needs a server that allows cross-origin reads
//! and byte-range requests. This crate provides that server for local data,
//! plus the small state-construction logic that turns served URLs into a
//! shareable viewer link.
//!
//! ## Architecture
//!
//! - [`config`] - CLI surface and input validation
//! - [`source`] - source kinds and served resources
//! - [`staging`] - assembling inputs under one server root
//! - [`server`] - Axum-based CORS static file server with start/stop handle
//! - [`viewer`] - viewer state construction and URL encoding
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use ng_serve::server::start_server;
//! use ng_serve::source::SourceKind;
//! use ng_serve::viewer::{build_state, viewer_url, LayerSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let handle = start_server(Path::new("/data"), "127.0.0.1", 5000, true).await?;
//!
//!     let state = build_state(&[LayerSpec {
//!         url: format!("http://{}/volume.zarr/", handle.addr()),
//!         name: "volume.zarr".to_string(),
//!         kind: SourceKind::Zarr,
//!     }]);
//!     println!("{}", viewer_url(&state)?);
//!
//!     tokio::signal::ctrl_c().await?;
//!     handle.stop().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod source;
pub mod staging;
pub mod viewer;

// Re-export commonly used types
pub use config::{Cli, ResolvedInput, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{ConfigError, ServerError, StageError};
pub use server::{create_router, start_server, ServerHandle};
pub use source::{ServedResource, SourceKind};
pub use staging::ServeRoot;
pub use viewer::{build_state, viewer_url, LayerSpec, ViewerLayer, ViewerState, VIEWER_BASE_URL};
