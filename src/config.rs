//! CLI configuration and input resolution.
//!
//! All options can also be set via environment variables with the
//! `NG_SERVE_` prefix where it makes sense (host and port).
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use ng_serve::config::Cli;
//!
//! let cli = Cli::parse();
//! let inputs = cli.resolve_inputs()?;
//! ```

use std::collections::HashSet;

use clap::Parser;

use crate::error::ConfigError;
use crate::source::{ServedResource, SourceKind};

// =============================================================================
// Default Values
// =============================================================================

/// Default bind address: loopback only, this is a local convenience tool.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Serve local volumetric datasets and open them in Neuroglancer.
///
/// Starts a CORS-enabled HTTP server for the given Zarr/N5 directories or
/// NIfTI files, prints a Neuroglancer URL pointing at them, and keeps serving
/// until interrupted with Ctrl+C.
#[derive(Parser, Debug, Clone)]
#[command(name = "ng-serve")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Paths to the datasets to serve (e.g. volume.zarr directories).
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "NG_SERVE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "NG_SERVE_PORT")]
    pub port: u16,

    /// Layer name override, one per input path (defaults to each path's
    /// final segment).
    #[arg(long = "name")]
    pub names: Vec<String>,

    /// Source format applied to all inputs: zarr, n5, nii or nii.gz.
    #[arg(long = "file-type", alias = "file_type", default_value = SourceKind::DEFAULT.tag())]
    pub file_type: String,

    /// Do not auto-open the browser.
    #[arg(long, default_value_t = false)]
    pub no_open: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

// =============================================================================
// Input Resolution
// =============================================================================

/// One fully validated input: the resource to serve plus its layer name.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub resource: ServedResource,
    pub layer_name: String,
}

impl Cli {
    /// Resolve and validate all inputs in a single pass, failing fast on the
    /// first violation.
    ///
    /// The single `--file-type` tag is broadcast to every path here, at the
    /// orchestration boundary. Duplicate exposed names are rejected rather
    /// than silently overwriting each other under the server root.
    pub fn resolve_inputs(&self) -> Result<Vec<ResolvedInput>, ConfigError> {
        let kind: SourceKind = self.file_type.parse()?;

        if !self.names.is_empty() && self.names.len() != self.paths.len() {
            return Err(ConfigError::NameCountMismatch {
                names: self.names.len(),
                paths: self.paths.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut inputs = Vec::with_capacity(self.paths.len());

        for (i, raw) in self.paths.iter().enumerate() {
            let resource = ServedResource::from_path(raw, kind)?;

            if !seen.insert(resource.exposed_name.clone()) {
                return Err(ConfigError::DuplicateExposedName {
                    name: resource.exposed_name,
                });
            }

            let layer_name = self
                .names
                .get(i)
                .cloned()
                .unwrap_or_else(|| resource.exposed_name.clone());

            inputs.push(ResolvedInput {
                resource,
                layer_name,
            });
        }

        Ok(inputs)
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
