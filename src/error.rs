use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors detected while resolving CLI inputs.
///
/// All of these are fatal and reported before any socket is opened.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `--file-type` tag is not a recognized source type
    #[error("Unsupported file type: {tag:?} (expected one of: zarr, n5, nii, nii.gz)")]
    UnsupportedFileType { tag: String },

    /// The path has no final segment to expose (e.g. "/")
    #[error("Cannot derive an exposed name from path: {}", path.display())]
    InvalidPath { path: PathBuf },

    /// The path does not end with the suffix the source type requires
    #[error("Path {} does not end with {expected:?} (required for {tag} sources)", path.display())]
    BadSuffix {
        path: PathBuf,
        expected: &'static str,
        tag: &'static str,
    },

    /// A directory-backed source type was given something that is not an
    /// existing directory
    #[error("Path {} is not an existing directory (required for {tag} sources)", path.display())]
    NotADirectory { path: PathBuf, tag: &'static str },

    /// A file-backed source type was given something that is not an existing
    /// regular file
    #[error("Path {} is not an existing file (required for {tag} sources)", path.display())]
    NotAFile { path: PathBuf, tag: &'static str },

    /// `--name` overrides were supplied but their count does not match the
    /// number of input paths
    #[error("Got {names} --name override(s) for {paths} input path(s); counts must match")]
    NameCountMismatch { names: usize, paths: usize },

    /// Two inputs resolve to the same exposed name under the server root
    #[error("Duplicate exposed name {name:?}; each input must have a unique final path segment")]
    DuplicateExposedName { name: String },

    /// Failed to make the input path absolute
    #[error("Cannot resolve path {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors preparing the staging root that backs the HTTP server.
#[derive(Debug, Error)]
pub enum StageError {
    /// Failed to create the per-invocation temporary root
    #[error("Failed to create staging directory: {0}")]
    CreateRoot(#[source] std::io::Error),

    /// Failed to link an input into the staging root
    #[error("Failed to link {name:?} into the staging root: {source}")]
    Link {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors starting the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The requested port is already bound by another process
    #[error("Port already in use: {addr} (is another server running?)")]
    PortInUse { addr: String },

    /// Any other bind failure (bad host, permission denied, ...)
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
