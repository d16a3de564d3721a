//! Source types and served resources.
//!
//! A [`ServedResource`] ties a local path to the name it is exposed under on
//! the HTTP server and the [`SourceKind`] that tells the viewer how to
//! interpret it. Directory-backed kinds (Zarr, N5) must point at existing
//! directories; file-backed kinds (NIfTI) at existing regular files. Both are
//! recognized by their conventional suffix.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

// =============================================================================
// Source Kind
// =============================================================================

/// Recognized volumetric source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Zarr chunked array store (directory ending in `.zarr`)
    Zarr,

    /// N5 chunked array store (directory ending in `.n5`)
    N5,

    /// Uncompressed NIfTI volume (single `.nii` file)
    Nifti,

    /// Gzip-compressed NIfTI volume (single `.nii.gz` file)
    NiftiGz,
}

impl SourceKind {
    /// The default kind when `--file-type` is not given.
    pub const DEFAULT: SourceKind = SourceKind::Zarr;

    /// The CLI tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            SourceKind::Zarr => "zarr",
            SourceKind::N5 => "n5",
            SourceKind::Nifti => "nii",
            SourceKind::NiftiGz => "nii.gz",
        }
    }

    /// The filename suffix a path of this kind must carry.
    pub fn suffix(&self) -> &'static str {
        match self {
            SourceKind::Zarr => ".zarr",
            SourceKind::N5 => ".n5",
            SourceKind::Nifti => ".nii",
            SourceKind::NiftiGz => ".nii.gz",
        }
    }

    /// The URL scheme Neuroglancer expects for this kind of source.
    pub fn scheme(&self) -> &'static str {
        match self {
            SourceKind::Zarr => "zarr",
            SourceKind::N5 => "n5",
            SourceKind::Nifti | SourceKind::NiftiGz => "nifti",
        }
    }

    /// Whether this kind is served as a directory tree (vs a single file).
    pub fn is_directory(&self) -> bool {
        matches!(self, SourceKind::Zarr | SourceKind::N5)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zarr" => Ok(SourceKind::Zarr),
            "n5" => Ok(SourceKind::N5),
            "nii" => Ok(SourceKind::Nifti),
            "nii.gz" => Ok(SourceKind::NiftiGz),
            other => Err(ConfigError::UnsupportedFileType {
                tag: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Served Resource
// =============================================================================

/// One local dataset to serve, with the path segment it is reachable under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedResource {
    /// Absolute path to the local directory or file
    pub local_path: PathBuf,

    /// Path segment under which the resource is reachable from the server root
    pub exposed_name: String,

    /// How the viewer should interpret the served URL
    pub kind: SourceKind,
}

impl ServedResource {
    /// Resolve a raw CLI path into a served resource.
    ///
    /// Trailing path separators are trimmed, so `vol.zarr/` and `vol.zarr`
    /// are the same input. The path is made absolute and checked against the
    /// kind's requirements: suffix, existence, and directory-vs-file shape.
    pub fn from_path(raw: &str, kind: SourceKind) -> Result<Self, ConfigError> {
        let trimmed = raw.trim_end_matches(std::path::MAIN_SEPARATOR).trim_end_matches('/');

        let local_path = std::path::absolute(trimmed).map_err(|e| ConfigError::Resolve {
            path: PathBuf::from(trimmed),
            source: e,
        })?;

        let exposed_name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| ConfigError::InvalidPath {
                path: local_path.clone(),
            })?;

        if !exposed_name.ends_with(kind.suffix()) {
            return Err(ConfigError::BadSuffix {
                path: local_path,
                expected: kind.suffix(),
                tag: kind.tag(),
            });
        }

        if kind.is_directory() {
            if !local_path.is_dir() {
                return Err(ConfigError::NotADirectory {
                    path: local_path,
                    tag: kind.tag(),
                });
            }
        } else if !local_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: local_path,
                tag: kind.tag(),
            });
        }

        Ok(Self {
            local_path,
            exposed_name,
            kind,
        })
    }

    /// The parent directory of the local path.
    pub fn parent(&self) -> Option<&Path> {
        self.local_path.parent()
    }

    /// The URL under which this resource is served.
    ///
    /// Directory stores get a trailing slash (the viewer resolves metadata
    /// keys relative to it); single files do not.
    pub fn served_url(&self, host: &str, port: u16) -> String {
        if self.kind.is_directory() {
            format!("http://{}:{}/{}/", host, port, self.exposed_name)
        } else {
            format!("http://{}:{}/{}", host, port, self.exposed_name)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
