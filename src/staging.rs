//! Staging of inputs under one common server root.
//!
//! The static file server serves a single root directory. When every input
//! already lives in the same parent directory, that parent is served as-is.
//! Otherwise a fresh per-invocation temporary directory is created and each
//! input is symlinked into it under its exposed name.
//!
//! The temporary root is a scoped resource: it is removed recursively when
//! the [`ServeRoot`] is dropped, on every orderly exit path. A hard crash can
//! still orphan it, which is acceptable for a local dev tool.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::StageError;
use crate::source::ServedResource;

/// The directory the HTTP server serves from.
#[derive(Debug)]
pub enum ServeRoot {
    /// All inputs share a parent directory; serve it directly.
    Direct { root: PathBuf },

    /// Inputs are scattered; serve a temporary directory of symlinks.
    Linked { root: TempDir },
}

impl ServeRoot {
    /// Make every resource reachable under one root and return that root.
    ///
    /// Exposed-name uniqueness is enforced upstream during input resolution;
    /// a stale entry with the same name inside a staging root is replaced
    /// rather than treated as a conflict.
    pub fn prepare(resources: &[ServedResource]) -> Result<Self, StageError> {
        if let Some(root) = common_parent(resources) {
            debug!(root = %root.display(), "serving parent directory directly");
            return Ok(ServeRoot::Direct { root });
        }

        let root = TempDir::with_prefix("ng-serve-").map_err(StageError::CreateRoot)?;
        for resource in resources {
            link_into(root.path(), resource)?;
        }
        debug!(root = %root.path().display(), "staged {} input(s) via symlinks", resources.len());
        Ok(ServeRoot::Linked { root })
    }

    /// The directory to hand to the file server.
    pub fn path(&self) -> &Path {
        match self {
            ServeRoot::Direct { root } => root,
            ServeRoot::Linked { root } => root.path(),
        }
    }
}

/// The shared parent directory of all resources, if there is exactly one.
fn common_parent(resources: &[ServedResource]) -> Option<PathBuf> {
    let first = resources.first()?.parent()?;
    resources
        .iter()
        .all(|r| r.parent() == Some(first))
        .then(|| first.to_path_buf())
}

/// Symlink one resource into the staging root, replacing any stale entry.
fn link_into(root: &Path, resource: &ServedResource) -> Result<(), StageError> {
    let dest = root.join(&resource.exposed_name);

    if dest.symlink_metadata().is_ok() {
        std::fs::remove_file(&dest).map_err(|e| StageError::Link {
            name: resource.exposed_name.clone(),
            source: e,
        })?;
    }

    symlink(&resource.local_path, &dest).map_err(|e| StageError::Link {
        name: resource.exposed_name.clone(),
        source: e,
    })
}

#[cfg(unix)]
fn symlink(src: &Path, dest: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(src, dest)
}

#[cfg(windows)]
fn symlink(src: &Path, dest: &Path) -> std::io::Result<()> {
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(src, dest)
    } else {
        std::os::windows::fs::symlink_file(src, dest)
    }
}

// =============================================================================
// Tests
// =============================================================================
