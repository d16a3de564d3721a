//! Viewer state construction.
//!
//! Neuroglancer accepts its full viewer state as a percent-encoded JSON
//! fragment after a fixed base URL. This module builds that state from a list
//! of per-layer descriptors and renders the final shareable URL.
//!
//! The JSON is compact (no insignificant whitespace) and the encoding escapes
//! every byte outside the unreserved URL character set, including the JSON
//! structural characters, so the fragment survives any URL handling
//! unmangled.

use serde::Serialize;

use crate::source::SourceKind;

/// Fixed base URL of the hosted Neuroglancer instance; the encoded state is
/// appended directly after the `#!`.
pub const VIEWER_BASE_URL: &str = "https://neuroglancer-demo.appspot.com/#!";

// =============================================================================
// Layer Descriptors
// =============================================================================

/// Everything needed to derive one viewer layer.
///
/// One descriptor per input path, assembled by the orchestration layer after
/// broadcast of the single `--file-type` tag. The builder itself never sees
/// "one tag or many" ambiguity.
#[derive(Debug, Clone)]
pub struct LayerSpec {
    /// The served HTTP URL of the resource
    pub url: String,

    /// Display label for the layer
    pub name: String,

    /// Source format, determining the URL scheme the viewer uses
    pub kind: SourceKind,
}

// =============================================================================
// Viewer State
// =============================================================================

/// A single named layer in the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerLayer {
    /// Layer type; always "image" for volumetric sources
    #[serde(rename = "type")]
    pub layer_type: &'static str,

    /// Data source as `<scheme>://<http_url>`
    pub source: String,

    /// Display label
    pub name: String,
}

impl ViewerLayer {
    /// Create an image layer from a layer descriptor.
    pub fn image(spec: &LayerSpec) -> Self {
        Self {
            layer_type: "image",
            source: format!("{}://{}", spec.kind.scheme(), spec.url),
            name: spec.name.clone(),
        }
    }
}

/// The viewer state document: an ordered list of layers.
///
/// Constructed once per invocation and never mutated afterward. Neuroglancer
/// infers shape, chunking and voxel size from the store's own metadata, so
/// nothing beyond the layer list is required here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerState {
    pub layers: Vec<ViewerLayer>,
}

/// Build the viewer state, preserving the input order of the descriptors.
pub fn build_state(specs: &[LayerSpec]) -> ViewerState {
    ViewerState {
        layers: specs.iter().map(ViewerLayer::image).collect(),
    }
}

/// Render the final shareable URL: fixed base + percent-encoded compact JSON.
pub fn viewer_url(state: &ViewerState) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(state)?;
    Ok(format!("{}{}", VIEWER_BASE_URL, urlencoding::encode(&json)))
}

// =============================================================================
// Tests
// =============================================================================
