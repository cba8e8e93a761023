// SPDX-License-Identifier: MPL-2.0
//! Source images: identity, supported formats, decoding and scaling.
//!
//! Directory enumeration lives in [`crate::directory_scanner`]; this module
//! owns what a single image is and how its pixels become something the
//! views can draw.

pub mod image;
pub mod preview_cache;

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

pub use image::{decode, load_preview, load_preview_async, Bounds, FitScaler, ImageScaler, Preview};
pub use preview_cache::{PreviewCache, PreviewKey};

/// Supported image extensions
pub mod extensions {
    /// Raster formats the cataloguer accepts from a folder.
    pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

    /// Filter for the export save dialog.
    pub const DOCUMENT_SAVE_FILTER: (&str, &[&str]) = ("Word document", &["docx"]);
}

pub use extensions::IMAGE_EXTENSIONS;

/// Opaque identity for one source image.
///
/// Two handles are equal when their paths are equal. Handles order by file
/// name first so that a folder listing and a lot listing agree.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    path: PathBuf,
    name: String,
}

impl ImageHandle {
    /// Creates a handle for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }

    /// Originating path; the stable identifier.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown to the operator.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ImageHandle {}

impl Hash for ImageHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl Ord for ImageHandle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for ImageHandle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Checks the extension case-insensitively against [`IMAGE_EXTENSIONS`].
pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
