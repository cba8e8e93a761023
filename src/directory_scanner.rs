// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for finding and sorting source images.
//!
//! This module scans a single folder (not recursively) for supported raster
//! images and sorts them by file name.

use crate::error::{Error, Result};
use crate::media::{self, ImageHandle};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The ordered image sequence of one catalogue folder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageList {
    directory: PathBuf,
    images: Vec<ImageHandle>,
}

impl ImageList {
    /// Creates a new empty ImageList.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from already-known handles, sorting them by file name.
    pub fn from_handles(directory: impl Into<PathBuf>, mut images: Vec<ImageHandle>) -> Self {
        images.sort();
        images.dedup();
        Self {
            directory: directory.into(),
            images,
        }
    }

    /// Scans a directory for supported images and sorts them.
    ///
    /// Sub-directories and files with other extensions are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn scan_directory(directory: &Path) -> Result<Self> {
        let mut images = Vec::new();

        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && media::is_supported_image(&path) {
                images.push(ImageHandle::new(path));
            } else {
                debug!(path = %path.display(), "skipping unsupported entry");
            }
        }

        let list = Self::from_handles(directory, images);
        info!(
            directory = %directory.display(),
            count = list.len(),
            "scanned catalogue folder"
        );
        Ok(list)
    }

    /// Async wrapper running [`ImageList::scan_directory`] on the blocking pool.
    pub async fn scan_directory_async(directory: PathBuf) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::scan_directory(&directory))
            .await
            .map_err(|e| Error::Io(format!("Scan task failed: {e}")))?
    }

    /// Folder the list was built from.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the handle at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageHandle> {
        self.images.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageHandle> {
        self.images.iter()
    }

    /// Returns the total number of images in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Checks if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
