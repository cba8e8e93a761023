// SPDX-License-Identifier: MPL-2.0
//! Catalogue export.
//!
//! An export turns a [`LotProjection`] snapshot into a document on disk:
//!
//! 1. [`document`] reads every image and builds a format-independent model.
//! 2. A [`DocumentWriter`] (the `.docx` one by default) serialises it into a
//!    temporary file next to the destination.
//! 3. The temporary file is renamed over the destination.
//!
//! A failure or cancellation at any step drops the temporary file, so a
//! previous good copy at the destination is never replaced by a partial one.
//!
//! Only one export runs at a time; [`Exporter::try_begin`] hands out the
//! single [`ExportTicket`].

pub mod document;
pub mod docx;

use crate::error::ExportError;
use crate::lots::LotProjection;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub use document::{CatalogueDocument, DocumentLayout, DETAILS_TEXT, EMU_PER_POINT};
pub use docx::{DocumentWriter, DocxWriter};

/// Shared cancellation flag for one export.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns [`ExportError::Cancelled`] once [`CancelToken::cancel`] has
    /// been called.
    pub fn check(&self) -> Result<(), ExportError> {
        if self.is_cancelled() {
            Err(ExportError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Hands out at most one [`ExportTicket`] at a time.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    busy: Arc<AtomicBool>,
}

impl Exporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the exporter.
    ///
    /// # Errors
    ///
    /// [`ExportError::Busy`] while a previous ticket is still alive.
    pub fn try_begin(&self) -> Result<ExportTicket, ExportError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::Busy)?;
        Ok(ExportTicket {
            busy: Arc::clone(&self.busy),
        })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the exporter. Dropping it frees the exporter.
#[derive(Debug)]
pub struct ExportTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// What a finished export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub lots: usize,
    pub images: usize,
}

/// Resolves `file_name` against the process working directory.
#[must_use]
pub fn default_destination(file_name: &str) -> PathBuf {
    std::env::current_dir()
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|_| PathBuf::from(file_name))
}

/// Everything a background export needs, detached from the model.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub projection: LotProjection,
    pub destination: PathBuf,
    pub layout: DocumentLayout,
}

/// Writes `projection` to `destination` through `writer`.
///
/// # Errors
///
/// Image read failures, unsupported images, I/O failures and cancellation.
/// In every error case nothing is left at `destination` that was not there
/// before.
pub fn export_catalogue(
    projection: &LotProjection,
    destination: &Path,
    writer: &dyn DocumentWriter,
    layout: DocumentLayout,
    cancel: &CancelToken,
) -> Result<ExportSummary, ExportError> {
    info!(
        destination = %destination.display(),
        lots = projection.len(),
        images = projection.image_count(),
        format = writer.extension(),
        "export started"
    );

    let document = CatalogueDocument::build(projection, layout, cancel)?;

    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = NamedTempFile::new_in(directory)?;
    writer.write(&document, staging.as_file_mut(), cancel)?;
    staging.as_file_mut().sync_all()?;
    cancel.check()?;

    staging
        .persist(destination)
        .map_err(|e| ExportError::Io(e.error.to_string()))?;

    let summary = ExportSummary {
        path: destination.to_path_buf(),
        lots: document.sections.len(),
        images: document.image_count(),
    };
    info!(path = %summary.path.display(), lots = summary.lots, "export finished");
    Ok(summary)
}

/// Runs [`export_catalogue`] with the `.docx` writer on the blocking pool.
///
/// The ticket is held until the work is done, so the exporter stays busy for
/// exactly as long as the file is being written.
pub async fn export_in_background(
    ticket: ExportTicket,
    request: ExportRequest,
    cancel: CancelToken,
) -> Result<ExportSummary, ExportError> {
    let result = tokio::task::spawn_blocking(move || {
        let _ticket = ticket;
        export_catalogue(
            &request.projection,
            &request.destination,
            &DocxWriter::new(),
            request.layout,
            &cancel,
        )
    })
    .await
    .map_err(|e| ExportError::Io(format!("Export task failed: {e}")))?;

    if let Err(err) = &result {
        warn!(error = %err, "export failed");
    }
    result
}
