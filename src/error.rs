// SPDX-License-Identifier: MPL-2.0
//! Error kinds surfaced to the operator.
//!
//! Views catch these at their boundary and turn them into notifications;
//! none of them aborts the process.

use crate::lots::LotNumber;
use crate::ui::notifications::Severity;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Image Error: {0}")]
    Image(String),
    #[error(transparent)]
    Lot(#[from] LotError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Failures of lot assignment and lot navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotError {
    /// No lot has been started yet, so there is nothing to append to.
    #[error("No previous lot available")]
    NoPreviousLot,

    /// The operator typed something that is not a positive integer.
    #[error("Invalid lot number: {0:?}")]
    InvalidLotNumber(String),

    /// The requested lot has no images.
    #[error("Lot {0} not found")]
    LotNotFound(LotNumber),

    /// Lot review was requested before anything was assigned.
    #[error("No images have been assigned to lots yet")]
    NoAssignments,

    /// The selected folder holds no supported images.
    #[error("No images found in the selected folder")]
    EmptyFolder,
}

impl LotError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            LotError::NoPreviousLot => "error-no-previous-lot",
            LotError::InvalidLotNumber(_) => "error-invalid-lot-number",
            LotError::LotNotFound(_) => "error-lot-not-found",
            LotError::NoAssignments => "error-no-assignments",
            LotError::EmptyFolder => "error-empty-folder",
        }
    }

    /// Invalid input is an error; everything else is informational.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            LotError::InvalidLotNumber(_) => Severity::Error,
            _ => Severity::Info,
        }
    }
}

/// Failures of the document export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The destination could not be written.
    #[error("I/O error: {0}")]
    Io(String),

    /// A source image could not be read from disk.
    #[error("Cannot read image {file}: {reason}")]
    ImageRead { file: String, reason: String },

    /// A source image is in a format the document writer cannot embed.
    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    /// Another export is still running.
    #[error("An export is already in progress")]
    Busy,

    /// The operator cancelled the export.
    #[error("Export cancelled")]
    Cancelled,
}

impl ExportError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ExportError::Io(_) => "error-export-io",
            ExportError::ImageRead { .. } => "error-export-image-read",
            ExportError::UnsupportedImage(_) => "error-export-unsupported-image",
            ExportError::Busy => "error-export-busy",
            ExportError::Cancelled => "error-export-cancelled",
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            ExportError::Busy | ExportError::Cancelled => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Underlying message shown next to the localized text.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            ExportError::Io(msg) => msg.clone(),
            ExportError::ImageRead { file, reason } => format!("{file}: {reason}"),
            ExportError::UnsupportedImage(file) => file.clone(),
            ExportError::Busy | ExportError::Cancelled => String::new(),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::Io(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
