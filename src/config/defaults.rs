// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Sorting preview**: size of the image box in the sorting view
//! - **Lot view**: thumbnail box and how many thumbnails are shown
//! - **Export**: output file name and embedded picture size
//! - **Preview cache**: number of scaled previews kept in memory

// ==========================================================================
// Sorting Preview Defaults
// ==========================================================================

/// Default width of the sorting preview box.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 700;

/// Default height of the sorting preview box.
pub const DEFAULT_PREVIEW_HEIGHT: u32 = 500;

/// Smallest accepted preview side.
pub const MIN_PREVIEW_SIDE: u32 = 100;

/// Largest accepted preview side.
pub const MAX_PREVIEW_SIDE: u32 = 4000;

// ==========================================================================
// Lot View Defaults
// ==========================================================================

/// Side of the square thumbnail box in the lot view.
pub const LOT_THUMBNAIL_SIDE: u32 = 300;

/// Thumbnails shown per lot; the rest stay in the model and the export.
pub const LOT_THUMBNAIL_LIMIT: usize = 3;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Default output file name, resolved against the working directory.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "AuctionLots.docx";

/// Default side of embedded pictures, in points.
pub const DEFAULT_IMAGE_SIZE_PT: u32 = 150;

/// Minimum embedded picture side, in points.
pub const MIN_IMAGE_SIZE_PT: u32 = 16;

/// Maximum embedded picture side, in points.
pub const MAX_IMAGE_SIZE_PT: u32 = 600;

// ==========================================================================
// Preview Cache Defaults
// ==========================================================================

/// Default number of cached previews.
pub const DEFAULT_PREVIEW_CAPACITY: usize = 32;

/// Minimum number of cached previews: every thumbnail of a lot, or the
/// current image plus the prefetched next one.
pub const MIN_PREVIEW_CAPACITY: usize = LOT_THUMBNAIL_LIMIT + 1;

/// Maximum number of cached previews.
pub const MAX_PREVIEW_CAPACITY: usize = 512;
