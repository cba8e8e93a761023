// SPDX-License-Identifier: MPL-2.0
//! Image decoding and scaling for on-screen previews.
//!
//! Scaling is a pure function from decoded pixels and a target box to a
//! display bitmap, expressed as the [`ImageScaler`] trait so tests can swap in
//! a recording stub that never touches real pixels.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::imageops::FilterType;
use image_rs::{DynamicImage, GenericImageView, ImageReader};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Target box for a scaled image, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square box, used for lot thumbnails.
    #[must_use]
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    fn contains(self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }
}

/// A display-ready bitmap.
#[derive(Clone)]
pub struct Preview {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl Preview {
    /// Wraps RGBA pixels in a renderer handle.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Turns decoded pixels into a bitmap that fits `bounds`.
pub trait ImageScaler: Send + Sync {
    fn scale(&self, pixels: &DynamicImage, bounds: Bounds) -> Preview;
}

/// Aspect-preserving scaler. Images already inside the box are not enlarged.
#[derive(Debug, Clone, Copy)]
pub struct FitScaler {
    filter: FilterType,
}

impl FitScaler {
    #[must_use]
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for FitScaler {
    fn default() -> Self {
        Self::new(FilterType::Triangle)
    }
}

impl ImageScaler for FitScaler {
    fn scale(&self, pixels: &DynamicImage, bounds: Bounds) -> Preview {
        let (width, height) = pixels.dimensions();
        let fitted = if bounds.contains(width, height) {
            pixels.to_rgba8()
        } else {
            pixels
                .resize(bounds.width.max(1), bounds.height.max(1), self.filter)
                .to_rgba8()
        };
        let (width, height) = fitted.dimensions();
        Preview::from_rgba(width, height, fitted.into_raw())
    }
}

/// Decodes the image at `path`, sniffing the format from its content.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be opened and [`Error::Image`]
/// when its content is not a decodable image.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let reader = ImageReader::open(path.as_ref())?.with_guessed_format()?;
    Ok(reader.decode()?)
}

/// Decodes `path` and scales it into `bounds`.
///
/// # Errors
///
/// Propagates [`decode`] failures.
pub fn load_preview<P: AsRef<Path>>(
    path: P,
    bounds: Bounds,
    scaler: &dyn ImageScaler,
) -> Result<Preview> {
    let pixels = decode(path)?;
    Ok(scaler.scale(&pixels, bounds))
}

/// Runs [`load_preview`] on the blocking pool so the event thread stays free.
pub async fn load_preview_async(
    path: PathBuf,
    bounds: Bounds,
    scaler: Arc<dyn ImageScaler>,
) -> Result<Preview> {
    tokio::task::spawn_blocking(move || load_preview(&path, bounds, scaler.as_ref()))
        .await
        .map_err(|e| Error::Io(format!("Preview task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_png;
    use image_rs::RgbaImage;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingScaler {
        calls: Mutex<Vec<(u32, u32, Bounds)>>,
    }

    impl ImageScaler for RecordingScaler {
        fn scale(&self, pixels: &DynamicImage, bounds: Bounds) -> Preview {
            let (w, h) = pixels.dimensions();
            self.calls.lock().unwrap().push((w, h, bounds));
            Preview::from_rgba(1, 1, vec![0, 0, 0, 255])
        }
    }

    #[test]
    fn fit_scaler_preserves_aspect_ratio() {
        let pixels = DynamicImage::ImageRgba8(RgbaImage::new(800, 400));
        let preview = FitScaler::default().scale(&pixels, Bounds::square(300));
        assert_eq!(preview.width, 300);
        assert_eq!(preview.height, 150);
    }

    #[test]
    fn fit_scaler_does_not_enlarge_small_images() {
        let pixels = DynamicImage::ImageRgba8(RgbaImage::new(40, 30));
        let preview = FitScaler::default().scale(&pixels, Bounds::new(700, 500));
        assert_eq!((preview.width, preview.height), (40, 30));
    }

    #[test]
    fn load_preview_hands_decoded_pixels_to_the_scaler() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write_png(dir.path(), "a.png", 12, 8);
        let scaler = RecordingScaler::default();

        let preview =
            load_preview(&path, Bounds::new(700, 500), &scaler).expect("preview should load");

        assert_eq!(preview.width, 1);
        let calls = scaler.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(12, 8, Bounds::new(700, 500))]);
    }

    #[test]
    fn load_preview_reports_missing_files_as_io() {
        let scaler = RecordingScaler::default();
        let err = load_preview("/definitely/not/here.jpg", Bounds::square(10), &scaler)
            .expect_err("missing file must fail");
        assert!(matches!(err, Error::Io(_)));
        assert!(scaler.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_non_image_content() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, b"not an image").expect("write fixture");
        assert!(matches!(decode(&path), Err(Error::Image(_))));
    }

    #[tokio::test]
    async fn async_preview_runs_on_the_blocking_pool() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = write_png(dir.path(), "b.png", 20, 20);
        let scaler: Arc<dyn ImageScaler> = Arc::new(FitScaler::default());

        let preview = load_preview_async(path, Bounds::square(10), scaler)
            .await
            .expect("preview should load");
        assert_eq!((preview.width, preview.height), (10, 10));
    }
}
