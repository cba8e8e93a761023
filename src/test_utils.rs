// SPDX-License-Identifier: MPL-2.0
//! Test utilities for generating image fixtures on disk.
//!
//! Fixtures are encoded with the `image` crate so tests never depend on
//! binary files checked into the repository.

use image_rs::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    })
}

/// Writes a `width`×`height` PNG named `name` into `dir`.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    gradient(width, height)
        .save_with_format(&path, ImageFormat::Png)
        .expect("failed to write PNG fixture");
    path
}

/// Writes a `width`×`height` JPEG named `name` into `dir`.
pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    gradient(width, height)
        .save_with_format(&path, ImageFormat::Jpeg)
        .expect("failed to write JPEG fixture");
    path
}
