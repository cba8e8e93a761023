// SPDX-License-Identifier: MPL-2.0
//! `auction_lots` helps an auction cataloguer turn a folder of product
//! photographs into a printable lot catalogue.
//!
//! The operator browses the images one at a time, groups them into numbered
//! lots, reviews the lots, and exports a WordprocessingML document with one
//! titled table per lot.

pub mod app;
pub mod config;
pub mod directory_scanner;
pub mod error;
pub mod export;
pub mod i18n;
pub mod lots;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
