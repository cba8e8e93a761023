// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Each screen follows the Elm-style "state down, messages up" pattern: it
//! exposes `Message`, `Event`, `update` and `view`, and reports anything the
//! application must act on as an `Event`.
//!
//! # Screens
//!
//! - [`opening`] - Welcome text and folder selection
//! - [`sorting`] - One image at a time, with lot assignment
//! - [`lots`] - Lot review and catalogue export
//!
//! # Shared Infrastructure
//!
//! - [`notifications`] - Toasts for confirmations and errors
//! - [`design_tokens`] - Colors, spacing, sizing
//! - [`styles`] - Widget style functions
//! - [`theming`] - Light/Dark/System theme mode

pub mod design_tokens;
pub mod lots;
pub mod notifications;
pub mod opening;
pub mod sorting;
pub mod styles;
pub mod theming;
