// SPDX-License-Identifier: MPL-2.0
//! Localized operator-facing text.
//!
//! Translations are Fluent `.ftl` files embedded at build time from
//! `assets/i18n/`. The locale comes from the `--lang` flag, then the config
//! file, then the operating system, and falls back to `en-US`.

pub mod fluent;

pub use fluent::{I18n, DEFAULT_LOCALE};
