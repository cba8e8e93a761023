// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::directory_scanner::ImageList;
use crate::error::{Error, ExportError};
use crate::export::ExportSummary;
use crate::media::{Preview, PreviewKey};
use crate::ui::{lots, notifications, opening, sorting};
use iced::keyboard::Key;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// screen messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Opening(opening::Message),
    Sorting(sorting::Message),
    Lots(lots::Message),
    Notification(notifications::NotificationMessage),
    /// Result of the folder picker; `None` when the operator cancelled.
    FolderDialogResult(Option<PathBuf>),
    FolderScanned(Result<ImageList, Error>),
    PreviewLoaded {
        key: PreviewKey,
        result: Result<Preview, Error>,
    },
    /// Result of the "Export As…" dialog.
    ExportDestinationChosen(Option<PathBuf>),
    ExportCompleted(Result<ExportSummary, ExportError>),
    /// A key nobody else handled.
    KeyPressed(Key),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Folder to open straight away, skipping the opening screen.
    pub folder: Option<PathBuf>,
    /// Optional config directory override (for settings.toml).
    pub config_dir: Option<PathBuf>,
}
