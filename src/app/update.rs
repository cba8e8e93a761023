// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Screen messages are applied to the screen state first; the events they
//! return are turned into notifications, screen switches and background
//! tasks here.

use super::{ActiveView, Message, Screen};
use crate::config::{Config, LOT_THUMBNAIL_SIDE};
use crate::directory_scanner::ImageList;
use crate::error::{Error, ExportError, LotError};
use crate::export::{
    self, CancelToken, DocumentLayout, ExportRequest, ExportSummary, Exporter,
};
use crate::lots::{LotModel, LotProjection};
use crate::media::{self, extensions, Bounds, ImageScaler, Preview, PreviewCache, PreviewKey};
use crate::ui::notifications::{self, Notification};
use crate::ui::{lots, opening, sorting};
use iced::keyboard::Key;
use iced::Task;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Mutable borrows of the application state, handed to every handler.
pub struct UpdateContext<'a> {
    pub config: &'a Config,
    pub view: &'a mut ActiveView,
    pub images: &'a mut ImageList,
    pub model: &'a mut LotModel,
    pub sorting: &'a mut sorting::State,
    pub notifications: &'a mut notifications::Manager,
    pub exporter: &'a Exporter,
    pub export_cancel: &'a mut Option<CancelToken>,
    pub previews: &'a mut PreviewCache,
    pub pending_previews: &'a mut HashSet<PreviewKey>,
    pub scaler: &'a Arc<dyn ImageScaler>,
    pub opening_folder: &'a mut bool,
}

pub fn handle_opening_message(ctx: &mut UpdateContext<'_>, message: &opening::Message) -> Task<Message> {
    match opening::update(message) {
        opening::Event::SelectFolder => {
            if *ctx.opening_folder {
                return Task::none();
            }
            *ctx.opening_folder = true;
            Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .pick_folder()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::FolderDialogResult,
            )
        }
    }
}

pub fn handle_folder_chosen(ctx: &mut UpdateContext<'_>, folder: Option<PathBuf>) -> Task<Message> {
    match folder {
        Some(folder) => open_folder(ctx, folder),
        None => {
            *ctx.opening_folder = false;
            Task::none()
        }
    }
}

/// Scans `folder` off the event thread.
pub fn open_folder(ctx: &mut UpdateContext<'_>, folder: PathBuf) -> Task<Message> {
    *ctx.opening_folder = true;
    info!(folder = %folder.display(), "opening folder");
    Task::perform(ImageList::scan_directory_async(folder), Message::FolderScanned)
}

/// Replaces the image list and starts a fresh model.
pub fn handle_folder_scanned(
    ctx: &mut UpdateContext<'_>,
    result: Result<ImageList, Error>,
) -> Task<Message> {
    *ctx.opening_folder = false;

    let list = match result {
        Ok(list) => list,
        Err(err) => {
            warn!(error = %err, "folder scan failed");
            ctx.notifications.push(
                Notification::error("notification-scan-error").with_arg("detail", err.to_string()),
            );
            return Task::none();
        }
    };

    if list.is_empty() {
        ctx.notifications.push(Notification::from(&LotError::EmptyFolder));
    }

    *ctx.images = list;
    *ctx.model = LotModel::with_policy(ctx.config.counter_policy());
    *ctx.sorting = sorting::State::new();
    ctx.pending_previews.clear();
    *ctx.view = ActiveView::Sorting;
    info!(images = ctx.images.len(), "sorting started");

    request_visible_previews(ctx)
}

pub fn handle_sorting_message(ctx: &mut UpdateContext<'_>, message: sorting::Message) -> Task<Message> {
    if !matches!(ctx.view, ActiveView::Sorting) {
        return Task::none();
    }

    match sorting::update(ctx.sorting, message, ctx.images, ctx.model) {
        sorting::Event::None => {}
        sorting::Event::Notify(notification) => ctx.notifications.push(notification),
        sorting::Event::OpenLotView => {
            let projection = ctx.model.snapshot_lots();
            info!(lots = projection.len(), images = projection.image_count(), "reviewing lots");
            *ctx.view = ActiveView::Lots(lots::State::new(projection));
        }
    }

    request_visible_previews(ctx)
}

pub fn handle_lots_message(ctx: &mut UpdateContext<'_>, message: lots::Message) -> Task<Message> {
    let ActiveView::Lots(state) = &mut *ctx.view else {
        return Task::none();
    };

    match lots::update(state, message) {
        lots::Event::None => Task::none(),
        lots::Event::LotChanged => request_visible_previews(ctx),
        lots::Event::Notify(notification) => {
            ctx.notifications.push(notification);
            Task::none()
        }
        lots::Event::BackToSorting => {
            info!("back to sorting");
            *ctx.view = ActiveView::Sorting;
            request_visible_previews(ctx)
        }
        lots::Event::GenerateDocument => {
            let destination = export::default_destination(ctx.config.export_file_name());
            start_export(ctx, destination)
        }
        lots::Event::ExportAs => {
            if ctx.export_cancel.is_some() {
                ctx.notifications.push(Notification::from(&ExportError::Busy));
                return Task::none();
            }
            let file_name = ctx.config.export_file_name().to_string();
            let (filter_name, filter_extensions) = extensions::DOCUMENT_SAVE_FILTER;
            Task::perform(
                async move {
                    let mut dialog = rfd::AsyncFileDialog::new()
                        .set_file_name(&file_name)
                        .add_filter(filter_name, filter_extensions);
                    if let Ok(dir) = std::env::current_dir() {
                        dialog = dialog.set_directory(dir);
                    }
                    dialog.save_file().await.map(|h| h.path().to_path_buf())
                },
                Message::ExportDestinationChosen,
            )
        }
        lots::Event::CancelExport => {
            if let Some(cancel) = ctx.export_cancel.as_ref() {
                cancel.cancel();
                ctx.notifications.push(Notification::info("export-cancelling"));
            }
            Task::none()
        }
    }
}

pub fn handle_export_destination(
    ctx: &mut UpdateContext<'_>,
    destination: Option<PathBuf>,
) -> Task<Message> {
    match destination {
        Some(mut path) => {
            if path.extension().is_none() {
                path.set_extension("docx");
            }
            start_export(ctx, path)
        }
        None => Task::none(),
    }
}

/// What gets exported: a snapshot of the model taken now.
fn export_projection(ctx: &UpdateContext<'_>) -> LotProjection {
    if ctx.config.export.skip_hidden {
        ctx.model.snapshot_visible_lots()
    } else {
        ctx.model.snapshot_lots()
    }
}

/// Starts an export unless one is still running or its completion has not
/// been handled yet.
fn start_export(ctx: &mut UpdateContext<'_>, destination: PathBuf) -> Task<Message> {
    if ctx.export_cancel.is_some() {
        ctx.notifications.push(Notification::from(&ExportError::Busy));
        return Task::none();
    }
    let ticket = match ctx.exporter.try_begin() {
        Ok(ticket) => ticket,
        Err(err) => {
            ctx.notifications.push(Notification::from(&err));
            return Task::none();
        }
    };

    let cancel = CancelToken::new();
    *ctx.export_cancel = Some(cancel.clone());
    let request = ExportRequest {
        projection: export_projection(ctx),
        destination,
        layout: DocumentLayout::new(ctx.config.image_size_pt()),
    };
    ctx.notifications.push(Notification::info("export-started"));

    Task::perform(
        export::export_in_background(ticket, request, cancel),
        Message::ExportCompleted,
    )
}

pub fn handle_export_completed(
    ctx: &mut UpdateContext<'_>,
    result: Result<ExportSummary, ExportError>,
) -> Task<Message> {
    *ctx.export_cancel = None;
    match result {
        Ok(summary) => {
            ctx.notifications.clear_export_errors();
            ctx.notifications.push(
                Notification::success("export-success")
                    .with_arg("path", summary.path.display().to_string())
                    .with_arg("lots", summary.lots.to_string())
                    .with_arg("images", summary.images.to_string()),
            );
        }
        Err(err) => ctx.notifications.push(Notification::from(&err)),
    }
    Task::none()
}

pub fn handle_preview_loaded(
    ctx: &mut UpdateContext<'_>,
    key: PreviewKey,
    result: Result<Preview, Error>,
) -> Task<Message> {
    ctx.pending_previews.remove(&key);
    match result {
        Ok(preview) => {
            ctx.previews.insert(key, preview);
            // The insertion may have pushed out something still on screen.
            return request_visible_previews(ctx);
        }
        Err(err) => {
            warn!(path = %key.path.display(), error = %err, "preview decode failed");
            let file = key
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ctx.notifications
                .push(Notification::warning("notification-preview-error").with_arg("file", file));
        }
    }
    Task::none()
}

pub fn handle_key(ctx: &mut UpdateContext<'_>, key: &Key) -> Task<Message> {
    match ctx.view.screen() {
        Screen::Opening => Task::none(),
        Screen::Sorting => match sorting::shortcut(key) {
            Some(message) => handle_sorting_message(ctx, message),
            None => Task::none(),
        },
        Screen::Lots => match lots::shortcut(key) {
            Some(message) => handle_lots_message(ctx, message),
            None => Task::none(),
        },
    }
}

/// Previews the current screen needs: the current image and the next one
/// while sorting, the thumbnails of the current lot while reviewing.
fn wanted_previews(ctx: &UpdateContext<'_>) -> Vec<PreviewKey> {
    match &*ctx.view {
        ActiveView::Opening => Vec::new(),
        ActiveView::Sorting => {
            let bounds = ctx.config.preview_bounds();
            let index = ctx.sorting.index();
            let mut keys: Vec<PreviewKey> = ctx
                .images
                .get(index)
                .into_iter()
                .map(|h| PreviewKey::new(h.path(), bounds))
                .collect();
            if ctx.images.len() > 1 {
                if let Some(next) = ctx.images.get((index + 1) % ctx.images.len()) {
                    keys.push(PreviewKey::new(next.path(), bounds));
                }
            }
            keys
        }
        ActiveView::Lots(state) => state
            .thumbnail_images()
            .iter()
            .map(|h| PreviewKey::new(h.path(), Bounds::square(LOT_THUMBNAIL_SIDE)))
            .collect(),
    }
}

fn request_visible_previews(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let wanted = wanted_previews(ctx);
    let mut tasks = Vec::new();

    for key in ctx.previews.missing(&wanted) {
        if !ctx.pending_previews.insert(key.clone()) {
            continue;
        }
        let load = media::load_preview_async(key.path.clone(), key.bounds, Arc::clone(ctx.scaler));
        tasks.push(Task::perform(load, move |result| Message::PreviewLoaded { key, result }));
    }

    Task::batch(tasks)
}
