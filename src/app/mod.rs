// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the three screens.
//!
//! The `App` owns exactly one image list, one [`LotModel`] and the export
//! machinery. Screens get borrowed views of that state and answer with
//! events; everything with a side effect (dialogs, decoding, export) is
//! started from here as an iced [`Task`] and comes back as a [`Message`].

mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::{ActiveView, Screen};

use crate::config::{self, Config};
use crate::directory_scanner::ImageList;
use crate::export::{CancelToken, Exporter};
use crate::i18n::I18n;
use crate::lots::LotModel;
use crate::media::{FitScaler, ImageScaler, PreviewCache, PreviewKey};
use crate::ui::notifications::{self, Notification};
use crate::ui::sorting;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::error;

/// Root Iced application state.
pub struct App {
    i18n: I18n,
    config: Config,
    theme_mode: ThemeMode,
    view: ActiveView,
    images: ImageList,
    model: LotModel,
    /// Kept while the lot view is showing so sorting resumes where it was.
    sorting: sorting::State,
    notifications: notifications::Manager,
    exporter: Exporter,
    /// Set while an export is running.
    export_cancel: Option<CancelToken>,
    previews: PreviewCache,
    /// Previews being decoded, so each is requested once.
    pending_previews: HashSet<PreviewKey>,
    scaler: Arc<dyn ImageScaler>,
    /// A folder dialog or scan is in flight.
    opening_folder: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.view.screen())
            .field("images", &self.images.len())
            .field("assignments", &self.model.assignment_count())
            .field("exporting", &self.exporter.is_busy())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 1000.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 820.0;
pub const MIN_WINDOW_WIDTH: f32 = 760.0;
pub const MIN_WINDOW_HEIGHT: f32 = 600.0;

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 wants an `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_else(|| {
            error!("application booted twice; starting without CLI flags");
            Flags::default()
        });
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(I18n::default(), Config::default())
    }
}

impl App {
    fn with_config(i18n: I18n, config: Config) -> Self {
        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            view: ActiveView::Opening,
            images: ImageList::new(),
            model: LotModel::with_policy(config.counter_policy()),
            sorting: sorting::State::new(),
            notifications: notifications::Manager::new(),
            exporter: Exporter::new(),
            export_cancel: None,
            previews: PreviewCache::new(config.preview_capacity()),
            pending_previews: HashSet::new(),
            scaler: Arc::new(FitScaler::default()),
            opening_folder: false,
            config,
        }
    }

    /// Loads the config, picks the locale and, when a folder was given on
    /// the command line, starts scanning it right away.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load_with_override(flags.config_dir);
        let i18n = I18n::new(flags.lang, &config);
        let mut app = Self::with_config(i18n, config);

        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }

        let task = match flags.folder {
            Some(folder) => update::open_folder(&mut app.context(), folder),
            None => Task::none(),
        };
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.view.screen() {
            Screen::Opening => app_name,
            Screen::Sorting | Screen::Lots => {
                let folder = self
                    .images
                    .directory()
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
                match folder {
                    Some(folder) => format!("{folder} - {app_name}"),
                    None => app_name,
                }
            }
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(self.view.screen()),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            config: &self.config,
            view: &mut self.view,
            images: &mut self.images,
            model: &mut self.model,
            sorting: &mut self.sorting,
            notifications: &mut self.notifications,
            exporter: &self.exporter,
            export_cancel: &mut self.export_cancel,
            previews: &mut self.previews,
            pending_previews: &mut self.pending_previews,
            scaler: &self.scaler,
            opening_folder: &mut self.opening_folder,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.context();

        match message {
            Message::Opening(message) => update::handle_opening_message(&mut ctx, &message),
            Message::Sorting(message) => update::handle_sorting_message(&mut ctx, message),
            Message::Lots(message) => update::handle_lots_message(&mut ctx, message),
            Message::Notification(message) => {
                ctx.notifications.handle_message(&message);
                Task::none()
            }
            Message::FolderDialogResult(folder) => update::handle_folder_chosen(&mut ctx, folder),
            Message::FolderScanned(result) => update::handle_folder_scanned(&mut ctx, result),
            Message::PreviewLoaded { key, result } => {
                update::handle_preview_loaded(&mut ctx, key, result)
            }
            Message::ExportDestinationChosen(destination) => {
                update::handle_export_destination(&mut ctx, destination)
            }
            Message::ExportCompleted(result) => update::handle_export_completed(&mut ctx, result),
            Message::KeyPressed(key) => update::handle_key(&mut ctx, &key),
            Message::Tick(_) => {
                ctx.notifications.tick();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            active: &self.view,
            images: &self.images,
            model: &self.model,
            sorting: &self.sorting,
            notifications: &self.notifications,
            previews: &self.previews,
            preview_bounds: self.config.preview_bounds(),
            exporting: self.export_cancel.is_some(),
            opening_folder: self.opening_folder,
        })
    }
}
