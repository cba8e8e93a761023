// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the active screen and stacks the notification toasts on top.

use super::{ActiveView, Message};
use crate::directory_scanner::ImageList;
use crate::i18n::I18n;
use crate::lots::LotModel;
use crate::media::{Bounds, PreviewCache, PreviewKey};
use crate::ui::notifications::{self, Toast};
use crate::ui::{lots, opening, sorting};
use iced::widget::{Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub active: &'a ActiveView,
    pub images: &'a ImageList,
    pub model: &'a LotModel,
    pub sorting: &'a sorting::State,
    pub notifications: &'a notifications::Manager,
    pub previews: &'a PreviewCache,
    pub preview_bounds: Bounds,
    pub exporting: bool,
    pub opening_folder: bool,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match ctx.active {
        ActiveView::Opening => opening::view(opening::ViewContext {
            i18n: ctx.i18n,
            busy: ctx.opening_folder,
        })
        .map(Message::Opening),
        ActiveView::Sorting => view_sorting(&ctx),
        ActiveView::Lots(state) => lots::view(lots::ViewContext {
            i18n: ctx.i18n,
            state,
            previews: ctx.previews,
            exporting: ctx.exporting,
        })
        .map(Message::Lots),
    };

    let content = Container::new(current_view)
        .width(Length::Fill)
        .height(Length::Fill);

    Stack::new()
        .push(content)
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_sorting<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let preview = ctx
        .sorting
        .current(ctx.images)
        .and_then(|handle| ctx.previews.peek(&PreviewKey::new(handle.path(), ctx.preview_bounds)));

    sorting::view(sorting::ViewContext {
        i18n: ctx.i18n,
        state: ctx.sorting,
        images: ctx.images,
        model: ctx.model,
        preview,
        preview_bounds: ctx.preview_bounds,
    })
    .map(Message::Sorting)
}
