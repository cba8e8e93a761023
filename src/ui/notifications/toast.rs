// SPDX-License-Identifier: MPL-2.0
//! Toast cards drawn over the bottom-right corner of the window.

use super::manager::{Manager, Message};
use super::notification::{Notification, Severity};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, row, text, Column};
use iced::{alignment, Element, Length, Theme};

pub struct Toast;

impl Toast {
    /// One card: severity marker, localized message, close button.
    pub fn view<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
        let accent = notification.severity().color();

        let marker = text(marker(notification.severity()))
            .size(sizing::ICON_SM)
            .color(accent);
        let message = container(text(localized(notification, i18n)).size(typography::BODY))
            .width(Length::Fill);
        let close = button(text("\u{2715}").size(typography::CAPTION))
            .padding(spacing::XXS)
            .style(styles::button::dismiss)
            .on_press(Message::Dismiss(notification.id()));

        container(
            row![container(marker).padding(spacing::XXS), message, close]
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center),
        )
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| styles::container::toast(theme, accent))
        .into()
    }

    /// Every visible toast, newest last, pinned to the bottom-right corner.
    pub fn view_overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
        let cards = Column::with_children(manager.visible().map(|n| Self::view(n, i18n)))
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Right);

        if manager.visible_count() == 0 {
            return cards.into();
        }

        container(cards)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(spacing::MD)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom)
            .into()
    }
}

fn localized(notification: &Notification, i18n: &I18n) -> String {
    let args: Vec<(&str, &str)> = notification
        .message_args()
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    if args.is_empty() {
        i18n.tr(notification.message_key())
    } else {
        i18n.tr_with_args(notification.message_key(), &args)
    }
}

fn marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "\u{2713}",
        Severity::Info => "i",
        Severity::Warning | Severity::Error => "!",
    }
}
