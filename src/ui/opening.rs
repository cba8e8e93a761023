// SPDX-License-Identifier: MPL-2.0
//! Welcome screen shown until a folder has been chosen.

use crate::i18n::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::Horizontal,
    widget::{button, Column, Container, Text},
    Element, Length,
};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// A folder dialog or scan is in flight.
    pub busy: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectFolder,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    SelectFolder,
}

#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::SelectFolder => Event::SelectFolder,
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let title = Text::new(ctx.i18n.tr("opening-title")).size(typography::TITLE_LG);
    let intro = Text::new(ctx.i18n.tr("opening-instructions")).size(typography::BODY_LG);

    let select = button(Text::new(ctx.i18n.tr("button-select-folder")).size(typography::BODY_LG))
        .on_press_maybe((!ctx.busy).then_some(Message::SelectFolder))
        .padding(spacing::SM)
        .style(styles::button::primary);

    let content = Column::new()
        .spacing(spacing::LG)
        .align_x(Horizontal::Center)
        .max_width(560.0)
        .push(title)
        .push(intro)
        .push(select);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .padding(spacing::XL)
        .into()
}
