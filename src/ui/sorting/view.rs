// SPDX-License-Identifier: MPL-2.0
use super::{Message, State};
use crate::directory_scanner::ImageList;
use crate::i18n::I18n;
use crate::lots::LotModel;
use crate::media::{Bounds, Preview};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text_input, Column, Container, Image, Row, Text};
use iced::{alignment, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub images: &'a ImageList,
    pub model: &'a LotModel,
    /// Decoded preview of the current image, once available.
    pub preview: Option<&'a Preview>,
    pub preview_bounds: Bounds,
}

#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let has_images = !ctx.images.is_empty();

    let image_area: Element<'_, Message> = match ctx.preview {
        Some(preview) => Image::new(preview.handle.clone())
            .width(Length::Fixed(preview.width as f32))
            .height(Length::Fixed(preview.height as f32))
            .into(),
        None if has_images => Text::new(ctx.i18n.tr("sorting-loading-preview"))
            .size(typography::BODY)
            .into(),
        None => Text::new("").into(),
    };
    let image_area = Container::new(image_area)
        .width(Length::Fixed(ctx.preview_bounds.width as f32))
        .height(Length::Fixed(ctx.preview_bounds.height as f32))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::image_frame);

    let status = Container::new(
        Text::new(ctx.state.status_line(ctx.images, ctx.model, ctx.i18n)).size(typography::BODY),
    )
    .width(Length::Fill)
    .padding(spacing::XS)
    .style(styles::container::status_bar);

    let action = |key: &str, message: Message| {
        button(Text::new(ctx.i18n.tr(key)).size(typography::BODY))
            .on_press_maybe(has_images.then_some(message))
            .padding(spacing::XS)
    };

    let navigation = Row::new()
        .spacing(spacing::XS)
        .push(action("button-previous-image", Message::Previous))
        .push(action("button-next-image", Message::Next))
        .push(action("button-hide", Message::Hide));

    let manual_placeholder = ctx.i18n.tr("sorting-manual-placeholder");
    let mut manual_input = text_input(manual_placeholder.as_str(), ctx.state.manual_input())
        .padding(spacing::XS)
        .size(typography::BODY)
        .width(Length::Fixed(sizing::LOT_INPUT_WIDTH));
    if has_images {
        manual_input = manual_input
            .on_input(Message::ManualInputChanged)
            .on_submit(Message::AssignManual);
    }

    let assignment = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(action("button-assign-next-lot", Message::AssignNext).style(styles::button::primary))
        .push(action("button-assign-previous-lot", Message::AssignPrevious))
        .push(manual_input)
        .push(action("button-assign-manual-lot", Message::AssignManual));

    let review = button(Text::new(ctx.i18n.tr("button-review-lots")).size(typography::BODY))
        .on_press(Message::ReviewLots)
        .padding(spacing::XS);

    let content = Column::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(image_area)
        .push(status)
        .push(navigation)
        .push(assignment)
        .push(review);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .into()
}
