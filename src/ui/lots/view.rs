// SPDX-License-Identifier: MPL-2.0
use super::{Message, State};
use crate::config::LOT_THUMBNAIL_SIDE;
use crate::i18n::I18n;
use crate::media::{Bounds, ImageHandle, PreviewCache, PreviewKey};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text_input, Column, Container, Image, Row, Text};
use iced::{alignment, Element, Length};

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub previews: &'a PreviewCache,
    /// An export is running; only cancelling is possible.
    pub exporting: bool,
}

#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let has_lots = ctx.state.current().is_some();

    let heading = Container::new(
        Text::new(ctx.state.status_line(ctx.i18n)).size(typography::TITLE_MD),
    )
    .padding(spacing::XS)
    .style(styles::container::lot_heading);

    let thumbnails = ctx
        .state
        .thumbnail_images()
        .iter()
        .fold(Row::new().spacing(spacing::MD), |row, handle| {
            row.push(thumbnail(handle, ctx.previews, ctx.i18n))
        });

    let go_to_placeholder = ctx.i18n.tr("lots-go-to-placeholder");
    let go_to_input = text_input(go_to_placeholder.as_str(), ctx.state.go_to_input())
        .on_input(Message::GoToInputChanged)
        .on_submit(Message::GoToLot)
        .padding(spacing::XS)
        .size(typography::BODY)
        .width(Length::Fixed(sizing::LOT_INPUT_WIDTH));

    let label = |key: &str| Text::new(ctx.i18n.tr(key)).size(typography::BODY);

    let navigation = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            button(label("button-previous-lot"))
                .on_press_maybe(has_lots.then_some(Message::PreviousLot))
                .padding(spacing::XS),
        )
        .push(
            button(label("button-next-lot"))
                .on_press_maybe(has_lots.then_some(Message::NextLot))
                .padding(spacing::XS),
        )
        .push(go_to_input)
        .push(
            button(label("button-go-to-lot"))
                .on_press_maybe(has_lots.then_some(Message::GoToLot))
                .padding(spacing::XS),
        );

    let can_export = has_lots && !ctx.exporting;
    let export_row = Row::new()
        .spacing(spacing::XS)
        .push(
            button(label("button-back-to-sorting"))
                .on_press(Message::BackToSorting)
                .padding(spacing::XS),
        )
        .push(
            button(label("button-generate-document"))
                .on_press_maybe(can_export.then_some(Message::GenerateDocument))
                .padding(spacing::XS)
                .style(styles::button::primary),
        )
        .push(
            button(label("button-export-as"))
                .on_press_maybe(can_export.then_some(Message::ExportAs))
                .padding(spacing::XS),
        )
        .push(
            button(label("button-cancel-export"))
                .on_press_maybe(ctx.exporting.then_some(Message::CancelExport))
                .padding(spacing::XS)
                .style(styles::button::danger),
        );

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(heading)
        .push(thumbnails)
        .push(navigation)
        .push(export_row);

    if ctx.exporting {
        content = content.push(Text::new(ctx.i18n.tr("export-in-progress")).size(typography::BODY));
    }

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .into()
}

fn thumbnail<'a>(
    handle: &'a ImageHandle,
    previews: &'a PreviewCache,
    i18n: &I18n,
) -> Element<'a, Message> {
    let side = LOT_THUMBNAIL_SIDE as f32;
    let key = PreviewKey::new(handle.path(), Bounds::square(LOT_THUMBNAIL_SIDE));

    let picture: Element<'a, Message> = match previews.peek(&key) {
        Some(preview) => Image::new(preview.handle.clone())
            .width(Length::Fixed(preview.width as f32))
            .height(Length::Fixed(preview.height as f32))
            .into(),
        None => Text::new(i18n.tr("sorting-loading-preview"))
            .size(typography::CAPTION)
            .into(),
    };

    Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(
            Container::new(picture)
                .width(Length::Fixed(side))
                .height(Length::Fixed(side))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .style(styles::container::image_frame),
        )
        .push(Text::new(handle.name()).size(typography::CAPTION))
        .into()
}
