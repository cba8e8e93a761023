// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Main action of a screen (assign to next lot, generate document).
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color, shadow) = match status {
        button::Status::Active | button::Status::Pressed => {
            (palette::PRIMARY_500, palette::PRIMARY_600, shadow::NONE)
        }
        button::Status::Hovered => (palette::PRIMARY_400, palette::PRIMARY_500, shadow::MD),
        button::Status::Disabled => return button::secondary(theme, status),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

/// Destructive or interrupting action (cancel export).
pub fn danger(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Disabled => button::secondary(theme, status),
        _ => button::Style {
            background: Some(Background::Color(palette::ERROR_500)),
            text_color: WHITE,
            border: Border {
                radius: radius::SM.into(),
                ..Border::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Borderless close button on a toast. Only shows a background under the
/// pointer.
pub fn dismiss(theme: &Theme, status: button::Status) -> button::Style {
    let text = theme.extended_palette().background.base.text;
    let hover = |alpha: f32| Some(Background::Color(Color { a: alpha, ..palette::GRAY_400 }));

    let (background, text_color) = match status {
        button::Status::Active => (None, text),
        button::Status::Hovered => (hover(opacity::OVERLAY_SUBTLE), text),
        button::Status::Pressed => (hover(opacity::OVERLAY_MEDIUM), text),
        button::Status::Disabled => (None, Color { a: opacity::OVERLAY_MEDIUM, ..text }),
    };

    button::Style {
        background,
        text_color,
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
