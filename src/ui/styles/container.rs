// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, radius, shadow};
use crate::ui::theming::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Status bar under the image area.
pub fn status_bar(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        text_color: Some(palette.background.weak.text),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Backdrop behind a preview or thumbnail.
///
/// The scheme follows the iced theme so letterboxing stays visible in both
/// light and dark modes.
pub fn image_frame(theme: &Theme) -> container::Style {
    let scheme = ColorScheme::for_theme(theme);

    container::Style {
        background: Some(Background::Color(scheme.surface_secondary)),
        text_color: Some(scheme.text_secondary),
        border: Border {
            color: scheme.overlay_background,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Outline around the heading of the lot under review.
pub fn lot_heading(theme: &Theme) -> container::Style {
    let scheme = ColorScheme::for_theme(theme);

    container::Style {
        border: Border {
            color: scheme.brand_primary,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Toast card, outlined in the severity color.
pub fn toast(theme: &Theme, accent: Color) -> container::Style {
    let background = theme.extended_palette().background.base;

    container::Style {
        background: Some(Background::Color(background.color)),
        text_color: Some(background.text),
        border: Border {
            color: accent,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}
