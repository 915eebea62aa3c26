// SPDX-License-Identifier: MPL-2.0
//! Styles for the transport overlay drawn over the video.
//!
//! Every style takes the overlay's current opacity so a fade dims the whole
//! bar uniformly.

use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
};
use iced::widget::{container, text};
use iced::{Background, Color, Theme};

/// Translucent strip behind the transport controls.
pub fn controls_container(alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG * alpha,
            ..BLACK
        })),
        text_color: Some(Color { a: alpha, ..WHITE }),
        ..Default::default()
    }
}

/// Time and volume labels.
pub fn label(alpha: f32) -> impl Fn(&Theme) -> text::Style {
    move |_theme: &Theme| text::Style {
        color: Some(Color { a: alpha, ..WHITE }),
    }
}
