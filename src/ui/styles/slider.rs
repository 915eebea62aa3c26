// SPDX-License-Identifier: MPL-2.0
//! Slider styles for the progress and volume bars.

use crate::ui::design_tokens::{opacity, palette};
use iced::widget::slider;
use iced::{Background, Border, Color, Theme};

/// Overlay slider; `alpha` is the overlay opacity.
pub fn overlay(alpha: f32) -> impl Fn(&Theme, slider::Status) -> slider::Style {
    move |_theme: &Theme, status: slider::Status| {
        let handle = match status {
            slider::Status::Hovered | slider::Status::Dragged => palette::PRIMARY_400,
            slider::Status::Active => palette::WHITE,
        };
        let filled = Color {
            a: alpha,
            ..palette::PRIMARY_500
        };
        let rest = Color {
            a: opacity::OVERLAY_SUBTLE * alpha,
            ..palette::WHITE
        };

        slider::Style {
            rail: slider::Rail {
                backgrounds: (Background::Color(filled), Background::Color(rest)),
                width: 4.0,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 2.0.into(),
                },
            },
            handle: slider::Handle {
                shape: slider::HandleShape::Circle { radius: 6.0 },
                background: Background::Color(Color { a: alpha, ..handle }),
                border_width: 0.0,
                border_color: Color::TRANSPARENT,
            },
        }
    }
}

/// Progress slider while the duration is unknown.
pub fn disabled(alpha: f32) -> impl Fn(&Theme, slider::Status) -> slider::Style {
    move |theme: &Theme, _status: slider::Status| {
        let mut style = overlay(alpha)(theme, slider::Status::Active);
        let gray = Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM * alpha,
            ..palette::GRAY_400
        });
        style.rail.backgrounds = (gray, gray);
        style.handle.background = gray;
        style
    }
}
