// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Primary action (Home "Open file").
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, border, shadow) = match status {
        button::Status::Hovered => (palette::PRIMARY_400, palette::PRIMARY_500, shadow::MD),
        button::Status::Disabled => (palette::GRAY_700, palette::GRAY_400, shadow::NONE),
        button::Status::Active | button::Status::Pressed => {
            (palette::PRIMARY_500, palette::PRIMARY_600, shadow::SM)
        }
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: border,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

/// Transport buttons drawn on the video. `alpha` is the overlay opacity.
pub fn overlay(alpha: f32) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let background = match status {
            button::Status::Hovered => opacity::OVERLAY_SUBTLE,
            button::Status::Pressed => opacity::OVERLAY_MEDIUM,
            _ => opacity::TRANSPARENT,
        };
        button::Style {
            background: Some(Background::Color(Color {
                a: background * alpha,
                ..WHITE
            })),
            text_color: Color { a: alpha, ..WHITE },
            border: Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Sidebar entry; `selected` highlights the current page.
pub fn sidebar_entry(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let text = theme.extended_palette().background.base.text;
        let background = match (selected, status) {
            (true, _) => Some(Background::Color(Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::PRIMARY_500
            })),
            (false, button::Status::Hovered) => Some(Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GRAY_400
            })),
            _ => None,
        };
        button::Style {
            background,
            text_color: text,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Minimize / maximize buttons of the title bar.
pub fn window_control(theme: &Theme, status: button::Status) -> button::Style {
    let text = theme.extended_palette().background.base.text;
    let background = match status {
        button::Status::Hovered => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        })),
        _ => None,
    };
    button::Style {
        background,
        text_color: text,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Close button: turns red on hover.
pub fn window_close(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::ERROR_500)),
            text_color: WHITE,
            border: Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        _ => window_control(theme, status),
    }
}

/// Dismiss cross on notices.
pub fn dismiss(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_SUBTLE,
        button::Status::Pressed => opacity::OVERLAY_MEDIUM,
        _ => opacity::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_button_uses_brand_colors() {
        let style = primary(&Theme::Dark, button::Status::Active);
        assert_eq!(
            style.background,
            Some(Background::Color(palette::PRIMARY_500))
        );
    }

    #[test]
    fn overlay_button_follows_overlay_opacity() {
        let faded = overlay(0.25)(&Theme::Dark, button::Status::Active);
        assert_eq!(faded.text_color.a, 0.25);

        let hidden = overlay(0.0)(&Theme::Dark, button::Status::Hovered);
        assert_eq!(
            hidden.background,
            Some(Background::Color(Color { a: 0.0, ..WHITE }))
        );
    }

    #[test]
    fn selected_sidebar_entry_is_highlighted() {
        let selected = sidebar_entry(true)(&Theme::Dark, button::Status::Active);
        let plain = sidebar_entry(false)(&Theme::Dark, button::Status::Active);
        assert!(selected.background.is_some());
        assert!(plain.background.is_none());
    }

    #[test]
    fn close_button_turns_red_on_hover() {
        let style = window_close(&Theme::Dark, button::Status::Hovered);
        assert_eq!(style.background, Some(Background::Color(palette::ERROR_500)));
    }
}
