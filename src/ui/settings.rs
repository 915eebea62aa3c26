// SPDX-License-Identifier: MPL-2.0
//! Settings page.
//!
//! Shows the preferences in effect and where they are read from. Values are
//! edited in `settings.toml`; only the volume is written back by the app.

use crate::config::PlayerSettings;
use crate::overlay::OverlayTimings;
use crate::ui::design_tokens::{spacing, typography};
use iced::{
    alignment::Vertical,
    widget::{container, rule, scrollable, text, Column, Row, Text},
    Element, Length,
};
use std::path::Path;
use std::time::Duration;

/// Contextual data needed to render the settings page.
pub struct ViewContext<'a> {
    pub player: &'a PlayerSettings,
    pub overlay: &'a OverlayTimings,
    /// Current volume, which may differ from the persisted one.
    pub volume: u8,
    pub config_dir: Option<&'a Path>,
}

/// Render the settings page. The page is read-only and emits nothing.
#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view<'a, Message: 'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new("Settings").size(typography::TITLE_LG);

    let player = section(
        "Player",
        vec![
            ("Volume", format!("{}%", ctx.volume)),
            ("Seek step", format_secs(ctx.player.seek_step)),
            ("Volume step", format!("{}%", ctx.player.volume_step)),
            (
                "Subtitles",
                if ctx.player.suppress_subtitles {
                    "Hidden".to_string()
                } else {
                    "Shown".to_string()
                },
            ),
        ],
    );

    let overlay = section(
        "Overlay",
        vec![
            ("Hide controls after", format_millis(ctx.overlay.idle_hide)),
            ("Hide cursor after", format_millis(ctx.overlay.cursor_hide)),
            ("Fade duration", format_millis(ctx.overlay.fade)),
            ("Refresh interval", format_millis(ctx.overlay.tick)),
        ],
    );

    let location = match ctx.config_dir {
        Some(dir) => format!("Preferences file: {}", dir.join(crate::config::CONFIG_FILE).display()),
        None => "No configuration directory available".to_string(),
    };

    let content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(title)
        .push(player)
        .push(overlay)
        .push(Text::new(location).size(typography::CAPTION));

    scrollable(container(content).width(Length::Fill)).into()
}

fn section<'a, Message: 'a>(
    heading: &'a str,
    rows: Vec<(&'a str, String)>,
) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(spacing::XS)
        .push(Text::new(heading).size(typography::TITLE_SM))
        .push(rule::horizontal(1));

    for (label, value) in rows {
        column = column.push(
            Row::new()
                .spacing(spacing::MD)
                .align_y(Vertical::Center)
                .push(container(text(label).size(typography::BODY)).width(Length::Fixed(200.0)))
                .push(text(value).size(typography::BODY)),
        );
    }

    column.into()
}

fn format_secs(duration: Duration) -> String {
    format!("{} s", duration.as_secs())
}

fn format_millis(duration: Duration) -> String {
    format!("{} ms", duration.as_millis())
}
