// SPDX-License-Identifier: MPL-2.0
//! Home page: entry point for opening a video.

use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::Horizontal,
    widget::{button, container, text, Column, Row, Text},
    Element, Length,
};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contextual data needed to render the home page.
pub struct ViewContext<'a> {
    /// File name of the media currently open in the player, if any.
    pub now_playing: Option<&'a str>,
}

/// Messages emitted by the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    OpenFile,
    ResumePlayer,
    CloseMedia,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    OpenFileDialog,
    ShowPlayer,
    /// Stop playback and unload the current file.
    CloseMedia,
}

/// Process a home page message and return the corresponding event.
#[must_use]
pub fn update(message: Message) -> Event {
    match message {
        Message::OpenFile => Event::OpenFileDialog,
        Message::ResumePlayer => Event::ShowPlayer,
        Message::CloseMedia => Event::CloseMedia,
    }
}

/// Render the home page.
#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let title = Text::new("Klydio").size(typography::TITLE_LG);
    let version = Text::new(format!("v{APP_VERSION}")).size(typography::CAPTION);
    let hint = Text::new("Open an mp4, avi, mkv or mov file to start watching.")
        .size(typography::BODY);

    let open = button(text("Open file…").size(typography::BODY))
        .on_press(Message::OpenFile)
        .padding([spacing::XS, spacing::LG])
        .style(styles::button::primary);

    let mut content = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(title)
        .push(version)
        .push(hint)
        .push(open);

    if let Some(name) = ctx.now_playing {
        let resume = button(text(format!("Back to {name}")).size(typography::BODY))
            .on_press(Message::ResumePlayer)
            .padding([spacing::XS, spacing::LG]);
        let close = button(text("Close").size(typography::BODY))
            .on_press(Message::CloseMedia)
            .padding([spacing::XS, spacing::LG]);
        content = content.push(Row::new().spacing(spacing::SM).push(resume).push(close));
    }

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_events() {
        assert_eq!(update(Message::OpenFile), Event::OpenFileDialog);
        assert_eq!(update(Message::ResumePlayer), Event::ShowPlayer);
        assert_eq!(update(Message::CloseMedia), Event::CloseMedia);
    }
}
