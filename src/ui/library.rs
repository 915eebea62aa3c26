// SPDX-License-Identifier: MPL-2.0
//! Video and Music pages.
//!
//! Both pages only point back to the file picker: there is no media library
//! or playlist, playback always starts from an explicitly opened file.

use crate::app::Page;
use crate::ui::design_tokens::{spacing, typography};
use iced::{
    alignment::Horizontal,
    widget::{button, container, text, Column, Text},
    Element, Length,
};

/// Messages emitted by a library page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    OpenFile,
}

/// Render the library page for `page`.
#[must_use]
pub fn view<'a>(page: Page) -> Element<'a, Message> {
    let heading = Text::new(page.label()).size(typography::TITLE_LG);
    let body = Text::new("Nothing here yet. Open a file to play it.").size(typography::BODY);

    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(Horizontal::Center)
        .push(text(page.glyph()).size(typography::TITLE_LG * 2.0))
        .push(heading)
        .push(body)
        .push(
            button(text("Open file…").size(typography::BODY))
                .on_press(Message::OpenFile)
                .padding([spacing::XS, spacing::LG]),
        );

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
