// SPDX-License-Identifier: MPL-2.0
//! Collapsible page navigation.
//!
//! Collapsed, the sidebar shows only glyphs; expanded, glyph and label.

use crate::app::Page;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, Column, Container, Row};
use iced::{alignment::Vertical, Element, Length};

/// Contextual data needed to render the sidebar.
pub struct ViewContext {
    pub current: Page,
    pub collapsed: bool,
}

/// Messages emitted by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    ToggleCollapsed,
    Select(Page),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    Navigate(Page),
}

/// Process a sidebar message and return the corresponding event.
pub fn update(message: Message, collapsed: &mut bool) -> Event {
    match message {
        Message::ToggleCollapsed => {
            *collapsed = !*collapsed;
            Event::None
        }
        Message::Select(page) => Event::Navigate(page),
    }
}

/// Render the sidebar.
pub fn view<'a>(ctx: ViewContext) -> Element<'a, Message> {
    let toggle = button(text("☰").size(typography::TITLE_SM))
        .on_press(Message::ToggleCollapsed)
        .padding(spacing::XS)
        .style(styles::button::sidebar_entry(false));

    let mut entries = Column::new()
        .spacing(spacing::XXS)
        .padding(spacing::XS)
        .push(toggle);

    for page in Page::ALL {
        entries = entries.push(entry(page, page == ctx.current, ctx.collapsed));
    }

    let width = if ctx.collapsed {
        sizing::SIDEBAR_COLLAPSED_WIDTH
    } else {
        sizing::SIDEBAR_WIDTH
    };

    Container::new(entries)
        .width(Length::Fixed(width))
        .height(Length::Fill)
        .style(styles::container::sidebar)
        .into()
}

fn entry<'a>(page: Page, selected: bool, collapsed: bool) -> Element<'a, Message> {
    let glyph = text(page.glyph()).size(typography::TITLE_SM);
    let content: Element<'a, Message> = if collapsed {
        glyph.into()
    } else {
        Row::new()
            .spacing(spacing::SM)
            .align_y(Vertical::Center)
            .push(glyph)
            .push(text(page.label()).size(typography::BODY))
            .into()
    };

    button(content)
        .on_press(Message::Select(page))
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding([spacing::XS, spacing::SM])
        .style(styles::button::sidebar_entry(selected))
        .into()
}
