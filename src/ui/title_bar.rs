// SPDX-License-Identifier: MPL-2.0
//! Custom title bar for the frameless window.
//!
//! Maps pointer input on the bar to window actions: dragging the bar moves
//! the window, double-clicking it toggles maximize, and the three buttons
//! minimize, maximize/restore and close.

use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, mouse_area, text, Container, Row, Space};
use iced::{alignment::Vertical, Element, Length};

/// Contextual data needed to render the title bar.
pub struct ViewContext {
    pub title: String,
    pub maximized: bool,
}

/// Messages emitted by the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Drag,
    Minimize,
    ToggleMaximize,
    Close,
}

/// Window actions requested by the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Drag,
    Minimize,
    ToggleMaximize,
    Close,
}

/// Process a title bar message and return the corresponding event.
///
/// `maximized` is flipped here so the restore glyph is right before the
/// window manager confirms the change.
pub fn update(message: Message, maximized: &mut bool) -> Event {
    match message {
        Message::Drag => Event::Drag,
        Message::Minimize => Event::Minimize,
        Message::ToggleMaximize => {
            *maximized = !*maximized;
            Event::ToggleMaximize
        }
        Message::Close => Event::Close,
    }
}

/// Render the title bar.
pub fn view<'a>(ctx: ViewContext) -> Element<'a, Message> {
    let title = text(ctx.title).size(typography::TITLE_SM);

    let handle = mouse_area(
        container(title)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding([0.0, spacing::MD])
            .align_y(Vertical::Center),
    )
    .on_press(Message::Drag)
    .on_double_click(Message::ToggleMaximize);

    let maximize_glyph = if ctx.maximized { "❐" } else { "□" };

    let controls = Row::new()
        .push(control_button("—", Message::Minimize, false))
        .push(control_button(maximize_glyph, Message::ToggleMaximize, false))
        .push(control_button("✕", Message::Close, true));

    Container::new(
        Row::new()
            .align_y(Vertical::Center)
            .push(handle)
            .push(Space::new().width(Length::Fixed(spacing::XS)))
            .push(controls),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sizing::TITLE_BAR_HEIGHT))
    .style(styles::container::title_bar)
    .into()
}

fn control_button(glyph: &'static str, message: Message, close: bool) -> Element<'static, Message> {
    let button = button(
        container(text(glyph).size(typography::BODY))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .on_press(message)
    .width(Length::Fixed(sizing::TITLE_BAR_HEIGHT + spacing::SM))
    .height(Length::Fill);

    if close {
        button.style(styles::button::window_close).into()
    } else {
        button.style(styles::button::window_control).into()
    }
}
