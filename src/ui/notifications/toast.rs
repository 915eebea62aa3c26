// SPDX-License-Identifier: MPL-2.0
//! Notice banner rendering.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

pub struct Toast;

impl Toast {
    /// Renders one notice: message and a dismiss cross.
    pub fn view(notification: &Notification) -> Element<'_, Message> {
        let message = Text::new(notification.text()).size(typography::BODY);
        let dismiss = button(text("✕").size(typography::CAPTION))
            .on_press(Message::Dismiss(notification.id()))
            .padding(spacing::XXS)
            .style(styles::button::dismiss);

        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(message).width(Length::Fill))
            .push(dismiss);

        Container::new(content)
            .width(Length::Fixed(sizing::NOTICE_WIDTH))
            .padding(spacing::SM)
            .style(styles::container::notice(notification.severity().color()))
            .into()
    }

    /// Stacks the visible notices in the top-right corner.
    pub fn view_overlay(manager: &Manager) -> Element<'_, Message> {
        let toasts: Vec<Element<'_, Message>> = manager.visible().map(Self::view).collect();

        Container::new(
            Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right),
        )
        .width(Length::Fill)
        .height(Length::Shrink)
        .align_x(alignment::Horizontal::Right)
        .padding(spacing::MD)
        .into()
    }
}
