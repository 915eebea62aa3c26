// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Lays out the window chrome around the current page. In fullscreen only
//! the page is drawn.

use super::{Message, Page};
use crate::config::PlayerSettings;
use crate::overlay::OverlayTimings;
use crate::ui::notifications::{self, Toast};
use crate::ui::{home, library, player, settings, sidebar, title_bar};
use iced::widget::{Column, Container, Row, Stack};
use iced::{Element, Length};
use std::path::Path;
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub page: Page,
    pub sidebar_collapsed: bool,
    pub fullscreen: bool,
    pub maximized: bool,
    pub title: String,
    pub player: &'a player::State,
    pub player_settings: &'a PlayerSettings,
    pub overlay_timings: &'a OverlayTimings,
    pub config_dir: Option<&'a Path>,
    pub notifications: &'a notifications::Manager,
    pub now: Instant,
}

/// Renders the window content.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let page = view_page(&ctx);

    let body: Element<'_, Message> = if ctx.fullscreen {
        page
    } else {
        let title_bar = title_bar::view(title_bar::ViewContext {
            title: ctx.title.clone(),
            maximized: ctx.maximized,
        })
        .map(Message::TitleBar);

        let sidebar = sidebar::view(sidebar::ViewContext {
            current: ctx.page,
            collapsed: ctx.sidebar_collapsed,
        })
        .map(Message::Sidebar);

        Column::new()
            .push(title_bar)
            .push(
                Row::new()
                    .push(sidebar)
                    .push(Container::new(page).width(Length::Fill).height(Length::Fill))
                    .height(Length::Fill),
            )
            .into()
    };

    let mut layers = Stack::new().push(
        Container::new(body)
            .width(Length::Fill)
            .height(Length::Fill),
    );
    if ctx.notifications.has_notifications() {
        layers = layers.push(Toast::view_overlay(ctx.notifications).map(Message::Notification));
    }

    layers.into()
}

fn view_page<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    match ctx.page {
        Page::Home => {
            let now_playing = ctx
                .player
                .media_path()
                .and_then(|path| path.file_name())
                .and_then(|name| name.to_str());
            home::view(home::ViewContext { now_playing }).map(Message::Home)
        }
        Page::Video | Page::Music => library::view(ctx.page).map(Message::Library),
        Page::Player => ctx.player.view(ctx.now).map(Message::Player),
        Page::Settings => settings::view(settings::ViewContext {
            player: ctx.player_settings,
            overlay: ctx.overlay_timings,
            volume: ctx.player.volume().value(),
            config_dir: ctx.config_dir,
        }),
    }
}
