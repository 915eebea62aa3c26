// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! This module routes native events (keyboard, window) to the application
//! and drives the periodic tick the player depends on.

use super::{Message, Page};
use crate::ui::player::{self, ANIMATION_FRAME};
use iced::{event, keyboard, time, window, Subscription};

/// Creates the event subscription for the current page.
///
/// Transport keys (Space, arrows) are only routed on the player page.
/// Fullscreen keys, file drops and window events are routed everywhere.
pub fn create_event_subscription(page: Page) -> Subscription<Message> {
    if page.is_player() {
        event::listen_with(|event, status, window_id| {
            if let Some(message) = window_message(&event, window_id) {
                return Some(message);
            }

            let event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = &event else {
                return None;
            };
            if status == event::Status::Captured {
                return None;
            }
            chrome_key(key).or_else(|| {
                player::transport_key(key).map(|key| Message::Player(player::Message::Key(key)))
            })
        })
    } else {
        event::listen_with(|event, status, window_id| {
            if let Some(message) = window_message(&event, window_id) {
                return Some(message);
            }

            match (&event, status) {
                (
                    event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }),
                    event::Status::Ignored,
                ) => chrome_key(key),
                _ => None,
            }
        })
    }
}

/// Window lifecycle events, handled on every page.
fn window_message(event: &event::Event, window_id: window::Id) -> Option<Message> {
    match event {
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Window(window::Event::FileDropped(path)) => {
            Some(Message::FileDropped(path.clone()))
        }
        event::Event::Window(window::Event::Opened { .. }) => Some(Message::WindowSeen(window_id)),
        event::Event::Window(window::Event::Focused) => {
            Some(Message::WindowFocusChanged(window_id, true))
        }
        event::Event::Window(window::Event::Unfocused) => {
            Some(Message::WindowFocusChanged(window_id, false))
        }
        _ => None,
    }
}

/// F toggles fullscreen, Escape leaves it.
fn chrome_key(key: &keyboard::Key) -> Option<Message> {
    match key {
        keyboard::Key::Character(c) if c.eq_ignore_ascii_case("f") => {
            Some(Message::ToggleFullscreen)
        }
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::ExitFullscreen),
        _ => None,
    }
}

/// Creates the periodic tick.
///
/// Runs at animation rate while a fade is in flight or video is playing on
/// the player page, at the configured interval while the player page is
/// shown, media is open or notices are pending, and not at all otherwise.
pub fn create_tick_subscription(
    page: Page,
    player: &player::State,
    has_notifications: bool,
) -> Subscription<Message> {
    match tick_interval(page, player, has_notifications) {
        Some(interval) => time::every(interval).map(Message::Tick),
        None => Subscription::none(),
    }
}

fn tick_interval(
    page: Page,
    player: &player::State,
    has_notifications: bool,
) -> Option<std::time::Duration> {
    if player.is_animating() || (page.is_player() && player.is_presenting()) {
        Some(ANIMATION_FRAME)
    } else if page.is_player() || player.needs_ticks() || has_notifications {
        Some(player.tick_interval())
    } else {
        None
    }
}
