// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Each handler receives an [`UpdateContext`] with mutable access to the
//! parts of the application state it may touch.

use super::{Message, Page};
use crate::config::{self, Config};
use crate::player::CommandOutcome;
use crate::ui::{home, notifications, player, sidebar, title_bar};
use iced::{window, Task};
use std::path::PathBuf;
use std::time::Instant;

/// Container extensions offered by the open file dialog.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov"];

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub page: &'a mut Page,
    pub sidebar_collapsed: &'a mut bool,
    pub fullscreen: &'a mut bool,
    pub maximized: &'a mut bool,
    pub window_id: &'a mut Option<window::Id>,
    pub player: &'a mut player::State,
    pub config: &'a mut Config,
    pub notifications: &'a mut notifications::Manager,
}

// =============================================================================
// Chrome
// =============================================================================

/// Handles title bar messages.
pub fn handle_title_bar_message(
    ctx: &mut UpdateContext<'_>,
    message: title_bar::Message,
) -> Task<Message> {
    match title_bar::update(message, ctx.maximized) {
        title_bar::Event::Drag => with_window(*ctx.window_id, window::drag),
        title_bar::Event::Minimize => {
            ctx.player.set_backgrounded(true, Instant::now());
            with_window(*ctx.window_id, |id| window::minimize(id, true))
        }
        title_bar::Event::ToggleMaximize => with_window(*ctx.window_id, window::toggle_maximize),
        title_bar::Event::Close => match *ctx.window_id {
            Some(id) => handle_window_close(ctx, id),
            None => {
                persist_volume(ctx);
                ctx.player.close(Instant::now());
                iced::exit()
            }
        },
    }
}

/// Handles sidebar messages.
pub fn handle_sidebar_message(
    ctx: &mut UpdateContext<'_>,
    message: sidebar::Message,
) -> Task<Message> {
    match sidebar::update(message, ctx.sidebar_collapsed) {
        sidebar::Event::None => {}
        sidebar::Event::Navigate(page) => navigate(ctx, page, Instant::now()),
    }
    Task::none()
}

/// Handles home page messages.
pub fn handle_home_message(ctx: &mut UpdateContext<'_>, message: home::Message) -> Task<Message> {
    match home::update(message) {
        home::Event::OpenFileDialog => handle_open_file_dialog(),
        home::Event::ShowPlayer => {
            navigate(ctx, Page::Player, Instant::now());
            Task::none()
        }
        home::Event::CloseMedia => {
            ctx.player.close(Instant::now());
            Task::none()
        }
    }
}

/// Switches the visible page, activating or deactivating the player.
pub fn navigate(ctx: &mut UpdateContext<'_>, target: Page, now: Instant) {
    if *ctx.page == target {
        return;
    }
    if ctx.page.is_player() {
        ctx.player.deactivate();
    }
    *ctx.page = target;
    if target.is_player() {
        ctx.player.activate(now);
    }
}

/// Toggles fullscreen mode.
pub fn toggle_fullscreen(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let desired = !*ctx.fullscreen;
    update_fullscreen_mode(ctx, desired)
}

/// Updates fullscreen mode to the desired state.
pub fn update_fullscreen_mode(ctx: &mut UpdateContext<'_>, desired: bool) -> Task<Message> {
    if *ctx.fullscreen == desired {
        return Task::none();
    }

    let Some(window_id) = *ctx.window_id else {
        return Task::none();
    };

    *ctx.fullscreen = desired;
    let mode = if desired {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(window_id, mode)
}

/// Saves the volume, stops playback and closes the window.
pub fn handle_window_close(ctx: &mut UpdateContext<'_>, window_id: window::Id) -> Task<Message> {
    persist_volume(ctx);
    ctx.player.close(Instant::now());
    window::close(window_id)
}

/// Focus loss backgrounds the player; regaining focus brings it back.
pub fn handle_window_focus(
    ctx: &mut UpdateContext<'_>,
    window_id: window::Id,
    focused: bool,
) -> Task<Message> {
    *ctx.window_id = Some(window_id);
    ctx.player.set_backgrounded(!focused, Instant::now());
    Task::none()
}

fn persist_volume(ctx: &mut UpdateContext<'_>) {
    ctx.config.player.volume = Some(ctx.player.volume().value());
    if let Err(err) = config::save(ctx.config) {
        log::warn!("Failed to save settings: {err}");
    }
}

fn with_window(
    window_id: Option<window::Id>,
    action: impl FnOnce(window::Id) -> Task<Message>,
) -> Task<Message> {
    window_id.map_or_else(Task::none, action)
}

// =============================================================================
// Player
// =============================================================================

/// Forwards a message to the player and surfaces its failures as notices.
pub fn handle_player_message(
    ctx: &mut UpdateContext<'_>,
    message: player::Message,
) -> Task<Message> {
    let now = Instant::now();
    let effect = ctx.player.handle_message(message, now);
    apply_player_effect(ctx, effect, now);
    Task::none()
}

/// Periodic tick: engine notifications, overlay timers, notice expiry.
pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.notifications.tick(now);
    let effect = ctx.player.tick(now);
    apply_player_effect(ctx, effect, now);
    Task::none()
}

fn apply_player_effect(ctx: &mut UpdateContext<'_>, effect: player::Effect, now: Instant) {
    match effect {
        player::Effect::None => {}
        player::Effect::Notify(err) => {
            ctx.notifications
                .push(notifications::Notification::engine_failure(&err, now));
        }
    }
}

/// Loads `path` into the player. A successful start shows the player page;
/// a rejected load shows a notice and leaves the page as it is.
pub fn open_media(ctx: &mut UpdateContext<'_>, path: PathBuf, now: Instant) {
    match ctx.player.open(path, now) {
        CommandOutcome::Opened => navigate(ctx, Page::Player, now),
        CommandOutcome::Failed(err) => {
            ctx.notifications
                .push(notifications::Notification::engine_failure(&err, now));
        }
        CommandOutcome::Dispatched | CommandOutcome::Ignored => {}
    }
}

// =============================================================================
// File selection
// =============================================================================

/// Shows the open file dialog.
pub fn handle_open_file_dialog() -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter("Video", VIDEO_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Handles the result of the open file dialog.
pub fn handle_open_file_dialog_result(
    ctx: &mut UpdateContext<'_>,
    path: Option<PathBuf>,
) -> Task<Message> {
    let Some(path) = path else {
        // User cancelled the dialog
        return Task::none();
    };

    open_media(ctx, path, Instant::now());
    Task::none()
}

/// Handles a file dropped on the window.
pub fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    open_media(ctx, path, Instant::now());
    Task::none()
}
