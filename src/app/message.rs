// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::{home, library, notifications, player, sidebar, title_bar};
use iced::window;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    TitleBar(title_bar::Message),
    Sidebar(sidebar::Message),
    Home(home::Message),
    Library(library::Message),
    Player(player::Message),
    Notification(notifications::NotificationMessage),
    Tick(Instant), // Periodic tick for engine notifications, fades and idle countdowns
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// F key.
    ToggleFullscreen,
    /// Escape key.
    ExitFullscreen,
    /// The window was opened; remembers its id for window actions.
    WindowSeen(window::Id),
    /// The window gained (`true`) or lost keyboard focus.
    WindowFocusChanged(window::Id, bool),
    /// Window close was requested (title bar button, Alt+F4, window manager).
    WindowCloseRequested(window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional media path to load on startup.
    pub file_path: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `KLYDIO_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
