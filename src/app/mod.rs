// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the window chrome, the
//! pages and the player.
//!
//! The `App` struct wires together the title bar, sidebar, player component
//! and notices, and translates messages into side effects like window
//! actions, file dialogs or config persistence.

mod message;
mod page;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use page::Page;

use crate::config::{self, Config, PlayerSettings};
use crate::overlay::OverlayTimings;
use crate::ui::{notifications, player};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

/// Product name shown in the title bar.
pub const APP_NAME: &str = "Klydio";

pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 640;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 400;

/// Root Iced application state.
pub struct App {
    page: Page,
    sidebar_collapsed: bool,
    fullscreen: bool,
    maximized: bool,
    window_id: Option<window::Id>,
    player: player::State,
    player_settings: PlayerSettings,
    overlay_timings: OverlayTimings,
    /// Loaded preferences; the volume is written back on close.
    config: Config,
    config_dir: Option<PathBuf>,
    /// Notices for failed loads and playback failures.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("page", &self.page)
            .field("fullscreen", &self.fullscreen)
            .field("player", &self.player)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings: frameless, the title bar is drawn by the app.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        decorations: false,
        // Closing goes through `WindowCloseRequested` so the volume is saved.
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and optionally starts loading the file
    /// given on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) =
            config::load_with_override(flags.config_dir.map(PathBuf::from));
        let mut app = Self::with_config(config, player::State::new);

        let now = Instant::now();
        if let Some(warning) = config_warning {
            log::warn!("{warning}");
            app.notifications
                .push(notifications::Notification::warning(warning, now));
        }

        if let Some(path) = flags.file_path {
            update::open_media(&mut app.update_context(), PathBuf::from(path), now);
        }

        (app, Task::none())
    }

    /// Builds the application around `config`. `make_player` creates the
    /// player component from the resolved settings.
    fn with_config(
        config: Config,
        make_player: impl FnOnce(&PlayerSettings, OverlayTimings) -> player::State,
    ) -> Self {
        let player_settings = config.player_settings();
        let overlay_timings = config.overlay_timings();

        Self {
            page: Page::default(),
            sidebar_collapsed: false,
            fullscreen: false,
            maximized: false,
            window_id: None,
            player: make_player(&player_settings, overlay_timings),
            player_settings,
            overlay_timings,
            config,
            config_dir: paths::get_app_config_dir(),
            notifications: notifications::Manager::new(),
        }
    }

    fn title(&self) -> String {
        let file_name = self
            .player
            .media_path()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str());

        match file_name {
            Some(name) => format!("{name} - {APP_NAME}"),
            None => APP_NAME.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.page);
        let tick_sub = subscription::create_tick_subscription(
            self.page,
            &self.player,
            self.notifications.has_notifications(),
        );

        Subscription::batch([event_sub, tick_sub])
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            page: &mut self.page,
            sidebar_collapsed: &mut self.sidebar_collapsed,
            fullscreen: &mut self.fullscreen,
            maximized: &mut self.maximized,
            window_id: &mut self.window_id,
            player: &mut self.player,
            config: &mut self.config,
            notifications: &mut self.notifications,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.update_context();

        match message {
            Message::TitleBar(title_bar_message) => {
                update::handle_title_bar_message(&mut ctx, title_bar_message)
            }
            Message::Sidebar(sidebar_message) => {
                update::handle_sidebar_message(&mut ctx, sidebar_message)
            }
            Message::Home(home_message) => update::handle_home_message(&mut ctx, home_message),
            Message::Library(crate::ui::library::Message::OpenFile) => {
                update::handle_open_file_dialog()
            }
            Message::Player(player_message) => {
                update::handle_player_message(&mut ctx, player_message)
            }
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(now) => update::handle_tick(&mut ctx, now),
            Message::OpenFileDialogResult(path) => {
                update::handle_open_file_dialog_result(&mut ctx, path)
            }
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
            Message::ToggleFullscreen => update::toggle_fullscreen(&mut ctx),
            Message::ExitFullscreen => update::update_fullscreen_mode(&mut ctx, false),
            Message::WindowSeen(id) => {
                *ctx.window_id = Some(id);
                Task::none()
            }
            Message::WindowFocusChanged(id, focused) => {
                update::handle_window_focus(&mut ctx, id, focused)
            }
            Message::WindowCloseRequested(id) => update::handle_window_close(&mut ctx, id),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            page: self.page,
            sidebar_collapsed: self.sidebar_collapsed,
            fullscreen: self.fullscreen,
            maximized: self.maximized,
            title: self.title(),
            player: &self.player,
            player_settings: &self.player_settings,
            overlay_timings: &self.overlay_timings,
            config_dir: self.config_dir.as_deref(),
            notifications: &self.notifications,
            now: Instant::now(),
        })
    }
}
