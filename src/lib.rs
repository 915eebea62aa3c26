// SPDX-License-Identifier: MPL-2.0
//! `klydio` is a desktop video player built with the Iced GUI framework.
//!
//! The window is a frameless shell (title bar, collapsible sidebar, pages)
//! around the player page, whose core is split into:
//!
//! - [`player`] - engine adapter, playback state machine and transport routing
//! - [`overlay`] - fade and idle-hide logic for the transport overlay and cursor
//! - [`config`] - `settings.toml` preferences
//! - [`app`] / [`ui`] - the Iced application and its widgets

pub mod app;
pub mod config;
pub mod error;
pub mod overlay;
pub mod player;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
