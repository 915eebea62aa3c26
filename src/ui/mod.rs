// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! exposes a `Message`, a `view` and either an `update` returning an `Event`
//! or a stateful `handle_message` returning an `Effect`.
//!
//! # Pages
//!
//! - [`home`] - Open-file entry point
//! - [`library`] - Video and Music pages
//! - [`player`] - Video surface with the fading transport overlay
//! - [`settings`] - Preferences in effect
//!
//! # Chrome
//!
//! - [`title_bar`] - Drag, minimize, maximize and close for the frameless window
//! - [`sidebar`] - Collapsible page navigation
//! - [`notifications`] - Dismissible notices for failed loads
//!
//! # Shared Infrastructure
//!
//! - [`styles`] - Centralized styling (buttons, containers, overlay, sliders)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod home;
pub mod library;
pub mod notifications;
pub mod player;
pub mod settings;
pub mod sidebar;
pub mod styles;
pub mod title_bar;
