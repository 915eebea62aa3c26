// SPDX-License-Identifier: MPL-2.0
//! Player page: video surface plus the fading transport overlay.

pub mod component;
pub mod controls;

pub use component::{transport_key, Effect, Message, State, ANIMATION_FRAME};
