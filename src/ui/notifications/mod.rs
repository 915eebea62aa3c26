// SPDX-License-Identifier: MPL-2.0
//! User-visible notices.
//!
//! Failed loads and playback failures end up here as dismissible banners.
//! Ignored transport commands never do.
//!
//! - [`notification`] - `Notification` and its `Severity`
//! - [`manager`] - visibility limit, queue and expiry
//! - [`toast`] - banner widget

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
