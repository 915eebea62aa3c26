// SPDX-License-Identifier: MPL-2.0
//! Core notice data structures.

use crate::error::EngineError;
use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Informational message (blue, 3s).
    #[default]
    Info,
    /// Recoverable problem, e.g. a bad settings file (orange, 5s).
    Warning,
    /// Failed load or playback (red, manual dismiss).
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// `None` means the notice stays until dismissed.
    #[must_use]
    pub fn auto_dismiss_duration(&self) -> Option<Duration> {
        match self {
            Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// A message shown in the notice banner.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    text: String,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, text: impl Into<String>, now: Instant) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            text: text.into(),
            created_at: now,
        }
    }

    pub fn info(text: impl Into<String>, now: Instant) -> Self {
        Self::new(Severity::Info, text, now)
    }

    pub fn warning(text: impl Into<String>, now: Instant) -> Self {
        Self::new(Severity::Warning, text, now)
    }

    pub fn error(text: impl Into<String>, now: Instant) -> Self {
        Self::new(Severity::Error, text, now)
    }

    /// Error notice carrying the user-facing text of an engine failure.
    pub fn engine_failure(error: &EngineError, now: Instant) -> Self {
        Self::error(error.user_message(), now)
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the notice's display time is over at `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.severity
            .auto_dismiss_duration()
            .is_some_and(|d| now.saturating_duration_since(self.created_at) >= d)
    }
}
