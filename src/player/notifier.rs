// SPDX-License-Identifier: MPL-2.0
//! Marshaling of engine notifications onto the control thread.
//!
//! Backends report state changes from their own threads through a
//! [`Notifier`]. The control thread owns the matching [`NotificationQueue`]
//! and drains it once per tick; nothing the engine sends touches shared state
//! until it has been drained there.
//!
//! Every load opens a new session generation. Notifications carry the
//! generation that produced them, and anything from an older generation is
//! dropped on drain, so a backend thread that is still winding down cannot
//! leak progress into the next session.

use super::backend::EngineEvent;
use tokio::sync::mpsc;

/// Upper bound on notifications applied per drain. A backend flooding the
/// channel is picked up again on the next tick.
const MAX_EVENTS_PER_DRAIN: usize = 512;

/// Identifies one load of one media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

#[derive(Debug)]
struct Envelope {
    session: SessionId,
    event: EngineEvent,
}

/// Engine-side handle for posting notifications. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct Notifier {
    session: SessionId,
    tx: mpsc::UnboundedSender<Envelope>,
}

impl Notifier {
    /// Posts a notification for this notifier's session.
    ///
    /// Returns `false` once the control side has been dropped, which tells a
    /// backend thread it can stop.
    pub fn notify(&self, event: EngineEvent) -> bool {
        self.tx
            .send(Envelope {
                session: self.session,
                event,
            })
            .is_ok()
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Returns true if the receiving queue no longer exists.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Control-side end of the notification channel.
#[derive(Debug)]
pub struct NotificationQueue {
    tx: mpsc::UnboundedSender<Envelope>,
    rx: mpsc::UnboundedReceiver<Envelope>,
    next_session: u64,
    current: Option<SessionId>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            next_session: 0,
            current: None,
        }
    }

    /// Opens a new session generation and returns the notifier for it.
    ///
    /// Notifications still queued from earlier sessions become stale.
    pub fn begin_session(&mut self) -> Notifier {
        self.next_session += 1;
        let session = SessionId(self.next_session);
        self.current = Some(session);
        Notifier {
            session,
            tx: self.tx.clone(),
        }
    }

    /// Closes the current session; everything queued so far becomes stale.
    pub fn end_session(&mut self) {
        self.current = None;
    }

    pub fn current_session(&self) -> Option<SessionId> {
        self.current
    }

    /// Takes every pending notification of the current session, in arrival
    /// order. Never blocks.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let mut stale = 0usize;
        for _ in 0..MAX_EVENTS_PER_DRAIN {
            match self.rx.try_recv() {
                Ok(envelope) if Some(envelope.session) == self.current => {
                    events.push(envelope.event);
                }
                Ok(_) => stale += 1,
                Err(_) => break,
            }
        }
        if stale > 0 {
            log::trace!("Dropped {stale} notification(s) from a previous session");
        }
        events
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}
