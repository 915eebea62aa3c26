// SPDX-License-Identifier: MPL-2.0
//! Render surface shared between a backend thread and the UI.
//!
//! The backend presents decoded frames; the UI only ever looks at the most
//! recent one. Older frames are overwritten, never queued.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A decoded RGBA frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp in milliseconds.
    pub pts_millis: u64,
}

#[derive(Debug, Default)]
struct Slot {
    frame: Option<VideoFrame>,
    revision: u64,
}

/// Latest-frame slot. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct FrameSink {
    slot: Arc<Mutex<Slot>>,
}

impl FrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A panicking presenter cannot leave the slot half-written.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the displayed frame.
    pub fn present(&self, frame: VideoFrame) {
        let mut slot = self.lock();
        slot.frame = Some(frame);
        slot.revision = slot.revision.wrapping_add(1);
    }

    /// Removes the displayed frame (no media).
    pub fn clear(&self) {
        let mut slot = self.lock();
        if slot.frame.take().is_some() {
            slot.revision = slot.revision.wrapping_add(1);
        }
    }

    /// Incremented on every change; lets the UI skip rebuilding image handles.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    pub fn latest(&self) -> Option<VideoFrame> {
        self.lock().frame.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(pts_millis: u64) -> VideoFrame {
        VideoFrame {
            rgba: Arc::new(vec![0; 4]),
            width: 1,
            height: 1,
            pts_millis,
        }
    }

    #[test]
    fn present_overwrites_previous_frame() {
        let sink = FrameSink::new();
        sink.present(frame(10));
        sink.present(frame(20));
        assert_eq!(sink.latest().map(|f| f.pts_millis), Some(20));
        assert_eq!(sink.revision(), 2);
    }

    #[test]
    fn clones_share_the_slot() {
        let sink = FrameSink::new();
        let producer = sink.clone();
        std::thread::spawn(move || producer.present(frame(5)))
            .join()
            .expect("producer");
        assert_eq!(sink.latest().map(|f| f.pts_millis), Some(5));
    }

    #[test]
    fn clear_only_bumps_revision_when_something_was_shown() {
        let sink = FrameSink::new();
        sink.clear();
        assert_eq!(sink.revision(), 0);
        sink.present(frame(1));
        sink.clear();
        assert_eq!(sink.revision(), 2);
        assert!(sink.latest().is_none());
    }
}
