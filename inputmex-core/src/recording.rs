//! In-memory input backend.
//!
//! [`RecordingBackend`] never touches the OS.  It keeps a cursor position
//! and appends every injected event to a log so callers can inspect
//! exactly what would have been sent, and in what order.  Used by the test
//! suites and by the CLI's `--dry-run` mode.

use parking_lot::Mutex;
use serde::Serialize;

use crate::action::{ButtonEvent, KeyEvent, Point};
use crate::backend::InputBackend;

/// One recorded side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recorded {
    Key(KeyEvent),
    Button(ButtonEvent),
    Move(Point),
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    cursor: Mutex<Point>,
    log: Mutex<Vec<Recorded>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the cursor at `at`.
    pub fn with_cursor(at: Point) -> Self {
        RecordingBackend {
            cursor: Mutex::new(at),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<Recorded> {
        self.log.lock().clone()
    }

    pub fn key_events(&self) -> Vec<KeyEvent> {
        self.log
            .lock()
            .iter()
            .filter_map(|r| match r {
                Recorded::Key(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    pub fn button_events(&self) -> Vec<ButtonEvent> {
        self.log
            .lock()
            .iter()
            .filter_map(|r| match r {
                Recorded::Button(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn is_untouched(&self) -> bool {
        self.log.lock().is_empty()
    }
}

impl InputBackend for RecordingBackend {
    fn cursor_position(&self) -> Point {
        *self.cursor.lock()
    }

    fn set_cursor_position(&self, to: Point) {
        *self.cursor.lock() = to;
        self.log.lock().push(Recorded::Move(to));
    }

    fn inject_keys(&self, events: &[KeyEvent]) -> u32 {
        self.log
            .lock()
            .extend(events.iter().copied().map(Recorded::Key));
        events.len() as u32
    }

    fn inject_buttons(&self, events: &[ButtonEvent]) -> u32 {
        self.log
            .lock()
            .extend(events.iter().copied().map(Recorded::Button));
        events.len() as u32
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
