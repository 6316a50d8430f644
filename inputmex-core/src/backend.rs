//! The OS input capability the facade forwards to.
//!
//! [`InputBackend`] is the seam between host marshalling and the operating
//! system.  [`crate::win32::Win32Backend`] is the real implementation;
//! [`crate::recording::RecordingBackend`] stands in for it in tests and
//! dry runs.

use crate::action::{ButtonEvent, KeyEvent, Point};
use crate::errors::InputMexError;

/// Read/set the cursor and inject synthetic key and mouse button events.
///
/// OS failures are not surfaced as errors: implementations log them and
/// return a best-effort value (cursor reads fall back to `(0, 0)`, inject
/// calls return how many events the OS accepted).
pub trait InputBackend {
    fn cursor_position(&self) -> Point;

    fn set_cursor_position(&self, to: Point);

    /// Inject key transitions in order.  Returns the number accepted.
    fn inject_keys(&self, events: &[KeyEvent]) -> u32;

    /// Inject mouse button transitions at the current cursor position, in
    /// order.  Returns the number accepted.
    fn inject_buttons(&self, events: &[ButtonEvent]) -> u32;
}

impl<B: InputBackend + ?Sized> InputBackend for Box<B> {
    fn cursor_position(&self) -> Point {
        (**self).cursor_position()
    }

    fn set_cursor_position(&self, to: Point) {
        (**self).set_cursor_position(to)
    }

    fn inject_keys(&self, events: &[KeyEvent]) -> u32 {
        (**self).inject_keys(events)
    }

    fn inject_buttons(&self, events: &[ButtonEvent]) -> u32 {
        (**self).inject_buttons(events)
    }
}

impl<B: InputBackend + ?Sized> InputBackend for &B {
    fn cursor_position(&self) -> Point {
        (**self).cursor_position()
    }

    fn set_cursor_position(&self, to: Point) {
        (**self).set_cursor_position(to)
    }

    fn inject_keys(&self, events: &[KeyEvent]) -> u32 {
        (**self).inject_keys(events)
    }

    fn inject_buttons(&self, events: &[ButtonEvent]) -> u32 {
        (**self).inject_buttons(events)
    }
}

/// Backend chosen at runtime (system or recording).
pub type DynBackend = Box<dyn InputBackend + Send + Sync>;

/// The operating system's input backend.
///
/// Only Windows has one; elsewhere this returns
/// [`InputMexError::Unsupported`].
pub fn system_backend() -> Result<DynBackend, InputMexError> {
    #[cfg(windows)]
    {
        Ok(Box::new(crate::win32::Win32Backend::new()))
    }
    #[cfg(not(windows))]
    {
        Err(InputMexError::Unsupported(format!(
            "no input backend for target OS `{}`",
            std::env::consts::OS
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
