//! Win32 input backend: `GetCursorPos`, `SetCursorPos` and `SendInput`.
//!
//! Each facade action is submitted as one `SendInput` call, so a click (or
//! a double click) lands in the input queue without other events
//! interleaved.  Mouse events carry no coordinates and no `MOVE` flag, so
//! they apply wherever the cursor currently is.

use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_KEYUP, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN,
    MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP, MOUSEINPUT,
    MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

use crate::action::{ButtonEvent, KeyEvent, MouseButton, Point, Transition};
use crate::backend::InputBackend;

/// Pre-computed size of `INPUT` struct for `SendInput` calls.
const INPUT_SIZE: i32 = std::mem::size_of::<INPUT>() as i32;

// ---------------------------------------------------------------------------
// Helpers: build INPUT structs
// ---------------------------------------------------------------------------

fn key_input(event: KeyEvent) -> INPUT {
    let flags = match event.transition {
        Transition::Down => KEYBD_EVENT_FLAGS(0),
        Transition::Up => KEYEVENTF_KEYUP,
    };

    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(u16::from(event.vk)),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn button_flags(event: ButtonEvent) -> MOUSE_EVENT_FLAGS {
    match (event.button, event.transition) {
        (MouseButton::Left, Transition::Down) => MOUSEEVENTF_LEFTDOWN,
        (MouseButton::Left, Transition::Up) => MOUSEEVENTF_LEFTUP,
        (MouseButton::Right, Transition::Down) => MOUSEEVENTF_RIGHTDOWN,
        (MouseButton::Right, Transition::Up) => MOUSEEVENTF_RIGHTUP,
        (MouseButton::Middle, Transition::Down) => MOUSEEVENTF_MIDDLEDOWN,
        (MouseButton::Middle, Transition::Up) => MOUSEEVENTF_MIDDLEUP,
    }
}

fn button_input(event: ButtonEvent) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: 0,
                dwFlags: button_flags(event),
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn send(inputs: &[INPUT]) -> u32 {
    if inputs.is_empty() {
        return 0;
    }
    let sent = unsafe { SendInput(inputs, INPUT_SIZE) };
    if (sent as usize) < inputs.len() {
        log::warn!(
            "SendInput accepted {sent} of {} events: {}",
            inputs.len(),
            windows::core::Error::from_win32()
        );
    }
    sent
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Stateless handle to the Win32 input APIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Win32Backend
    }
}

impl InputBackend for Win32Backend {
    fn cursor_position(&self) -> Point {
        let mut pt = POINT { x: 0, y: 0 };
        if let Err(e) = unsafe { GetCursorPos(&mut pt) } {
            log::warn!("GetCursorPos failed: {e}");
        }
        Point::new(pt.x, pt.y)
    }

    fn set_cursor_position(&self, to: Point) {
        if let Err(e) = unsafe { SetCursorPos(to.x, to.y) } {
            log::warn!("SetCursorPos({to}) failed: {e}");
        }
    }

    fn inject_keys(&self, events: &[KeyEvent]) -> u32 {
        let inputs: Vec<INPUT> = events.iter().copied().map(key_input).collect();
        send(&inputs)
    }

    fn inject_buttons(&self, events: &[ButtonEvent]) -> u32 {
        let inputs: Vec<INPUT> = events.iter().copied().map(button_input).collect();
        send(&inputs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{KeyAction, MouseAction};

    #[test]
    fn test_key_input_flags() {
        let events = KeyAction::Press.events(0x41);
        let down = key_input(events[0]);
        let up = key_input(events[1]);
        unsafe {
            assert_eq!(down.Anonymous.ki.wVk, VIRTUAL_KEY(0x41));
            assert_eq!(down.Anonymous.ki.dwFlags, KEYBD_EVENT_FLAGS(0));
            assert_eq!(up.Anonymous.ki.dwFlags, KEYEVENTF_KEYUP);
        }
        assert_eq!(down.r#type, INPUT_KEYBOARD);
    }

    #[test]
    fn test_button_input_has_no_move() {
        for action in MouseAction::ALL {
            for &event in action.events() {
                let input = button_input(event);
                assert_eq!(input.r#type, INPUT_MOUSE);
                unsafe {
                    assert_eq!(input.Anonymous.mi.dx, 0);
                    assert_eq!(input.Anonymous.mi.dy, 0);
                    assert_eq!(input.Anonymous.mi.dwFlags, button_flags(event));
                }
            }
        }
    }

    #[test]
    fn test_empty_batch_skips_send_input() {
        assert_eq!(Win32Backend::new().inject_keys(&[]), 0);
    }
}
