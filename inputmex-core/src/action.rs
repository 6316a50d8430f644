//! Value types exchanged with the input backend.
//!
//! Host callers select an action with a small integer (the "selector");
//! [`KeyAction::from_selector`] and [`MouseAction::from_selector`] map it to
//! a variant, and each variant expands into the primitive button/key
//! transitions that get injected.  Selectors outside the defined range map
//! to `None`, which the facade treats as a no-op.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use self::MouseButton::{Left, Middle, Right};
use self::Transition::{Down, Up};

// ---------------------------------------------------------------------------
// Primitive events
// ---------------------------------------------------------------------------

/// Screen coordinates in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One synthetic keyboard transition for a virtual key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyEvent {
    pub vk: u8,
    pub transition: Transition,
}

/// One synthetic mouse button transition at the current cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonEvent {
    pub button: MouseButton,
    pub transition: Transition,
}

impl ButtonEvent {
    const fn new(button: MouseButton, transition: Transition) -> Self {
        ButtonEvent { button, transition }
    }
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
    /// Down immediately followed by up.
    Press,
}

impl KeyAction {
    pub const ALL: [KeyAction; 3] = [KeyAction::Down, KeyAction::Up, KeyAction::Press];

    /// Map a host selector (1 = down, 2 = up, 3 = press).
    pub fn from_selector(selector: i32) -> Option<Self> {
        match selector {
            1 => Some(KeyAction::Down),
            2 => Some(KeyAction::Up),
            3 => Some(KeyAction::Press),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyAction::Down => "down",
            KeyAction::Up => "up",
            KeyAction::Press => "press",
        }
    }

    /// Expand into the transitions injected for `vk`.
    pub fn events(self, vk: u8) -> Vec<KeyEvent> {
        let down = KeyEvent {
            vk,
            transition: Transition::Down,
        };
        let up = KeyEvent {
            vk,
            transition: Transition::Up,
        };
        match self {
            KeyAction::Down => vec![down],
            KeyAction::Up => vec![up],
            KeyAction::Press => vec![down, up],
        }
    }
}

impl FromStr for KeyAction {
    type Err = String;

    /// Accepts the action name or its numeric selector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return KeyAction::from_selector(n)
                .ok_or_else(|| format!("key action selector out of range: {n} (expected 1-3)"));
        }
        KeyAction::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown key action: {s} (expected down, up or press)"))
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    MiddleDown,
    MiddleUp,
    LeftClick,
    RightClick,
    MiddleClick,
    DoubleLeftClick,
}

const LEFT_DOWN: ButtonEvent = ButtonEvent::new(Left, Down);
const LEFT_UP: ButtonEvent = ButtonEvent::new(Left, Up);
const RIGHT_DOWN: ButtonEvent = ButtonEvent::new(Right, Down);
const RIGHT_UP: ButtonEvent = ButtonEvent::new(Right, Up);
const MIDDLE_DOWN: ButtonEvent = ButtonEvent::new(Middle, Down);
const MIDDLE_UP: ButtonEvent = ButtonEvent::new(Middle, Up);

impl MouseAction {
    /// Every action, indexed by `selector - 1`.
    pub const ALL: [MouseAction; 10] = [
        MouseAction::LeftDown,
        MouseAction::LeftUp,
        MouseAction::RightDown,
        MouseAction::RightUp,
        MouseAction::MiddleDown,
        MouseAction::MiddleUp,
        MouseAction::LeftClick,
        MouseAction::RightClick,
        MouseAction::MiddleClick,
        MouseAction::DoubleLeftClick,
    ];

    /// Map a host selector in `1..=10`.
    pub fn from_selector(selector: i32) -> Option<Self> {
        let index = usize::try_from(selector).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            MouseAction::LeftDown => "left-down",
            MouseAction::LeftUp => "left-up",
            MouseAction::RightDown => "right-down",
            MouseAction::RightUp => "right-up",
            MouseAction::MiddleDown => "middle-down",
            MouseAction::MiddleUp => "middle-up",
            MouseAction::LeftClick => "left-click",
            MouseAction::RightClick => "right-click",
            MouseAction::MiddleClick => "middle-click",
            MouseAction::DoubleLeftClick => "double-left-click",
        }
    }

    pub fn events(self) -> &'static [ButtonEvent] {
        match self {
            MouseAction::LeftDown => &[LEFT_DOWN],
            MouseAction::LeftUp => &[LEFT_UP],
            MouseAction::RightDown => &[RIGHT_DOWN],
            MouseAction::RightUp => &[RIGHT_UP],
            MouseAction::MiddleDown => &[MIDDLE_DOWN],
            MouseAction::MiddleUp => &[MIDDLE_UP],
            MouseAction::LeftClick => &[LEFT_DOWN, LEFT_UP],
            MouseAction::RightClick => &[RIGHT_DOWN, RIGHT_UP],
            MouseAction::MiddleClick => &[MIDDLE_DOWN, MIDDLE_UP],
            MouseAction::DoubleLeftClick => &[LEFT_DOWN, LEFT_UP, LEFT_DOWN, LEFT_UP],
        }
    }
}

impl FromStr for MouseAction {
    type Err = String;

    /// Accepts the kebab-case action name or its numeric selector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return MouseAction::from_selector(n)
                .ok_or_else(|| format!("mouse action selector out of range: {n} (expected 1-10)"));
        }
        MouseAction::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown mouse action: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_selectors() {
        assert_eq!(KeyAction::from_selector(1), Some(KeyAction::Down));
        assert_eq!(KeyAction::from_selector(2), Some(KeyAction::Up));
        assert_eq!(KeyAction::from_selector(3), Some(KeyAction::Press));
        assert_eq!(KeyAction::from_selector(0), None);
        assert_eq!(KeyAction::from_selector(4), None);
        assert_eq!(KeyAction::from_selector(-1), None);
    }

    #[test]
    fn test_key_press_is_down_then_up() {
        let events = KeyAction::Press.events(0x41);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].transition, Transition::Down);
        assert_eq!(events[1].transition, Transition::Up);
        assert!(events.iter().all(|e| e.vk == 0x41));
        assert_eq!(KeyAction::Up.events(0x0D)[0].transition, Transition::Up);
    }

    #[test]
    fn test_mouse_selectors_cover_one_to_ten() {
        assert_eq!(MouseAction::from_selector(0), None);
        assert_eq!(MouseAction::from_selector(11), None);
        assert_eq!(MouseAction::from_selector(i32::MIN), None);
        assert_eq!(MouseAction::from_selector(1), Some(MouseAction::LeftDown));
        assert_eq!(
            MouseAction::from_selector(10),
            Some(MouseAction::DoubleLeftClick)
        );
        for (i, &a) in MouseAction::ALL.iter().enumerate() {
            assert_eq!(MouseAction::from_selector(i as i32 + 1), Some(a));
        }
    }

    #[test]
    fn test_mouse_event_counts() {
        let counts: Vec<usize> = MouseAction::ALL.iter().map(|a| a.events().len()).collect();
        assert_eq!(counts, vec![1, 1, 1, 1, 1, 1, 2, 2, 2, 4]);
        assert_eq!(
            MouseAction::DoubleLeftClick.events(),
            &[LEFT_DOWN, LEFT_UP, LEFT_DOWN, LEFT_UP]
        );
        assert_eq!(MouseAction::MiddleClick.events(), &[MIDDLE_DOWN, MIDDLE_UP]);
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!("press".parse::<KeyAction>(), Ok(KeyAction::Press));
        assert_eq!("DOWN".parse::<KeyAction>(), Ok(KeyAction::Down));
        assert_eq!("2".parse::<KeyAction>(), Ok(KeyAction::Up));
        assert!("7".parse::<KeyAction>().is_err());
        assert!("tap".parse::<KeyAction>().is_err());

        assert_eq!(
            "double-left-click".parse::<MouseAction>(),
            Ok(MouseAction::DoubleLeftClick)
        );
        assert_eq!("8".parse::<MouseAction>(), Ok(MouseAction::RightClick));
        assert!("0".parse::<MouseAction>().is_err());
    }

    #[test]
    fn test_point_serialization() {
        let json = serde_json::to_string(&Point::new(100, -20)).unwrap();
        assert_eq!(json, r#"{"x":100,"y":-20}"#);
        assert_eq!(Point::new(3, 4).to_string(), "3,4");
    }
}
