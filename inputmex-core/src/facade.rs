//! The input facade: four host-callable operations.
//!
//! | Operation | Legacy name | Inputs | Max outputs |
//! |-----------|-------------|--------|-------------|
//! | `get_cursor_position` | `GetCursorPos` | 0 | 1 |
//! | `send_key` | `Keyboard` | 2 | 0 |
//! | `send_mouse` | `MouseClick` | 1 | 0 |
//! | `set_cursor_position` | `MouseMove` | 2 | 0 |
//!
//! Host-shaped entry points take the requested output count and the input
//! matrices, check the signature, marshal to native values and forward to
//! the backend.  Arity is checked before anything else, so a rejected call
//! never reaches the OS.  Out-of-range action selectors are silent no-ops.

use crate::action::{KeyAction, MouseAction, Point};
use crate::backend::InputBackend;
use crate::errors::{Arity, InputMexError};
use crate::host::{scalar_arg, to_int, to_virtual_key, Matrix};

// ---------------------------------------------------------------------------
// Operation table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetCursorPosition,
    SendKey,
    SendMouse,
    SetCursorPosition,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::GetCursorPosition,
        Operation::SendKey,
        Operation::SendMouse,
        Operation::SetCursorPosition,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::GetCursorPosition => "get_cursor_position",
            Operation::SendKey => "send_key",
            Operation::SendMouse => "send_mouse",
            Operation::SetCursorPosition => "set_cursor_position",
        }
    }

    /// Name the operation is exported under by the legacy host bindings.
    pub fn legacy_name(self) -> &'static str {
        match self {
            Operation::GetCursorPosition => "GetCursorPos",
            Operation::SendKey => "Keyboard",
            Operation::SendMouse => "MouseClick",
            Operation::SetCursorPosition => "MouseMove",
        }
    }

    /// Look up by snake_case name or legacy name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name || op.legacy_name() == name)
    }

    /// `(inputs, max_outputs)`.
    pub fn signature(self) -> (usize, usize) {
        match self {
            Operation::GetCursorPosition => (0, 1),
            Operation::SendKey => (2, 0),
            Operation::SendMouse => (1, 0),
            Operation::SetCursorPosition => (2, 0),
        }
    }

    /// Validate a call's input and output counts.  Inputs are checked first.
    pub fn check(self, nargout: usize, nargin: usize) -> Result<(), InputMexError> {
        let (inputs, max_outputs) = self.signature();
        if nargin != inputs {
            return Err(InputMexError::InvalidArity {
                operation: self.name(),
                arity: Arity::Inputs {
                    expected: inputs,
                    got: nargin,
                },
            });
        }
        if nargout > max_outputs {
            return Err(InputMexError::InvalidArity {
                operation: self.name(),
                arity: Arity::Outputs {
                    max: max_outputs,
                    requested: nargout,
                },
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

/// Stateless front over an [`InputBackend`].
#[derive(Debug)]
pub struct InputFacade<B> {
    backend: B,
}

impl<B: InputBackend> InputFacade<B> {
    pub fn new(backend: B) -> Self {
        InputFacade { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // -- typed API ----------------------------------------------------------

    pub fn cursor(&self) -> Point {
        self.backend.cursor_position()
    }

    pub fn move_to(&self, to: Point) {
        log::debug!("move cursor to {to}");
        self.backend.set_cursor_position(to);
    }

    /// Returns the number of events the backend accepted.
    pub fn key(&self, vk: u8, action: KeyAction) -> u32 {
        let sent = self.backend.inject_keys(&action.events(vk));
        log::debug!("key 0x{vk:02X} {}: {sent} events", action.name());
        sent
    }

    /// Returns the number of events the backend accepted.
    pub fn mouse(&self, action: MouseAction) -> u32 {
        let sent = self.backend.inject_buttons(action.events());
        log::debug!("mouse {}: {sent} events", action.name());
        sent
    }

    // -- host-shaped API ----------------------------------------------------

    /// `[x y] = get_cursor_position()`.
    ///
    /// The row is returned even for `nargout == 0` so it can land in the
    /// host's implicit answer variable.
    pub fn get_cursor_position(
        &self,
        nargout: usize,
        args: &[Matrix],
    ) -> Result<Vec<Matrix>, InputMexError> {
        Operation::GetCursorPosition.check(nargout, args.len())?;
        Ok(vec![Matrix::from(self.cursor())])
    }

    /// `send_key(code, action)` with action 1 = down, 2 = up, 3 = press.
    pub fn send_key(&self, nargout: usize, args: &[Matrix]) -> Result<Vec<Matrix>, InputMexError> {
        let op = Operation::SendKey;
        op.check(nargout, args.len())?;
        let code = scalar_arg(op.name(), args, 0)?;
        let selector = to_int(scalar_arg(op.name(), args, 1)?);

        match KeyAction::from_selector(selector) {
            Some(action) => {
                self.key(to_virtual_key(code), action);
            }
            None => log::debug!("send_key: ignoring action selector {selector}"),
        }
        Ok(Vec::new())
    }

    /// `send_mouse(action)` with action in `1..=10`.
    pub fn send_mouse(
        &self,
        nargout: usize,
        args: &[Matrix],
    ) -> Result<Vec<Matrix>, InputMexError> {
        let op = Operation::SendMouse;
        op.check(nargout, args.len())?;
        let selector = to_int(scalar_arg(op.name(), args, 0)?);

        match MouseAction::from_selector(selector) {
            Some(action) => {
                self.mouse(action);
            }
            None => log::debug!("send_mouse: ignoring action selector {selector}"),
        }
        Ok(Vec::new())
    }

    /// `set_cursor_position(x, y)`; coordinates are truncated, not clamped.
    pub fn set_cursor_position(
        &self,
        nargout: usize,
        args: &[Matrix],
    ) -> Result<Vec<Matrix>, InputMexError> {
        let op = Operation::SetCursorPosition;
        op.check(nargout, args.len())?;
        let x = to_int(scalar_arg(op.name(), args, 0)?);
        let y = to_int(scalar_arg(op.name(), args, 1)?);
        self.move_to(Point::new(x, y));
        Ok(Vec::new())
    }

    pub fn invoke(
        &self,
        op: Operation,
        nargout: usize,
        args: &[Matrix],
    ) -> Result<Vec<Matrix>, InputMexError> {
        match op {
            Operation::GetCursorPosition => self.get_cursor_position(nargout, args),
            Operation::SendKey => self.send_key(nargout, args),
            Operation::SendMouse => self.send_mouse(nargout, args),
            Operation::SetCursorPosition => self.set_cursor_position(nargout, args),
        }
    }

    /// Dispatch by operation name.  Returns `None` for an unknown name.
    pub fn call(
        &self,
        name: &str,
        nargout: usize,
        args: &[Matrix],
    ) -> Option<Result<Vec<Matrix>, InputMexError>> {
        Operation::from_name(name).map(|op| self.invoke(op, nargout, args))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{MouseButton, Transition};
    use crate::recording::{Recorded, RecordingBackend};

    fn facade() -> InputFacade<RecordingBackend> {
        InputFacade::new(RecordingBackend::new())
    }

    fn scalars(values: &[f64]) -> Vec<Matrix> {
        values.iter().copied().map(Matrix::scalar).collect()
    }

    #[test]
    fn test_wrong_input_count_is_rejected_without_side_effect() {
        let f = facade();
        let cases: [(Operation, Vec<Matrix>); 6] = [
            (Operation::GetCursorPosition, scalars(&[1.0])),
            (Operation::SendKey, scalars(&[65.0])),
            (Operation::SendKey, scalars(&[65.0, 3.0, 1.0])),
            (Operation::SendMouse, scalars(&[])),
            (Operation::SendMouse, scalars(&[1.0, 1.0])),
            (Operation::SetCursorPosition, scalars(&[100.0])),
        ];
        for (op, args) in cases {
            let err = f.invoke(op, 0, &args).unwrap_err();
            assert!(err.is_arity(), "{op:?}: {err}");
            assert_eq!(err.identifier(), "inputmex:nrhs");
        }
        assert!(f.backend().is_untouched());
    }

    #[test]
    fn test_disallowed_outputs_are_rejected() {
        let f = facade();
        let err = f.get_cursor_position(2, &[]).unwrap_err();
        assert_eq!(err.identifier(), "inputmex:nlhs");
        assert!(f.send_key(1, &scalars(&[65.0, 3.0])).is_err());
        assert!(f.send_mouse(1, &scalars(&[7.0])).is_err());
        assert!(f.set_cursor_position(1, &scalars(&[1.0, 2.0])).is_err());
        assert!(f.backend().is_untouched());
    }

    #[test]
    fn test_inputs_checked_before_outputs() {
        let err = facade().send_mouse(3, &[]).unwrap_err();
        assert_eq!(err.identifier(), "inputmex:nrhs");
    }

    #[test]
    fn test_set_then_get_cursor() {
        let f = facade();
        f.set_cursor_position(0, &scalars(&[100.0, 200.0])).unwrap();
        let out = f.get_cursor_position(1, &[]).unwrap();
        assert_eq!(out, vec![Matrix::row(vec![100.0, 200.0])]);

        // nargout = 0 still yields the row.
        assert_eq!(f.get_cursor_position(0, &[]).unwrap().len(), 1);
    }

    #[test]
    fn test_coordinates_truncated_not_clamped() {
        let f = facade();
        f.set_cursor_position(0, &scalars(&[-10.9, 99999.5])).unwrap();
        assert_eq!(f.cursor(), Point::new(-10, 99999));
    }

    #[test]
    fn test_mouse_left_down_is_single_event() {
        let f = facade();
        f.send_mouse(0, &scalars(&[1.0])).unwrap();
        let events = f.backend().button_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].button, MouseButton::Left);
        assert_eq!(events[0].transition, Transition::Down);
    }

    #[test]
    fn test_mouse_double_click_is_two_pairs() {
        let f = facade();
        f.send_mouse(0, &scalars(&[10.0])).unwrap();
        let transitions: Vec<Transition> = f
            .backend()
            .button_events()
            .iter()
            .map(|e| {
                assert_eq!(e.button, MouseButton::Left);
                e.transition
            })
            .collect();
        assert_eq!(
            transitions,
            vec![
                Transition::Down,
                Transition::Up,
                Transition::Down,
                Transition::Up
            ]
        );
    }

    #[test]
    fn test_key_press_is_down_then_up() {
        let f = facade();
        f.send_key(0, &scalars(&[65.0, 3.0])).unwrap();
        let events = f.backend().key_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].vk, 65);
        assert_eq!(events[0].transition, Transition::Down);
        assert_eq!(events[1].vk, 65);
        assert_eq!(events[1].transition, Transition::Up);
    }

    #[test]
    fn test_out_of_range_selectors_are_noops() {
        let f = facade();
        for sel in [0.0, -1.0, 11.0, f64::NAN] {
            assert!(f.send_mouse(0, &scalars(&[sel])).unwrap().is_empty());
        }
        for sel in [0.0, 4.0, -3.0] {
            assert!(f.send_key(0, &scalars(&[65.0, sel])).unwrap().is_empty());
        }
        assert!(f.backend().is_untouched());
    }

    #[test]
    fn test_selector_truncates_toward_zero() {
        let f = facade();
        f.send_mouse(0, &scalars(&[7.9])).unwrap();
        assert_eq!(f.backend().button_events().len(), 2);
    }

    #[test]
    fn test_empty_argument_is_reported() {
        let f = facade();
        let err = f
            .send_key(0, &[Matrix::scalar(65.0), Matrix::row(Vec::new())])
            .unwrap_err();
        assert_eq!(
            err,
            InputMexError::EmptyArgument {
                operation: "send_key",
                position: 2,
            }
        );
        assert!(f.backend().is_untouched());
    }

    #[test]
    fn test_call_by_name_and_legacy_name() {
        let f = facade();
        f.call("MouseMove", 0, &scalars(&[3.0, 4.0])).unwrap().unwrap();
        let out = f.call("get_cursor_position", 1, &[]).unwrap().unwrap();
        assert_eq!(out[0].data(), &[3.0, 4.0]);
        assert!(f.call("MouseScroll", 0, &[]).is_none());
        assert_eq!(f.backend().events(), vec![Recorded::Move(Point::new(3, 4))]);
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
            assert_eq!(Operation::from_name(op.legacy_name()), Some(op));
        }
        assert_eq!(Operation::from_name("keyboard"), None);
    }
}
