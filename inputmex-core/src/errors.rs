//! Error types for `inputmex_core`.
//!
//! All Rust-side failures are funnelled through [`InputMexError`], which
//! uses `thiserror` for `Display` and `Error` derives.  Host bindings map
//! the error onto their own reporting channel using
//! [`InputMexError::identifier`] plus the `Display` text.

use std::fmt;

use thiserror::Error;

/// Which side of a call signature was violated, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Wrong number of input arguments.
    Inputs { expected: usize, got: usize },
    /// More outputs requested than the operation produces.
    Outputs { max: usize, requested: usize },
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Arity::Inputs { expected: 0, got } => {
                write!(f, "no input argument required (got {got})")
            }
            Arity::Inputs { expected: 1, got } => {
                write!(f, "one input argument required (got {got})")
            }
            Arity::Inputs { expected: 2, got } => {
                write!(f, "two input arguments required (got {got})")
            }
            Arity::Inputs { expected, got } => {
                write!(f, "{expected} input arguments required (got {got})")
            }
            Arity::Outputs { max: 0, requested } => {
                write!(f, "no output allowed (requested {requested})")
            }
            Arity::Outputs { max: 1, requested } => {
                write!(f, "a maximum of one output allowed (requested {requested})")
            }
            Arity::Outputs { max, requested } => {
                write!(f, "a maximum of {max} outputs allowed (requested {requested})")
            }
        }
    }
}

/// Top-level error type for the `inputmex_core` library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputMexError {
    /// Wrong number of inputs or outputs for an operation.
    #[error("InvalidArity: {operation}: {arity}")]
    InvalidArity {
        operation: &'static str,
        arity: Arity,
    },

    /// A numeric argument was an empty matrix, so there is no scalar to read.
    #[error("EmptyArgument: {operation}: argument {position} is empty")]
    EmptyArgument {
        operation: &'static str,
        position: usize,
    },

    /// No input backend exists for the current platform.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl InputMexError {
    /// Host error identifier, in the `component:mnemonic` form numeric hosts
    /// attach to raised errors.
    pub fn identifier(&self) -> &'static str {
        match self {
            InputMexError::InvalidArity {
                arity: Arity::Inputs { .. },
                ..
            } => "inputmex:nrhs",
            InputMexError::InvalidArity {
                arity: Arity::Outputs { .. },
                ..
            } => "inputmex:nlhs",
            InputMexError::EmptyArgument { .. } => "inputmex:empty",
            InputMexError::Unsupported(_) => "inputmex:unsupported",
        }
    }

    pub fn is_arity(&self) -> bool {
        matches!(self, InputMexError::InvalidArity { .. })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_arity_messages() {
        let e = InputMexError::InvalidArity {
            operation: "send_key",
            arity: Arity::Inputs {
                expected: 2,
                got: 1,
            },
        };
        assert_eq!(
            e.to_string(),
            "InvalidArity: send_key: two input arguments required (got 1)"
        );
        assert_eq!(e.identifier(), "inputmex:nrhs");
        assert!(e.is_arity());
    }

    #[test]
    fn test_output_arity_messages() {
        let e = InputMexError::InvalidArity {
            operation: "get_cursor_position",
            arity: Arity::Outputs {
                max: 1,
                requested: 2,
            },
        };
        assert!(e.to_string().contains("a maximum of one output allowed"));
        assert_eq!(e.identifier(), "inputmex:nlhs");

        let none = Arity::Outputs {
            max: 0,
            requested: 1,
        };
        assert_eq!(none.to_string(), "no output allowed (requested 1)");
    }

    #[test]
    fn test_other_identifiers() {
        let empty = InputMexError::EmptyArgument {
            operation: "send_mouse",
            position: 1,
        };
        assert_eq!(empty.identifier(), "inputmex:empty");
        assert!(!empty.is_arity());
        assert_eq!(
            InputMexError::Unsupported("linux".into()).identifier(),
            "inputmex:unsupported"
        );
    }
}
