//! Host value marshalling.
//!
//! Numeric hosts pass every argument as a double-precision matrix.  The
//! facade only ever reads the first element of each argument and only ever
//! returns row vectors (the `[x y]` cursor row), so [`Matrix`] keeps the
//! elements in column-major order and nothing else.

use crate::action::Point;
use crate::errors::InputMexError;

/// Host array of doubles, flattened column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
}

impl Matrix {
    pub fn scalar(value: f64) -> Self {
        Matrix { data: vec![value] }
    }

    /// `1 x n` row vector.
    pub fn row(values: Vec<f64>) -> Self {
        Matrix { data: values }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn first(&self) -> Option<f64> {
        self.data.first().copied()
    }
}

impl From<Point> for Matrix {
    fn from(p: Point) -> Self {
        Matrix::row(vec![f64::from(p.x), f64::from(p.y)])
    }
}

/// Truncate a host double toward zero.
///
/// Out-of-range values saturate at `i32::MIN` / `i32::MAX`; NaN maps to 0.
pub fn to_int(value: f64) -> i32 {
    value as i32
}

/// Narrow a host key code to the one-byte virtual key range.
///
/// Only the low byte is kept, as the legacy `keybd_event` `BYTE` parameter
/// does.
pub fn to_virtual_key(value: f64) -> u8 {
    to_int(value) as u8
}

/// Read the first element of argument `index` (0-based).
///
/// The caller has already checked arity, so `index` is in bounds; an
/// out-of-bounds index is reported the same way as an empty argument.
pub fn scalar_arg(
    operation: &'static str,
    args: &[Matrix],
    index: usize,
) -> Result<f64, InputMexError> {
    args.get(index)
        .and_then(Matrix::first)
        .ok_or(InputMexError::EmptyArgument {
            operation,
            position: index + 1,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
