//! C ABI DLL for inputmex -- loadable by a numeric host's foreign-library
//! loader, ctypes, C#, or any FFI consumer.
//!
//! All exported functions follow the convention:
//! - Return `i32` status code: `INPUTMEX_OK=0`, `INPUTMEX_ERROR=-1`
//! - Host arguments are passed as scalar doubles, outputs written through
//!   caller-owned buffers
//! - Last error retrievable via `inputmex_last_error()` (message) and
//!   `inputmex_last_error_id()` (host error identifier)

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};
use std::ptr;

use inputmex_core::{InputBackend, InputFacade, InputMexError, Matrix, Operation};

pub const INPUTMEX_OK: i32 = 0;
pub const INPUTMEX_ERROR: i32 = -1;

thread_local! {
    static LAST_ERROR: RefCell<Option<(CString, CString)>> = const { RefCell::new(None) };
}

fn set_last_error(id: &str, msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(id).ok().zip(CString::new(msg).ok());
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

fn fail(err: &InputMexError) -> i32 {
    log::debug!("{err}");
    set_last_error(err.identifier(), &err.to_string());
    INPUTMEX_ERROR
}

/// Retrieve the last error message (thread-local).
///
/// Returns a pointer valid until the next inputmex_* call on this thread.
/// Returns null if the last call succeeded.
#[no_mangle]
pub extern "C" fn inputmex_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|(_, msg)| msg.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Retrieve the identifier of the last error (e.g. `inputmex:nrhs`).
///
/// Same lifetime rules as [`inputmex_last_error`].
#[no_mangle]
pub extern "C" fn inputmex_last_error_id() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|(id, _)| id.as_ptr())
            .unwrap_or(ptr::null())
    })
}

// ---------------------------------------------------------------------------
// Dispatch core (backend-generic so it can be tested without the OS)
// ---------------------------------------------------------------------------

/// Run `op` and flatten the requested outputs into `out`.
///
/// With `nargout == 0` the implicit answer (the first output, if any) is
/// written only when the caller supplied a buffer; otherwise it is dropped.
/// Returns the number of doubles written, or an error message when the
/// buffer is too small for the requested outputs.
fn run<B: InputBackend>(
    facade: &InputFacade<B>,
    op: Operation,
    nargout: usize,
    args: &[f64],
    out: &mut [f64],
) -> Result<usize, String> {
    let args: Vec<Matrix> = args.iter().copied().map(Matrix::scalar).collect();
    let outputs = facade.invoke(op, nargout, &args).map_err(|e| {
        set_last_error(e.identifier(), &e.to_string());
        e.to_string()
    })?;

    let wanted = match nargout {
        0 if out.is_empty() => 0,
        0 => 1,
        n => n,
    };
    let flat: Vec<f64> = outputs
        .iter()
        .take(wanted)
        .flat_map(|m| m.data().iter().copied())
        .collect();
    if flat.len() > out.len() {
        let msg = format!(
            "output buffer too small: need {}, have {}",
            flat.len(),
            out.len()
        );
        set_last_error("inputmex:buffer", &msg);
        return Err(msg);
    }
    out[..flat.len()].copy_from_slice(&flat);
    Ok(flat.len())
}

fn with_system<T>(
    f: impl FnOnce(&InputFacade<inputmex_core::DynBackend>) -> Result<T, String>,
) -> Result<T, String> {
    let backend = inputmex_core::system_backend().map_err(|e| {
        fail(&e);
        e.to_string()
    })?;
    f(&InputFacade::new(backend))
}

fn status<T>(result: Result<T, String>) -> i32 {
    match result {
        Ok(_) => {
            clear_last_error();
            INPUTMEX_OK
        }
        Err(_) => INPUTMEX_ERROR,
    }
}

// ---------------------------------------------------------------------------
// Generic entry point
// ---------------------------------------------------------------------------

/// Call an operation by name (`send_key`, `Keyboard`, ...).
///
/// `nargout == 0` with no output buffer runs the operation and discards any
/// result, like a host statement without an assignment.
///
/// # Safety
///
/// - `name` must be a valid null-terminated UTF-8 C string.
/// - `args` must point to `nargin` doubles (may be null when `nargin == 0`).
/// - `out` must point to `out_capacity` writable doubles (may be null when
///   `out_capacity == 0`).
/// - `out_len`, if non-null, receives the number of doubles written.
#[no_mangle]
pub unsafe extern "C" fn inputmex_call(
    name: *const c_char,
    nargout: usize,
    nargin: usize,
    args: *const f64,
    out: *mut f64,
    out_capacity: usize,
    out_len: *mut usize,
) -> i32 {
    if name.is_null() {
        set_last_error("inputmex:null", "name is null");
        return INPUTMEX_ERROR;
    }
    if (args.is_null() && nargin > 0) || (out.is_null() && out_capacity > 0) {
        set_last_error("inputmex:null", "null buffer with non-zero length");
        return INPUTMEX_ERROR;
    }

    let name = match unsafe { CStr::from_ptr(name) }.to_str() {
        Ok(s) => s,
        Err(e) => {
            set_last_error("inputmex:utf8", &format!("Invalid UTF-8: {e}"));
            return INPUTMEX_ERROR;
        }
    };
    let Some(op) = Operation::from_name(name) else {
        set_last_error("inputmex:unknown", &format!("unknown operation: {name}"));
        return INPUTMEX_ERROR;
    };

    let args: &[f64] = if nargin == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(args, nargin) }
    };
    let out: &mut [f64] = if out_capacity == 0 {
        Default::default()
    } else {
        unsafe { std::slice::from_raw_parts_mut(out, out_capacity) }
    };

    let result = with_system(|facade| run(facade, op, nargout, args, out));
    if let (Ok(n), false) = (&result, out_len.is_null()) {
        unsafe { *out_len = *n };
    }
    status(result)
}

// ---------------------------------------------------------------------------
// Fixed-signature entry points (one per legacy binding)
// ---------------------------------------------------------------------------

/// Read the cursor position.
///
/// # Safety
///
/// `out_x` and `out_y` must be valid pointers to writable `i32`s.
#[no_mangle]
pub unsafe extern "C" fn inputmex_get_cursor_pos(out_x: *mut i32, out_y: *mut i32) -> i32 {
    if out_x.is_null() || out_y.is_null() {
        set_last_error("inputmex:null", "out_x or out_y is null");
        return INPUTMEX_ERROR;
    }
    let result = with_system(|facade| Ok(facade.cursor()));
    if let Ok(p) = &result {
        unsafe {
            *out_x = p.x;
            *out_y = p.y;
        }
    }
    status(result)
}

/// Key transition: `action` 1 = down, 2 = up, 3 = press; others are ignored.
#[no_mangle]
pub extern "C" fn inputmex_keyboard(code: f64, action: f64) -> i32 {
    status(with_system(|facade| {
        run(facade, Operation::SendKey, 0, &[code, action], &mut [])
    }))
}

/// Mouse button action in `1..=10`; others are ignored.
#[no_mangle]
pub extern "C" fn inputmex_mouse_click(action: f64) -> i32 {
    status(with_system(|facade| {
        run(facade, Operation::SendMouse, 0, &[action], &mut [])
    }))
}

/// Move the cursor to absolute screen coordinates (truncated to integers).
#[no_mangle]
pub extern "C" fn inputmex_mouse_move(x: f64, y: f64) -> i32 {
    status(with_system(|facade| {
        run(facade, Operation::SetCursorPosition, 0, &[x, y], &mut [])
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
