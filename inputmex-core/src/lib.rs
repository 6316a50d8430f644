//! `inputmex_core` -- Pure Rust core for the inputmex bindings.
//!
//! Four stateless operations for a numeric host: read the cursor, move it,
//! send a key transition, send a mouse button action.  This crate holds all
//! of the logic and can be consumed by:
//! - `inputmex-ffi` (C ABI DLL for a host's foreign-library loader)
//! - `inputmex-cli` (standalone CLI tools and IPC worker)
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `InputMexError` enum via `thiserror` |
//! | [`action`] | `Point`, `KeyAction`, `MouseAction` and their event expansion |
//! | [`host`] | `Matrix` host values and double-to-integer marshalling |
//! | [`backend`] | `InputBackend` trait and system backend selection |
//! | [`recording`] | In-memory backend for tests and dry runs |
//! | `win32` | `GetCursorPos` / `SetCursorPos` / `SendInput` (Windows only) |
//! | [`facade`] | Arity-checked host operations over a backend |

pub mod action;
pub mod backend;
pub mod errors;
pub mod facade;
pub mod host;
pub mod recording;
#[cfg(windows)]
pub mod win32;

pub use action::{KeyAction, MouseAction, Point};
pub use backend::{system_backend, DynBackend, InputBackend};
pub use errors::InputMexError;
pub use facade::{InputFacade, Operation};
pub use host::Matrix;
