//! C Foreign Function Interface (FFI) for Typewheel.
//!
//! This module exposes host-driven reveal runs to other languages. The
//! host calls `typewheel_run_tick` from its own timer (e.g. every 15ms)
//! and reads the revealed byte length after each tick. All functions are
//! `extern "C"` with stable ABI.
//!
//! # Safety
//!
//! All functions that accept pointers require valid pointers or NULL.
//! The caller is responsible for destroying every run it creates.
//!
//! # Example (C)
//!
//! ```c
//! #include "typewheel.h"
//!
//! int main() {
//!     const char* answer = "The mean is $\\mu$.";
//!     TypewheelRun* run = typewheel_run_new(answer, 1);
//!     if (!run) return 1;
//!
//!     while (typewheel_run_tick(run) == TYPEWHEEL_TICK_PENDING) {
//!         size_t len = typewheel_run_prefix_len(run);
//!         printf("\r%.*s", (int)len, answer);
//!         // ...wait for the next frame...
//!     }
//!
//!     typewheel_run_destroy(run);
//!     return 0;
//! }
//! ```

// FFI modules intentionally use unsafe and no_mangle
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use crate::config::RevealConfig;
use crate::reveal::{CancelToken, NullSink, Outcome, RevealRun, RunId, TickStatus};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

// =============================================================================
// Opaque Handle Types
// =============================================================================

/// Opaque handle to a reveal run.
pub struct TypewheelRun(RevealRun<NullSink>);

// =============================================================================
// Result and Status Codes
// =============================================================================

/// Result codes for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewheelResult {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer passed.
    NullPointer = 1,
    /// Invalid UTF-8 string.
    InvalidUtf8 = 2,
}

/// Status returned by a tick.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewheelTickStatus {
    /// More ticks are needed.
    Pending = 0,
    /// The whole text was revealed.
    Completed = 1,
    /// The run was cancelled.
    Stopped = 2,
    /// The handle was NULL.
    Invalid = 3,
}

impl From<TickStatus> for TypewheelTickStatus {
    fn from(status: TickStatus) -> Self {
        match status {
            TickStatus::Pending => Self::Pending,
            TickStatus::Finished(Outcome::Completed) => Self::Completed,
            TickStatus::Finished(Outcome::Stopped) | TickStatus::Disposed => Self::Stopped,
        }
    }
}

// =============================================================================
// Run Functions
// =============================================================================

/// Create an animated run over a NUL-terminated UTF-8 string.
///
/// Returns NULL if `text` is NULL or not valid UTF-8.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn typewheel_run_new(text: *const c_char, id: u64) -> *mut TypewheelRun {
    create_run(text, id, false)
}

/// Create a run that reveals the whole text on its first tick.
///
/// Use this for messages loaded from history. Returns NULL on bad input.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn typewheel_run_new_skip(
    text: *const c_char,
    id: u64,
) -> *mut TypewheelRun {
    create_run(text, id, true)
}

/// Destroy a run.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn typewheel_run_destroy(run: *mut TypewheelRun) {
    if !run.is_null() {
        drop(Box::from_raw(run));
    }
}

/// Execute one tick.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn typewheel_run_tick(run: *mut TypewheelRun) -> TypewheelTickStatus {
    if run.is_null() {
        return TypewheelTickStatus::Invalid;
    }
    (*run).0.tick().into()
}

/// Request cancellation. The next tick reports `Stopped`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn typewheel_run_cancel(run: *mut TypewheelRun) -> TypewheelResult {
    if run.is_null() {
        return TypewheelResult::NullPointer;
    }
    (*run).0.cancel_token().cancel();
    TypewheelResult::Ok
}

/// Number of bytes of the source text revealed so far.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn typewheel_run_prefix_len(run: *const TypewheelRun) -> usize {
    if run.is_null() {
        return 0;
    }
    (*run).0.prefix().len()
}

/// Pointer to the revealed prefix (not NUL-terminated).
///
/// The length is written to `out_len`. The pointer stays valid until the
/// run is destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn typewheel_run_prefix(
    run: *const TypewheelRun,
    out_len: *mut usize,
) -> *const u8 {
    if run.is_null() || out_len.is_null() {
        return ptr::null();
    }
    let prefix = (*run).0.prefix();
    *out_len = prefix.len();
    prefix.as_ptr()
}

/// Whether a math span has been revealed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn typewheel_run_in_math_mode(run: *const TypewheelRun) -> bool {
    if run.is_null() {
        return false;
    }
    (*run).0.in_math_mode()
}

/// Check a string for use with `typewheel_run_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn typewheel_validate_text(text: *const c_char) -> TypewheelResult {
    if text.is_null() {
        return TypewheelResult::NullPointer;
    }
    match CStr::from_ptr(text).to_str() {
        Ok(_) => TypewheelResult::Ok,
        Err(_) => TypewheelResult::InvalidUtf8,
    }
}

// =============================================================================
// Version Information
// =============================================================================

/// Get the Typewheel version string.
#[unsafe(no_mangle)]
pub extern "C" fn typewheel_version() -> *const c_char {
    static VERSION: &[u8] = b"0.1.0\0";
    VERSION.as_ptr().cast::<c_char>()
}

// =============================================================================
// Helper Functions
// =============================================================================

unsafe fn create_run(text: *const c_char, id: u64, skip: bool) -> *mut TypewheelRun {
    if text.is_null() {
        return ptr::null_mut();
    }
    let Ok(text) = CStr::from_ptr(text).to_str() else {
        return ptr::null_mut();
    };
    let run = RevealRun::new(
        RunId(id),
        text,
        CancelToken::new(),
        &RevealConfig::default(),
        NullSink,
    )
    .skip_animation(skip);
    Box::into_raw(Box::new(TypewheelRun(run)))
}
