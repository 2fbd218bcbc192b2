//! C ABI exports — the public surface called by the native app framework.
//!
//! All functions are `extern "C"` and `#[no_mangle]`. They route through the
//! process-wide relay host; no function here runs application logic itself.

use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::sync::Arc;

use crate::bridge::callback::{CallbackSink, UrlCallback};
use crate::error::FfiResult;
use crate::host;

// ─── Inbound ─────────────────────────────────────────────────────────

/// Relay a URL given as pointer + length.
///
/// The buffer is copied before this returns; the caller may free it immediately.
/// Returns `Ok` if the event was delivered or buffered.
///
/// # Safety
///
/// `url_ptr` must be null or point to `url_len` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn brb_bridge_receive_url(url_ptr: *const c_char, url_len: usize) -> i32 {
    let relay = host::global().relay();
    FfiResult::from(unsafe { relay.receive_raw(url_ptr, url_len) }) as i32
}

/// Relay a NUL-terminated URL.
///
/// # Safety
///
/// `url` must be null or a valid NUL-terminated C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn brb_bridge_receive_url_cstr(url: *const c_char) -> i32 {
    let relay = host::global().relay();
    FfiResult::from(unsafe { relay.receive_c_str(url) }) as i32
}

/// Relay URLs passed on the command line when the OS launched the app as the
/// default handler. `argv[0]` is included in the scan and skipped like any
/// other non-URL argument.
///
/// Returns the number of URLs accepted, or a negative `FfiResult` code.
///
/// # Safety
///
/// `argv` must be null or point to `argc` pointers, each null or a valid
/// NUL-terminated C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn brb_bridge_receive_launch_args(
    argc: c_int,
    argv: *const *const c_char,
) -> i32 {
    if argv.is_null() || argc < 0 {
        return -(FfiResult::InvalidArgument as i32);
    }
    let args = unsafe { std::slice::from_raw_parts(argv, argc as usize) };
    let args: Vec<&std::ffi::OsStr> = args
        .iter()
        .filter(|p| !p.is_null())
        .map(|&p| bytes_as_os_str(unsafe { CStr::from_ptr(p) }.to_bytes()))
        .collect();
    let accepted = host::global().relay().receive_launch_args(args);
    i32::try_from(accepted).unwrap_or(i32::MAX)
}

#[cfg(unix)]
fn bytes_as_os_str(bytes: &[u8]) -> &std::ffi::OsStr {
    use std::os::unix::ffi::OsStrExt;
    std::ffi::OsStr::from_bytes(bytes)
}

#[cfg(not(unix))]
fn bytes_as_os_str(bytes: &[u8]) -> &std::ffi::OsStr {
    // Non-UTF-8 arguments degrade to empty and are skipped.
    std::ffi::OsStr::new(std::str::from_utf8(bytes).unwrap_or(""))
}

// ─── Registration / lifecycle ────────────────────────────────────────

/// Register the URL callback and flush everything buffered so far.
///
/// The callback is invoked for each buffered URL, in order, before this
/// returns, and afterwards on whichever thread relays a new URL.
/// Returns `AlreadyRegistered` if a callback is already set in this epoch.
///
/// # Safety
///
/// `cb` must be a valid function pointer. `user_data` must remain valid
/// until `brb_bridge_shutdown`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn brb_bridge_register_handler(
    cb: Option<UrlCallback>,
    user_data: *mut c_void,
) -> i32 {
    let Some(cb) = cb else {
        tracing::error!("brb_bridge_register_handler: null callback");
        return FfiResult::InvalidArgument as i32;
    };
    match host::global().register_handler(Arc::new(CallbackSink::new(cb, user_data))) {
        Ok(report) => {
            tracing::debug!(
                "brb_bridge_register_handler: drained {} event(s), {} failed",
                report.delivered,
                report.failed.len()
            );
            FfiResult::Ok as i32
        }
        Err(e) => {
            tracing::error!("brb_bridge_register_handler: {e}");
            FfiResult::from(&e) as i32
        }
    }
}

/// End the current epoch: drop the callback and any undelivered URLs.
///
/// Safe to call multiple times. A new callback may be registered afterwards.
#[unsafe(no_mangle)]
pub extern "C" fn brb_bridge_shutdown() {
    host::global().shutdown();
}

/// Install the bridge's log subscriber (stderr + `~/.brb/brb.log`).
///
/// Returns `Ok` if installed or if a subscriber already exists.
#[unsafe(no_mangle)]
pub extern "C" fn brb_bridge_init_logging() -> i32 {
    match crate::logging::init() {
        Ok(_) => FfiResult::Ok as i32,
        Err(e) => {
            eprintln!("brb_bridge_init_logging: {e:#}");
            FfiResult::Internal as i32
        }
    }
}

// ─── Diagnostics ─────────────────────────────────────────────────────

/// Get a JSON snapshot of the current relay.
///
/// Returns a heap-allocated C string that must be freed with `brb_bridge_free_string`.
///
/// Snapshot schema:
/// ```json
/// {
///   "epoch": 1,
///   "phase": "live",
///   "pending": 0,
///   "capacity": 256,
///   "accepted": 3,
///   "delivered": 3,
///   "handler_failures": 0,
///   "rejected": 0,
///   "overflow_drops": 0,
///   "discarded": 0
/// }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn brb_bridge_stats_json() -> *mut c_char {
    let stats = host::global().stats();
    let json = match serde_json::to_string(&stats) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("brb_bridge_stats_json: {e}");
            return std::ptr::null_mut();
        }
    };
    match CString::new(json) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by `brb_bridge_stats_json`.
///
/// # Safety
///
/// `ptr` must be null or a pointer previously returned by `brb_bridge_stats_json`.
/// Must not be called more than once for the same pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn brb_bridge_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
