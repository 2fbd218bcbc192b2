//! Safe wrapper around a C function pointer used as the URL handler.

use std::ffi::{c_char, c_void, CString};

use crate::error::HandlerError;
use crate::event::UrlEvent;
use crate::handler::UrlHandler;

/// C callback signature: receives a NUL-terminated UTF-8 URL (pointer + length
/// excluding the NUL), its sequence number, and opaque user data.
/// Returns 0 on success; any other value is reported as a handler failure.
///
/// The pointer is only valid for the duration of the call.
pub type UrlCallback = unsafe extern "C" fn(
    url_ptr: *const c_char,
    url_len: usize,
    seq: u64,
    user_data: *mut c_void,
) -> i32;

/// Wraps a C URL callback with its user_data pointer.
///
/// The native side is responsible for ensuring the callback and user_data remain
/// valid until `brb_bridge_shutdown`.
pub struct CallbackSink {
    cb: UrlCallback,
    user_data: *mut c_void,
}

// Safety: The native consumer guarantees thread-safe access to user_data.
// The callback may be invoked from whichever thread delivers the event.
unsafe impl Send for CallbackSink {}
unsafe impl Sync for CallbackSink {}

impl CallbackSink {
    pub fn new(cb: UrlCallback, user_data: *mut c_void) -> Self {
        Self { cb, user_data }
    }
}

impl UrlHandler for CallbackSink {
    fn handle(&self, event: UrlEvent) -> Result<(), HandlerError> {
        // Payloads with interior NULs are rejected at marshaling time.
        let url = event.url.into_string();
        let len = url.len();
        let cstr = CString::new(url)
            .map_err(|_| HandlerError::Rejected("URL contained interior NUL byte".to_string()))?;
        let rc = unsafe { (self.cb)(cstr.as_ptr(), len, event.seq, self.user_data) };
        match rc {
            0 => Ok(()),
            code => Err(HandlerError::Rejected(format!("native handler returned {code}"))),
        }
    }
}
