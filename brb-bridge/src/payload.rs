//! Copy-on-entry marshaling of native URL buffers.
//!
//! The native side owns its buffer only for the duration of the call, so
//! everything here copies into a Rust-owned [`Payload`] before returning.

use std::ffi::{c_char, CStr};
use std::fmt;

use serde::Serialize;

use crate::config::EncodingPolicy;
use crate::error::RelayError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An owned, immutable URL payload. Never aliases native memory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Payload(Box<str>);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0.into_string()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Payload {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Payload {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

fn invalid(reason: &'static str) -> RelayError {
    RelayError::InvalidPayload { reason }
}

/// Normalize and copy `bytes` into an owned payload.
///
/// Strips a leading BOM, trailing NUL padding and surrounding ASCII whitespace.
/// Empty results and interior NULs are rejected regardless of `policy`.
pub fn marshal(bytes: &[u8], policy: EncodingPolicy) -> Result<Payload, RelayError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let bytes = bytes[..end].trim_ascii();

    if bytes.is_empty() {
        return Err(invalid("empty"));
    }
    if bytes.contains(&0) {
        return Err(invalid("interior NUL byte"));
    }

    let text = match (std::str::from_utf8(bytes), policy) {
        (Ok(s), _) => s.to_owned(),
        (Err(_), EncodingPolicy::Reject) => return Err(invalid("not valid UTF-8")),
        (Err(_), EncodingPolicy::Replace) => String::from_utf8_lossy(bytes).into_owned(),
    };
    Ok(Payload(text.into_boxed_str()))
}

/// Copy a pointer + length buffer.
///
/// # Safety
///
/// `ptr` must be null or point to `len` readable bytes for the duration of the call.
pub unsafe fn copy_raw(
    ptr: *const c_char,
    len: usize,
    policy: EncodingPolicy,
) -> Result<Payload, RelayError> {
    if ptr.is_null() {
        return Err(invalid("null pointer"));
    }
    let bytes = unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), len) };
    marshal(bytes, policy)
}

/// Copy a NUL-terminated buffer.
///
/// # Safety
///
/// `ptr` must be null or a valid NUL-terminated C string for the duration of the call.
pub unsafe fn copy_c_str(ptr: *const c_char, policy: EncodingPolicy) -> Result<Payload, RelayError> {
    if ptr.is_null() {
        return Err(invalid("null pointer"));
    }
    marshal(unsafe { CStr::from_ptr(ptr) }.to_bytes(), policy)
}
