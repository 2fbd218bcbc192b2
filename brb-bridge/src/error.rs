//! Relay errors and the FFI result codes they map onto.

/// Errors produced while relaying a URL event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// The native payload was null, empty, or not representable as text.
    #[error("invalid payload: {reason}")]
    InvalidPayload { reason: &'static str },
    /// A handler is already registered for this relay instance.
    #[error("a URL handler is already registered")]
    AlreadyRegistered,
    /// The pending queue was full and the oldest buffered event was dropped.
    ///
    /// Never returned as `Err` from `receive`: the incoming event was accepted.
    /// Surfaced through `Receipt::Buffered::displaced` and the overflow counter.
    #[error("pending queue full, dropped event #{dropped_seq}")]
    QueueOverflow { dropped_seq: u64 },
    /// The handler reported a failure for a delivered event.
    #[error("handler failed on event #{seq}: {reason}")]
    HandlerFailure { seq: u64, reason: String },
    /// The relay instance has been shut down.
    #[error("relay is shut down")]
    ShutDown,
}

/// Failure reported by a [`UrlHandler`](crate::handler::UrlHandler).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    Rejected(String),
    /// The consuming side has gone away (e.g. its channel receiver was dropped).
    #[error("handler is closed")]
    Closed,
}

/// Error codes for the C ABI surface.
///
/// Every `brb_bridge_*` function that returns `i32` uses these values.
/// Native callers should check for `Ok` (0); everything else is a dropped or
/// rejected operation, never a process-fatal condition.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiResult {
    /// Success.
    Ok = 0,
    /// The URL payload was null, empty, or had an unusable encoding.
    InvalidPayload = 1,
    /// `brb_bridge_register_handler` was called twice in one epoch.
    AlreadyRegistered = 2,
    /// The event was delivered but the handler reported failure.
    HandlerFailure = 3,
    /// The relay instance was shut down while the call was in flight.
    ShutDown = 4,
    /// A required non-payload argument was null or malformed.
    InvalidArgument = 5,
    /// An internal error occurred (logged via tracing).
    Internal = 6,
}

impl From<&RelayError> for FfiResult {
    fn from(err: &RelayError) -> Self {
        match err {
            RelayError::InvalidPayload { .. } => FfiResult::InvalidPayload,
            RelayError::AlreadyRegistered => FfiResult::AlreadyRegistered,
            RelayError::QueueOverflow { .. } => FfiResult::Ok,
            RelayError::HandlerFailure { .. } => FfiResult::HandlerFailure,
            RelayError::ShutDown => FfiResult::ShutDown,
        }
    }
}

impl<T> From<Result<T, RelayError>> for FfiResult {
    fn from(result: Result<T, RelayError>) -> Self {
        match result {
            Ok(_) => FfiResult::Ok,
            Err(ref e) => e.into(),
        }
    }
}
