//! The consumer side of the bridge.
//!
//! Whatever the application core registers must implement [`UrlHandler`].
//! Closures work directly; [`ChannelHandler`] hands events to an async run loop.

use tokio::sync::mpsc;

use crate::error::HandlerError;
use crate::event::UrlEvent;

/// Receives relayed URL events. Called from whichever thread dispatches,
/// never with the relay lock held.
pub trait UrlHandler: Send + Sync + 'static {
    fn handle(&self, event: UrlEvent) -> Result<(), HandlerError>;
}

impl<F> UrlHandler for F
where
    F: Fn(UrlEvent) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn handle(&self, event: UrlEvent) -> Result<(), HandlerError> {
        self(event)
    }
}

/// Forwards events into a bounded tokio channel without blocking the caller.
///
/// A full channel is reported as a handler failure, so the native thread is
/// never parked waiting for the application's run loop.
pub struct ChannelHandler {
    tx: mpsc::Sender<UrlEvent>,
}

impl ChannelHandler {
    pub fn new(tx: mpsc::Sender<UrlEvent>) -> Self {
        Self { tx }
    }

    /// Create a handler and its receiving end.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<UrlEvent>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self::new(tx), rx)
    }
}

impl UrlHandler for ChannelHandler {
    fn handle(&self, event: UrlEvent) -> Result<(), HandlerError> {
        match self.tx.try_send(event) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(ev)) => Err(HandlerError::Rejected(format!(
                "URL channel full, dropping #{}",
                ev.seq
            ))),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(HandlerError::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodingPolicy;
    use crate::payload::marshal;

    fn event(seq: u64, url: &str) -> UrlEvent {
        UrlEvent::new(seq, marshal(url.as_bytes(), EncodingPolicy::Reject).unwrap())
    }

    #[test]
    fn test_closure_handler() {
        let h = |ev: UrlEvent| {
            if ev.url.as_str().starts_with("myapp://") {
                Ok(())
            } else {
                Err(HandlerError::Rejected("unknown scheme".into()))
            }
        };
        assert!(h.handle(event(1, "myapp://x")).is_ok());
        assert!(h.handle(event(2, "other://x")).is_err());
    }

    #[test]
    fn test_channel_handler_full_and_closed() {
        let (h, mut rx) = ChannelHandler::channel(1);
        h.handle(event(1, "myapp://a")).unwrap();

        let err = h.handle(event(2, "myapp://b")).unwrap_err();
        assert!(matches!(err, HandlerError::Rejected(_)));

        assert_eq!(rx.try_recv().unwrap().seq, 1);
        drop(rx);
        assert_eq!(h.handle(event(3, "myapp://c")), Err(HandlerError::Closed));
    }
}
