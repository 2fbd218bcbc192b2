//! The relay: marshal, sequence, then deliver or buffer.
//!
//! All state sits behind one mutex. The lock is never held across a handler
//! call; instead exactly one thread at a time holds the dispatch token and
//! drains `pending` in `seq` order. Anyone arriving while the token is taken
//! (another native thread, or the handler re-entering `receive`) just appends.

use std::collections::VecDeque;
use std::ffi::{c_char, OsStr};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::config::RelayConfig;
use crate::error::{HandlerError, RelayError};
use crate::event::UrlEvent;
use crate::handler::UrlHandler;
use crate::payload::{self, Payload};

/// Lifecycle of one relay instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No handler yet; everything is buffered.
    Uninitialized,
    /// Inside `register_handler`, flushing the backlog.
    Draining,
    /// Handler registered; events are delivered as they arrive.
    Live,
    /// Terminal. Events are dropped.
    Shutdown,
}

impl Phase {
    pub fn is_ready(self) -> bool {
        matches!(self, Phase::Draining | Phase::Live)
    }
}

/// What happened to an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receipt {
    /// Handed to the handler on the calling thread.
    Delivered { seq: u64 },
    /// Queued. `displaced` is the seq of the oldest event dropped to make room.
    Buffered { seq: u64, displaced: Option<u64> },
}

impl Receipt {
    pub fn seq(&self) -> u64 {
        match self {
            Receipt::Delivered { seq } | Receipt::Buffered { seq, .. } => *seq,
        }
    }

    /// The overflow condition this receive caused, if any.
    pub fn overflow(&self) -> Option<RelayError> {
        match self {
            Receipt::Buffered {
                displaced: Some(dropped_seq),
                ..
            } => Some(RelayError::QueueOverflow {
                dropped_seq: *dropped_seq,
            }),
            _ => None,
        }
    }
}

/// Outcome of the backlog flush performed by `register_handler`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Events handed to the handler, whether or not it succeeded.
    pub delivered: usize,
    /// One `HandlerFailure` per event the handler failed on. Draining continues past them.
    pub failed: Vec<RelayError>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Events that were marshaled and given a seq.
    pub accepted: u64,
    /// Events handed to the handler, whether or not it succeeded.
    pub delivered: u64,
    pub handler_failures: u64,
    /// Payloads refused by the marshaler.
    pub rejected: u64,
    /// Buffered events dropped because the queue was full.
    pub overflow_drops: u64,
    /// Buffered events discarded at shutdown.
    pub discarded: u64,
}

/// Point-in-time view of a relay, serialized for the native side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    pub epoch: u64,
    pub phase: Phase,
    pub pending: usize,
    pub capacity: usize,
    #[serde(flatten)]
    pub counters: Counters,
}

struct State {
    phase: Phase,
    next_seq: u64,
    pending: VecDeque<UrlEvent>,
    handler: Option<Arc<dyn UrlHandler>>,
    /// Dispatch token. While set, new events queue behind the in-flight delivery.
    dispatching: bool,
    counters: Counters,
}

impl State {
    /// Queue behind the backlog. The cap only applies before a handler exists;
    /// once ready, the token holder is already draining.
    fn enqueue(&mut self, event: UrlEvent, capacity: usize) -> Option<u64> {
        let mut displaced = None;
        if self.phase == Phase::Uninitialized && self.pending.len() >= capacity {
            if let Some(old) = self.pending.pop_front() {
                self.counters.overflow_drops += 1;
                displaced = Some(old.seq);
            }
        }
        self.pending.push_back(event);
        displaced
    }
}

pub struct Relay {
    epoch: u64,
    config: RelayConfig,
    state: Mutex<State>,
}

impl Default for Relay {
    fn default() -> Self {
        Self::new(RelayConfig::default(), 1)
    }
}

impl Relay {
    pub fn new(config: RelayConfig, epoch: u64) -> Self {
        let config = config.normalized();
        Self {
            epoch,
            state: Mutex::new(State {
                phase: Phase::Uninitialized,
                next_seq: 0,
                pending: VecDeque::with_capacity(config.capacity.min(64)),
                handler: None,
                dispatching: false,
                counters: Counters::default(),
            }),
            config,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn stats(&self) -> RelayStats {
        let st = self.state.lock();
        RelayStats {
            epoch: self.epoch,
            phase: st.phase,
            pending: st.pending.len(),
            capacity: self.config.capacity,
            counters: st.counters,
        }
    }

    // ─── Inbound ─────────────────────────────────────────────────────

    /// Relay a URL given as bytes of unknown encoding.
    pub fn receive(&self, bytes: &[u8]) -> Result<Receipt, RelayError> {
        let marshaled = payload::marshal(bytes, self.config.encoding);
        self.accept(marshaled)
    }

    /// Relay a pointer + length buffer owned by the native caller.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to `len` readable bytes for the duration of the call.
    pub unsafe fn receive_raw(&self, ptr: *const c_char, len: usize) -> Result<Receipt, RelayError> {
        let marshaled = unsafe { payload::copy_raw(ptr, len, self.config.encoding) };
        self.accept(marshaled)
    }

    /// Relay a NUL-terminated buffer owned by the native caller.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a valid NUL-terminated C string for the duration of the call.
    pub unsafe fn receive_c_str(&self, ptr: *const c_char) -> Result<Receipt, RelayError> {
        let marshaled = unsafe { payload::copy_c_str(ptr, self.config.encoding) };
        self.accept(marshaled)
    }

    /// Forward URLs passed as process arguments (app launched as the default handler).
    ///
    /// Empty arguments and arguments whose scheme isn't in `launch_schemes` are
    /// skipped. Returns how many were accepted.
    pub fn receive_launch_args<I, S>(&self, args: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut accepted = 0;
        for arg in args {
            let bytes = arg.as_ref().as_encoded_bytes();
            if bytes.is_empty() {
                continue;
            }
            let Ok(url) = payload::marshal(bytes, self.config.encoding) else {
                tracing::debug!("launch arg is not a usable URL, skipping");
                continue;
            };
            if !self.has_launch_scheme(url.as_str()) {
                tracing::debug!("launch arg {url:?} has no accepted scheme, skipping");
                continue;
            }
            match self.accept(Ok(url)) {
                Ok(_) | Err(RelayError::HandlerFailure { .. }) => accepted += 1,
                Err(_) => {}
            }
        }
        accepted
    }

    fn has_launch_scheme(&self, url: &str) -> bool {
        let Some((scheme, _)) = url.split_once("://") else {
            return false;
        };
        self.config
            .launch_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }

    fn accept(&self, marshaled: Result<Payload, RelayError>) -> Result<Receipt, RelayError> {
        let url = match marshaled {
            Ok(url) => url,
            Err(e) => {
                self.state.lock().counters.rejected += 1;
                tracing::warn!("relay epoch {}: dropping URL event: {e}", self.epoch);
                return Err(e);
            }
        };

        let (seq, handler) = {
            let mut st = self.state.lock();
            if st.phase == Phase::Shutdown {
                tracing::debug!("relay epoch {}: shut down, dropping URL event", self.epoch);
                return Err(RelayError::ShutDown);
            }
            st.next_seq += 1;
            let seq = st.next_seq;
            st.counters.accepted += 1;
            let event = UrlEvent::new(seq, url);

            let handler = match (st.phase, st.dispatching, st.handler.clone()) {
                (Phase::Live, false, Some(h)) => h,
                _ => {
                    let displaced = st.enqueue(event, self.config.capacity);
                    if let Some(dropped) = displaced {
                        tracing::warn!(
                            "relay epoch {}: pending queue full ({}), dropped event #{dropped}",
                            self.epoch,
                            self.config.capacity
                        );
                    }
                    return Ok(Receipt::Buffered { seq, displaced });
                }
            };
            st.pending.push_back(event);
            st.dispatching = true;
            (seq, handler)
        };

        self.dispatch_own(&handler, seq)
    }

    /// Run the dispatch loop on behalf of event `seq` and report its fate.
    ///
    /// Caller must hold the dispatch token with `seq` already queued.
    fn dispatch_own(&self, handler: &Arc<dyn UrlHandler>, seq: u64) -> Result<Receipt, RelayError> {
        // Stays ShutDown if a shutdown discards the event before it is popped.
        let mut own = Err(RelayError::ShutDown);
        self.dispatch(handler, |delivered_seq, result| {
            if delivered_seq == seq {
                own = result.map(|()| Receipt::Delivered { seq });
            }
        });
        own
    }

    // ─── Outbound ────────────────────────────────────────────────────

    /// Register the one consumer for this relay and flush anything buffered.
    ///
    /// Returns after every backlog event has been handed to `handler`.
    pub fn register_handler(&self, handler: Arc<dyn UrlHandler>) -> Result<DrainReport, RelayError> {
        {
            let mut st = self.state.lock();
            match st.phase {
                Phase::Uninitialized => {}
                Phase::Shutdown => return Err(RelayError::ShutDown),
                Phase::Draining | Phase::Live => return Err(RelayError::AlreadyRegistered),
            }
            st.handler = Some(Arc::clone(&handler));
            st.phase = Phase::Draining;
            st.dispatching = true;
            tracing::debug!(
                "relay epoch {}: handler registered, draining {} buffered event(s)",
                self.epoch,
                st.pending.len()
            );
        }

        let mut report = DrainReport::default();
        self.dispatch(&handler, |_, result| match result {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.delivered += 1;
                report.failed.push(e);
            }
        });
        Ok(report)
    }

    /// Drop the handler and any buffered events. Idempotent.
    pub fn shutdown(&self) {
        let (handler, discarded) = {
            let mut st = self.state.lock();
            if st.phase == Phase::Shutdown {
                return;
            }
            st.phase = Phase::Shutdown;
            let discarded = std::mem::take(&mut st.pending);
            st.counters.discarded += discarded.len() as u64;
            (st.handler.take(), discarded)
        };
        if !discarded.is_empty() {
            tracing::info!(
                "relay epoch {}: shut down with {} undelivered event(s)",
                self.epoch,
                discarded.len()
            );
        } else {
            tracing::debug!("relay epoch {}: shut down", self.epoch);
        }
        drop(handler);
    }

    /// Deliver `pending` in order until it is empty, then release the token.
    ///
    /// Caller must hold the dispatch token.
    fn dispatch(
        &self,
        handler: &Arc<dyn UrlHandler>,
        mut on_result: impl FnMut(u64, Result<(), RelayError>),
    ) {
        loop {
            let event = {
                let mut st = self.state.lock();
                if st.phase == Phase::Shutdown {
                    st.dispatching = false;
                    return;
                }
                match st.pending.pop_front() {
                    Some(event) => event,
                    None => {
                        st.dispatching = false;
                        if st.phase == Phase::Draining {
                            st.phase = Phase::Live;
                        }
                        return;
                    }
                }
            };

            let seq = event.seq;
            let outcome = catch_unwind(AssertUnwindSafe(|| handler.handle(event)))
                .unwrap_or_else(|_| Err(HandlerError::Rejected("handler panicked".to_string())));

            let result = {
                let mut st = self.state.lock();
                st.counters.delivered += 1;
                outcome.map_err(|e| {
                    st.counters.handler_failures += 1;
                    RelayError::HandlerFailure {
                        seq,
                        reason: e.to_string(),
                    }
                })
            };
            if let Err(ref e) = result {
                tracing::error!("relay epoch {}: {e}", self.epoch);
            }
            on_result(seq, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodingPolicy;

    fn recorder() -> (Arc<dyn UrlHandler>, Arc<Mutex<Vec<(u64, String)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler = move |ev: UrlEvent| -> Result<(), HandlerError> {
            sink.lock().push((ev.seq, ev.url.into_string()));
            Ok(())
        };
        (Arc::new(handler), seen)
    }

    fn relay_with_capacity(capacity: usize) -> Relay {
        Relay::new(
            RelayConfig {
                capacity,
                ..RelayConfig::default()
            },
            1,
        )
    }

    #[test]
    fn test_buffered_then_drained_in_order() {
        let relay = Relay::default();
        let (h, seen) = recorder();

        let r1 = relay.receive(b"myapp://open?id=1").unwrap();
        let r2 = relay.receive(b"myapp://open?id=2").unwrap();
        assert_eq!(r1, Receipt::Buffered { seq: 1, displaced: None });
        assert_eq!(r2, Receipt::Buffered { seq: 2, displaced: None });
        assert_eq!(relay.phase(), Phase::Uninitialized);

        let report = relay.register_handler(h).unwrap();
        assert_eq!(report.delivered, 2);
        assert!(report.failed.is_empty());
        assert_eq!(relay.phase(), Phase::Live);
        assert_eq!(relay.pending_len(), 0);
        assert_eq!(
            *seen.lock(),
            vec![
                (1, "myapp://open?id=1".to_string()),
                (2, "myapp://open?id=2".to_string())
            ]
        );
    }

    #[test]
    fn test_live_delivery_is_synchronous() {
        let relay = Relay::default();
        let (h, seen) = recorder();
        relay.register_handler(h).unwrap();

        let receipt = relay.receive(b"myapp://open?id=3").unwrap();
        assert_eq!(receipt, Receipt::Delivered { seq: 1 });
        assert_eq!(*seen.lock(), vec![(1, "myapp://open?id=3".to_string())]);
        assert_eq!(relay.pending_len(), 0);
    }

    #[test]
    fn test_second_registration_rejected() {
        let relay = Relay::default();
        let (h1, seen1) = recorder();
        let (h2, seen2) = recorder();

        relay.receive(b"myapp://a").unwrap();
        relay.register_handler(h1).unwrap();
        assert_eq!(relay.register_handler(h2), Err(RelayError::AlreadyRegistered));

        relay.receive(b"myapp://b").unwrap();
        assert_eq!(seen1.lock().len(), 2);
        assert!(seen2.lock().is_empty());
    }

    #[test]
    fn test_invalid_payload_never_queued() {
        let relay = Relay::default();
        assert!(matches!(relay.receive(b""), Err(RelayError::InvalidPayload { .. })));
        assert!(matches!(
            unsafe { relay.receive_raw(std::ptr::null(), 4) },
            Err(RelayError::InvalidPayload { .. })
        ));
        assert!(matches!(
            unsafe { relay.receive_c_str(std::ptr::null()) },
            Err(RelayError::InvalidPayload { .. })
        ));
        assert_eq!(relay.pending_len(), 0);

        let stats = relay.stats();
        assert_eq!(stats.counters.rejected, 3);
        assert_eq!(stats.counters.accepted, 0);

        // seq is only consumed by accepted events
        assert_eq!(relay.receive(b"myapp://ok").unwrap().seq(), 1);
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let relay = relay_with_capacity(3);
        let mut overflows = 0;
        for i in 1..=5 {
            let receipt = relay.receive(format!("myapp://open?id={i}").as_bytes()).unwrap();
            if let Some(RelayError::QueueOverflow { dropped_seq }) = receipt.overflow() {
                assert_eq!(dropped_seq, i - 3);
                overflows += 1;
            }
        }
        assert_eq!(overflows, 2);
        assert_eq!(relay.stats().counters.overflow_drops, 2);

        let (h, seen) = recorder();
        relay.register_handler(h).unwrap();
        let seqs: Vec<u64> = seen.lock().iter().map(|(s, _)| *s).collect();
        assert_eq!(seqs, vec![3, 4, 5]);
    }

    #[test]
    fn test_handler_failure_live() {
        let relay = Relay::default();
        let handler = |ev: UrlEvent| -> Result<(), HandlerError> {
            Err(HandlerError::Rejected(format!("no route for {}", ev.url)))
        };
        relay.register_handler(Arc::new(handler)).unwrap();

        let err = relay.receive(b"myapp://x").unwrap_err();
        assert_eq!(
            err,
            RelayError::HandlerFailure {
                seq: 1,
                reason: "no route for myapp://x".to_string()
            }
        );
        let stats = relay.stats();
        assert_eq!(stats.counters.delivered, 1);
        assert_eq!(stats.counters.handler_failures, 1);
        assert_eq!(stats.phase, Phase::Live);

        // still live afterwards
        assert!(matches!(relay.receive(b"myapp://y"), Err(RelayError::HandlerFailure { seq: 2, .. })));
    }

    #[test]
    fn test_drain_continues_past_failures() {
        let relay = Relay::default();
        for url in ["myapp://1", "myapp://bad", "myapp://3"] {
            relay.receive(url.as_bytes()).unwrap();
        }
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler = move |ev: UrlEvent| -> Result<(), HandlerError> {
            sink.lock().push(ev.seq);
            if ev.url.as_str().contains("bad") {
                Err(HandlerError::Rejected("bad".into()))
            } else {
                Ok(())
            }
        };

        let report = relay.register_handler(Arc::new(handler)).unwrap();
        assert_eq!(report.delivered, 3);
        assert_eq!(
            report.failed,
            vec![RelayError::HandlerFailure { seq: 2, reason: "bad".into() }]
        );
        assert_eq!(*seen.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_panicking_handler_does_not_wedge_relay() {
        let relay = Relay::default();
        let handler = |ev: UrlEvent| -> Result<(), HandlerError> {
            if ev.seq == 1 {
                panic!("boom");
            }
            Ok(())
        };
        relay.register_handler(Arc::new(handler)).unwrap();
        assert!(matches!(relay.receive(b"myapp://1"), Err(RelayError::HandlerFailure { .. })));
        assert_eq!(relay.receive(b"myapp://2").unwrap(), Receipt::Delivered { seq: 2 });
    }

    #[test]
    fn test_reentrant_receive_is_queued_behind_current() {
        let relay = Arc::new(Relay::default());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner = Arc::clone(&relay);
        let sink = Arc::clone(&seen);
        let handler = move |ev: UrlEvent| -> Result<(), HandlerError> {
            sink.lock().push(ev.url.as_str().to_string());
            if ev.url == "myapp://first" {
                let receipt = inner.receive(b"myapp://nested").unwrap();
                assert!(matches!(receipt, Receipt::Buffered { seq: 2, .. }));
            }
            Ok(())
        };
        relay.register_handler(Arc::new(handler)).unwrap();

        assert_eq!(relay.receive(b"myapp://first").unwrap(), Receipt::Delivered { seq: 1 });
        assert_eq!(*seen.lock(), vec!["myapp://first", "myapp://nested"]);
        assert_eq!(relay.pending_len(), 0);
        // The handler keeps a clone of the relay alive; break the cycle.
        relay.shutdown();
    }

    #[test]
    fn test_reentrant_receives_survive_small_capacity() {
        let relay = Arc::new(relay_with_capacity(1));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner = Arc::clone(&relay);
        let sink = Arc::clone(&seen);
        let handler = move |ev: UrlEvent| -> Result<(), HandlerError> {
            sink.lock().push(ev.seq);
            if ev.seq == 1 {
                for _ in 0..3 {
                    let receipt = inner.receive(b"myapp://nested").unwrap();
                    assert_eq!(receipt.overflow(), None);
                }
            }
            Ok(())
        };
        relay.register_handler(Arc::new(handler)).unwrap();

        assert_eq!(relay.receive(b"myapp://first").unwrap(), Receipt::Delivered { seq: 1 });
        assert_eq!(*seen.lock(), vec![1, 2, 3, 4]);
        let stats = relay.stats();
        assert_eq!(stats.counters.overflow_drops, 0);
        assert_eq!(stats.counters.delivered, 4);
        relay.shutdown();
    }

    #[test]
    fn test_own_event_discarded_by_shutdown_is_not_delivered() {
        let relay = Arc::new(Relay::default());
        let inner = Arc::clone(&relay);
        let handler = move |_ev: UrlEvent| -> Result<(), HandlerError> {
            inner.shutdown();
            Ok(())
        };
        relay.register_handler(Arc::new(handler)).unwrap();

        // Another event is ahead of ours when the handler shuts the relay down.
        let handler = {
            let mut st = relay.state.lock();
            for seq in 1..=2 {
                let url = payload::marshal(b"myapp://queued", EncodingPolicy::Reject).unwrap();
                st.pending.push_back(UrlEvent::new(seq, url));
            }
            st.next_seq = 2;
            st.dispatching = true;
            st.handler.clone().unwrap()
        };

        assert_eq!(relay.dispatch_own(&handler, 2), Err(RelayError::ShutDown));
        let stats = relay.stats();
        assert_eq!(stats.phase, Phase::Shutdown);
        assert_eq!(stats.counters.delivered, 1);
        assert_eq!(stats.counters.discarded, 1);
    }

    #[test]
    fn test_shutdown_discards_and_is_idempotent() {
        let relay = Relay::default();
        relay.receive(b"myapp://a").unwrap();
        relay.receive(b"myapp://b").unwrap();

        relay.shutdown();
        relay.shutdown();

        let stats = relay.stats();
        assert_eq!(stats.phase, Phase::Shutdown);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.counters.discarded, 2);

        assert_eq!(relay.receive(b"myapp://c"), Err(RelayError::ShutDown));
        let (h, _) = recorder();
        assert_eq!(relay.register_handler(h), Err(RelayError::ShutDown));
    }

    #[test]
    fn test_replace_policy() {
        let relay = Relay::new(
            RelayConfig {
                encoding: EncodingPolicy::Replace,
                ..RelayConfig::default()
            },
            1,
        );
        let (h, seen) = recorder();
        relay.register_handler(h).unwrap();
        relay.receive(b"myapp://caf\xE9").unwrap();
        assert_eq!(seen.lock()[0].1, "myapp://caf\u{FFFD}");
    }

    #[test]
    fn test_launch_args_count_delivered_even_if_handler_fails() {
        let relay = Relay::default();
        let handler = |_ev: UrlEvent| -> Result<(), HandlerError> {
            Err(HandlerError::Rejected("no browser".into()))
        };
        relay.register_handler(Arc::new(handler)).unwrap();

        assert_eq!(relay.receive_launch_args(["https://a.test", "https://b.test"]), 2);
        assert_eq!(relay.stats().counters.handler_failures, 2);

        relay.shutdown();
        assert_eq!(relay.receive_launch_args(["https://c.test"]), 0);
    }

    #[test]
    fn test_launch_args_filtered() {
        let relay = Relay::default();
        let args = ["", "--flag", "https://example.com", "HTTP://x.test", "myapp://nope", "http:/broken"];
        assert_eq!(relay.receive_launch_args(args), 2);

        let (h, seen) = recorder();
        relay.register_handler(h).unwrap();
        let urls: Vec<String> = seen.lock().iter().map(|(_, u)| u.clone()).collect();
        assert_eq!(urls, vec!["https://example.com", "HTTP://x.test"]);
    }

    #[test]
    fn test_stats_json_shape() {
        let relay = relay_with_capacity(4);
        relay.receive(b"myapp://a").unwrap();
        let json = serde_json::to_value(relay.stats()).unwrap();
        assert_eq!(json["phase"], "uninitialized");
        assert_eq!(json["epoch"], 1);
        assert_eq!(json["pending"], 1);
        assert_eq!(json["capacity"], 4);
        assert_eq!(json["accepted"], 1);
        assert_eq!(json["overflow_drops"], 0);
    }
}
