//! The URL-activation event carried across the bridge.

use serde::Serialize;

use crate::payload::Payload;

/// One URL-activation notification, sequenced by the relay that accepted it.
///
/// Fields:
/// - `seq`: Monotonically increasing per relay instance, starting at 1.
/// - `received_at_ms`: UTC milliseconds when the relay accepted the event.
/// - `url`: The owned payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlEvent {
    pub seq: u64,
    pub received_at_ms: i64,
    pub url: Payload,
}

impl UrlEvent {
    pub fn new(seq: u64, url: Payload) -> Self {
        Self {
            seq,
            received_at_ms: chrono::Utc::now().timestamp_millis(),
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodingPolicy;
    use crate::payload::marshal;

    #[test]
    fn test_event_serialization() {
        let url = marshal(b"myapp://open?id=1", EncodingPolicy::Reject).unwrap();
        let event = UrlEvent::new(42, url);
        let parsed = serde_json::to_value(&event).unwrap();

        assert_eq!(parsed["seq"], 42);
        assert_eq!(parsed["url"], "myapp://open?id=1");
        assert!(parsed["received_at_ms"].as_i64().unwrap() > 0);
    }
}
