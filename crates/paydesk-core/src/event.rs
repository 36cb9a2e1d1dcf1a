//! The payment event record.
//!
//! A payment event is an ephemeral marker meaning "a payment just completed".
//! It carries only its creation time; observers decide freshness against their
//! own clock.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Events older than this at observation time are stale.
pub const FRESHNESS_WINDOW_MS: i64 = 10_000;

/// A completed-payment marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentEvent {
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl PaymentEvent {
    /// Create an event stamped at `timestamp` (milliseconds since epoch).
    #[must_use]
    pub const fn at(timestamp: i64) -> Self {
        Self { timestamp }
    }

    /// Create an event stamped with the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(Utc::now().timestamp_millis())
    }

    /// Age of the event as seen at `now_ms`.
    ///
    /// Events stamped in the future (clock skew between writers) have age zero.
    #[must_use]
    pub const fn age_ms(&self, now_ms: i64) -> i64 {
        let age = now_ms.saturating_sub(self.timestamp);
        if age < 0 {
            0
        } else {
            age
        }
    }

    /// Whether the event is still within the freshness window at `now_ms`.
    #[must_use]
    pub const fn is_fresh_at(&self, now_ms: i64) -> bool {
        self.age_ms(now_ms) <= FRESHNESS_WINDOW_MS
    }
}
