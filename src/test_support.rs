//! Shared test doubles for the crate's unit tests.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Clock pinned to a single instant, for deterministic timing assertions.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock pinned to `now`.
    pub const fn pinned(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Parses an RFC 3339 timestamp into a pinned clock.
    pub fn at(timestamp: &str) -> Self {
        let now = DateTime::parse_from_rfc3339(timestamp)
            .expect("valid RFC 3339 timestamp")
            .with_timezone(&Utc);
        Self::pinned(now)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}
