//! Seconds on the external clock.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A point in time, in seconds, read from the host's monotonic clock.
///
/// The engine never reads a clock itself; every call carries the current
/// timestamp in its [`CallContext`](crate::state::CallContext).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the timestamp in seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, or zero if `earlier` is in the future.
    #[must_use]
    pub const fn saturating_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates() {
        let t0 = Timestamp::from_secs(100);
        let t1 = Timestamp::from_secs(130);
        assert_eq!(t1.saturating_since(t0), 30);
        assert_eq!(t0.saturating_since(t1), 0);
    }
}
