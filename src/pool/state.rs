//! Pool lifecycle.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LaunchpadError, Result};

/// Lifecycle state of a pool.
///
/// ```text
///  Active ──(sale target reached)──▶ Listed   (terminal)
///    ▲  │
///    │  └──(set_pool_state)──▶ Paused
///    └──────(set_pool_state)──────┘
/// ```
///
/// Numeric codes are stable: `0` Active, `1` Paused, `2` Listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolState {
    /// Trading against the curve.
    #[default]
    Active,
    /// Suspended by an admin or operator.
    Paused,
    /// Migrated to the external venue.
    Listed,
}

impl PoolState {
    /// Stable numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Paused => 1,
            Self::Listed => 2,
        }
    }

    /// Parses a numeric code.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidState`] for an unknown code.
    pub const fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Active),
            1 => Ok(Self::Paused),
            2 => Ok(Self::Listed),
            _ => Err(LaunchpadError::InvalidState("unknown pool state code")),
        }
    }

    /// `true` if trading is allowed.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Checks a manual transition. Only `Active ↔ Paused` (and no-op
    /// re-assignments of those two) are allowed; `Listed` is reachable only
    /// through listing migration and never left.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidState`] otherwise.
    pub const fn check_manual_transition(self, to: Self) -> Result<()> {
        match (self, to) {
            (Self::Listed, _) => Err(LaunchpadError::InvalidState("pool already listed")),
            (_, Self::Listed) => Err(LaunchpadError::InvalidState(
                "listing happens only through migration",
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Paused => write!(f, "paused"),
            Self::Listed => write!(f, "listed"),
        }
    }
}
