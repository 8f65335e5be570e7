//! Chain-agnostic account and contract identity.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest as _, Keccak256};

use crate::error::LaunchpadError;

/// Identity of an account, a deployed token, or a router.
///
/// Wraps a fixed-size `[u8; 32]` byte array. Every 32-byte sequence is a
/// valid address; the all-zero address is a sentinel that privileged
/// setters reject.  Renders and parses as `0x`-prefixed hex.
///
/// # Examples
///
/// ```
/// use bonding_launchpad::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 32]);
/// let parsed: Address = addr.to_string().parse().expect("hex round trip");
/// assert_eq!(addr, parsed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 32]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns `true` for the all-zero sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Deterministically derives an address as `keccak256(domain ‖ parts…)`.
    ///
    /// Used for contract-style identities such as freshly deployed tokens
    /// and the router's custody account.
    #[must_use]
    pub fn derive(domain: &[u8], parts: &[&[u8]]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(domain);
        for part in parts {
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = LaunchpadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(raw, &mut bytes)
            .map_err(|_| LaunchpadError::InvalidAddress("expected 32 bytes of hex"))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
