//! Fundamental domain value types used throughout the launchpad.
//!
//! Identities, amounts, rates, timestamps and priced trades.  All types
//! are newtypes so that an `Amount` can never be passed where a rate or a
//! timestamp is expected.

mod address;
mod amount;
mod basis_points;
mod digest;
mod quote;
mod rounding;
mod timestamp;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::{BasisPoints, FEE_DENOMINATOR};
pub use digest::Digest;
pub use quote::{Quote, Side};
pub use rounding::Rounding;
pub use timestamp::Timestamp;
