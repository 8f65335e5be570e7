//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use bonding_launchpad::prelude::*;
//! ```

pub use crate::access::AccessRegistry;
pub use crate::config::{LaunchpadSettings, MasterConfig, PoolConfig, RemovalPolicy};
pub use crate::domain::{Address, Amount, BasisPoints, Digest, Quote, Rounding, Side, Timestamp};
pub use crate::engine::{CreatePoolParams, TradeParams};
pub use crate::error::{LaunchpadError, Result};
pub use crate::events::{Event, EventLog};
pub use crate::host::{InMemoryHost, MerkleTree};
pub use crate::math::CheckedArithmetic;
pub use crate::pool::{PoolInfo, PoolState, PoolTerms};
pub use crate::router::{Facet, FacetCut, ModuleRouter, Operation, Output, Selector};
pub use crate::state::{AppState, CallContext, World};
pub use crate::traits::{Host, LiquidityVenue, ProofVerifier, TokenLedger};
