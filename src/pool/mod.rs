//! Per-token pool records and their ledger.
//!
//! A [`Pool`] owns its curve state and a snapshot of the template it was
//! created from.  The [`PoolLedger`] maps token identity to pool.

mod entry;
mod ledger;
mod state;

pub use entry::{Pool, PoolInfo, PoolTerms};
pub use ledger::PoolLedger;
pub use state::PoolState;
