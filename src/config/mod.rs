//! Protocol configuration.
//!
//! [`MasterConfig`] carries the global economic parameters, [`PoolConfig`]
//! the per-template pool parameters, and [`ConfigStore`] holds both.
//! [`LaunchpadSettings`] is the TOML bootstrap format for a whole
//! [`AppState`](crate::state::AppState).

mod master;
pub(crate) mod pool_config;
mod settings;
mod store;

pub use master::MasterConfig;
pub use pool_config::PoolConfig;
pub use settings::{LaunchpadSettings, PoolConfigEntry};
pub use store::{ConfigStore, RemovalPolicy};
