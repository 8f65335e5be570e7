//! The trading engine: stateless operations over a [`World`](crate::state::World).
//!
//! | Operation | Kind | Who |
//! |-----------|------|-----|
//! | [`get_amount_out`], [`get_amount_in`] | view | anyone |
//! | [`create_pool`] | payable | anyone |
//! | [`buy`] | payable | anyone |
//! | [`sell`] | mutating | token holders |
//! | [`set_pool_state`], [`set_delay_buy_time`], [`set_max_buy_amount`], [`set_fee_rate`] | mutating | admin or operator |
//! | [`set_pool_details`] | mutating | pool owner, admin or operator |
//! | [`set_master_config`], [`set_admin`], [`set_operators`], [`set_whitelisted_routers`], [`set_paused`] | mutating | admin |
//! | [`set_pool_config`], [`remove_pool_config`] | mutating | admin or operator |
//!
//! Mutating operations are not atomic on their own; they may fail after
//! touching the world.  Call them through
//! [`ModuleRouter`](crate::router::ModuleRouter) or wrap them in
//! [`World::transact`](crate::state::World::transact).

mod create;
mod listing;
mod manage;
mod params;
mod quote;
mod trade;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod proptest_properties;

pub use create::create_pool;
pub use manage::{
    get_last_buy_time, get_master_config, get_pool_config, get_pool_info, remove_pool_config,
    set_admin, set_delay_buy_time, set_fee_rate, set_master_config, set_max_buy_amount,
    set_operators, set_paused, set_pool_config, set_pool_details, set_pool_state,
    set_whitelisted_routers,
};
pub use params::{CreatePoolParams, TradeParams};
pub use quote::{get_amount_in, get_amount_out};
pub use trade::{buy, sell, split_fees, FeeSplit};
