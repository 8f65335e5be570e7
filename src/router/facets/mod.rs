//! Built-in modules.

mod manager;
mod trading;

pub use manager::ManagerFacet;
pub use trading::TradingFacet;
