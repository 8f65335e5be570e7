//! The fungible-token interface the engine consumes.
//!
//! The launchpad never keeps token balances itself.  It deploys a token per
//! pool, mints the sale supply into its custody account, and moves base and
//! quote through this trait.  Any failure reported by the ledger aborts the
//! surrounding operation with [`LaunchpadError::Token`](crate::error::LaunchpadError::Token).

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount};
use crate::error::Result;

/// Descriptive data of a deployed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Display name.
    pub name: String,
    /// Ticker.
    pub symbol: String,
    /// Units in existence.
    pub total_supply: Amount,
}

/// A multi-token fungible ledger.
///
/// Implementations must be cheap to [`Clone`]: the router stages every
/// mutating operation on a clone and commits it only on success.
pub trait TokenLedger: Clone {
    /// Deploys a new token and returns its address.
    ///
    /// # Errors
    ///
    /// Implementation-defined; reported as `Token`.
    fn deploy(&mut self, name: &str, symbol: &str, deployer: Address) -> Result<Address>;

    /// Describes `token`.
    ///
    /// # Errors
    ///
    /// Fails if `token` is unknown.
    fn metadata(&self, token: &Address) -> Result<TokenMetadata>;

    /// Creates `amount` units of `token` owned by `to`.
    ///
    /// # Errors
    ///
    /// Fails if `token` is unknown or the supply would overflow.
    fn mint(&mut self, token: &Address, to: Address, amount: Amount) -> Result<()>;

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Fails on insufficient balance.
    fn transfer(&mut self, token: &Address, from: Address, to: Address, amount: Amount)
        -> Result<()>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance.
    ///
    /// # Errors
    ///
    /// Fails on insufficient allowance or balance.
    fn transfer_from(
        &mut self,
        token: &Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;

    /// Sets the allowance of `spender` over `owner`'s balance.
    ///
    /// # Errors
    ///
    /// Fails if `token` is unknown.
    fn approve(&mut self, token: &Address, owner: Address, spender: Address, amount: Amount)
        -> Result<()>;

    /// Remaining allowance of `spender` over `owner`'s balance.
    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount;

    /// Balance of `who`.
    fn balance_of(&self, token: &Address, who: &Address) -> Amount;
}
