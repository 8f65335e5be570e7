//! An in-memory multi-token ledger.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{Address, Amount};
use crate::error::{LaunchpadError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::{TokenLedger, TokenMetadata};

#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenBook {
    metadata: TokenMetadata,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<(Address, Address), Amount>,
}

impl TokenBook {
    fn balance(&self, who: &Address) -> Amount {
        self.balances.get(who).copied().unwrap_or(Amount::ZERO)
    }

    fn debit(&mut self, who: Address, amount: Amount) -> Result<()> {
        let balance = self.balance(&who);
        let next = balance.checked_sub(&amount).ok_or_else(|| {
            LaunchpadError::Token(format!(
                "{}: insufficient balance of {who}: {balance} < {amount}",
                self.metadata.symbol
            ))
        })?;
        self.balances.insert(who, next);
        Ok(())
    }

    fn credit(&mut self, who: Address, amount: Amount) -> Result<()> {
        let next = self
            .balance(&who)
            .safe_add(&amount)
            .map_err(|e| LaunchpadError::Token(e.to_string()))?;
        self.balances.insert(who, next);
        Ok(())
    }
}

/// A [`TokenLedger`] keeping every token's balances in process memory.
///
/// Token addresses are derived from the deployer, a deployment counter,
/// and the token's name and symbol, so they are deterministic for a given
/// sequence of deployments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryTokenLedger {
    tokens: BTreeMap<Address, TokenBook>,
    deployments: u64,
}

impl InMemoryTokenLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens deployed.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    fn book(&self, token: &Address) -> Result<&TokenBook> {
        self.tokens
            .get(token)
            .ok_or_else(|| LaunchpadError::Token(format!("unknown token {token}")))
    }

    fn book_mut(&mut self, token: &Address) -> Result<&mut TokenBook> {
        self.tokens
            .get_mut(token)
            .ok_or_else(|| LaunchpadError::Token(format!("unknown token {token}")))
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn deploy(&mut self, name: &str, symbol: &str, deployer: Address) -> Result<Address> {
        let address = Address::derive(
            b"token",
            &[
                deployer.as_bytes(),
                &self.deployments.to_be_bytes(),
                name.as_bytes(),
                symbol.as_bytes(),
            ],
        );
        if self.tokens.contains_key(&address) {
            return Err(LaunchpadError::Token(format!("token {address} already deployed")));
        }
        self.deployments += 1;
        self.tokens.insert(
            address,
            TokenBook {
                metadata: TokenMetadata {
                    name: name.to_owned(),
                    symbol: symbol.to_owned(),
                    total_supply: Amount::ZERO,
                },
                balances: BTreeMap::new(),
                allowances: BTreeMap::new(),
            },
        );
        debug!(%address, name, symbol, "token deployed");
        Ok(address)
    }

    fn metadata(&self, token: &Address) -> Result<TokenMetadata> {
        Ok(self.book(token)?.metadata.clone())
    }

    fn mint(&mut self, token: &Address, to: Address, amount: Amount) -> Result<()> {
        let book = self.book_mut(token)?;
        let supply = book
            .metadata
            .total_supply
            .safe_add(&amount)
            .map_err(|e| LaunchpadError::Token(e.to_string()))?;
        book.credit(to, amount)?;
        book.metadata.total_supply = supply;
        Ok(())
    }

    fn transfer(
        &mut self,
        token: &Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let book = self.book_mut(token)?;
        book.debit(from, amount)?;
        book.credit(to, amount)
    }

    fn transfer_from(
        &mut self,
        token: &Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let book = self.book_mut(token)?;
        let key = (from, spender);
        let allowance = book.allowances.get(&key).copied().unwrap_or(Amount::ZERO);
        let remaining = allowance.checked_sub(&amount).ok_or_else(|| {
            LaunchpadError::Token(format!(
                "{}: insufficient allowance for {spender}: {allowance} < {amount}",
                book.metadata.symbol
            ))
        })?;
        book.debit(from, amount)?;
        book.credit(to, amount)?;
        book.allowances.insert(key, remaining);
        Ok(())
    }

    fn approve(
        &mut self,
        token: &Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<()> {
        self.book_mut(token)?.allowances.insert((owner, spender), amount);
        Ok(())
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount {
        self.tokens
            .get(token)
            .and_then(|b| b.allowances.get(&(*owner, *spender)).copied())
            .unwrap_or(Amount::ZERO)
    }

    fn balance_of(&self, token: &Address, who: &Address) -> Amount {
        self.tokens
            .get(token)
            .map_or(Amount::ZERO, |b| b.balance(who))
    }
}
