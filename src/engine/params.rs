//! Inputs of the trading operations.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, Digest};
use crate::pool::PoolTerms;

/// Arguments of [`create_pool`](super::create_pool).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePoolParams {
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Template to snapshot.
    pub config_index: u32,
    /// Router the pool lists through; must be whitelisted.
    pub router: Address,
    /// Creator-chosen pool parameters.
    pub terms: PoolTerms,
    /// Quote spent on a buy by the creator right after creation; zero for none.
    pub initial_buy_amount: Amount,
}

/// Arguments of [`buy`](super::buy) and [`sell`](super::sell).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParams {
    /// Pool token.
    pub token: Address,
    /// Receives the output.
    pub recipient: Address,
    /// Gross input: quote for buys, base for sells.
    pub amount_in: Amount,
    /// Smallest acceptable output.
    pub min_amount_out: Amount,
    /// Whitelist proof for the caller; ignored when the pool has no root.
    pub proof: Vec<Digest>,
    /// Receives the referral share of the protocol fee.
    pub referrer: Option<Address>,
}

impl TradeParams {
    /// A trade with no proof and no referrer.
    #[must_use]
    pub fn new(token: Address, recipient: Address, amount_in: Amount, min_amount_out: Amount) -> Self {
        Self {
            token,
            recipient,
            amount_in,
            min_amount_out,
            proof: Vec::new(),
            referrer: None,
        }
    }

    /// Attaches a whitelist proof.
    #[must_use]
    pub fn with_proof(mut self, proof: Vec<Digest>) -> Self {
        self.proof = proof;
        self
    }

    /// Attaches a referrer.
    #[must_use]
    pub fn with_referrer(mut self, referrer: Address) -> Self {
        self.referrer = Some(referrer);
        self
    }
}
