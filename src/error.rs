//! Unified error types for the launchpad engine.
//!
//! Every fallible operation across the crate returns [`LaunchpadError`].
//! Each variant is one error *kind*; its `Display` output is the
//! human-readable reason handed back to the caller.  Errors abort the whole
//! operation: the router discards the staged state, so no partial effect is
//! ever observable.

use thiserror::Error;

use crate::router::Selector;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, LaunchpadError>;

/// All error kinds surfaced by the launchpad engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchpadError {
    /// Caller lacks the admin/operator/owner role required for the call.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// Trading attempted while the registry pause flag is set.
    #[error("trading is paused")]
    Paused,

    /// Router identity is not whitelisted.
    #[error("invalid router")]
    InvalidRouter,

    /// Referenced configuration is absent or malformed.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    /// No pool exists for the given token.
    #[error("invalid pool")]
    InvalidPool,

    /// A basis-point rate exceeds the 10 000 denominator.
    #[error("invalid fee rate")]
    InvalidFeeRate,

    /// Attached value or amount does not match what the operation requires.
    #[error("invalid input amount: {0}")]
    InvalidInputAmount(&'static str),

    /// Pool start time has not been reached.
    #[error("not started")]
    NotStarted,

    /// Pool is not in the state the operation requires.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Whitelist proof does not validate against the pool's root.
    #[error("not whitelisted")]
    NotWhitelisted,

    /// Buy amount exceeds the pool's per-transaction cap.
    #[error("exceeded max buy")]
    ExceededMaxBuy,

    /// Caller bought more recently than the pool's cooldown allows.
    #[error("buy on cooldown")]
    OnCooldown,

    /// Computed output is below the caller's minimum.
    #[error("slippage exceeded")]
    SlippageExceeded,

    /// Output exceeds what the pool can deliver.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// Arithmetic overflow.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An identity that must be non-zero was zero.
    #[error("invalid address: {0}")]
    InvalidAddress(&'static str),

    /// The token ledger rejected a mint or transfer.
    #[error("token ledger: {0}")]
    Token(String),

    /// The liquidity venue rejected the listing.
    #[error("liquidity venue: {0}")]
    Venue(String),

    /// No module is bound to the operation's selector.
    #[error("unknown selector {0}")]
    UnknownSelector(Selector),

    /// A cut tried to add a selector that is already bound.
    #[error("selector {0} is already bound")]
    SelectorAlreadyBound(Selector),

    /// A cut tried to replace or remove a selector that is not bound.
    #[error("selector {0} is not bound")]
    SelectorNotBound(Selector),

    /// A cut entry is malformed (empty selector list, facet missing, or the
    /// facet does not implement the selector).
    #[error("facet mismatch: {0}")]
    FacetMismatch(&'static str),

    /// Settings could not be read or parsed.
    #[error("settings: {0}")]
    Settings(String),
}

impl LaunchpadError {
    /// Stable, machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "Unauthorized",
            Self::Paused => "Paused",
            Self::InvalidRouter => "InvalidRouter",
            Self::InvalidConfig(_) => "InvalidConfig",
            Self::InvalidPool => "InvalidPool",
            Self::InvalidFeeRate => "InvalidFeeRate",
            Self::InvalidInputAmount(_) => "InvalidInputAmount",
            Self::NotStarted => "NotStarted",
            Self::InvalidState(_) => "InvalidState",
            Self::NotWhitelisted => "NotWhitelisted",
            Self::ExceededMaxBuy => "ExceededMaxBuy",
            Self::OnCooldown => "OnCooldown",
            Self::SlippageExceeded => "SlippageExceeded",
            Self::InsufficientLiquidity => "InsufficientLiquidity",
            Self::Overflow(_) => "Overflow",
            Self::Underflow(_) => "Underflow",
            Self::DivisionByZero => "DivisionByZero",
            Self::InvalidAddress(_) => "InvalidAddress",
            Self::Token(_) => "Token",
            Self::Venue(_) => "Venue",
            Self::UnknownSelector(_) => "UnknownSelector",
            Self::SelectorAlreadyBound(_) => "SelectorAlreadyBound",
            Self::SelectorNotBound(_) => "SelectorNotBound",
            Self::FacetMismatch(_) => "FacetMismatch",
            Self::Settings(_) => "Settings",
        }
    }
}
