//! Operation selectors and the typed call/return envelopes.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{MasterConfig, PoolConfig};
use crate::domain::{Address, Amount, BasisPoints, Digest, Quote, Timestamp};
use crate::engine::{CreatePoolParams, TradeParams};
use crate::pool::{PoolInfo, PoolState};

/// Four-byte operation identifier: the leading bytes of the Keccak-256
/// hash of the operation's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Selector([u8; 4]);

impl Selector {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Derives the selector of `signature`, e.g. `"buy(address,address,uint256,uint256,bytes32[],address)"`.
    #[must_use]
    pub fn of(signature: &str) -> Self {
        let hash = Digest::keccak(signature.as_bytes());
        let b = hash.as_bytes();
        Self([b[0], b[1], b[2], b[3]])
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Canonical operation signatures.
pub mod signatures {
    pub const SET_ADMIN: &str = "setAdmin(address)";
    pub const SET_OPERATORS: &str = "setOperators(address[],bool)";
    pub const SET_WHITELISTED_ROUTERS: &str = "setWhitelistedRouters(address[],bool)";
    pub const SET_PAUSED: &str = "setPaused(bool)";
    pub const GET_ADMIN: &str = "getAdmin()";
    pub const IS_OPERATOR: &str = "isOperator(address)";
    pub const IS_WHITELISTED_ROUTER: &str = "isWhitelistedRouter(address)";
    pub const IS_PAUSED: &str = "isPaused()";
    pub const SET_MASTER_CONFIG: &str = "setMasterConfig((address,address,uint16,uint16))";
    pub const GET_MASTER_CONFIG: &str = "getMasterConfig()";
    pub const SET_POOL_CONFIG: &str =
        "setPoolConfig(uint32,(uint256,uint256,uint256,uint256,uint256,uint16,uint256))";
    pub const GET_POOL_CONFIG: &str = "getPoolConfig(uint32)";
    pub const REMOVE_POOL_CONFIG: &str = "removePoolConfig(uint32)";
    pub const SET_POOL_STATE: &str = "setPoolState(address,uint8)";
    pub const SET_POOL_DETAILS: &str = "setPoolDetails(address,string)";
    pub const SET_DELAY_BUY_TIME: &str = "setDelayBuyTime(address,uint64)";
    pub const SET_MAX_BUY_AMOUNT: &str = "setMaxBuyAmount(address,uint256)";
    pub const SET_FEE_RATE: &str = "setFeeRate(address,uint16,uint16)";
    pub const GET_POOL_INFO: &str = "getPoolInfo(address)";
    pub const GET_LAST_BUY_TIME: &str = "getLastBuyTime(address,address)";
    pub const CREATE_POOL: &str =
        "createPool(string,string,uint32,address,(string,uint64,uint16,uint16,uint256,uint64,bytes32),uint256)";
    pub const GET_AMOUNT_OUT: &str = "getAmountOut(address,uint256,bool)";
    pub const GET_AMOUNT_IN: &str = "getAmountIn(address,uint256,bool)";
    pub const BUY: &str = "buy(address,address,uint256,uint256,bytes32[],address)";
    pub const SELL: &str = "sell(address,address,uint256,uint256,bytes32[],address)";
}

/// A call routed through [`ModuleRouter`](super::ModuleRouter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    // access
    SetAdmin(Address),
    SetOperators { ids: Vec<Address>, enabled: bool },
    SetWhitelistedRouters { ids: Vec<Address>, enabled: bool },
    SetPaused(bool),
    GetAdmin,
    IsOperator(Address),
    IsWhitelistedRouter(Address),
    IsPaused,

    // configuration
    SetMasterConfig(MasterConfig),
    GetMasterConfig,
    SetPoolConfig { index: u32, config: PoolConfig },
    GetPoolConfig(u32),
    RemovePoolConfig(u32),

    // pool administration
    SetPoolState { token: Address, state: PoolState },
    SetPoolDetails { token: Address, details: String },
    SetDelayBuyTime { token: Address, secs: u64 },
    SetMaxBuyAmount { token: Address, amount: Amount },
    SetFeeRate { token: Address, buy: BasisPoints, sell: BasisPoints },
    GetPoolInfo(Address),
    GetLastBuyTime { token: Address, who: Address },

    // trading
    CreatePool(CreatePoolParams),
    GetAmountOut { token: Address, amount_in: Amount, is_buy: bool },
    GetAmountIn { token: Address, amount_out: Amount, is_buy: bool },
    Buy(TradeParams),
    Sell(TradeParams),

    /// An operation served by a module added after deployment.  The
    /// payload encoding is up to that module.
    Custom {
        selector: Selector,
        payload: Vec<u8>,
        view: bool,
    },
}

impl Operation {
    /// The operation's canonical signature; `None` for [`Operation::Custom`].
    #[must_use]
    pub const fn signature(&self) -> Option<&'static str> {
        use signatures as s;
        Some(match self {
            Self::SetAdmin(_) => s::SET_ADMIN,
            Self::SetOperators { .. } => s::SET_OPERATORS,
            Self::SetWhitelistedRouters { .. } => s::SET_WHITELISTED_ROUTERS,
            Self::SetPaused(_) => s::SET_PAUSED,
            Self::GetAdmin => s::GET_ADMIN,
            Self::IsOperator(_) => s::IS_OPERATOR,
            Self::IsWhitelistedRouter(_) => s::IS_WHITELISTED_ROUTER,
            Self::IsPaused => s::IS_PAUSED,
            Self::SetMasterConfig(_) => s::SET_MASTER_CONFIG,
            Self::GetMasterConfig => s::GET_MASTER_CONFIG,
            Self::SetPoolConfig { .. } => s::SET_POOL_CONFIG,
            Self::GetPoolConfig(_) => s::GET_POOL_CONFIG,
            Self::RemovePoolConfig(_) => s::REMOVE_POOL_CONFIG,
            Self::SetPoolState { .. } => s::SET_POOL_STATE,
            Self::SetPoolDetails { .. } => s::SET_POOL_DETAILS,
            Self::SetDelayBuyTime { .. } => s::SET_DELAY_BUY_TIME,
            Self::SetMaxBuyAmount { .. } => s::SET_MAX_BUY_AMOUNT,
            Self::SetFeeRate { .. } => s::SET_FEE_RATE,
            Self::GetPoolInfo(_) => s::GET_POOL_INFO,
            Self::GetLastBuyTime { .. } => s::GET_LAST_BUY_TIME,
            Self::CreatePool(_) => s::CREATE_POOL,
            Self::GetAmountOut { .. } => s::GET_AMOUNT_OUT,
            Self::GetAmountIn { .. } => s::GET_AMOUNT_IN,
            Self::Buy(_) => s::BUY,
            Self::Sell(_) => s::SELL,
            Self::Custom { .. } => return None,
        })
    }

    /// Selector the router resolves this operation by.
    #[must_use]
    pub fn selector(&self) -> Selector {
        match self {
            Self::Custom { selector, .. } => *selector,
            _ => self
                .signature()
                .map_or(Selector::from_bytes([0; 4]), Selector::of),
        }
    }

    /// `true` for operations that never change state.
    #[must_use]
    pub const fn is_view(&self) -> bool {
        matches!(
            self,
            Self::GetAdmin
                | Self::IsOperator(_)
                | Self::IsWhitelistedRouter(_)
                | Self::IsPaused
                | Self::GetMasterConfig
                | Self::GetPoolConfig(_)
                | Self::GetPoolInfo(_)
                | Self::GetLastBuyTime { .. }
                | Self::GetAmountOut { .. }
                | Self::GetAmountIn { .. }
                | Self::Custom { view: true, .. }
        )
    }
}

/// What a routed operation returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// Mutations with nothing to report.
    Unit,
    /// A flag (`isOperator`, `isPaused`, ...).
    Bool(bool),
    /// An address (`getAdmin`, the token from `createPool`).
    Address(Address),
    /// A priced trade (`buy`, `sell`, `getAmountOut`, `getAmountIn`).
    Quote(Quote),
    MasterConfig(MasterConfig),
    PoolConfig(PoolConfig),
    PoolInfo(Box<PoolInfo>),
    /// `getLastBuyTime`; `None` if the account never bought.
    LastBuyTime(Option<Timestamp>),
    /// Raw result of an [`Operation::Custom`].
    Bytes(Vec<u8>),
}
