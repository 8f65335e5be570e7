//! Pool creation, quoting and trading.

use crate::engine;
use crate::error::{LaunchpadError, Result};
use crate::router::{signatures as sig, Facet, Operation, Output, Selector};
use crate::state::{CallContext, World};
use crate::traits::Host;

const SIGNATURES: [&str; 5] = [
    sig::CREATE_POOL,
    sig::GET_AMOUNT_OUT,
    sig::GET_AMOUNT_IN,
    sig::BUY,
    sig::SELL,
];

/// Serves `createPool`, `getAmountOut`, `getAmountIn`, `buy` and `sell`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradingFacet;

impl<H: Host> Facet<H> for TradingFacet {
    fn name(&self) -> &'static str {
        "trading"
    }

    fn selectors(&self) -> Vec<Selector> {
        SIGNATURES.iter().map(|s| Selector::of(s)).collect()
    }

    fn execute(&self, world: &mut World<H>, ctx: &CallContext, op: &Operation) -> Result<Output> {
        match op {
            Operation::CreatePool(params) => {
                engine::create_pool(world, ctx, params).map(Output::Address)
            }
            Operation::Buy(params) => engine::buy(world, ctx, params).map(Output::Quote),
            Operation::Sell(params) => engine::sell(world, ctx, params).map(Output::Quote),
            _ => Err(LaunchpadError::UnknownSelector(op.selector())),
        }
    }

    fn query(&self, world: &World<H>, _ctx: &CallContext, op: &Operation) -> Result<Output> {
        match op {
            Operation::GetAmountOut {
                token,
                amount_in,
                is_buy,
            } => engine::get_amount_out(&world.state, token, *amount_in, *is_buy).map(Output::Quote),
            Operation::GetAmountIn {
                token,
                amount_out,
                is_buy,
            } => engine::get_amount_in(&world.state, token, *amount_out, *is_buy).map(Output::Quote),
            _ => Err(LaunchpadError::UnknownSelector(op.selector())),
        }
    }
}
