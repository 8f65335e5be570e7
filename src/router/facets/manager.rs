//! Access, configuration and pool administration.

use crate::engine;
use crate::error::{LaunchpadError, Result};
use crate::router::{signatures as sig, Facet, Operation, Output, Selector};
use crate::state::{CallContext, World};
use crate::traits::Host;

const SIGNATURES: [&str; 20] = [
    sig::SET_ADMIN,
    sig::SET_OPERATORS,
    sig::SET_WHITELISTED_ROUTERS,
    sig::SET_PAUSED,
    sig::GET_ADMIN,
    sig::IS_OPERATOR,
    sig::IS_WHITELISTED_ROUTER,
    sig::IS_PAUSED,
    sig::SET_MASTER_CONFIG,
    sig::GET_MASTER_CONFIG,
    sig::SET_POOL_CONFIG,
    sig::GET_POOL_CONFIG,
    sig::REMOVE_POOL_CONFIG,
    sig::SET_POOL_STATE,
    sig::SET_POOL_DETAILS,
    sig::SET_DELAY_BUY_TIME,
    sig::SET_MAX_BUY_AMOUNT,
    sig::SET_FEE_RATE,
    sig::GET_POOL_INFO,
    sig::GET_LAST_BUY_TIME,
];

/// Serves the access registry, the configuration store and the pool
/// administration setters and getters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManagerFacet;

impl<H: Host> Facet<H> for ManagerFacet {
    fn name(&self) -> &'static str {
        "manager"
    }

    fn selectors(&self) -> Vec<Selector> {
        SIGNATURES.iter().map(|s| Selector::of(s)).collect()
    }

    fn execute(&self, world: &mut World<H>, ctx: &CallContext, op: &Operation) -> Result<Output> {
        match op {
            Operation::SetAdmin(new_admin) => engine::set_admin(world, ctx, *new_admin)?,
            Operation::SetOperators { ids, enabled } => {
                engine::set_operators(world, ctx, ids, *enabled)?;
            }
            Operation::SetWhitelistedRouters { ids, enabled } => {
                engine::set_whitelisted_routers(world, ctx, ids, *enabled)?;
            }
            Operation::SetPaused(paused) => engine::set_paused(world, ctx, *paused)?,
            Operation::SetMasterConfig(config) => engine::set_master_config(world, ctx, *config)?,
            Operation::SetPoolConfig { index, config } => {
                engine::set_pool_config(world, ctx, *index, *config)?;
            }
            Operation::RemovePoolConfig(index) => engine::remove_pool_config(world, ctx, *index)?,
            Operation::SetPoolState { token, state } => {
                engine::set_pool_state(world, ctx, token, *state)?;
            }
            Operation::SetPoolDetails { token, details } => {
                engine::set_pool_details(world, ctx, token, details.clone())?;
            }
            Operation::SetDelayBuyTime { token, secs } => {
                engine::set_delay_buy_time(world, ctx, token, *secs)?;
            }
            Operation::SetMaxBuyAmount { token, amount } => {
                engine::set_max_buy_amount(world, ctx, token, *amount)?;
            }
            Operation::SetFeeRate { token, buy, sell } => {
                engine::set_fee_rate(world, ctx, token, *buy, *sell)?;
            }
            _ => return Err(LaunchpadError::UnknownSelector(op.selector())),
        }
        Ok(Output::Unit)
    }

    fn query(&self, world: &World<H>, _ctx: &CallContext, op: &Operation) -> Result<Output> {
        let state = &world.state;
        let access = state.access();
        Ok(match op {
            Operation::GetAdmin => Output::Address(access.admin()),
            Operation::IsOperator(who) => Output::Bool(access.is_operator(who)),
            Operation::IsWhitelistedRouter(who) => Output::Bool(access.is_whitelisted_router(who)),
            Operation::IsPaused => Output::Bool(access.is_paused()),
            Operation::GetMasterConfig => Output::MasterConfig(engine::get_master_config(state)?),
            Operation::GetPoolConfig(index) => {
                Output::PoolConfig(engine::get_pool_config(state, *index)?)
            }
            Operation::GetPoolInfo(token) => {
                Output::PoolInfo(Box::new(engine::get_pool_info(state, token)?))
            }
            Operation::GetLastBuyTime { token, who } => {
                Output::LastBuyTime(engine::get_last_buy_time(state, token, who)?)
            }
            _ => return Err(LaunchpadError::UnknownSelector(op.selector())),
        })
    }
}
