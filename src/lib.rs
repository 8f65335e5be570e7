//! # Bonding Launchpad
//!
//! Token-launch engine built on a constant-product bonding curve with
//! virtual reserves.
//!
//! Anyone can open a pool from an operator-curated template.  The pool sells
//! a fixed amount of a freshly deployed token along the curve; buyers pay
//! in a single quote asset and may sell back at any time.  Once the sale
//! target is reached the pool migrates automatically: the listing fee is
//! taken, and the collected quote plus newly minted base are deposited
//! into an external liquidity venue with the liquidity units locked.
//!
//! All state lives in one store shared by pluggable modules that a
//! [`ModuleRouter`](router::ModuleRouter) dispatches to by selector.
//!
//! ## Quick start
//!
//! ```rust
//! use bonding_launchpad::prelude::*;
//!
//! let admin = Address::from_bytes([1; 32]);
//! let router_account = Address::from_bytes([3; 32]);
//!
//! let mut world = World::new(AppState::new(admin), InMemoryHost::default());
//! let weth = world.host.ledger.deploy("Wrapped Ether", "WETH", admin).expect("deploy");
//! let router = ModuleRouter::with_default_facets(admin, world);
//! let now = Timestamp::from_secs(0);
//! let as_admin = CallContext::new(admin, now);
//!
//! let e18 = 1_000_000_000_000_000_000u128;
//! router
//!     .dispatch(&as_admin, &Operation::SetMasterConfig(MasterConfig {
//!         quote_asset: weth,
//!         fee_receiver: admin,
//!         fee_bps: BasisPoints::new(50),
//!         ref_bps: BasisPoints::new(0),
//!     }))
//!     .expect("master config");
//! router
//!     .dispatch(&as_admin, &Operation::SetPoolConfig {
//!         index: 0,
//!         config: PoolConfig {
//!             initial_virtual_base_reserve: Amount::new(1_000 * e18),
//!             initial_virtual_quote_reserve: Amount::new(1_000 * e18),
//!             total_selling_base_amount: Amount::new(500 * e18),
//!             max_listing_base_amount: Amount::new(500 * e18),
//!             max_listing_quote_amount: Amount::new(500 * e18),
//!             default_listing_rate: BasisPoints::new(10_000),
//!             listing_fee: Amount::new(10 * e18),
//!         },
//!     })
//!     .expect("template");
//! router
//!     .dispatch(&as_admin, &Operation::SetWhitelistedRouters { ids: vec![router_account], enabled: true })
//!     .expect("router whitelist");
//!
//! let creator = Address::from_bytes([2; 32]);
//! let out = router
//!     .dispatch(&CallContext::new(creator, now), &Operation::CreatePool(CreatePoolParams {
//!         name: "Test Token".into(),
//!         symbol: "TEST".into(),
//!         config_index: 0,
//!         router: router_account,
//!         terms: PoolTerms {
//!             details: String::new(),
//!             start_time: now,
//!             buy_fee_rate: BasisPoints::new(100),
//!             sell_fee_rate: BasisPoints::new(100),
//!             max_buy_amount: Amount::new(1_000 * e18),
//!             delay_buy_time: 0,
//!             whitelist_root: Digest::ZERO,
//!         },
//!         initial_buy_amount: Amount::ZERO,
//!     }))
//!     .expect("pool created");
//! let Output::Address(token) = out else { unreachable!() };
//!
//! let quote = router
//!     .dispatch(&as_admin, &Operation::GetAmountOut { token, amount_in: Amount::new(e18), is_buy: true })
//!     .expect("quote");
//! assert!(matches!(quote, Output::Quote(q) if !q.amount_out().is_zero()));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ ModuleRouter │  selector → Facet, staging + RwLock
//! └──────┬───────┘
//!        │ Operation
//!        ▼
//! ┌──────────────┐
//! │    Facets    │  ManagerFacet, TradingFacet
//! └──────┬───────┘
//!        │ engine::*
//!        ▼
//! ┌──────────────┐     ┌──────────────────────────────┐
//! │    World     │────►│ Host: TokenLedger,           │
//! │  AppState +  │     │ LiquidityVenue, ProofVerifier│
//! │  EventLog    │     └──────────────────────────────┘
//! └──────────────┘
//!   AccessRegistry · ConfigStore · PoolLedger
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Address`](domain::Address), [`Quote`](domain::Quote), etc. |
//! | [`math`] | Checked arithmetic and the bonding-curve functions |
//! | [`access`] | [`AccessRegistry`](access::AccessRegistry): admin, operators, router whitelist, pause flag |
//! | [`config`] | Master configuration, pool templates, TOML settings |
//! | [`pool`] | Per-token pool state and the [`PoolLedger`](pool::PoolLedger) |
//! | [`engine`] | Quoting, pool creation, buy/sell, listing migration, administration |
//! | [`router`] | [`ModuleRouter`](router::ModuleRouter) and the built-in facets |
//! | [`state`] | [`AppState`](state::AppState), [`World`](state::World), [`CallContext`](state::CallContext) |
//! | [`traits`] | Collaborator seams: token ledger, liquidity venue, proof verifier |
//! | [`host`] | In-memory collaborators |
//! | [`events`] | Emitted [`Event`](events::Event)s |
//! | [`error`] | [`LaunchpadError`](error::LaunchpadError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber.

pub mod access;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod events;
pub mod host;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod router;
pub mod state;
pub mod traits;
