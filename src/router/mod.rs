//! Extensible dispatch: operations are resolved by [`Selector`] to a bound
//! [`Facet`], and every facet works on the same shared
//! [`World`](crate::state::World).
//!
//! ```text
//!   dispatch(ctx, op) ──► selector ──► bindings ──► Facet::execute / query
//!                                          ▲
//!   cut(owner, [Add|Replace|Remove], init) ┘
//! ```

mod cut;
mod diamond;
mod facet;
mod facets;
mod selector;

pub use cut::{CutAction, FacetCut};
pub use diamond::ModuleRouter;
pub use facet::Facet;
pub use facets::{ManagerFacet, TradingFacet};
pub use selector::{signatures, Operation, Output, Selector};
