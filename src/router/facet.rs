//! The module interface the router dispatches to.

use super::{Operation, Output, Selector};
use crate::error::Result;
use crate::state::{CallContext, World};
use crate::traits::Host;

/// A module bound to a set of selectors.
///
/// The router calls [`execute`](Self::execute) for mutating operations,
/// against a staged copy of the world that is committed only on success,
/// and [`query`](Self::query) for views, under a shared lock.
///
/// Implementations receive only operations whose selector the router has
/// bound to them; anything else should be answered with
/// [`LaunchpadError::UnknownSelector`](crate::error::LaunchpadError::UnknownSelector).
pub trait Facet<H: Host>: Send + Sync {
    /// Stable module name, used by the loupe.
    fn name(&self) -> &'static str;

    /// Every selector this module can serve.
    fn selectors(&self) -> Vec<Selector>;

    /// Runs a mutating operation.
    ///
    /// # Errors
    ///
    /// Whatever the operation reports.
    fn execute(&self, world: &mut World<H>, ctx: &CallContext, op: &Operation) -> Result<Output>;

    /// Answers a view.
    ///
    /// # Errors
    ///
    /// Whatever the view reports.
    fn query(&self, world: &World<H>, ctx: &CallContext, op: &Operation) -> Result<Output>;

    /// `true` if this module serves `selector`.
    fn implements(&self, selector: &Selector) -> bool {
        self.selectors().contains(selector)
    }
}
