//! Selector-to-module dispatch over one shared world.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::facets::{ManagerFacet, TradingFacet};
use super::{CutAction, Facet, FacetCut, Operation, Output, Selector};
use crate::domain::Address;
use crate::error::{LaunchpadError, Result};
use crate::events::Event;
use crate::state::{CallContext, World};
use crate::traits::Host;

type Bindings<H> = BTreeMap<Selector, Arc<dyn Facet<H>>>;

struct Inner<H: Host> {
    owner: Address,
    world: World<H>,
    bindings: Bindings<H>,
}

/// Routes [`Operation`]s to the modules bound to their selectors.
///
/// All modules share the router's single [`World`].  Mutating operations
/// run under the write lock against a staged copy of the state and
/// collaborators that replaces the live one only when the operation
/// succeeds, so a failed call leaves state, collaborators and the event log
/// untouched.  Views take the read lock and
/// see a consistent snapshot.
///
/// The binding table itself can be changed with [`cut`](Self::cut) by the
/// router owner, who can hand the router over with
/// [`transfer_ownership`](Self::transfer_ownership).
///
/// ```rust
/// use bonding_launchpad::prelude::*;
///
/// let admin = Address::from_bytes([1; 32]);
/// let world = World::new(AppState::new(admin), InMemoryHost::default());
/// let router = ModuleRouter::with_default_facets(admin, world);
///
/// let ctx = CallContext::new(admin, Timestamp::from_secs(0));
/// let out = router.dispatch(&ctx, &Operation::GetAdmin).expect("view");
/// assert_eq!(out, Output::Address(admin));
/// ```
pub struct ModuleRouter<H: Host> {
    inner: RwLock<Inner<H>>,
}

impl<H: Host + 'static> ModuleRouter<H> {
    /// Creates a router owned by `owner` with no bindings.
    #[must_use]
    pub fn new(owner: Address, world: World<H>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                owner,
                world,
                bindings: BTreeMap::new(),
            }),
        }
    }

    /// Creates a router with [`ManagerFacet`] and [`TradingFacet`] bound to
    /// all of their selectors.
    #[must_use]
    pub fn with_default_facets(owner: Address, world: World<H>) -> Self {
        let mut bindings: Bindings<H> = BTreeMap::new();
        let facets: [Arc<dyn Facet<H>>; 2] = [Arc::new(ManagerFacet), Arc::new(TradingFacet)];
        for facet in facets {
            for selector in facet.selectors() {
                bindings.insert(selector, Arc::clone(&facet));
            }
        }
        Self {
            inner: RwLock::new(Inner {
                owner,
                world,
                bindings,
            }),
        }
    }

    /// The account allowed to change bindings.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.inner.read().owner
    }

    /// Hands the router to `new_owner`.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::Unauthorized`] unless `caller` owns the router.
    /// - [`LaunchpadError::InvalidAddress`] if `new_owner` is zero.
    pub fn transfer_ownership(&self, caller: &Address, new_owner: Address) -> Result<()> {
        let mut guard = self.inner.write();
        let previous = guard.owner;
        if *caller != previous {
            warn!(%caller, "ownership transfer rejected");
            return Err(LaunchpadError::Unauthorized("caller is not the router owner"));
        }
        if new_owner.is_zero() {
            return Err(LaunchpadError::InvalidAddress("router owner must be non-zero"));
        }
        guard.world.transact(|staged| {
            staged.events.emit(Event::RouterOwnerChanged {
                previous,
                owner: new_owner,
            });
            Ok(())
        })?;
        guard.owner = new_owner;
        info!(%previous, owner = %new_owner, "router ownership transferred");
        Ok(())
    }

    /// Resolves `op` and runs it on behalf of `ctx.caller`.
    ///
    /// # Errors
    ///
    /// [`LaunchpadError::UnknownSelector`] if nothing is bound to the
    /// operation, else whatever the module reports.
    pub fn dispatch(&self, ctx: &CallContext, op: &Operation) -> Result<Output> {
        let selector = op.selector();
        if op.is_view() {
            let inner = self.inner.read();
            let facet = resolve(&inner.bindings, selector)?;
            return facet.query(&inner.world, ctx, op);
        }

        let mut guard = self.inner.write();
        let Inner { world, bindings, .. } = &mut *guard;
        let facet = resolve(bindings, selector)?;
        debug!(caller = %ctx.caller, %selector, facet = facet.name(), "dispatching");
        world.transact(|staged| facet.execute(staged, ctx, op))
    }

    /// Applies `cuts` as one batch, then runs `init` against the staged
    /// world.
    ///
    /// Either every cut and the init operation succeed and are committed,
    /// or nothing changes.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::Unauthorized`] unless `caller` owns the router.
    /// - [`LaunchpadError::FacetMismatch`] for an empty selector list, an
    ///   add or replace without a facet, or a facet that does not serve one
    ///   of the selectors.
    /// - [`LaunchpadError::SelectorAlreadyBound`] /
    ///   [`LaunchpadError::SelectorNotBound`].
    /// - Anything `init` reports.
    pub fn cut(
        &self,
        caller: &Address,
        cuts: Vec<FacetCut<H>>,
        init: Option<(CallContext, Operation)>,
    ) -> Result<()> {
        let mut guard = self.inner.write();
        if *caller != guard.owner {
            warn!(%caller, "module cut rejected");
            return Err(LaunchpadError::Unauthorized("caller is not the router owner"));
        }

        let mut bindings = guard.bindings.clone();
        let (mut added, mut replaced, mut removed) = (0usize, 0usize, 0usize);
        for cut in cuts {
            if cut.selectors.is_empty() {
                return Err(LaunchpadError::FacetMismatch("empty selector list"));
            }
            match cut.action {
                CutAction::Add => {
                    let facet = required_facet(cut.facet)?;
                    for selector in cut.selectors {
                        check_implements(facet.as_ref(), &selector)?;
                        if bindings.contains_key(&selector) {
                            return Err(LaunchpadError::SelectorAlreadyBound(selector));
                        }
                        bindings.insert(selector, Arc::clone(&facet));
                        added += 1;
                    }
                }
                CutAction::Replace => {
                    let facet = required_facet(cut.facet)?;
                    for selector in cut.selectors {
                        check_implements(facet.as_ref(), &selector)?;
                        let Some(slot) = bindings.get_mut(&selector) else {
                            return Err(LaunchpadError::SelectorNotBound(selector));
                        };
                        *slot = Arc::clone(&facet);
                        replaced += 1;
                    }
                }
                CutAction::Remove => {
                    for selector in cut.selectors {
                        if bindings.remove(&selector).is_none() {
                            return Err(LaunchpadError::SelectorNotBound(selector));
                        }
                        removed += 1;
                    }
                }
            }
        }

        guard.world.transact(|staged| {
            if let Some((ctx, op)) = init {
                let facet = resolve(&bindings, op.selector())?;
                if op.is_view() {
                    facet.query(staged, &ctx, &op)?;
                } else {
                    facet.execute(staged, &ctx, &op)?;
                }
            }
            staged.events.emit(Event::ModulesCut {
                added,
                replaced,
                removed,
            });
            Ok(())
        })?;

        guard.bindings = bindings;
        info!(%caller, added, replaced, removed, "modules cut");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Loupe
    // -----------------------------------------------------------------------

    /// Name of the module bound to `selector`.
    #[must_use]
    pub fn facet_of(&self, selector: &Selector) -> Option<&'static str> {
        self.inner.read().bindings.get(selector).map(|facet| facet.name())
    }

    /// Every bound selector, in ascending order.
    #[must_use]
    pub fn selectors(&self) -> Vec<Selector> {
        self.inner.read().bindings.keys().copied().collect()
    }

    /// Bound modules by name, each with its selectors.
    #[must_use]
    pub fn facets(&self) -> BTreeMap<&'static str, Vec<Selector>> {
        let inner = self.inner.read();
        let mut out: BTreeMap<&'static str, Vec<Selector>> = BTreeMap::new();
        for (selector, facet) in &inner.bindings {
            out.entry(facet.name()).or_default().push(*selector);
        }
        out
    }

    // -----------------------------------------------------------------------
    // Direct access
    // -----------------------------------------------------------------------

    /// Reads the world under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&World<H>) -> R) -> R {
        f(&self.inner.read().world)
    }

    /// Mutates the collaborators directly, outside any operation.
    ///
    /// Meant for embedding code that owns the token ledger, e.g. to fund
    /// accounts or grant allowances.
    pub fn with_host_mut<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.inner.write().world.host)
    }

    /// Consumes the router, returning the world.
    #[must_use]
    pub fn into_world(self) -> World<H> {
        self.inner.into_inner().world
    }
}

impl<H: Host> std::fmt::Debug for ModuleRouter<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("ModuleRouter")
            .field("owner", &inner.owner)
            .field("bindings", &inner.bindings.len())
            .finish_non_exhaustive()
    }
}

fn resolve<H: Host>(bindings: &Bindings<H>, selector: Selector) -> Result<Arc<dyn Facet<H>>> {
    bindings
        .get(&selector)
        .cloned()
        .ok_or(LaunchpadError::UnknownSelector(selector))
}

fn required_facet<H: Host>(facet: Option<Arc<dyn Facet<H>>>) -> Result<Arc<dyn Facet<H>>> {
    facet.ok_or(LaunchpadError::FacetMismatch("cut needs a facet"))
}

fn check_implements<H: Host>(facet: &dyn Facet<H>, selector: &Selector) -> Result<()> {
    if facet.implements(selector) {
        Ok(())
    } else {
        Err(LaunchpadError::FacetMismatch("facet does not serve selector"))
    }
}
