//! Batched changes to the router's selector bindings.

use std::fmt;
use std::sync::Arc;

use super::{Facet, Selector};
use crate::traits::Host;

/// What a [`FacetCut`] does to its selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutAction {
    /// Bind unbound selectors to the cut's facet.
    Add,
    /// Rebind bound selectors to the cut's facet.
    Replace,
    /// Unbind bound selectors.
    Remove,
}

/// One entry of a cut batch.
pub struct FacetCut<H: Host> {
    pub(crate) action: CutAction,
    pub(crate) facet: Option<Arc<dyn Facet<H>>>,
    pub(crate) selectors: Vec<Selector>,
}

impl<H: Host> FacetCut<H> {
    /// Binds `selectors` to `facet`.
    pub fn add(facet: Arc<dyn Facet<H>>, selectors: Vec<Selector>) -> Self {
        Self {
            action: CutAction::Add,
            facet: Some(facet),
            selectors,
        }
    }

    /// Binds every selector `facet` serves.
    pub fn add_all(facet: Arc<dyn Facet<H>>) -> Self {
        let selectors = facet.selectors();
        Self::add(facet, selectors)
    }

    /// Rebinds `selectors` to `facet`.
    pub fn replace(facet: Arc<dyn Facet<H>>, selectors: Vec<Selector>) -> Self {
        Self {
            action: CutAction::Replace,
            facet: Some(facet),
            selectors,
        }
    }

    /// Unbinds `selectors`.
    #[must_use]
    pub fn remove(selectors: Vec<Selector>) -> Self {
        Self {
            action: CutAction::Remove,
            facet: None,
            selectors,
        }
    }

    /// The cut's action.
    #[must_use]
    pub const fn action(&self) -> CutAction {
        self.action
    }

    /// Selectors affected by the cut.
    #[must_use]
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }
}

impl<H: Host> fmt::Debug for FacetCut<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacetCut")
            .field("action", &self.action)
            .field("facet", &self.facet.as_ref().map(|facet| facet.name()))
            .field("selectors", &self.selectors)
            .finish()
    }
}
