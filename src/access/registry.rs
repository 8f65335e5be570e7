//! The access registry: admin, operators, router whitelist and pause flag.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::Address;
use crate::error::{LaunchpadError, Result};
use crate::events::AccessChange;

/// Holds every identity-based permission of the launchpad.
///
/// Predicates are plain reads.  Mutators take the calling identity, reject
/// non-admins with [`LaunchpadError::Unauthorized`], and return the
/// [`AccessChange`] that the caller records in the event log.
///
/// # Examples
///
/// ```
/// use bonding_launchpad::access::AccessRegistry;
/// use bonding_launchpad::domain::Address;
///
/// let admin = Address::from_bytes([1; 32]);
/// let op = Address::from_bytes([2; 32]);
/// let mut reg = AccessRegistry::new(admin);
/// assert!(reg.set_operators(&admin, &[op], true).is_ok());
/// assert!(reg.is_authorized(&op));
/// assert!(!reg.is_admin(&op));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRegistry {
    admin: Address,
    operators: BTreeSet<Address>,
    routers: BTreeSet<Address>,
    paused: bool,
}

impl AccessRegistry {
    /// Creates a registry with `admin` and nothing else.
    #[must_use]
    pub const fn new(admin: Address) -> Self {
        Self {
            admin,
            operators: BTreeSet::new(),
            routers: BTreeSet::new(),
            paused: false,
        }
    }

    /// The current admin.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// `true` if `id` is the admin.
    #[must_use]
    pub fn is_admin(&self, id: &Address) -> bool {
        self.admin == *id
    }

    /// `true` if `id` is in the operator set.
    #[must_use]
    pub fn is_operator(&self, id: &Address) -> bool {
        self.operators.contains(id)
    }

    /// `true` if `id` is the admin or an operator.
    #[must_use]
    pub fn is_authorized(&self, id: &Address) -> bool {
        self.is_admin(id) || self.is_operator(id)
    }

    /// `true` if `id` may be used as a pool's router.
    #[must_use]
    pub fn is_whitelisted_router(&self, id: &Address) -> bool {
        self.routers.contains(id)
    }

    /// `true` while trading is globally suspended.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Fails with [`LaunchpadError::Unauthorized`] unless `caller` is admin.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn require_admin(&self, caller: &Address) -> Result<()> {
        if self.is_admin(caller) {
            return Ok(());
        }
        warn!(%caller, "rejected admin-only call");
        Err(LaunchpadError::Unauthorized("caller is not admin"))
    }

    /// Fails with [`LaunchpadError::Unauthorized`] unless `caller` is admin
    /// or operator.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn require_authorized(&self, caller: &Address) -> Result<()> {
        if self.is_authorized(caller) {
            return Ok(());
        }
        warn!(%caller, "rejected operator-only call");
        Err(LaunchpadError::Unauthorized("caller is not admin or operator"))
    }

    /// Replaces the admin.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::Unauthorized`] if `caller` is not admin.
    /// - [`LaunchpadError::InvalidAddress`] if `new_admin` is zero.
    pub fn set_admin(&mut self, caller: &Address, new_admin: Address) -> Result<AccessChange> {
        self.require_admin(caller)?;
        if new_admin.is_zero() {
            return Err(LaunchpadError::InvalidAddress("admin must be non-zero"));
        }
        self.admin = new_admin;
        Ok(AccessChange::AdminSet(new_admin))
    }

    /// Adds or removes every id in `ids` from the operator set.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Unauthorized`] if `caller` is not admin.
    pub fn set_operators(
        &mut self,
        caller: &Address,
        ids: &[Address],
        enabled: bool,
    ) -> Result<AccessChange> {
        self.require_admin(caller)?;
        update_set(&mut self.operators, ids, enabled);
        Ok(AccessChange::Operators {
            ids: ids.to_vec(),
            enabled,
        })
    }

    /// Adds or removes every id in `ids` from the router whitelist.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Unauthorized`] if `caller` is not admin.
    pub fn set_whitelisted_routers(
        &mut self,
        caller: &Address,
        ids: &[Address],
        enabled: bool,
    ) -> Result<AccessChange> {
        self.require_admin(caller)?;
        update_set(&mut self.routers, ids, enabled);
        Ok(AccessChange::Routers {
            ids: ids.to_vec(),
            enabled,
        })
    }

    /// Sets the global pause flag.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Unauthorized`] if `caller` is not admin.
    pub fn set_paused(&mut self, caller: &Address, paused: bool) -> Result<AccessChange> {
        self.require_admin(caller)?;
        self.paused = paused;
        Ok(AccessChange::Paused(paused))
    }
}

fn update_set(set: &mut BTreeSet<Address>, ids: &[Address], enabled: bool) {
    for id in ids {
        if enabled {
            set.insert(*id);
        } else {
            set.remove(id);
        }
    }
}
