//! Storage for the master configuration and the template table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{MasterConfig, PoolConfig};
use crate::error::{LaunchpadError, Result};

/// What `remove_pool_config` leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// The index is forgotten; reads fail exactly as for a never-set index.
    #[default]
    HardDelete,
    /// The index is marked removed; reads fail with a distinct reason.
    Tombstone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Slot {
    Live(PoolConfig),
    Removed,
}

/// Holds the singleton [`MasterConfig`] and the indexed [`PoolConfig`]
/// templates.
///
/// This type performs validation but no authorization; the engine's
/// management operations check the caller's role before touching it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStore {
    master: Option<MasterConfig>,
    templates: BTreeMap<u32, Slot>,
    removal_policy: RemovalPolicy,
}

impl ConfigStore {
    /// Creates an empty store with the given removal policy.
    #[must_use]
    pub fn new(removal_policy: RemovalPolicy) -> Self {
        Self {
            master: None,
            templates: BTreeMap::new(),
            removal_policy,
        }
    }

    /// The configured removal policy.
    #[must_use]
    pub const fn removal_policy(&self) -> RemovalPolicy {
        self.removal_policy
    }

    /// Replaces the master configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidFeeRate`] if a rate exceeds the
    /// denominator; the stored value is left untouched.
    pub fn set_master(&mut self, config: MasterConfig) -> Result<()> {
        config.validate()?;
        self.master = Some(config);
        Ok(())
    }

    /// Returns the master configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfig`] if it was never set.
    pub fn master(&self) -> Result<MasterConfig> {
        self.master
            .ok_or(LaunchpadError::InvalidConfig("master config not set"))
    }

    /// Inserts or replaces the template at `index`, reviving a tombstone.
    ///
    /// # Errors
    ///
    /// Propagates [`PoolConfig::validate`] failures.
    pub fn set_pool_config(&mut self, index: u32, template: PoolConfig) -> Result<()> {
        template.validate()?;
        self.templates.insert(index, Slot::Live(template));
        Ok(())
    }

    /// Returns the template at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfig`] with reason
    /// `"pool config not found"` or, under [`RemovalPolicy::Tombstone`],
    /// `"pool config removed"`.
    pub fn pool_config(&self, index: u32) -> Result<PoolConfig> {
        match self.templates.get(&index) {
            Some(Slot::Live(t)) => Ok(*t),
            Some(Slot::Removed) => Err(LaunchpadError::InvalidConfig("pool config removed")),
            None => Err(LaunchpadError::InvalidConfig("pool config not found")),
        }
    }

    /// Removes the template at `index` according to the removal policy.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfig`] if no live template exists
    /// at `index`.
    pub fn remove_pool_config(&mut self, index: u32) -> Result<PoolConfig> {
        let template = self.pool_config(index)?;
        match self.removal_policy {
            RemovalPolicy::HardDelete => {
                self.templates.remove(&index);
            }
            RemovalPolicy::Tombstone => {
                self.templates.insert(index, Slot::Removed);
            }
        }
        Ok(template)
    }

    /// Indices of all live templates, ascending.
    pub fn pool_config_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.templates.iter().filter_map(|(i, slot)| match slot {
            Slot::Live(_) => Some(*i),
            Slot::Removed => None,
        })
    }
}
