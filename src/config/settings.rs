//! Bootstrap settings loaded from TOML.
//!
//! Amounts are written as decimal strings because 18-decimal quantities do
//! not fit TOML's 64-bit integers; addresses are `0x`-prefixed hex.
//!
//! ```toml
//! admin = "0x0101010101010101010101010101010101010101010101010101010101010101"
//! operators = []
//! whitelisted_routers = ["0x0202020202020202020202020202020202020202020202020202020202020202"]
//! removal_policy = "tombstone"
//!
//! [master]
//! quote_asset = "0x0303030303030303030303030303030303030303030303030303030303030303"
//! fee_receiver = "0x0404040404040404040404040404040404040404040404040404040404040404"
//! fee_bps = 50
//! ref_bps = 50
//!
//! [[pool_configs]]
//! index = 0
//!
//! [pool_configs.config]
//! initial_virtual_base_reserve = "1000000000000000000000"
//! initial_virtual_quote_reserve = "1000000000000000000000"
//! total_selling_base_amount = "500000000000000000000"
//! max_listing_base_amount = "500000000000000000000"
//! max_listing_quote_amount = "500000000000000000000"
//! default_listing_rate = 10000
//! listing_fee = "10000000000000000000"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{MasterConfig, PoolConfig, RemovalPolicy};
use crate::domain::Address;
use crate::error::{LaunchpadError, Result};

/// A template together with the index it is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfigEntry {
    /// Table index.
    pub index: u32,
    /// The template itself.
    pub config: PoolConfig,
}

/// Initial contents of an [`AppState`](crate::state::AppState).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchpadSettings {
    /// The initial admin.
    pub admin: Address,
    /// Initial operator set.
    #[serde(default)]
    pub operators: Vec<Address>,
    /// Initial router whitelist.
    #[serde(default)]
    pub whitelisted_routers: Vec<Address>,
    /// Master configuration, if known at bootstrap.
    #[serde(default)]
    pub master: Option<MasterConfig>,
    /// Templates to install.
    #[serde(default)]
    pub pool_configs: Vec<PoolConfigEntry>,
    /// What removing a template leaves behind.
    #[serde(default)]
    pub removal_policy: RemovalPolicy,
    /// Whether trading starts paused.
    #[serde(default)]
    pub paused: bool,
}

impl LaunchpadSettings {
    /// Settings with only an admin; everything else empty.
    #[must_use]
    pub fn with_admin(admin: Address) -> Self {
        Self {
            admin,
            operators: Vec::new(),
            whitelisted_routers: Vec::new(),
            master: None,
            pool_configs: Vec::new(),
            removal_policy: RemovalPolicy::default(),
            paused: false,
        }
    }

    /// Parses and validates settings from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Settings`] on malformed TOML, or the
    /// validation error of the first invalid entry.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(source).map_err(|e| LaunchpadError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads [`from_toml_str`](Self::from_toml_str) input from a file.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Settings`] if the file cannot be read, plus
    /// every error of [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| LaunchpadError::Settings(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Renders the settings back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Settings`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| LaunchpadError::Settings(e.to_string()))
    }

    /// Checks every contained value.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::InvalidAddress`] for a zero admin.
    /// - [`LaunchpadError::InvalidFeeRate`] for an out-of-range master rate.
    /// - [`LaunchpadError::InvalidConfig`] for an invalid or duplicated template.
    pub fn validate(&self) -> Result<()> {
        if self.admin.is_zero() {
            return Err(LaunchpadError::InvalidAddress("admin must be non-zero"));
        }
        if let Some(master) = &self.master {
            master.validate()?;
        }
        let mut seen = std::collections::BTreeSet::new();
        for entry in &self.pool_configs {
            if !seen.insert(entry.index) {
                return Err(LaunchpadError::InvalidConfig("duplicate pool config index"));
            }
            entry.config.validate()?;
        }
        Ok(())
    }
}
