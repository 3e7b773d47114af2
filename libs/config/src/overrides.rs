//! Parameter overrides
//!
//! Loads optional replacements for the built-in network table from a TOML
//! file, one table per network:
//!
//! ```toml
//! [stellar]
//! haircut_rate = 2000
//! end_cov_ratio = 20000000
//! ```
//!
//! Unknown keys are rejected so a typo cannot silently fall back to the
//! built-in value.

use crate::network::{Network, NetworkConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Optional replacement for each field of [`NetworkConfig`]
///
/// TOML integers are 64-bit; every WAD-scaled rate of the supported
/// networks fits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkOverride {
    pub amp_factor: Option<u64>,
    pub haircut_rate: Option<u64>,
    pub withdraw_haircut_rate: Option<u64>,
    pub start_cov_ratio: Option<u64>,
    pub end_cov_ratio: Option<u64>,
    pub scale_factor: Option<u64>,
    pub equil_cov_ratio: Option<u64>,
}

impl NetworkOverride {
    /// Replace the fields that are set, leaving the rest untouched
    pub fn apply_to(&self, mut config: NetworkConfig) -> NetworkConfig {
        if let Some(v) = self.amp_factor {
            config.amp_factor = u128::from(v);
        }
        if let Some(v) = self.haircut_rate {
            config.haircut_rate = u128::from(v);
        }
        if let Some(v) = self.withdraw_haircut_rate {
            config.withdraw_haircut_rate = u128::from(v);
        }
        if let Some(v) = self.start_cov_ratio {
            config.start_cov_ratio = u128::from(v);
        }
        if let Some(v) = self.end_cov_ratio {
            config.end_cov_ratio = u128::from(v);
        }
        if let Some(v) = self.scale_factor {
            config.scale_factor = u128::from(v);
        }
        if let Some(v) = self.equil_cov_ratio {
            config.equil_cov_ratio = u128::from(v);
        }
        config
    }
}

/// Overrides for every network, as read from one TOML document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterOverrides {
    pub solana: Option<NetworkOverride>,
    pub stellar: Option<NetworkOverride>,
    pub evm: Option<NetworkOverride>,
}

impl ParameterOverrides {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse parameter overrides")
    }

    /// Load overrides from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading parameter overrides: {:?}", path);
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read overrides file {:?}", path))?;
        Self::from_toml_str(&raw)
    }

    pub fn for_network(&self, network: Network) -> Option<&NetworkOverride> {
        match network {
            Network::Solana => self.solana.as_ref(),
            Network::Stellar => self.stellar.as_ref(),
            Network::Evm => self.evm.as_ref(),
        }
    }

    /// Built-in table for `network` with any overrides applied and validated
    pub fn resolve(&self, network: Network) -> Result<NetworkConfig> {
        let base = network.config();
        let config = match self.for_network(network) {
            Some(over) => {
                debug!(%network, ?over, "applying parameter overrides");
                over.apply_to(base)
            }
            None => base,
        };
        config
            .validate()
            .with_context(|| format!("Invalid parameters for network {}", network))?;
        Ok(config)
    }
}
