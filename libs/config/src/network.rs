//! Per-network parameter table
//!
//! Every value is a WAD-scaled integer for its own network: `1.0` is
//! represented by [`NetworkConfig::wad`]. Solana uses 8 decimals, Stellar 7
//! and EVM chains 18.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chain family a quote is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Solana,
    Stellar,
    Evm,
}

impl Network {
    /// All supported networks, in discriminant order
    pub const ALL: [Network; 3] = [Network::Solana, Network::Stellar, Network::Evm];

    /// Parameter table for this network
    pub fn config(self) -> NetworkConfig {
        match self {
            Network::Solana => NetworkConfig {
                wad: 100_000_000,
                decimals: 8,
                amp_factor: 100_000_000,
                haircut_rate: 200_000,
                withdraw_haircut_rate: 0,
                start_cov_ratio: 150_000_000,
                end_cov_ratio: 180_000_000,
                scale_factor: 100_000_000,
                equil_cov_ratio: 100_000_000,
            },
            Network::Stellar => NetworkConfig {
                wad: 10_000_000,
                decimals: 7,
                amp_factor: 12_500,
                haircut_rate: 1_000,
                withdraw_haircut_rate: 0,
                start_cov_ratio: 15_000_000,
                end_cov_ratio: 18_000_000,
                scale_factor: 10_000_000,
                equil_cov_ratio: 10_000_000,
            },
            Network::Evm => NetworkConfig {
                wad: 1_000_000_000_000_000_000,
                decimals: 18,
                amp_factor: 12_500,
                haircut_rate: 1_000,
                withdraw_haircut_rate: 0,
                start_cov_ratio: 0,
                end_cov_ratio: 0,
                scale_factor: 1_000_000_000_000_000_000,
                equil_cov_ratio: 1_000_000_000_000_000_000,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Solana => "solana",
            Network::Stellar => "stellar",
            Network::Evm => "evm",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    /// Accepts the lowercase name or the dashboard's numeric selector (0, 1, 2)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana" | "0" => Ok(Network::Solana),
            "stellar" | "1" => Ok(Network::Stellar),
            "evm" | "2" => Ok(Network::Evm),
            other => anyhow::bail!("unknown network '{}': expected solana, stellar or evm", other),
        }
    }
}

/// Fixed-point parameters of one network
///
/// Rates and coverage ratios are WAD-scaled: `haircut_rate = wad / 1000`
/// means a 0.1% haircut. A fee band with both bounds zero disables the
/// high-coverage-ratio fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Fixed-point unit representing 1.0
    pub wad: u128,
    /// Decimal count of the WAD unit (`wad == 10^decimals`)
    pub decimals: u32,
    /// Amplification coefficient A
    pub amp_factor: u128,
    /// Swap haircut charged to the output (or input for exact-output quotes)
    pub haircut_rate: u128,
    /// Haircut charged on single-asset withdrawals
    pub withdraw_haircut_rate: u128,
    /// Coverage ratio where the high-coverage-ratio fee starts
    pub start_cov_ratio: u128,
    /// Hard coverage ratio limit of the fee band
    pub end_cov_ratio: u128,
    /// Rebasing factor applied to from-side values in `quoteSwap`
    pub scale_factor: u128,
    /// Global equilibrium coverage ratio r* used by deposits and withdrawals
    pub equil_cov_ratio: u128,
}

impl NetworkConfig {
    /// Whether the high-coverage-ratio fee band is configured
    pub fn has_cov_ratio_band(&self) -> bool {
        self.start_cov_ratio > 0 || self.end_cov_ratio > 0
    }

    /// Check internal consistency of the table
    pub fn validate(&self) -> Result<()> {
        ensure!(self.wad > 0, "wad must be non-zero");
        ensure!(
            10u128.checked_pow(self.decimals) == Some(self.wad),
            "wad {} does not match {} decimals",
            self.wad,
            self.decimals
        );
        // an exact-output quote divides by (wad - haircut_rate)
        ensure!(
            self.haircut_rate < self.wad,
            "haircut_rate {} must stay below wad {}",
            self.haircut_rate,
            self.wad
        );
        ensure!(
            self.withdraw_haircut_rate <= self.wad,
            "withdraw_haircut_rate {} exceeds wad {}",
            self.withdraw_haircut_rate,
            self.wad
        );
        ensure!(
            self.start_cov_ratio <= self.end_cov_ratio,
            "start_cov_ratio {} exceeds end_cov_ratio {}",
            self.start_cov_ratio,
            self.end_cov_ratio
        );
        if self.has_cov_ratio_band() {
            ensure!(
                self.end_cov_ratio > self.start_cov_ratio,
                "fee band [{}, {}] is empty",
                self.start_cov_ratio,
                self.end_cov_ratio
            );
        }
        ensure!(self.scale_factor > 0, "scale_factor must be non-zero");
        ensure!(self.equil_cov_ratio > 0, "equil_cov_ratio must be non-zero");
        Ok(())
    }
}

pub fn wad_for(network: Network) -> u128 {
    network.config().wad
}

pub fn decimals_for(network: Network) -> u32 {
    network.config().decimals
}

pub fn amp_factor_for(network: Network) -> u128 {
    network.config().amp_factor
}

pub fn haircut_rate_for(network: Network) -> u128 {
    network.config().haircut_rate
}

pub fn withdraw_haircut_rate_for(network: Network) -> u128 {
    network.config().withdraw_haircut_rate
}

/// `(start_cov_ratio, end_cov_ratio)` of the high-coverage-ratio fee band
pub fn cov_ratio_band_for(network: Network) -> (u128, u128) {
    let config = network.config();
    (config.start_cov_ratio, config.end_cov_ratio)
}
