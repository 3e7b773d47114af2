//! # Stableswap Network Configuration
//!
//! Centralized fixed-point parameters for every chain family the quoting
//! engine supports. Each network fixes its WAD unit, decimal convention,
//! amplification factor, haircut rates and high-coverage-ratio fee band.
//!
//! ## Features
//!
//! - **Network Table**: one exhaustive `match` over the closed [`Network`] enum
//! - **Overrides**: optional TOML file replacing individual parameters
//! - **Validation**: rates and fee bands are checked before a config is used
//!
//! ## Usage
//!
//! ```rust
//! use stableswap_config::{Network, wad_for};
//!
//! let config = Network::Stellar.config();
//! assert_eq!(config.wad, 10_000_000);
//! assert_eq!(wad_for(Network::Evm), 1_000_000_000_000_000_000);
//! ```

pub mod network;
pub mod overrides;

pub use network::{
    amp_factor_for, cov_ratio_band_for, decimals_for, haircut_rate_for, wad_for,
    withdraw_haircut_rate_for, Network, NetworkConfig,
};
pub use overrides::{NetworkOverride, ParameterOverrides};
