//! Pool snapshots and quote results
//!
//! Integers cross the serde boundary as decimal strings so no precision is
//! lost in JSON or TOML.

use crate::error::{QuoteError, Result};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use stableswap_config::NetworkConfig;

/// Largest token decimal count accepted by the engine
pub const MAX_UNDERLYING_DECIMALS: u8 = 30;

/// Read-only view of one pool asset
///
/// `cash` and `liability` are taken exactly as the pool stores them and fed
/// to the invariant unchanged; only request amounts are rebased between the
/// token's native decimals and the network WAD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    #[serde(with = "decimal_string")]
    pub cash: BigInt,
    #[serde(with = "decimal_string")]
    pub liability: BigInt,
    /// Outstanding LP shares, only read by deposit and withdrawal quotes
    #[serde(with = "decimal_string", default)]
    pub total_supply: BigInt,
    pub underlying_decimals: u8,
}

impl AssetSnapshot {
    pub fn new(cash: impl Into<BigInt>, liability: impl Into<BigInt>, underlying_decimals: u8) -> Self {
        Self {
            cash: cash.into(),
            liability: liability.into(),
            total_supply: BigInt::zero(),
            underlying_decimals,
        }
    }

    pub fn with_total_supply(mut self, total_supply: impl Into<BigInt>) -> Self {
        self.total_supply = total_supply.into();
        self
    }

    /// Reject snapshots the pool could never hold
    pub fn validate(&self) -> Result<()> {
        if self.underlying_decimals > MAX_UNDERLYING_DECIMALS {
            return Err(QuoteError::InvalidDecimals {
                decimals: self.underlying_decimals,
            });
        }
        if self.cash.is_negative() {
            return Err(QuoteError::NegativeInput { field: "cash" });
        }
        if self.liability.is_negative() {
            return Err(QuoteError::NegativeInput { field: "liability" });
        }
        if self.total_supply.is_negative() {
            return Err(QuoteError::NegativeInput {
                field: "total_supply",
            });
        }
        Ok(())
    }
}

/// Curve and fee constants of one network lifted to `BigInt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolParams {
    pub amp_factor: BigInt,
    pub scale_factor: BigInt,
    pub haircut_rate: BigInt,
    pub withdraw_haircut_rate: BigInt,
    pub start_cov_ratio: BigInt,
    pub end_cov_ratio: BigInt,
    pub equil_cov_ratio: BigInt,
}

impl PoolParams {
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self {
            amp_factor: BigInt::from(config.amp_factor),
            scale_factor: BigInt::from(config.scale_factor),
            haircut_rate: BigInt::from(config.haircut_rate),
            withdraw_haircut_rate: BigInt::from(config.withdraw_haircut_rate),
            start_cov_ratio: BigInt::from(config.start_cov_ratio),
            end_cov_ratio: BigInt::from(config.end_cov_ratio),
            equil_cov_ratio: BigInt::from(config.equil_cov_ratio),
        }
    }

    /// Both band bounds at zero switch the high-coverage-ratio fee off
    pub fn has_cov_ratio_band(&self) -> bool {
        self.start_cov_ratio.is_positive() || self.end_cov_ratio.is_positive()
    }
}

/// Swap quote in native decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Output amount (exact-input) or required input amount (exact-output)
    #[serde(with = "decimal_string")]
    pub amount: BigInt,
    /// Haircut plus high-coverage-ratio fee
    #[serde(with = "decimal_string")]
    pub fee: BigInt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositQuote {
    #[serde(with = "decimal_string")]
    pub lp_shares: BigInt,
    #[serde(with = "decimal_string")]
    pub liability: BigInt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawQuote {
    /// Tokens paid out, after the withdrawal haircut
    #[serde(with = "decimal_string")]
    pub amount: BigInt,
    #[serde(with = "decimal_string")]
    pub liability_burned: BigInt,
    #[serde(with = "decimal_string")]
    pub fee: BigInt,
}

/// Withdrawal of one asset's liquidity paid out in another asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossWithdrawQuote {
    /// Amount of the to-asset received
    #[serde(with = "decimal_string")]
    pub amount: BigInt,
    /// Amount of the from-asset withdrawn before the swap leg
    #[serde(with = "decimal_string")]
    pub withdrawn: BigInt,
}

/// Serde adapter writing `BigInt` as a base-10 string
pub mod decimal_string {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_validation() {
        assert!(AssetSnapshot::new(10, 10, 6).validate().is_ok());
        assert_eq!(
            AssetSnapshot::new(10, 10, 31).validate(),
            Err(QuoteError::InvalidDecimals { decimals: 31 })
        );
        assert_eq!(
            AssetSnapshot::new(-1, 10, 6).validate(),
            Err(QuoteError::NegativeInput { field: "cash" })
        );
        assert_eq!(
            AssetSnapshot::new(1, 10, 6).with_total_supply(-5).validate(),
            Err(QuoteError::NegativeInput {
                field: "total_supply"
            })
        );
    }

    #[test]
    fn test_band_switch() {
        use stableswap_config::Network;
        assert!(PoolParams::from_config(&Network::Stellar.config()).has_cov_ratio_band());
        assert!(!PoolParams::from_config(&Network::Evm.config()).has_cov_ratio_band());
    }

    #[test]
    fn test_snapshot_json_uses_strings() {
        let asset = AssetSnapshot::new(201_002_000_000i64, 200_999_999_200i64, 6);
        let json = serde_json::to_string(&asset).unwrap();
        assert!(json.contains("\"cash\":\"201002000000\""));

        let parsed: AssetSnapshot = serde_json::from_str(
            r#"{"cash":"4101702000000","liability":"4101702000000","total_supply":"2300000000000","underlying_decimals":6}"#,
        )
        .unwrap();
        assert_eq!(parsed.total_supply, BigInt::from(2_300_000_000_000i64));
    }

    #[test]
    fn test_missing_supply_defaults_to_zero() {
        let parsed: AssetSnapshot =
            serde_json::from_str(r#"{"cash":"1","liability":"2","underlying_decimals":7}"#).unwrap();
        assert!(parsed.total_supply.is_zero());
    }
}
