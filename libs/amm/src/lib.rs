//! # Stableswap AMM Library - Coverage-Ratio Quoting Engine
//!
//! ## Purpose
//!
//! Deterministic fixed-point engine pricing swaps, deposits and withdrawals
//! for multi-asset stableswap pools whose invariant is expressed in coverage
//! ratios (`cash / liability`). Every quote reproduces the on-chain integer
//! arithmetic bit for bit: WAD-scaled `BigInt` values, half-unit-biased floor
//! rounding and the deployed square-root quirks.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Asset snapshots (cash, liability, LP supply, decimals) read from chain
//! - **Parameters**: Per-network tables from `stableswap-config`, optionally overridden
//! - **Output Destinations**: Quote consumers such as the `quote` CLI in `scripts`
//! - **Networks**: Solana (8-decimal WAD), Stellar (7), EVM chains (18)
//!
//! ## Architecture Role
//!
//! ```text
//! fixed_point ─▶ invariant ─▶ swap ──────┐
//!      │                      liquidity ─┼─▶ quoter ─▶ api
//!      └────────▶ fee ───────────────────┘      └──▶ analytics
//! ```
//!
//! `swap`, `liquidity` and `fee` work on WAD values with explicit parameter
//! lists. [`Quoter`] binds a network, rebases native-decimal amounts and
//! applies the high-coverage-ratio fee, including the binary search used for
//! exact-output quotes that land inside the fee band.
//!
//! ## Examples
//!
//! ```rust
//! use num_bigint::BigInt;
//! use stableswap_amm::{AssetSnapshot, Network, Quoter};
//!
//! let quoter = Quoter::new(Network::Stellar);
//! let from = AssetSnapshot::new(201_002_000_000i64, 200_999_999_200i64, 6);
//! let to = AssetSnapshot::new(100_498_000_050i64, 100_500_000_000i64, 6);
//!
//! let quote = quoter.get_amount_out(&from, &to, &BigInt::from(100_000)).unwrap();
//! assert_eq!(quote.amount, BigInt::from(98_480));
//! assert_eq!(quote.fee, BigInt::from(9));
//! ```

pub mod analytics;
pub mod api;
pub mod error;
pub mod fee;
pub mod fixed_point;
pub mod invariant;
pub mod liquidity;
pub mod quoter;
pub mod swap;
pub mod types;

pub use error::{QuoteError, Result};
pub use fixed_point::WadMath;
pub use quoter::Quoter;
pub use types::{
    AssetSnapshot, CrossWithdrawQuote, DepositQuote, PoolParams, SwapQuote, WithdrawQuote,
};

pub use stableswap_config::{Network, NetworkConfig};

/// Decimal type used by the analytics helpers
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
