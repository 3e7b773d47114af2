//! One-shot entry points keyed by network
//!
//! Each call builds a [`Quoter`] over the built-in parameters. Callers
//! quoting repeatedly or with overrides should hold a `Quoter` instead.

use crate::error::Result;
use crate::quoter::Quoter;
use crate::types::{AssetSnapshot, CrossWithdrawQuote, DepositQuote, SwapQuote, WithdrawQuote};
use num_bigint::BigInt;
use stableswap_config::Network;

/// Signed swap estimate, see [`Quoter::estimate_swap`]
pub fn quote_swap(
    network: Network,
    from: &AssetSnapshot,
    to: &AssetSnapshot,
    from_amount: &BigInt,
) -> Result<SwapQuote> {
    Quoter::new(network).estimate_swap(from, to, from_amount)
}

pub fn quote_deposit(network: Network, asset: &AssetSnapshot, amount: &BigInt) -> Result<DepositQuote> {
    Quoter::new(network).quote_deposit(asset, amount)
}

pub fn quote_withdraw(
    network: Network,
    asset: &AssetSnapshot,
    lp_shares: &BigInt,
) -> Result<WithdrawQuote> {
    Quoter::new(network).quote_withdraw(asset, lp_shares)
}

pub fn quote_withdraw_cross_asset(
    network: Network,
    from: &AssetSnapshot,
    to: &AssetSnapshot,
    lp_shares: &BigInt,
) -> Result<CrossWithdrawQuote> {
    Quoter::new(network).quote_withdraw_cross_asset(from, to, lp_shares)
}

/// WAD-level high-coverage-ratio fee, zero on networks without a band
pub fn high_cov_ratio_fee(
    network: Network,
    from_cash: &BigInt,
    from_liability: &BigInt,
    from_amount: &BigInt,
    quoted_to_amount: &BigInt,
) -> Result<BigInt> {
    Quoter::new(network).high_cov_ratio_fee(from_cash, from_liability, from_amount, quoted_to_amount)
}
