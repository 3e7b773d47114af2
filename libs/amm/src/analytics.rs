//! Display-side pool metrics
//!
//! These convert WAD integers into `Decimal` for presentation. Nothing here
//! feeds back into a quote.

use crate::error::{QuoteError, Result};
use crate::fixed_point::WadMath;
use crate::swap;
use crate::types::{AssetSnapshot, PoolParams};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;
use stableswap_config::Network;

fn context(network: Network) -> (WadMath, PoolParams) {
    let config = network.config();
    (WadMath::for_config(&config), PoolParams::from_config(&config))
}

/// WAD-scaled integer as a `Decimal` with the network's decimal count
pub fn wad_to_decimal(math: &WadMath, value: &BigInt) -> Result<Decimal> {
    let out_of_range = || QuoteError::DecimalRange {
        value: value.to_string(),
    };
    let mantissa = value.to_i128().ok_or_else(out_of_range)?;
    Decimal::try_from_i128_with_scale(mantissa, math.decimals()).map_err(|_| out_of_range())
}

/// `cash / liability`, zero when either side is empty
pub fn coverage_ratio(network: Network, cash: &BigInt, liability: &BigInt) -> Result<Decimal> {
    if cash.is_zero() || liability.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let (math, _) = context(network);
    wad_to_decimal(&math, &math.wdiv(cash, liability)?)
}

/// Pool value of `liability` LP-denominated tokens
///
/// A missing or zero price counts as 1.
pub fn tvl(liability: Decimal, lp_to_token_rate: Decimal, token_price: Option<Decimal>) -> Result<Decimal> {
    let overflow = || QuoteError::DecimalRange {
        value: format!("{liability} * {lp_to_token_rate}"),
    };
    let value = liability.checked_mul(lp_to_token_rate).ok_or_else(overflow)?;
    match token_price {
        Some(price) if !price.is_zero() => value.checked_mul(price).ok_or_else(overflow),
        _ => Ok(value),
    }
}

/// WAD-scaled `(1 + A / rx^2) / (1 + A / ry^2)`
fn marginal_rate_wad(math: &WadMath, params: &PoolParams, from: &AssetSnapshot, to: &AssetSnapshot) -> Result<BigInt> {
    let slope = |asset: &AssetSnapshot| -> Result<BigInt> {
        let r = math.wdiv(&asset.cash, &asset.liability)?;
        Ok(math.wad() + math.wdiv(&params.amp_factor, &math.wmul(&r, &r))?)
    };
    math.wdiv(&slope(from)?, &slope(to)?)
}

/// Instantaneous `to` received per unit of `from`, before fees
pub fn marginal_rate(network: Network, from: &AssetSnapshot, to: &AssetSnapshot) -> Result<Decimal> {
    let (math, params) = context(network);
    wad_to_decimal(&math, &marginal_rate_wad(&math, &params, from, to)?)
}

/// Slippage of selling `from_amount` (native decimals), in percent
///
/// Compares the fee-free curve output against the marginal rate.
pub fn price_impact(
    network: Network,
    from: &AssetSnapshot,
    to: &AssetSnapshot,
    from_amount: &BigInt,
) -> Result<Decimal> {
    from.validate()?;
    to.validate()?;
    let (math, params) = context(network);
    let amount = math.to_wad(from_amount, from.underlying_decimals);

    let (curve_out, _) = swap::quote_swap(
        &math,
        &from.cash,
        &from.liability,
        &to.cash,
        &to.liability,
        &amount,
        &params.amp_factor,
        &params.scale_factor,
        &BigInt::zero(),
    )?;
    let expected = math.wmul(&amount, &marginal_rate_wad(&math, &params, from, to)?);
    if expected.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let impact = math.wdiv(&(&expected - curve_out), &expected)? * 100u8;
    wad_to_decimal(&math, &impact)
}
