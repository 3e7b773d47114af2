//! Deposit and withdrawal quoting on WAD-scaled reserves

use crate::error::{QuoteError, Result};
use crate::fee::high_cov_ratio_fee;
use crate::fixed_point::WadMath;
use crate::invariant::{exact_deposit_liquidity, swap_delta, withdrawal_amount};
use crate::swap::rescale;
use crate::types::{AssetSnapshot, PoolParams};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use tracing::trace;

/// `(lp_shares, liability_minted)` for depositing `amount` (WAD) into `asset`
pub fn quote_deposit_liquidity(
    math: &WadMath,
    asset: &AssetSnapshot,
    amount: &BigInt,
    amp_factor: &BigInt,
    equil_cov_ratio: &BigInt,
) -> Result<(BigInt, BigInt)> {
    let liability_to_mint = exact_deposit_liquidity(
        math,
        amount,
        &asset.cash,
        &asset.liability,
        amp_factor,
        equil_cov_ratio,
    )?;

    let lp_shares = if asset.liability.is_zero() {
        liability_to_mint.clone()
    } else {
        (&liability_to_mint * &asset.total_supply).div_floor(&asset.liability)
    };
    Ok((lp_shares, liability_to_mint))
}

/// `(amount, liability_burned, withdraw_haircut)` for burning `liquidity` LP shares
pub fn quote_withdraw_amount(
    math: &WadMath,
    asset: &AssetSnapshot,
    liquidity: &BigInt,
    amp_factor: &BigInt,
    equil_cov_ratio: &BigInt,
    withdraw_haircut_rate: &BigInt,
) -> Result<(BigInt, BigInt, BigInt)> {
    if asset.total_supply.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    let liability_to_burn = (&asset.liability * liquidity).div_floor(&asset.total_supply);
    if liability_to_burn.is_zero() {
        return Err(QuoteError::ZeroLiquidity);
    }
    // more shares than outstanding would burn liability the asset never had
    if liability_to_burn > asset.liability {
        return Err(QuoteError::Underflow);
    }

    let mut amount = withdrawal_amount(
        math,
        &-&liability_to_burn,
        &asset.cash,
        &asset.liability,
        amp_factor,
        equil_cov_ratio,
    )?;

    let mut haircut = BigInt::zero();
    if withdraw_haircut_rate.is_positive() {
        haircut = math.wmul(&amount, withdraw_haircut_rate);
        amount -= &haircut;
    }
    Ok((amount, liability_to_burn, haircut))
}

/// `(to_amount, from_amount_withdrawn)` in WAD units
///
/// Withdraws from `from`, then swaps the proceeds into `to` against the
/// post-withdrawal state of `from`. The swap leg pays the regular haircut
/// and, when a band is configured, the high-coverage-ratio fee. With a
/// scale factor other than WAD the from-side state and the withdrawn amount
/// are rescaled before the swap leg, and the rescaled amount is returned.
pub fn quote_withdraw_from_other_asset(
    math: &WadMath,
    from: &AssetSnapshot,
    to: &AssetSnapshot,
    liquidity: &BigInt,
    params: &PoolParams,
) -> Result<(BigInt, BigInt)> {
    let (mut from_amount, liability_burned, withdraw_haircut) = quote_withdraw_amount(
        math,
        from,
        liquidity,
        &params.amp_factor,
        &params.equil_cov_ratio,
        &params.withdraw_haircut_rate,
    )?;

    let mut from_cash = &from.cash - &from_amount - withdraw_haircut;
    let mut from_liability = &from.liability - liability_burned;
    if params.scale_factor != *math.wad() {
        from_cash = rescale(&from_cash, &params.scale_factor, math.wad());
        from_liability = rescale(&from_liability, &params.scale_factor, math.wad());
        from_amount = rescale(&from_amount, &params.scale_factor, math.wad());
    }

    let ideal_to_amount = swap_delta(
        math,
        &from_cash,
        &to.cash,
        &from_liability,
        &to.liability,
        &from_amount,
        &params.amp_factor,
    )?;
    if to.cash < ideal_to_amount {
        return Err(QuoteError::CashNotEnough);
    }

    let mut to_amount = &ideal_to_amount - math.wmul(&ideal_to_amount, &params.haircut_rate);
    if params.has_cov_ratio_band() {
        let fee = high_cov_ratio_fee(
            math,
            &from_cash,
            &from_liability,
            &from_amount,
            &to_amount,
            &params.start_cov_ratio,
            &params.end_cov_ratio,
        )?;
        to_amount -= fee;
    }

    trace!(%from_amount, %ideal_to_amount, %to_amount, "cross-asset swap leg");
    Ok((to_amount, from_amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stableswap_config::Network;

    fn int(v: i128) -> BigInt {
        BigInt::from(v)
    }

    fn solana_pool() -> AssetSnapshot {
        AssetSnapshot::new(4_101_702_000_000i64, 4_101_702_000_000i64, 6)
            .with_total_supply(2_300_000_000_000i64)
    }

    fn cross_params(network: Network) -> PoolParams {
        PoolParams::from_config(&network.config())
    }

    #[test]
    fn test_deposit_at_equilibrium() {
        let config = Network::Solana.config();
        let math = WadMath::for_config(&config);
        let (lp, liability) = quote_deposit_liquidity(
            &math,
            &solana_pool(),
            &int(100_000_000),
            &BigInt::from(config.amp_factor),
            &BigInt::from(config.equil_cov_ratio),
        )
        .unwrap();
        assert_eq!(liability, int(100_000_000));
        assert_eq!(lp, int(56_074_283));
    }

    #[test]
    fn test_deposit_into_over_covered_asset() {
        let config = Network::Stellar.config();
        let math = WadMath::for_config(&config);
        let asset = AssetSnapshot::new(12_000_000_000_000i64, 10_000_000_000_000i64, 7)
            .with_total_supply(9_000_000_000_000i64);
        let amp = BigInt::from(config.amp_factor);

        let (lp, liability) =
            quote_deposit_liquidity(&math, &asset, &int(10_000_000_000), &amp, math.wad()).unwrap();
        assert_eq!((lp, liability), (int(9_000_311_760), int(10_000_346_400)));

        let (lp, liability) = quote_deposit_liquidity(
            &math,
            &asset,
            &int(10_000_000_000),
            &amp,
            &int(11_000_000),
        )
        .unwrap();
        assert_eq!((lp, liability), (int(8_181_876_600), int(9_090_974_000)));
    }

    #[test]
    fn test_first_deposit_mints_one_to_one() {
        let config = Network::Evm.config();
        let math = WadMath::for_config(&config);
        let empty = AssetSnapshot::new(0, 0, 18);
        let (lp, liability) = quote_deposit_liquidity(
            &math,
            &empty,
            &int(5_000),
            &BigInt::from(config.amp_factor),
            math.wad(),
        )
        .unwrap();
        assert_eq!(lp, int(5_000));
        assert_eq!(liability, int(5_000));
    }

    #[test]
    fn test_withdraw_at_equilibrium() {
        let config = Network::Solana.config();
        let math = WadMath::for_config(&config);
        let amp = BigInt::from(config.amp_factor);
        let (amount, burned, fee) =
            quote_withdraw_amount(&math, &solana_pool(), &int(56_074_283), &amp, math.wad(), &int(0))
                .unwrap();
        assert_eq!(amount, int(99_999_999));
        assert_eq!(burned, int(99_999_999));
        assert!(fee.is_zero());

        // 1% withdrawal haircut
        let (amount, burned, fee) = quote_withdraw_amount(
            &math,
            &solana_pool(),
            &int(56_074_283),
            &amp,
            math.wad(),
            &int(1_000_000),
        )
        .unwrap();
        assert_eq!(amount, int(98_999_999));
        assert_eq!(burned, int(99_999_999));
        assert_eq!(fee, int(1_000_000));
    }

    #[test]
    fn test_withdraw_over_covered_general_form() {
        let config = Network::Stellar.config();
        let math = WadMath::for_config(&config);
        let asset = AssetSnapshot::new(12_000_000_000_000i64, 10_000_000_000_000i64, 7)
            .with_total_supply(9_000_000_000_000i64);
        let amp = BigInt::from(config.amp_factor);

        let (amount, burned, _) =
            quote_withdraw_amount(&math, &asset, &int(10_000_000_000), &amp, math.wad(), &int(0))
                .unwrap();
        assert_eq!((amount, burned), (int(11_111_058_330), int(11_111_111_111)));

        let (amount, _, _) = quote_withdraw_amount(
            &math,
            &asset,
            &int(10_000_000_000),
            &amp,
            &int(11_000_000),
            &int(0),
        )
        .unwrap();
        assert_eq!(amount, int(12_222_467_571));
    }

    #[test]
    fn test_withdraw_rejects_dust_and_empty_supply() {
        let config = Network::Solana.config();
        let math = WadMath::for_config(&config);
        let amp = BigInt::from(config.amp_factor);

        let dust = quote_withdraw_amount(&math, &solana_pool(), &int(0), &amp, math.wad(), &int(0));
        assert_eq!(dust, Err(QuoteError::ZeroLiquidity));

        let unbacked = AssetSnapshot::new(100, 100, 6);
        let result = quote_withdraw_amount(&math, &unbacked, &int(10), &amp, math.wad(), &int(0));
        assert_eq!(result, Err(QuoteError::DivisionByZero));
    }

    #[test]
    fn test_cross_asset_withdrawal() {
        let math = WadMath::for_config(&Network::Solana.config());
        let to = AssetSnapshot::new(3_000_000_000_000i64, 3_100_000_000_000i64, 6);
        let (to_amount, withdrawn) = quote_withdraw_from_other_asset(
            &math,
            &solana_pool(),
            &to,
            &int(1_000_000_000),
            &cross_params(Network::Solana),
        )
        .unwrap();
        assert_eq!(to_amount, int(1_720_571_960));
        assert_eq!(withdrawn, int(1_783_348_695));
    }

    #[test]
    fn test_cross_asset_withdrawal_into_thin_asset() {
        let math = WadMath::for_config(&Network::Solana.config());
        let thin = AssetSnapshot::new(1_000_000, 1_000_000, 6);
        let (to_amount, withdrawn) = quote_withdraw_from_other_asset(
            &math,
            &solana_pool(),
            &thin,
            &int(1_000_000_000),
            &cross_params(Network::Solana),
        )
        .unwrap();
        // the curve flattens out before the to-asset runs dry
        assert_eq!(to_amount, int(997_721));
        assert_eq!(withdrawn, int(1_783_348_695));
    }

    #[test]
    fn test_cross_asset_withdrawal_applies_scale_factor() {
        let mut config = Network::Solana.config();
        config.scale_factor = config.wad / 2;
        let math = WadMath::for_config(&config);
        let to = AssetSnapshot::new(3_000_000_000_000i64, 3_100_000_000_000i64, 6);
        let (to_amount, withdrawn) = quote_withdraw_from_other_asset(
            &math,
            &solana_pool(),
            &to,
            &int(1_000_000_000),
            &PoolParams::from_config(&config),
        )
        .unwrap();
        assert_eq!(to_amount, int(860_402_746));
        assert_eq!(withdrawn, int(891_674_347));
    }

    #[test]
    fn test_cross_asset_withdrawal_pays_band_fee() {
        let config = Network::Solana.config();
        let math = WadMath::for_config(&config);
        // coverage ratio 1.6, inside the 1.5..1.8 band after the withdrawal
        let hot = AssetSnapshot::new(16_000_000_000_000i64, 10_000_000_000_000i64, 6)
            .with_total_supply(10_000_000_000_000i64);
        let even = AssetSnapshot::new(10_000_000_000_000i64, 10_000_000_000_000i64, 6);

        let mut params = PoolParams::from_config(&config);
        let (to_amount, withdrawn) =
            quote_withdraw_from_other_asset(&math, &hot, &even, &int(100_000_000_000), &params)
                .unwrap();
        assert_eq!(to_amount, int(38_849_083_572));
        assert_eq!(withdrawn, int(89_800_636_147));

        params.start_cov_ratio = BigInt::zero();
        params.end_cov_ratio = BigInt::zero();
        let (without_band, _) =
            quote_withdraw_from_other_asset(&math, &hot, &even, &int(100_000_000_000), &params)
                .unwrap();
        assert_eq!(without_band, int(61_870_211_600));
    }

    #[test]
    fn test_withdraw_more_shares_than_supply() {
        let config = Network::Solana.config();
        let math = WadMath::for_config(&config);
        let amp = BigInt::from(config.amp_factor);
        let shares = int(4_600_000_000_000);

        let result = quote_withdraw_amount(&math, &solana_pool(), &shares, &amp, math.wad(), &int(0));
        assert_eq!(result, Err(QuoteError::Underflow));

        let to = AssetSnapshot::new(3_000_000_000_000i64, 3_100_000_000_000i64, 6);
        let result = quote_withdraw_from_other_asset(
            &math,
            &solana_pool(),
            &to,
            &shares,
            &cross_params(Network::Solana),
        );
        assert_eq!(result, Err(QuoteError::Underflow));

        // burning the whole supply is still allowed
        let (_, burned, _) = quote_withdraw_amount(
            &math,
            &solana_pool(),
            &int(2_300_000_000_000),
            &amp,
            math.wad(),
            &int(0),
        )
        .unwrap();
        assert_eq!(burned, solana_pool().liability);
    }
}
