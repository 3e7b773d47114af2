//! Native-decimal quoting for one network
//!
//! `Quoter` wraps the WAD-level engine: it validates snapshots, rebases
//! request amounts onto the network WAD, applies the high-coverage-ratio fee
//! and converts results back to token decimals.
//!
//! Exact-output quotes normally invert the curve in closed form. When the
//! asset being paid in ends up inside its fee band there is no closed-form
//! inverse, so the input is found by binary search over native units.

use crate::error::{QuoteError, Result};
use crate::fee;
use crate::fixed_point::WadMath;
use crate::liquidity;
use crate::swap;
use crate::types::{
    AssetSnapshot, CrossWithdrawQuote, DepositQuote, PoolParams, SwapQuote, WithdrawQuote,
};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use stableswap_config::{Network, NetworkConfig};
use tracing::{debug, trace, warn};

/// Quoting context bound to a validated network configuration
#[derive(Debug, Clone)]
pub struct Quoter {
    network: Network,
    config: NetworkConfig,
    math: WadMath,
    params: PoolParams,
}

impl Quoter {
    /// Quoter over the built-in parameters of `network`
    pub fn new(network: Network) -> Self {
        Self::from_parts(network, network.config())
    }

    /// Quoter over custom parameters, e.g. after applying overrides
    pub fn with_config(network: Network, config: NetworkConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| QuoteError::InvalidConfig(format!("{e:#}")))?;
        Ok(Self::from_parts(network, config))
    }

    fn from_parts(network: Network, config: NetworkConfig) -> Self {
        Self {
            network,
            math: WadMath::for_config(&config),
            params: PoolParams::from_config(&config),
            config,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn math(&self) -> &WadMath {
        &self.math
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    /// Signed swap estimate
    ///
    /// A non-negative `from_amount` sells that much of `from` and returns the
    /// `to` amount received. A negative `from_amount` asks to receive
    /// `|from_amount|` of `from` and returns the amount of `to` to pay; the
    /// fee is then denominated in `from`.
    pub fn estimate_swap(
        &self,
        from: &AssetSnapshot,
        to: &AssetSnapshot,
        from_amount: &BigInt,
    ) -> Result<SwapQuote> {
        from.validate()?;
        to.validate()?;

        let amount = self.math.to_wad(from_amount, from.underlying_decimals);
        let (to_amount, fee) = self.quote_from(from, to, &amount)?;

        let fee_decimals = if from_amount.is_negative() {
            from.underlying_decimals
        } else {
            to.underlying_decimals
        };
        let quote = SwapQuote {
            amount: self.math.from_wad(&to_amount, to.underlying_decimals),
            fee: self.math.from_wad(&fee, fee_decimals),
        };
        debug!(
            network = %self.network,
            %from_amount,
            amount = %quote.amount,
            fee = %quote.fee,
            "swap estimated"
        );
        Ok(quote)
    }

    /// Amount of `to` received for selling `from_amount` of `from`
    pub fn get_amount_out(
        &self,
        from: &AssetSnapshot,
        to: &AssetSnapshot,
        from_amount: &BigInt,
    ) -> Result<SwapQuote> {
        if from_amount.is_negative() {
            return Err(QuoteError::NegativeInput {
                field: "from_amount",
            });
        }
        self.estimate_swap(from, to, from_amount)
    }

    /// Exact-output quote: `estimate_swap(from, to, -to_amount)`
    ///
    /// `to_amount` is the amount of `from` to receive; the quote is the
    /// amount of `to` to pay for it. The fee is denominated in `from`. To
    /// price buying back the output of `get_amount_out(a, b, x)`, call
    /// `get_amount_in(b, a, out)`.
    pub fn get_amount_in(
        &self,
        from: &AssetSnapshot,
        to: &AssetSnapshot,
        to_amount: &BigInt,
    ) -> Result<SwapQuote> {
        if to_amount.is_negative() {
            return Err(QuoteError::NegativeInput { field: "to_amount" });
        }
        self.estimate_swap(from, to, &-to_amount)
    }

    /// WAD-level quote including the high-coverage-ratio fee
    fn quote_from(
        &self,
        from: &AssetSnapshot,
        to: &AssetSnapshot,
        from_amount: &BigInt,
    ) -> Result<(BigInt, BigInt)> {
        let params = &self.params;
        let (mut to_amount, mut fee) = swap::quote_swap(
            &self.math,
            &from.cash,
            &from.liability,
            &to.cash,
            &to.liability,
            from_amount,
            &params.amp_factor,
            &params.scale_factor,
            &params.haircut_rate,
        )?;

        if !from_amount.is_negative() {
            if params.has_cov_ratio_band() {
                let band_fee = fee::high_cov_ratio_fee(
                    &self.math,
                    &from.cash,
                    &from.liability,
                    from_amount,
                    &to_amount,
                    &params.start_cov_ratio,
                    &params.end_cov_ratio,
                )?;
                to_amount -= &band_fee;
                fee += band_fee;
            }
            return Ok((to_amount, fee));
        }

        if !params.has_cov_ratio_band() {
            return Ok((to_amount, fee));
        }
        // `to` is the asset paid in; only its coverage ratio can enter the band
        let final_cov_ratio = self.math.wdiv(&(&to.cash + &to_amount), &to.liability)?;
        if final_cov_ratio <= params.start_cov_ratio {
            return Ok((to_amount, fee));
        }
        if self.math.wdiv(&to.cash, &to.liability)? >= params.end_cov_ratio {
            return Err(QuoteError::CovRatioLimitExceeded);
        }

        let target = -from_amount;
        let needed = self.find_upper_bound(to, from, &target)?;
        let (_, fee) = self.quote_from(to, from, &needed)?;
        Ok((needed, fee))
    }

    /// Smallest native amount of `from` whose forward quote reaches `target` (WAD)
    ///
    /// Searches `[1, high]` where `high` takes `from` exactly to the end of
    /// its fee band. Returns the amount rebased to WAD.
    fn find_upper_bound(
        &self,
        from: &AssetSnapshot,
        to: &AssetSnapshot,
        target: &BigInt,
    ) -> Result<BigInt> {
        let decimals = from.underlying_decimals;
        let to_band_end = self.math.wmul(&from.liability, &self.params.end_cov_ratio) - &from.cash;
        let mut high = self.math.from_wad(&to_band_end, decimals);
        let mut low = BigInt::one();
        if high < low {
            return Err(QuoteError::CovRatioLimitExceeded);
        }

        let (reachable, _) =
            self.quote_from(from, to, &self.math.to_wad(&high, decimals))?;
        if reachable < *target {
            return Err(QuoteError::CovRatioLimitExceeded);
        }

        let max_rounds = high.bits() + 2;
        let mut rounds = 0u64;
        let two = BigInt::from(2u8);
        while low < high {
            if rounds == max_rounds {
                warn!(network = %self.network, rounds, %low, %high, "upper bound search exhausted");
                return Err(QuoteError::SearchExhausted { rounds });
            }
            let mid = (&low + &high).div_floor(&two);
            let (quoted, _) = self.quote_from(from, to, &self.math.to_wad(&mid, decimals))?;
            trace!(rounds, %mid, %quoted, "upper bound search");
            if quoted >= *target {
                high = mid;
            } else {
                low = mid + 1u8;
            }
            rounds += 1;
        }
        Ok(self.math.to_wad(&high, decimals))
    }

    /// LP shares and liability minted for depositing `amount` (native decimals)
    pub fn quote_deposit(&self, asset: &AssetSnapshot, amount: &BigInt) -> Result<DepositQuote> {
        asset.validate()?;
        if amount.is_negative() {
            return Err(QuoteError::NegativeInput { field: "amount" });
        }
        let amount_wad = self.math.to_wad(amount, asset.underlying_decimals);
        let (lp_shares, liability) = liquidity::quote_deposit_liquidity(
            &self.math,
            asset,
            &amount_wad,
            &self.params.amp_factor,
            &self.params.equil_cov_ratio,
        )?;
        debug!(network = %self.network, %amount, %lp_shares, "deposit quoted");
        Ok(DepositQuote {
            lp_shares,
            liability,
        })
    }

    /// Tokens paid out (native decimals) for burning `lp_shares`
    pub fn quote_withdraw(&self, asset: &AssetSnapshot, lp_shares: &BigInt) -> Result<WithdrawQuote> {
        asset.validate()?;
        if lp_shares.is_negative() {
            return Err(QuoteError::NegativeInput { field: "lp_shares" });
        }
        let (amount, liability_burned, fee) = liquidity::quote_withdraw_amount(
            &self.math,
            asset,
            lp_shares,
            &self.params.amp_factor,
            &self.params.equil_cov_ratio,
            &self.params.withdraw_haircut_rate,
        )?;
        let decimals = asset.underlying_decimals;
        let quote = WithdrawQuote {
            amount: self.math.from_wad(&amount, decimals),
            liability_burned,
            fee: self.math.from_wad(&fee, decimals),
        };
        debug!(network = %self.network, %lp_shares, amount = %quote.amount, "withdrawal quoted");
        Ok(quote)
    }

    /// Burn `lp_shares` of `from` and receive `to` instead
    pub fn quote_withdraw_cross_asset(
        &self,
        from: &AssetSnapshot,
        to: &AssetSnapshot,
        lp_shares: &BigInt,
    ) -> Result<CrossWithdrawQuote> {
        from.validate()?;
        to.validate()?;
        if lp_shares.is_negative() {
            return Err(QuoteError::NegativeInput { field: "lp_shares" });
        }
        let (amount, withdrawn) = liquidity::quote_withdraw_from_other_asset(
            &self.math,
            from,
            to,
            lp_shares,
            &self.params,
        )?;
        let quote = CrossWithdrawQuote {
            amount: self.math.from_wad(&amount, to.underlying_decimals),
            withdrawn: self.math.from_wad(&withdrawn, from.underlying_decimals),
        };
        debug!(network = %self.network, %lp_shares, amount = %quote.amount, "cross-asset withdrawal quoted");
        Ok(quote)
    }

    /// High-coverage-ratio fee on `quoted_to_amount` under this network's band
    ///
    /// All arguments are WAD-scaled. Zero when the network has no band.
    pub fn high_cov_ratio_fee(
        &self,
        from_cash: &BigInt,
        from_liability: &BigInt,
        from_amount: &BigInt,
        quoted_to_amount: &BigInt,
    ) -> Result<BigInt> {
        if !self.params.has_cov_ratio_band() {
            return Ok(BigInt::zero());
        }
        fee::high_cov_ratio_fee(
            &self.math,
            from_cash,
            from_liability,
            from_amount,
            quoted_to_amount,
            &self.params.start_cov_ratio,
            &self.params.end_cov_ratio,
        )
    }
}
