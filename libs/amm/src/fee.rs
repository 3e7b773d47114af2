//! High-coverage-ratio fee
//!
//! Inside the band `[start, end]` the marginal fee grows linearly from 0 to
//! 100%: `fee(r) = (r - start) / (end - start)`. A swap moving the from-asset
//! ratio from `r0` to `r1` pays the average of that ramp over `[r0, r1]`,
//! computed from the closed-form area under it. Trades ending above `end`
//! are rejected.

use crate::error::{QuoteError, Result};
use crate::fixed_point::WadMath;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

/// Fee charged on `quoted_to_amount` for adding `from_amount` to the from-asset
#[allow(clippy::too_many_arguments)]
pub fn high_cov_ratio_fee(
    math: &WadMath,
    from_cash: &BigInt,
    from_liability: &BigInt,
    from_amount: &BigInt,
    quoted_to_amount: &BigInt,
    start_cov_ratio: &BigInt,
    end_cov_ratio: &BigInt,
) -> Result<BigInt> {
    let final_cov_ratio = math.wdiv(&(from_cash + from_amount), from_liability)?;
    if final_cov_ratio <= *start_cov_ratio {
        return Ok(BigInt::zero());
    }

    let init_cov_ratio = math.wdiv(from_cash, from_liability)?;
    let fee_ratio = fee_ratio(
        math,
        &init_cov_ratio,
        &final_cov_ratio,
        start_cov_ratio,
        end_cov_ratio,
    )?;
    if fee_ratio > *math.wad() {
        return Err(QuoteError::InvalidHighCovRatioFee);
    }
    Ok(math.wmul(&fee_ratio, quoted_to_amount))
}

/// Average marginal fee between `init_cov_ratio` and `final_cov_ratio`
///
/// `final_cov_ratio` is expected to be above `init_cov_ratio`; otherwise no
/// fee is due.
pub fn fee_ratio(
    math: &WadMath,
    init_cov_ratio: &BigInt,
    final_cov_ratio: &BigInt,
    start_cov_ratio: &BigInt,
    end_cov_ratio: &BigInt,
) -> Result<BigInt> {
    if final_cov_ratio > end_cov_ratio {
        return Err(QuoteError::CovRatioLimitExceeded);
    }
    if final_cov_ratio <= start_cov_ratio || final_cov_ratio <= init_cov_ratio {
        return Ok(BigInt::zero());
    }

    // area under the ramp from start to r is (r - start)^2 / 2, scaled by (end - start)
    let area_before = if init_cov_ratio <= start_cov_ratio {
        BigInt::zero()
    } else {
        let over = init_cov_ratio - start_cov_ratio;
        &over * &over
    };
    let over = final_cov_ratio - start_cov_ratio;
    let area_after = &over * &over;

    let average = (area_after - area_before)
        .div_floor(&(final_cov_ratio - init_cov_ratio))
        .div_floor(&BigInt::from(2u8));
    math.wdiv(&average, &(end_cov_ratio - start_cov_ratio))
}
