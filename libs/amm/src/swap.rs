//! Swap quoting on WAD-scaled reserves
//!
//! A positive `from_amount` is an exact-input quote: the haircut is taken
//! from the ideal output. A negative `from_amount` is an exact-output quote:
//! `|from_amount|` is the amount to receive, it is grossed up by
//! `1 / (1 - haircut)` before solving, and the haircut is reported on that
//! grossed-up amount.

use crate::error::{QuoteError, Result};
use crate::fixed_point::WadMath;
use crate::invariant::swap_delta;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// `(actual_to_amount, haircut)` in WAD units
#[allow(clippy::too_many_arguments)]
pub fn quote_swap(
    math: &WadMath,
    from_cash: &BigInt,
    from_liability: &BigInt,
    to_cash: &BigInt,
    to_liability: &BigInt,
    from_amount: &BigInt,
    amp_factor: &BigInt,
    scale_factor: &BigInt,
    haircut_rate: &BigInt,
) -> Result<(BigInt, BigInt)> {
    let wad = math.wad();
    let mut from_amount = if from_amount.is_negative() {
        math.wdiv(from_amount, &(wad - haircut_rate))?
    } else {
        from_amount.clone()
    };

    let mut from_cash = from_cash.clone();
    let mut from_liability = from_liability.clone();
    if scale_factor != wad {
        from_cash = rescale(&from_cash, scale_factor, wad);
        from_liability = rescale(&from_liability, scale_factor, wad);
        from_amount = rescale(&from_amount, scale_factor, wad);
    }

    let ideal_to_amount = swap_delta(
        math,
        &from_cash,
        to_cash,
        &from_liability,
        to_liability,
        &from_amount,
        amp_factor,
    )?;

    if (from_amount.is_positive() && *to_cash < ideal_to_amount)
        || (from_amount.is_negative() && from_cash < -&from_amount)
    {
        return Err(QuoteError::CashNotEnough);
    }

    if from_amount.is_positive() {
        let haircut = math.wmul(&ideal_to_amount, haircut_rate);
        Ok((&ideal_to_amount - &haircut, haircut))
    } else if from_amount.is_zero() {
        Ok((ideal_to_amount, BigInt::zero()))
    } else {
        // exact output: the haircut is charged on the input side
        let haircut = math.wmul(&-&from_amount, haircut_rate);
        Ok((ideal_to_amount, haircut))
    }
}

/// `floor(value * scale_factor / wad)`
pub(crate) fn rescale(value: &BigInt, scale_factor: &BigInt, wad: &BigInt) -> BigInt {
    (value * scale_factor).div_floor(wad)
}
