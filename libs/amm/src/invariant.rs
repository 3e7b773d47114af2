//! Coverage-ratio stableswap invariant
//!
//! For assets with cash `A_i`, liability `L_i` and coverage ratio
//! `r_i = A_i / L_i` the pool keeps
//!
//! ```text
//! D = Σ L_i * (r_i - A / r_i)
//! ```
//!
//! constant across a swap. Moving one asset's cash fixes its new ratio, and
//! the counter-asset ratio is the non-negative root of
//! `r^2 + b*r - A = 0`. Deposits and withdrawals solve a similar quadratic
//! for the cash (or liability) change that keeps `D` consistent with the
//! global equilibrium coverage ratio `r*`.
//!
//! All inputs are WAD-scaled; every multiply-then-divide floors.

use crate::error::{QuoteError, Result};
use crate::fixed_point::{sqrt, WadMath};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

fn two() -> BigInt {
    BigInt::from(2u8)
}

/// Counter-asset cash change for a from-asset cash change `dx`
///
/// Returns `|Dy|`, the amount leaving (or entering) the to-asset.
pub fn swap_delta(
    math: &WadMath,
    ax: &BigInt,
    ay: &BigInt,
    lx: &BigInt,
    ly: &BigInt,
    dx: &BigInt,
    amp: &BigInt,
) -> Result<BigInt> {
    if lx.is_zero() || ly.is_zero() {
        return Err(QuoteError::Underflow);
    }
    if ax.is_zero() || ay.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }

    let d = ax + ay - math.wmul(amp, &((lx * lx).div_floor(ax) + (ly * ly).div_floor(ay)));
    let rx = math.wdiv(&(ax + dx), lx)?;
    let b = (lx * (&rx - math.wdiv(amp, &rx)?)).div_floor(ly) - math.wdiv(&d, ly)?;
    let ry = solve_quad(math, &b, amp);
    let dy = math.wmul(ly, &ry) - ay;
    Ok(dy.abs())
}

/// Non-negative root of `x^2 + b*x - c = 0` in WAD terms
pub fn solve_quad(math: &WadMath, b: &BigInt, c: &BigInt) -> BigInt {
    let discriminant = b * b + c * (BigInt::from(4u8) * math.wad());
    (sqrt(&discriminant, b) - b).div_floor(&two())
}

/// Liability minted for a deposit of `d_i`, dispatching on `r*`
pub fn exact_deposit_liquidity(
    math: &WadMath,
    d_i: &BigInt,
    a_i: &BigInt,
    l_i: &BigInt,
    amp: &BigInt,
    equil_cov_ratio: &BigInt,
) -> Result<BigInt> {
    if equil_cov_ratio == math.wad() {
        exact_deposit_liquidity_in_equil(math, d_i, a_i, l_i, amp)
    } else {
        exact_deposit_liquidity_general(math, d_i, a_i, l_i, amp, equil_cov_ratio)
    }
}

/// Deposit closed form for `r* == 1`, where `k*r* - k*A/r*` collapses to `k*(1 - A)`
pub fn exact_deposit_liquidity_in_equil(
    math: &WadMath,
    d_i: &BigInt,
    a_i: &BigInt,
    l_i: &BigInt,
    amp: &BigInt,
) -> Result<BigInt> {
    if l_i.is_zero() {
        // empty asset: no reward and no fee
        return Ok(d_i.clone());
    }
    let k = d_i + a_i;
    if k.is_negative() {
        return Err(QuoteError::Underflow);
    }

    let b = math.wmul(&k, &(math.wad() - amp)) + two() * math.wmul(amp, l_i);
    deposit_root(math, &k, &b, a_i, l_i, amp)
}

/// Deposit closed form for an arbitrary `r*`
pub fn exact_deposit_liquidity_general(
    math: &WadMath,
    d_i: &BigInt,
    a_i: &BigInt,
    l_i: &BigInt,
    amp: &BigInt,
    equil_cov_ratio: &BigInt,
) -> Result<BigInt> {
    if l_i.is_zero() {
        return Ok(d_i.clone());
    }
    if equil_cov_ratio.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    let k = d_i + a_i;
    if k.is_negative() {
        return Err(QuoteError::Underflow);
    }

    // supersedes the drifted copy `(wmul(k, r*) - k*A) / (r* + 2*wmul(A, L))`,
    // which disagrees with the equilibrium form at r* = WAD
    let b = math.wmul(&k, equil_cov_ratio) - (&k * amp).div_floor(equil_cov_ratio)
        + two() * math.wmul(amp, l_i);
    deposit_root(math, &k, &b, a_i, l_i, amp)
}

/// Shared tail of both deposit forms: `(-b + sqrt(b^2 - 4*A*c)) / 2A`
fn deposit_root(
    math: &WadMath,
    k: &BigInt,
    b: &BigInt,
    a_i: &BigInt,
    l_i: &BigInt,
    amp: &BigInt,
) -> Result<BigInt> {
    let r_i = math.wdiv(a_i, l_i)?;
    if r_i.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    let c = math.wmul(k, &(a_i - (amp * l_i).div_floor(&r_i))) - math.wmul(k, k)
        + math.wmul(&math.wmul(amp, l_i), l_i);
    let l = b * b - BigInt::from(4u8) * amp * c;
    let numerator = -b + sqrt(&l, b);
    Ok(math.wdiv(&numerator, amp)?.div_floor(&two()))
}

/// Cash paid out when liability changes by `delta_i` (negative for a withdrawal)
pub fn withdrawal_amount(
    math: &WadMath,
    delta_i: &BigInt,
    a_i: &BigInt,
    l_i: &BigInt,
    amp: &BigInt,
    equil_cov_ratio: &BigInt,
) -> Result<BigInt> {
    if equil_cov_ratio == math.wad() {
        withdrawal_amount_in_equil(math, delta_i, a_i, l_i, amp)
    } else {
        withdrawal_amount_general(math, delta_i, a_i, l_i, amp, equil_cov_ratio)
    }
}

/// Withdrawal closed form for `r* == 1`
pub fn withdrawal_amount_in_equil(
    math: &WadMath,
    delta_i: &BigInt,
    a_i: &BigInt,
    l_i: &BigInt,
    amp: &BigInt,
) -> Result<BigInt> {
    let l_i_new = l_i + delta_i;
    let r_i = math.wdiv(a_i, l_i)?;

    let rho = math.wmul(l_i, &(&r_i - math.wdiv(amp, &r_i)?));
    let beta = (rho + math.wmul(delta_i, &(math.wad() - amp))).div_floor(&two());
    let a_i_new = &beta + sqrt(&(&beta * &beta + math.wmul(amp, &(&l_i_new * &l_i_new))), &beta);
    Ok(a_i - a_i_new)
}

/// Withdrawal closed form for an arbitrary `r*`
pub fn withdrawal_amount_general(
    math: &WadMath,
    delta_i: &BigInt,
    a_i: &BigInt,
    l_i: &BigInt,
    amp: &BigInt,
    equil_cov_ratio: &BigInt,
) -> Result<BigInt> {
    if equil_cov_ratio.is_zero() {
        return Err(QuoteError::DivisionByZero);
    }
    let l_i_new = l_i + delta_i;
    let r_i = math.wdiv(a_i, l_i)?;

    let delta_d =
        math.wmul(delta_i, equil_cov_ratio) - (delta_i * amp).div_floor(equil_cov_ratio);
    let b = -(math.wmul(l_i, &(&r_i - math.wdiv(amp, &r_i)?)) + delta_d);
    let c = math.wmul(amp, &math.wmul(&l_i_new, &l_i_new));
    let a_i_new = solve_quad(math, &b, &c);
    Ok(a_i - a_i_new)
}
