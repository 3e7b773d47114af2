//! WAD fixed-point arithmetic over arbitrary-precision integers
//!
//! Reproduces the on-chain rounding exactly: multiply-then-divide adds half
//! of the divisor before a floor division, so negative operands still get a
//! positive half-unit bias. Square roots use the Babylonian iteration with a
//! caller-supplied starting guess.

use crate::error::{QuoteError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use stableswap_config::NetworkConfig;
use tracing::warn;

/// WAD unit and decimal count of one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadMath {
    wad: BigInt,
    half_wad: BigInt,
    decimals: u32,
}

impl WadMath {
    pub fn new(wad: u128, decimals: u32) -> Self {
        let wad = BigInt::from(wad);
        let half_wad = wad.div_floor(&BigInt::from(2u8));
        Self {
            wad,
            half_wad,
            decimals,
        }
    }

    pub fn for_config(config: &NetworkConfig) -> Self {
        Self::new(config.wad, config.decimals)
    }

    /// The unit representing 1.0
    pub fn wad(&self) -> &BigInt {
        &self.wad
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// `floor((x * y + wad / 2) / wad)`
    pub fn wmul(&self, x: &BigInt, y: &BigInt) -> BigInt {
        (x * y + &self.half_wad).div_floor(&self.wad)
    }

    /// `floor((x * wad + floor(y / 2)) / y)`
    pub fn wdiv(&self, x: &BigInt, y: &BigInt) -> Result<BigInt> {
        if y.is_zero() {
            return Err(QuoteError::DivisionByZero);
        }
        let half_y = y.div_floor(&BigInt::from(2u8));
        Ok((x * &self.wad + half_y).div_floor(y))
    }

    /// Rebase a native-decimal amount onto the WAD scale (floors when shrinking)
    pub fn to_wad(&self, x: &BigInt, native_decimals: u8) -> BigInt {
        let native = u32::from(native_decimals);
        if native < self.decimals {
            x * pow10(self.decimals - native)
        } else if native > self.decimals {
            x.div_floor(&pow10(native - self.decimals))
        } else {
            x.clone()
        }
    }

    /// Rebase a WAD amount back onto `target_decimals` (floors when shrinking)
    pub fn from_wad(&self, x: &BigInt, target_decimals: u8) -> BigInt {
        let target = u32::from(target_decimals);
        if target < self.decimals {
            x.div_floor(&pow10(self.decimals - target))
        } else if target > self.decimals {
            x * pow10(target - self.decimals)
        } else {
            x.clone()
        }
    }
}

/// `10^exp`
pub fn pow10(exp: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u8), exp as usize)
}

/// Babylonian integer square root seeded with `guess`
///
/// The guess is used when it lies in `(0, y]`, its negation when it lies in
/// `[-y, 0)`, otherwise the iteration starts from `y`. Inputs up to 3 return
/// 1 (0 for 0), which is not exact for 2 and 3 but matches the deployed
/// contracts. Negative inputs take the same shortcut.
pub fn sqrt(y: &BigInt, guess: &BigInt) -> BigInt {
    let three = BigInt::from(3u8);
    if *y <= three {
        return if y.is_zero() { BigInt::zero() } else { BigInt::one() };
    }

    let mut z = if guess.is_positive() && guess <= y {
        guess.clone()
    } else if guess.is_negative() && &(-guess) <= y {
        -guess
    } else {
        y.clone()
    };

    let two = BigInt::from(2u8);
    let mut x = (y / &z + &z) / &two;
    let max_rounds = 2 * y.bits() + 16;
    let mut rounds = 0u64;
    while x != z {
        if rounds == max_rounds {
            // floor iteration 2-cycles between s and s + 1 when y == (s + 1)^2 - 1
            warn!(bits = y.bits(), "babylonian sqrt did not settle, bisecting");
            return bisect_sqrt(y);
        }
        z = x;
        x = (y / &z + &z) / &two;
        rounds += 1;
    }
    z
}

/// Largest `m` with `m * m <= y`
fn bisect_sqrt(y: &BigInt) -> BigInt {
    let mut low = BigInt::zero();
    let mut high = BigInt::one() << ((y.bits() / 2 + 1) as usize);
    while low < high {
        let mid: BigInt = (&low + &high + 1u8) >> 1usize;
        if &mid * &mid <= *y {
            low = mid;
        } else {
            high = mid - 1u8;
        }
    }
    low
}
