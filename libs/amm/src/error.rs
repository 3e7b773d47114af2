//! Quote failure taxonomy
//!
//! Every condition here is an expected outcome for some pool state and is
//! returned to the caller; none of them abort the process.

use thiserror::Error;

/// Errors returned by the quoting engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// A ratio was computed with a zero denominator
    #[error("Division by zero in fixed-point arithmetic")]
    DivisionByZero,

    /// The invariant implies a reserve that cannot exist (empty liability, negative cash)
    #[error("Core underflow: reserve state cannot satisfy the invariant")]
    Underflow,

    /// The quoted output exceeds the cash held by the pool
    #[error("Cash not enough: pool cannot cover the quoted amount")]
    CashNotEnough,

    /// The liability to burn rounds down to zero
    #[error("Zero liquidity: share amount too small relative to total supply")]
    ZeroLiquidity,

    /// The trade would push a coverage ratio past the end of the fee band
    #[error("Coverage ratio limit exceeded")]
    CovRatioLimitExceeded,

    /// The high-coverage-ratio fee came out above 100%
    #[error("Invalid high coverage ratio fee: ratio above 100%")]
    InvalidHighCovRatioFee,

    /// Token decimals outside [0, 30]
    #[error("Invalid underlying decimals {decimals}: expected 0..=30")]
    InvalidDecimals { decimals: u8 },

    /// A reserve or amount that must be non-negative was negative
    #[error("Negative input: {field} must be non-negative")]
    NegativeInput { field: &'static str },

    /// Upper-bound search hit its round cap before converging
    #[error("Upper bound search did not converge after {rounds} rounds")]
    SearchExhausted { rounds: u64 },

    /// A value is outside the range representable by `Decimal`
    #[error("Value {value} is outside the decimal display range")]
    DecimalRange { value: String },

    /// Network parameters failed validation
    #[error("Invalid network configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
