//! Core domain types.
//!
//! Outputs that are easy to confuse with other floats are wrapped in newtypes;
//! inputs are bare `f64` and slices. Validation happens inside the operations.
//!
//! # Why no `Eq` or `Ord`?
//! These types wrap `f64`, which does not implement `Eq` or `Ord` because `NaN`
//! breaks total ordering. We derive `PartialEq` and `PartialOrd` only.

use serde::{Deserialize, Serialize};

/// Realized variance: a sum of squared returns over a price path.
///
/// Not annualized. Scaling by an observation frequency is the caller's job.
///
/// # Examples
/// ```
/// use vswap::types::Variance;
/// let var = Variance(0.04);
/// assert_eq!(var.0, 0.04);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Variance(pub f64);

/// Option type of a replicating-portfolio leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Pays `max(x - k, 0)`. Used for strikes above the separator.
    Call,
    /// Pays `max(k - x, 0)`. Used for strikes at or below the separator.
    Put,
}

impl OptionType {
    /// Intrinsic value of one unit struck at `strike` when the underlying is at `x`.
    ///
    /// # Examples
    /// ```
    /// use vswap::types::OptionType;
    /// assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
    /// assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn intrinsic(self, x: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (x - strike).max(0.0),
            OptionType::Put => (strike - x).max(0.0),
        }
    }

    /// Leg type for a strike relative to the put/call separator `z`.
    ///
    /// Strikes at or below `z` are puts, strikes above are calls.
    #[inline]
    pub fn for_strike(strike: f64, separator: f64) -> Self {
        if strike <= separator {
            OptionType::Put
        } else {
            OptionType::Call
        }
    }
}

/// Return definition used by a realized-variance estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnKind {
    /// Simple return `(x[i+1] - x[i]) / x[i]`.
    Simple,
    /// Log return `ln(x[i+1] / x[i])`, the usual variance-swap floating leg.
    #[default]
    Log,
}
