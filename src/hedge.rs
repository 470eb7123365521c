//! Static and dynamic legs of variance-swap replication.
//!
//! A variance swap struck through separator `z` is replicated by
//!
//! 1. a static position with payoff
//!    `static_payoff(x, x0, z) = -2 ln(x / x0) + 2 (x - x0) / z`, and
//! 2. a dynamic futures position holding `2 / x[i] - 2 / z` contracts over
//!    each interval `(t_i, t_{i+1}]`.
//!
//! # Sign convention
//!
//! The log term enters with coefficient `-2`. With this choice the static
//! payoff is strictly convex in `x` (second derivative `2 / x²`) and vanishes
//! at `x = x0`, which is the log-contract identity. The `1/z` terms of the two
//! legs telescope, so [`replicated_variance`] does not depend on `z`.

use crate::error;
use crate::validate::{validate_finite, validate_nonzero, validate_path, validate_positive};

/// Static (log-contract) payoff `-2 ln(x / x0) + 2 (x - x0) / z`.
///
/// # Errors
/// Returns [`VswapError::DomainError`](crate::VswapError::DomainError) if
/// `x <= 0`, `x0 <= 0`, `z == 0`, any argument is non-finite, or the result
/// overflows.
///
/// # Examples
/// ```
/// use vswap::hedge::static_payoff;
/// assert_eq!(static_payoff(100.0, 100.0, 100.0).unwrap(), 0.0);
/// assert!(static_payoff(90.0, 100.0, 100.0).unwrap() > 0.0);
/// ```
pub fn static_payoff(x: f64, x0: f64, z: f64) -> error::Result<f64> {
    validate_positive(x, "x")?;
    validate_positive(x0, "x0")?;
    validate_nonzero(z, "separator z")?;
    validate_finite(-2.0 * (x / x0).ln() + 2.0 * (x - x0) / z, "static payoff")
}

/// Number of futures contracts to hold over `(t_i, t_{i+1}]`: `2 / x - 2 / z`.
///
/// `x` is the price observed at `t_i`.
///
/// # Errors
/// Returns [`VswapError::DomainError`](crate::VswapError::DomainError) if
/// `x == 0`, `z == 0`, either is non-finite, or the ratio overflows.
pub fn dynamic_payoff(x: f64, z: f64) -> error::Result<f64> {
    validate_nonzero(x, "x")?;
    validate_nonzero(z, "separator z")?;
    validate_finite(2.0 / x - 2.0 / z, "hedge ratio")
}

/// Futures holdings for every interval of `path`, length `path.len() - 1`.
///
/// # Errors
/// Returns [`VswapError::DomainError`](crate::VswapError::DomainError) for an
/// invalid path (fewer than 2 points, non-positive prices) or `z == 0`.
pub fn hedge_schedule(path: &[f64], z: f64) -> error::Result<Vec<f64>> {
    validate_path(path)?;
    validate_nonzero(z, "separator z")?;
    path[..path.len() - 1]
        .iter()
        .map(|&x| dynamic_payoff(x, z))
        .collect()
}

/// Gain of the dynamic leg: `Σ dynamic_payoff(x[i], z) · (x[i+1] - x[i])`.
pub fn hedge_pnl(path: &[f64], z: f64) -> error::Result<f64> {
    let schedule = hedge_schedule(path, z)?;
    let pnl: f64 = schedule
        .iter()
        .zip(path.windows(2))
        .map(|(h, w)| h * (w[1] - w[0]))
        .sum();
    validate_finite(pnl, "hedge P&L")
}

/// Total payoff of static plus dynamic legs over `path`.
///
/// Equals `Σ 2 (r_i - ln(1 + r_i))` with simple returns `r_i`, independent of
/// `z`. For small moves this approaches the log-return realized variance.
pub fn replicated_variance(path: &[f64], z: f64) -> error::Result<f64> {
    let pnl = hedge_pnl(path, z)?;
    let x0 = path[0];
    let xn = path[path.len() - 1];
    validate_finite(static_payoff(xn, x0, z)? + pnl, "replicated variance")
}
