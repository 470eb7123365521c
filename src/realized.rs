//! Realized-variance estimators over an observed price path.
//!
//! A path `x[0..=n]` holds observations at increasing times. Both estimators sum
//! squared per-interval returns, so the result depends on path order.
//!
//! - [`realized_return`] — simple returns, `Σ ((x[i+1] - x[i]) / x[i])²`
//! - [`log_return_payoff`] — log returns, `Σ ln(x[i+1] / x[i])²`
//!
//! Neither is annualized.

use crate::error;
use crate::types::{ReturnKind, Variance};
use crate::validate::{validate_finite, validate_path};

/// Simple-return realized variance `Σ ((x[i+1] - x[i]) / x[i])²`.
///
/// # Errors
/// Returns [`VswapError::DomainError`](crate::VswapError::DomainError) if the
/// path has fewer than 2 observations, any price is not positive and finite,
/// or the sum overflows.
///
/// # Examples
/// ```
/// use vswap::realized::realized_return;
/// assert_eq!(realized_return(&[1.0, 2.0, 3.0]).unwrap(), 1.25);
/// ```
pub fn realized_return(path: &[f64]) -> error::Result<f64> {
    validate_path(path)?;
    let s2: f64 = path
        .windows(2)
        .map(|w| {
            let r = (w[1] - w[0]) / w[0];
            r * r
        })
        .sum();
    validate_finite(s2, "realized variance")
}

/// Log-return realized variance `Σ ln(x[i+1] / x[i])²`.
///
/// This is the floating leg of a standard variance swap.
///
/// # Errors
/// Returns [`VswapError::DomainError`](crate::VswapError::DomainError) if the
/// path has fewer than 2 observations, any price is not positive and finite,
/// or the sum overflows.
pub fn log_return_payoff(path: &[f64]) -> error::Result<f64> {
    validate_path(path)?;
    let s2: f64 = path
        .windows(2)
        .map(|w| {
            let r = (w[1] / w[0]).ln();
            r * r
        })
        .sum();
    validate_finite(s2, "realized variance")
}

/// Realized variance of `path` using the given return definition.
pub fn realized_variance(path: &[f64], kind: ReturnKind) -> error::Result<Variance> {
    let v = match kind {
        ReturnKind::Simple => realized_return(path)?,
        ReturnKind::Log => log_return_payoff(path)?,
    };
    Ok(Variance(v))
}

/// Per-interval return series of `path`, length `path.len() - 1`.
///
/// # Errors
/// Same preconditions as [`realized_return`].
pub fn returns(path: &[f64], kind: ReturnKind) -> error::Result<Vec<f64>> {
    validate_path(path)?;
    path.windows(2)
        .map(|w| match kind {
            ReturnKind::Simple => (w[1] - w[0]) / w[0],
            ReturnKind::Log => (w[1] / w[0]).ln(),
        })
        .map(|r| validate_finite(r, "return"))
        .collect()
}
