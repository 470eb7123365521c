//! Input validation helpers.
//!
//! Scalars are checked with `!is_finite()` so NaN, +Inf and -Inf are rejected
//! uniformly. Scalar failures are [`VswapError::DomainError`]; array shape and
//! ordering failures are [`VswapError::InvalidArgument`].

use crate::error::{Result, VswapError};

/// Minimum number of nodes in a replication strike grid.
pub(crate) const MIN_GRID_NODES: usize = 3;

/// Validate that a value is strictly positive and finite.
pub(crate) fn validate_positive(value: f64, name: &str) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VswapError::DomainError {
            message: format!("{name} must be positive and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite and not zero (allows negatives).
pub(crate) fn validate_nonzero(value: f64, name: &str) -> Result<f64> {
    if !value.is_finite() || value == 0.0 {
        return Err(VswapError::DomainError {
            message: format!("{name} must be non-zero and finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate that a value is finite (rejects NaN and Inf; allows zero and negatives).
pub(crate) fn validate_finite(value: f64, name: &str) -> Result<f64> {
    if !value.is_finite() {
        return Err(VswapError::DomainError {
            message: format!("{name} must be finite, got {value}"),
        });
    }
    Ok(value)
}

/// Validate a price path: at least two observations, all positive and finite.
pub(crate) fn validate_path(path: &[f64]) -> Result<()> {
    if path.len() < 2 {
        return Err(VswapError::DomainError {
            message: format!(
                "price path requires at least 2 observations, got {}",
                path.len()
            ),
        });
    }
    for (i, &x) in path.iter().enumerate() {
        if !x.is_finite() || x <= 0.0 {
            return Err(VswapError::DomainError {
                message: format!("price path entries must be positive and finite, got x[{i}]={x}"),
            });
        }
    }
    Ok(())
}

/// Validate that `strikes` and `values` form a usable replication grid.
///
/// Requires equal lengths, at least [`MIN_GRID_NODES`] nodes, finite entries
/// and strictly ascending strikes.
pub(crate) fn validate_grid(strikes: &[f64], values: &[f64]) -> Result<()> {
    validate_lengths(strikes, values)?;
    for (i, &k) in strikes.iter().enumerate() {
        if !k.is_finite() {
            return Err(VswapError::InvalidArgument {
                message: format!("strikes must be finite, got strikes[{i}]={k}"),
            });
        }
    }
    for (i, w) in strikes.windows(2).enumerate() {
        if w[1] <= w[0] {
            return Err(VswapError::InvalidArgument {
                message: format!(
                    "strikes must be strictly increasing, but strikes[{}]={} >= strikes[{}]={}",
                    i,
                    w[0],
                    i + 1,
                    w[1]
                ),
            });
        }
    }
    for (i, &f) in values.iter().enumerate() {
        if !f.is_finite() {
            return Err(VswapError::InvalidArgument {
                message: format!("payoff values must be finite, got values[{i}]={f}"),
            });
        }
    }
    Ok(())
}

/// Validate equal lengths and the minimum node count.
pub(crate) fn validate_lengths(strikes: &[f64], values: &[f64]) -> Result<()> {
    if strikes.len() != values.len() {
        return Err(VswapError::InvalidArgument {
            message: format!(
                "strikes and values must have the same length, got {} and {}",
                strikes.len(),
                values.len()
            ),
        });
    }
    if strikes.len() < MIN_GRID_NODES {
        return Err(VswapError::InvalidArgument {
            message: format!(
                "replication requires at least {MIN_GRID_NODES} grid nodes, got {}",
                strikes.len()
            ),
        });
    }
    Ok(())
}

/// Validate that the separator lies in the half-open range `[k[0], k[n-1])`.
///
/// `strikes` must already be non-empty.
pub(crate) fn validate_separator(separator: f64, strikes: &[f64]) -> Result<f64> {
    let lo = strikes[0];
    let hi = strikes[strikes.len() - 1];
    if separator == hi {
        return Err(VswapError::InvalidArgument {
            message: format!("separator {separator} coincides with the last grid node"),
        });
    }
    if !(lo <= separator && separator < hi) {
        return Err(VswapError::InvalidArgument {
            message: format!("separator must lie in [{lo}, {hi}), got {separator}"),
        });
    }
    Ok(separator)
}
