//! Discrete Carr-Madan decomposition of a piecewise-linear payoff.
//!
//! For a payoff `f` sampled at strictly ascending strikes `k[0..n]`, the
//! linear interpolant satisfies
//!
//! ```text
//! f(x) = f(z) + f'(z)(x - z)
//!      + Σ_{k[i] <= z} Δf'(k[i]) · max(k[i] - x, 0)
//!      + Σ_{k[i] >  z} Δf'(k[i]) · max(x - k[i], 0)
//! ```
//!
//! where `Δf'(k[i])` is the jump in slope at interior node `k[i]`. The
//! coefficient vector has the same length as the grid:
//! `(f(z), Δf'(k[1]), ..., Δf'(k[n-2]), f'(z))`.
//!
//! # Separator placement
//!
//! The segment containing `z` is found with the right-open test
//! `k[i-1] <= z < k[i]`. A separator sitting exactly on an interior node uses
//! the slope of the segment to its right. `z == k[n-1]` has no segment and is
//! rejected, as is anything outside `[k[0], k[n-1])`.
//!
//! # References
//! - Carr, P. & Madan, D. "Towards a Theory of Volatility Trading" (1998)

use crate::error::{self, VswapError};
use crate::types::OptionType;
use crate::validate::{validate_finite, validate_grid, validate_lengths, validate_separator};

/// Fit replicating-portfolio coefficients in place.
///
/// On entry `values[i]` is the payoff sampled at `strikes[i]`. On success it
/// holds the coefficients: `values[0]` is the cash leg `f(z)`, `values[n-1]`
/// the forward leg `f'(z)`, and `values[1..n-1]` the put (`k[i] <= z`) or call
/// (`k[i] > z`) quantity struck at `k[i]`. On error `values` is untouched.
///
/// Runs two linear passes with O(1) extra space.
///
/// # Errors
/// Returns [`VswapError::InvalidArgument`] if fewer than 3 nodes are given,
/// lengths differ, any entry is non-finite, strikes are not strictly
/// ascending, `separator` is outside `[k[0], k[n-1])`, or a slope, slope
/// jump or the value at `separator` overflows.
///
/// # Examples
/// ```
/// use vswap::replication::carr_madan_fit;
///
/// let k = [1.0, 2.0, 3.0];
/// let mut f = [1.0, 2.0, 3.0];
/// carr_madan_fit(&k, &mut f, 1.5).unwrap();
/// assert_eq!(f, [1.5, 0.0, 1.0]);
/// ```
pub fn carr_madan_fit(strikes: &[f64], values: &mut [f64], separator: f64) -> error::Result<()> {
    validate_grid(strikes, values)?;
    validate_separator(separator, strikes)?;
    validate_representable(strikes, values, separator)?;

    let (value_z, slope_z) =
        slope_pass(strikes, values, separator).ok_or_else(|| VswapError::InvalidArgument {
            message: format!("no grid segment contains separator {separator}"),
        })?;

    // Slope jumps at interior nodes
    let n = values.len();
    for i in 1..n - 1 {
        values[i] = values[i + 1] - values[i];
    }
    values[0] = value_z;
    values[n - 1] = slope_z;

    #[cfg(feature = "logging")]
    tracing::debug!(
        n_nodes = n,
        separator,
        value_z,
        slope_z,
        "Carr-Madan fit complete"
    );

    Ok(())
}

/// Read-only dry run of both passes: every slope, slope jump and the value at
/// the separator must be finite before the buffer is overwritten.
fn validate_representable(k: &[f64], f: &[f64], z: f64) -> error::Result<()> {
    let overflow = |what: &str, at: f64| VswapError::InvalidArgument {
        message: format!("{what} at strike {at} is not representable as a finite number"),
    };
    let mut prev_slope: Option<f64> = None;
    for i in 1..k.len() {
        let slope = (f[i] - f[i - 1]) / (k[i] - k[i - 1]);
        if !slope.is_finite() {
            return Err(overflow("payoff slope", k[i]));
        }
        if let Some(prev) = prev_slope {
            if !(slope - prev).is_finite() {
                return Err(overflow("slope jump", k[i - 1]));
            }
        }
        if k[i - 1] <= z && z < k[i] && !(f[i - 1] + slope * (z - k[i - 1])).is_finite() {
            return Err(overflow("payoff value", z));
        }
        prev_slope = Some(slope);
    }
    Ok(())
}

/// Backward pass: overwrite `f[i]` (i >= 1) with the slope of `[k[i-1], k[i]]`
/// and return `(f(z), f'(z))` from the segment containing `z`.
///
/// Walking downward leaves `f[i-1]` as a sample when segment `i` is visited.
fn slope_pass(k: &[f64], f: &mut [f64], z: f64) -> Option<(f64, f64)> {
    let mut at_z = None;
    for i in (1..k.len()).rev() {
        f[i] = (f[i] - f[i - 1]) / (k[i] - k[i - 1]);
        if k[i - 1] <= z && z < k[i] {
            at_z = Some((f[i - 1] + f[i] * (z - k[i - 1]), f[i]));
        }
    }
    at_z
}

/// Evaluate the replicating portfolio at spot `x`.
///
/// `fx = f[0] + f[n-1]·(x - z) + Σ f[i]·intrinsic(i)` where interior legs are
/// puts for `k[i] <= z` and calls for `k[i] > z`. The grid ordering is not
/// re-checked.
///
/// # Errors
/// Returns [`VswapError::InvalidArgument`] if `strikes` and `coefficients`
/// differ in length or have fewer than 3 entries, and
/// [`VswapError::DomainError`] if `x` or `separator` is non-finite or the
/// portfolio value overflows.
pub fn carr_madan_eval(
    x: f64,
    strikes: &[f64],
    coefficients: &[f64],
    separator: f64,
) -> error::Result<f64> {
    validate_finite(x, "x")?;
    validate_finite(separator, "separator")?;
    validate_lengths(strikes, coefficients)?;
    validate_finite(
        eval_unchecked(x, strikes, coefficients, separator),
        "portfolio value",
    )
}

#[inline]
pub(crate) fn eval_unchecked(x: f64, k: &[f64], f: &[f64], z: f64) -> f64 {
    let n = k.len();
    let mut fx = f[0] + f[n - 1] * (x - z);
    for i in 1..n - 1 {
        fx += f[i] * OptionType::for_strike(k[i], z).intrinsic(x, k[i]);
    }
    fx
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_round_trip(k: &[f64], samples: &[f64], z: f64) {
        let mut f = samples.to_vec();
        carr_madan_fit(k, &mut f, z).unwrap();
        for (&ki, &expected) in k.iter().zip(samples) {
            let got = carr_madan_eval(ki, k, &f, z).unwrap();
            assert_abs_diff_eq!(got, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn linear_payoff_has_no_options() {
        let k = [1.0, 2.0, 3.0];
        let mut f = [1.0, 2.0, 3.0];
        carr_madan_fit(&k, &mut f, 1.5).unwrap();
        assert_eq!(f, [1.5, 0.0, 1.0]);
    }

    #[test]
    fn kinked_payoff_coefficients() {
        // put payoff max(3 - x, 0) sampled on [1, 5]
        let k = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut f = [2.0, 1.0, 0.0, 0.0, 0.0];
        carr_madan_fit(&k, &mut f, 3.5).unwrap();
        // f(3.5) = 0, slope 0, one unit of the 3-strike put
        assert_eq!(f, [0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn call_side_kink() {
        // call payoff max(x - 3, 0) with separator below the strike
        let k = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut f = [0.0, 0.0, 0.0, 1.0, 2.0];
        carr_madan_fit(&k, &mut f, 1.0).unwrap();
        assert_eq!(f, [0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn round_trip_reproduces_samples() {
        let k = [80.0, 90.0, 95.0, 100.0, 105.0, 110.0, 125.0];
        let samples = [3.2, -1.0, 0.5, 4.0, 4.1, -2.0, 7.5];
        for z in [80.0, 92.0, 100.0, 101.0, 124.9] {
            assert_round_trip(&k, &samples, z);
        }
    }

    #[test]
    fn separator_on_interior_node_uses_right_segment() {
        let k = [1.0, 2.0, 3.0];
        let mut f = [0.0, 1.0, 3.0];
        carr_madan_fit(&k, &mut f, 2.0).unwrap();
        // right segment slope is 2, f(2) = 1
        assert_eq!(f[0], 1.0);
        assert_eq!(f[2], 2.0);
        // the node at z is a put
        assert_abs_diff_eq!(carr_madan_eval(1.0, &k, &f, 2.0).unwrap(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn separator_at_first_node() {
        assert_round_trip(&[1.0, 2.0, 4.0, 8.0], &[5.0, 1.0, 2.0, 0.0], 1.0);
    }

    #[test]
    fn affine_between_nodes() {
        let k = [1.0, 2.0, 3.0, 4.0];
        let mut f = [0.0, 3.0, 1.0, 2.0];
        carr_madan_fit(&k, &mut f, 2.5).unwrap();
        let at = |x: f64| carr_madan_eval(x, &k, &f, 2.5).unwrap();
        assert_abs_diff_eq!(at(1.5), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(at(2.5), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(at(3.25), 1.25, epsilon = 1e-12);
    }

    #[test]
    fn separator_equal_to_last_node_rejected() {
        let k = [1.0, 2.0, 3.0];
        let mut f = [1.0, 2.0, 3.0];
        let err = carr_madan_fit(&k, &mut f, 3.0).unwrap_err();
        match err {
            VswapError::InvalidArgument { message } => assert!(message.contains("last grid node")),
            other => panic!("wrong variant: {other:?}"),
        }
        assert_eq!(f, [1.0, 2.0, 3.0], "buffer must be untouched on error");
    }

    #[test]
    fn separator_outside_grid_rejected() {
        let k = [1.0, 2.0, 3.0];
        for z in [0.999, 3.5, f64::NAN, f64::NEG_INFINITY] {
            let mut f = [1.0, 2.0, 3.0];
            assert!(matches!(
                carr_madan_fit(&k, &mut f, z),
                Err(VswapError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn malformed_grids_rejected() {
        let mut f2 = [1.0, 2.0];
        assert!(matches!(
            carr_madan_fit(&[1.0, 2.0], &mut f2, 1.5),
            Err(VswapError::InvalidArgument { .. })
        ));

        let mut f3 = [1.0, 2.0, 3.0];
        assert!(matches!(
            carr_madan_fit(&[1.0, 3.0, 2.0], &mut f3, 1.5),
            Err(VswapError::InvalidArgument { .. })
        ));
        assert!(matches!(
            carr_madan_fit(&[1.0, 1.0, 2.0], &mut f3, 1.5),
            Err(VswapError::InvalidArgument { .. })
        ));
        assert!(matches!(
            carr_madan_fit(&[1.0, 2.0, 3.0, 4.0], &mut f3, 1.5),
            Err(VswapError::InvalidArgument { .. })
        ));

        let mut nan = [1.0, f64::NAN, 3.0];
        assert!(carr_madan_fit(&[1.0, 2.0, 3.0], &mut nan, 1.5).is_err());
    }

    #[test]
    fn overflowing_slopes_rejected_without_touching_buffer() {
        let k = [-1e308, 0.0, 1e308];
        let mut f = [1e308, -1e308, 1e308];
        let result = carr_madan_fit(&k, &mut f, 0.0);
        assert!(
            matches!(result, Err(VswapError::InvalidArgument { .. })),
            "got {result:?}"
        );
        assert_eq!(f, [1e308, -1e308, 1e308]);
    }

    #[test]
    fn overflowing_slope_jump_rejected() {
        // slopes are finite, their difference is not
        let k = [0.0, 1.0, 2.0];
        let mut f = [0.0, 1.7e308, 0.0];
        assert!(matches!(
            carr_madan_fit(&k, &mut f, 0.5),
            Err(VswapError::InvalidArgument { .. })
        ));
        assert_eq!(f, [0.0, 1.7e308, 0.0]);
    }

    #[test]
    fn overflowing_eval_is_domain_error() {
        let k = [1.0, 2.0, 3.0];
        let f = [0.0, 0.0, 1e300];
        assert!(matches!(
            carr_madan_eval(1e300, &k, &f, 1.5),
            Err(VswapError::DomainError { .. })
        ));
    }

    #[test]
    fn eval_rejects_mismatched_lengths() {
        assert!(matches!(
            carr_madan_eval(1.0, &[1.0, 2.0, 3.0], &[0.0, 0.0], 1.5),
            Err(VswapError::InvalidArgument { .. })
        ));
        assert!(matches!(
            carr_madan_eval(1.0, &[1.0, 2.0], &[0.0, 0.0], 1.5),
            Err(VswapError::InvalidArgument { .. })
        ));
        assert!(matches!(
            carr_madan_eval(f64::NAN, &[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0], 1.5),
            Err(VswapError::DomainError { .. })
        ));
    }
}
