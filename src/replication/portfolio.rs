//! Typed replication layer: payoff samples in, portfolio coefficients out.
//!
//! [`PayoffSamples::fit`] consumes the samples and reuses their storage for the
//! coefficients, so the two representations never alias one another.
//!
//! ```
//! use vswap::replication::PayoffSamples;
//!
//! let strikes = vec![80.0, 90.0, 100.0, 110.0, 120.0];
//! let samples = PayoffSamples::from_fn(strikes, |k| (k - 100.0).abs()).unwrap();
//! let portfolio = samples.fit(100.0).unwrap();
//!
//! // a straddle: long forward plus two puts struck at the separator
//! assert_eq!(portfolio.cash(), 0.0);
//! assert_eq!(portfolio.eval(85.0).unwrap(), 15.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{self, VswapError};
use crate::replication::carr_madan::{carr_madan_fit, eval_unchecked};
use crate::types::OptionType;
use crate::validate::{validate_finite, validate_grid, validate_separator};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A target payoff sampled on a strictly ascending strike grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PayoffSamplesRaw", into = "PayoffSamplesRaw")]
pub struct PayoffSamples {
    strikes: Vec<f64>,
    values: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct PayoffSamplesRaw {
    strikes: Vec<f64>,
    values: Vec<f64>,
}

impl TryFrom<PayoffSamplesRaw> for PayoffSamples {
    type Error = VswapError;
    fn try_from(raw: PayoffSamplesRaw) -> Result<Self, Self::Error> {
        Self::new(raw.strikes, raw.values)
    }
}

impl From<PayoffSamples> for PayoffSamplesRaw {
    fn from(s: PayoffSamples) -> Self {
        Self {
            strikes: s.strikes,
            values: s.values,
        }
    }
}

impl PayoffSamples {
    /// Create samples from parallel strike and value vectors.
    ///
    /// # Errors
    /// Returns [`VswapError::InvalidArgument`] if fewer than 3 nodes are given,
    /// lengths differ, any entry is non-finite, or strikes are not strictly
    /// ascending.
    pub fn new(strikes: Vec<f64>, values: Vec<f64>) -> error::Result<Self> {
        validate_grid(&strikes, &values)?;
        Ok(Self { strikes, values })
    }

    /// Sample `payoff` at every strike.
    ///
    /// # Errors
    /// As [`new`](Self::new); a payoff returning NaN or Inf is rejected.
    pub fn from_fn(strikes: Vec<f64>, payoff: impl FnMut(f64) -> f64) -> error::Result<Self> {
        let values = strikes.iter().copied().map(payoff).collect();
        Self::new(strikes, values)
    }

    /// Strike grid.
    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// Payoff value at each strike.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of grid nodes (always at least 3).
    pub fn len(&self) -> usize {
        self.strikes.len()
    }

    /// Whether the grid has no nodes.
    pub fn is_empty(&self) -> bool {
        self.strikes.is_empty()
    }

    /// Decompose into cash, forward and a strip of puts and calls split at `separator`.
    ///
    /// # Errors
    /// Returns [`VswapError::InvalidArgument`] if `separator` is outside
    /// `[k[0], k[n-1])`.
    pub fn fit(self, separator: f64) -> error::Result<PortfolioCoefficients> {
        let Self {
            strikes,
            mut values,
        } = self;
        carr_madan_fit(&strikes, &mut values, separator)?;
        Ok(PortfolioCoefficients {
            strikes,
            coefficients: values,
            separator,
        })
    }
}

/// One option position of a replicating portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    /// Strike of the option.
    pub strike: f64,
    /// Number of options held (negative means short).
    pub quantity: f64,
    /// Put for strikes at or below the separator, call above.
    pub option_type: OptionType,
}

impl OptionLeg {
    /// Payoff of this position at spot `x`.
    pub fn payoff(&self, x: f64) -> f64 {
        self.quantity * self.option_type.intrinsic(x, self.strike)
    }
}

/// Replicating portfolio: cash, forward and one option per interior strike.
///
/// Layout matches [`carr_madan_fit`]: `coefficients[0]` is cash,
/// `coefficients[n-1]` the forward position, the rest option quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PortfolioCoefficientsRaw", into = "PortfolioCoefficientsRaw")]
pub struct PortfolioCoefficients {
    strikes: Vec<f64>,
    coefficients: Vec<f64>,
    separator: f64,
}

#[derive(Serialize, Deserialize)]
struct PortfolioCoefficientsRaw {
    strikes: Vec<f64>,
    coefficients: Vec<f64>,
    separator: f64,
}

impl TryFrom<PortfolioCoefficientsRaw> for PortfolioCoefficients {
    type Error = VswapError;
    fn try_from(raw: PortfolioCoefficientsRaw) -> Result<Self, Self::Error> {
        validate_grid(&raw.strikes, &raw.coefficients)?;
        validate_separator(raw.separator, &raw.strikes)?;
        Ok(Self {
            strikes: raw.strikes,
            coefficients: raw.coefficients,
            separator: raw.separator,
        })
    }
}

impl From<PortfolioCoefficients> for PortfolioCoefficientsRaw {
    fn from(p: PortfolioCoefficients) -> Self {
        Self {
            strikes: p.strikes,
            coefficients: p.coefficients,
            separator: p.separator,
        }
    }
}

impl PortfolioCoefficients {
    /// Payoff of the portfolio at spot `x`.
    ///
    /// # Errors
    /// Returns [`VswapError::DomainError`] if `x` is non-finite or the value
    /// overflows.
    pub fn eval(&self, x: f64) -> error::Result<f64> {
        validate_finite(x, "x")?;
        validate_finite(
            eval_unchecked(x, &self.strikes, &self.coefficients, self.separator),
            "portfolio value",
        )
    }

    /// Payoff at each spot in `xs`, in order.
    ///
    /// Runs on the rayon thread pool when the `parallel` feature is enabled.
    pub fn eval_many(&self, xs: &[f64]) -> error::Result<Vec<f64>> {
        #[cfg(feature = "logging")]
        tracing::debug!(
            n_points = xs.len(),
            n_nodes = self.strikes.len(),
            "Carr-Madan batch evaluation"
        );

        #[cfg(feature = "parallel")]
        let values = xs
            .par_iter()
            .map(|&x| self.eval(x))
            .collect::<error::Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let values = xs
            .iter()
            .map(|&x| self.eval(x))
            .collect::<error::Result<Vec<_>>>()?;
        Ok(values)
    }

    /// Cash leg, the payoff value at the separator.
    pub fn cash(&self) -> f64 {
        self.coefficients[0]
    }

    /// Forward leg, the payoff slope at the separator.
    pub fn forward(&self) -> f64 {
        self.coefficients[self.coefficients.len() - 1]
    }

    /// Option positions at the interior strikes, in strike order.
    pub fn legs(&self) -> impl Iterator<Item = OptionLeg> + '_ {
        let n = self.strikes.len();
        let z = self.separator;
        self.strikes[1..n - 1]
            .iter()
            .zip(&self.coefficients[1..n - 1])
            .map(move |(&strike, &quantity)| OptionLeg {
                strike,
                quantity,
                option_type: OptionType::for_strike(strike, z),
            })
    }

    /// Strike grid.
    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// Raw coefficient vector: cash, option quantities, forward.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Put/call separator `z`.
    pub fn separator(&self) -> f64 {
        self.separator
    }

    /// Split into `(strikes, coefficients, separator)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, f64) {
        (self.strikes, self.coefficients, self.separator)
    }
}
