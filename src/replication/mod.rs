//! Static replication of a payoff by cash, a forward and a strip of options.
//!
//! Two layers over the same algorithm:
//!
//! - [`carr_madan_fit`] / [`carr_madan_eval`] — free functions on plain slices.
//!   The fit rewrites the sample buffer into coefficients in place.
//! - [`PayoffSamples`] / [`PortfolioCoefficients`] — owned, validated types.
//!   Fitting consumes the samples and returns the coefficients.

pub mod carr_madan;
pub mod portfolio;

pub use carr_madan::{carr_madan_eval, carr_madan_fit};
pub use portfolio::{OptionLeg, PayoffSamples, PortfolioCoefficients};
