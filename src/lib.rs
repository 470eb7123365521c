//! # vswap
//!
//! Variance swap payoffs and their static replication.
//!
//! Given an observed price path the crate estimates realized variance. Given
//! an arbitrary target payoff sampled on a strike grid it decomposes that
//! payoff into cash, a forward position and a strip of European puts and calls
//! (the Carr-Madan formula), then re-evaluates the portfolio at any spot.
//!
//! ## Architecture
//!
//! - **`realized`** — Realized variance from simple or log returns
//! - **`hedge`** — Static log-contract leg and dynamic futures hedge
//! - **`replication`** — Carr-Madan fit and evaluation on a strike grid
//!
//! ## Design
//!
//! - **Plain slices in, newtypes where outputs are easy to mix up.** The core
//!   operations take `&[f64]` and bare `f64`; [`PayoffSamples`] and
//!   [`PortfolioCoefficients`] give the fit a typed before/after.
//! - **No panics.** Every fallible operation returns [`Result`]. NaN and
//!   infinite inputs are rejected instead of propagated.
//! - **Pure.** No global state, no I/O. Nothing is retained across calls.
//! - **Features.** `parallel` (default) batches evaluation on rayon;
//!   `logging` emits `tracing` events at fit and batch boundaries.

pub mod error;
pub mod hedge;
pub mod realized;
pub mod replication;
pub mod types;
mod validate;

#[doc(inline)]
pub use error::{Result, VswapError};
#[doc(inline)]
pub use hedge::{dynamic_payoff, static_payoff};
#[doc(inline)]
pub use realized::{log_return_payoff, realized_return};
#[doc(inline)]
pub use replication::{
    OptionLeg, PayoffSamples, PortfolioCoefficients, carr_madan_eval, carr_madan_fit,
};
#[doc(inline)]
pub use types::{OptionType, ReturnKind, Variance};
