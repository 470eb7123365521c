//! Replicate a variance swap and check the hedge against realized variance.
//!
//! Demonstrates the workflow:
//!   1. Estimate realized variance from a price path
//!   2. Run the static + dynamic hedge over the same path
//!   3. Decompose the static leg into puts and calls on a strike grid
//!   4. Re-price that option strip at a few spots
//!
//! Run with: `cargo run --example replicate_variance_swap`

use vswap::hedge::{hedge_pnl, replicated_variance};
use vswap::{PayoffSamples, log_return_payoff, realized_return, static_payoff};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ---------------------------------------------------------------
    // 1. Realized variance
    // ---------------------------------------------------------------

    let path = vec![
        100.0, 100.8, 99.9, 101.2, 102.0, 101.1, 100.4, 99.2, 99.9, 100.6, 101.5,
    ];
    let x0 = path[0];
    let z = 100.0; // put/call separator

    println!("--- Realized variance over {} intervals ---\n", path.len() - 1);
    println!("simple returns: {:.8}", realized_return(&path)?);
    println!("log returns:    {:.8}", log_return_payoff(&path)?);

    // ---------------------------------------------------------------
    // 2. Static + dynamic hedge
    // ---------------------------------------------------------------

    let xn = path[path.len() - 1];
    println!("\n--- Hedge legs (z = {z}) ---\n");
    println!("static leg:     {:.8}", static_payoff(xn, x0, z)?);
    println!("dynamic leg:    {:.8}", hedge_pnl(&path, z)?);
    println!("total:          {:.8}", replicated_variance(&path, z)?);

    // ---------------------------------------------------------------
    // 3. Option strip for the static leg
    // ---------------------------------------------------------------

    let strikes: Vec<f64> = (0..=24).map(|i| 70.0 + 2.5 * i as f64).collect();
    let portfolio =
        PayoffSamples::from_fn(strikes, |k| static_payoff(k, x0, z).unwrap_or(f64::NAN))?
            .fit(z)?;

    println!("\n--- Replicating portfolio ---\n");
    println!("cash:    {:>10.6}", portfolio.cash());
    println!("forward: {:>10.6}", portfolio.forward());
    println!("{:>8} {:>6} {:>12}", "strike", "type", "quantity");
    for leg in portfolio.legs() {
        println!(
            "{:>8.1} {:>6} {:>12.6}",
            leg.strike,
            format!("{:?}", leg.option_type),
            leg.quantity
        );
    }

    // ---------------------------------------------------------------
    // 4. Re-price at arbitrary spots
    // ---------------------------------------------------------------

    println!("\n--- Strip vs. exact static payoff ---\n");
    println!("{:>8} {:>12} {:>12}", "spot", "strip", "exact");
    let spots = [75.0, 88.8, 100.0, 104.2, 121.0];
    let values = portfolio.eval_many(&spots)?;
    for (x, v) in spots.iter().zip(&values) {
        println!("{x:>8.1} {v:>12.6} {:>12.6}", static_payoff(*x, x0, z)?);
    }

    Ok(())
}
