// demos/pricer.rs
use bs_engine::analytics::bs_analytic::{evaluate, Greek};
use bs_engine::analytics::volatility::{historical_volatility, trailing_volatility};
use bs_engine::config::EngineConfig;
use bs_engine::expiry::{expiry_at_midnight, year_fraction};
use bs_engine::models::{OptionParameters, OptionType};
use bs_engine::payoff::payoff_profile;
use bs_engine::position::Position;
use bs_engine::sweep::{default_range, default_surface, sweep, sweep_curve, Axis, SweepField};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("bs-engine Pricing Demo");
    println!("======================\n");

    let config = EngineConfig::from_env()?;

    // Synthetic three-month closing series standing in for a market data feed
    let closes: Vec<f64> = (0..63)
        .map(|i| {
            let t = i as f64;
            180.0 * (1.0 + 0.0004 * t + 0.012 * (t * 0.9).sin() + 0.006 * (t * 2.3).cos())
        })
        .collect();
    let spot = *closes.last().ok_or("empty price history")?;

    let full = historical_volatility(&closes, config.trading_periods_per_year)?;
    let recent = trailing_volatility(&closes, config.volatility_window, config.trading_periods_per_year)?;
    println!("1. Historical volatility");
    println!("   3-month: {:.1}% over {} returns", full.annualized * 100.0, full.observations);
    println!(
        "   {}-day:  {:.1}%",
        config.volatility_window,
        recent.annualized * 100.0
    );

    let as_of = expiry_at_midnight(NaiveDate::from_ymd_opt(2025, 1, 2).ok_or("bad date")?);
    let expiry = expiry_at_midnight(NaiveDate::from_ymd_opt(2025, 3, 21).ok_or("bad date")?);
    let t = year_fraction(as_of, expiry)?;

    let params = OptionParameters::new(spot, 180.0, t, 0.05, recent.annualized, OptionType::Call)?;
    let eval = evaluate(&params)?;
    println!("\n2. {} option, S={:.2} K={:.2} T={:.4}y", params.option_type, spot, params.strike, t);
    println!("   Price: {:.4}  (d1={:.4}, d2={:.4})", eval.pricing.price, eval.pricing.d1, eval.pricing.d2);
    for greek in Greek::ALL {
        println!("   {:<6} {:>10.5}", greek.name(), eval.greeks.get(greek));
    }

    let position = Position::with_config(5, &config)?;
    let scaled = position.scale_greeks(&eval.greeks);
    println!("\n3. Position of {} contracts x {}", position.contracts, position.multiplier);
    println!("   Market value: {:.2}", position.market_value(eval.pricing.price));
    println!("   Dollar delta: {:.2}  Theta/day: {:.2}", scaled.delta * spot, scaled.theta);

    let profile = payoff_profile(params.option_type, params.strike, eval.pricing.price)?;
    println!("\n4. Payoff at expiry");
    println!("   Breakeven: {:.2}", profile.breakeven);
    println!("   Max loss:  {:.2}", profile.max_loss);
    match profile.max_profit {
        Some(max) => println!("   Max profit: {:.2}", max),
        None => println!("   Max profit: unlimited"),
    }

    println!("\n5. Spot sensitivity");
    let range = default_range(SweepField::Spot, &params, &config)?;
    let curve = sweep_curve(&params, Axis::new(SweepField::Spot, range))?;
    for point in curve.points.iter().step_by(10) {
        println!(
            "   S={:>8.2}  price={:>8.4}  delta={:>7.4}",
            point.value,
            point.price().unwrap_or(f64::NAN),
            point.greek(Greek::Delta).unwrap_or(f64::NAN)
        );
    }

    println!("\n6. Gamma surface (spot x volatility)");
    let grid = sweep(&params, &default_surface(&params, &config)?)?;
    if let Some(surface) = grid.as_surface() {
        let gamma = surface.greek_surface(Greek::Gamma);
        let peak = gamma.iter().flatten().cloned().fold(f64::MIN, f64::max);
        let (rows, cols) = surface.shape();
        println!("   {}x{} cells, peak gamma {:.5}", rows, cols, peak);
    }

    Ok(())
}
