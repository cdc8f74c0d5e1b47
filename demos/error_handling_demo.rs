// demos/error_handling_demo.rs
use bs_engine::analytics::bs_analytic::price;
use bs_engine::analytics::volatility::{historical_volatility, TRADING_DAYS_PER_YEAR};
use bs_engine::error::EngineError;
use bs_engine::models::{OptionParameters, OptionType};
use bs_engine::sweep::{sweep_curve, Axis, SweepField, SweepRange};

fn main() {
    println!("Error Handling Demo for bs-engine");
    println!("=================================\n");

    let valid = OptionParameters {
        spot: 100.0,
        strike: 100.0,
        time_to_expiry: 1.0,
        risk_free_rate: 0.05,
        volatility: 0.2,
        option_type: OptionType::Call,
    };

    // Test 1: Zero strike
    println!("1. Pricing with a zero strike...");
    match price(&valid.with_strike(0.0)) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: NaN volatility
    println!("\n2. Pricing with NaN volatility...");
    match price(&valid.with_volatility(f64::NAN)) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Unknown option type from user input
    println!("\n3. Parsing an unknown option type...");
    match "straddle".parse::<OptionType>() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Too little history
    println!("\n4. Historical volatility from one price...");
    match historical_volatility(&[100.0], TRADING_DAYS_PER_YEAR) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e @ EngineError::InsufficientData { .. }) => println!("   ✓ Caught error: {}", e),
        Err(e) => println!("   Wrong error kind: {}", e),
    }

    // Test 5: Sweep crossing zero keeps going
    println!("\n5. Sweeping spot through zero...");
    let range = SweepRange {
        min: -20.0,
        max: 20.0,
        steps: 5,
    };
    match sweep_curve(&valid, Axis::new(SweepField::Spot, range)) {
        Ok(curve) => {
            for point in &curve.points {
                match point.price() {
                    Some(p) => println!("   S={:>6.1}  price={:.6}", point.value, p),
                    None => println!("   S={:>6.1}  undefined", point.value),
                }
            }
            println!("   ✓ {} undefined of {} points", curve.undefined_count(), curve.len());
        }
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 6: Malformed sweep request
    println!("\n6. Sweeping an inverted range...");
    match SweepRange::new(120.0, 80.0, 10) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: Data layer failure
    println!("\n7. Reporting an unavailable quote...");
    let e = EngineError::DataUnavailable {
        source_name: "quote feed".to_string(),
        reason: "ticker not found".to_string(),
    };
    println!("   ✓ Surfaced to the caller: {}", e);

    println!("\n=================================");
    println!("Error handling demo completed!");
}
