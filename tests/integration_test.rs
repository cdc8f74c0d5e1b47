// tests/integration_test.rs
use bs_engine::analytics::bs_analytic;
use bs_engine::analytics::volatility::{historical_volatility, trailing_volatility, TRADING_DAYS_PER_YEAR};
use bs_engine::expiry::{expiry_at_midnight, year_fraction};
use bs_engine::models::{OptionParameters, OptionType};
use bs_engine::payoff::{intrinsic_value, payoff_profile};
use bs_engine::position::Position;
use bs_engine::{EngineConfig, EngineError};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_put_call_parity() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut worst = 0.0_f64;

    for _ in 0..10_000 {
        let call = OptionParameters {
            spot: rng.gen_range(1.0..1_000.0),
            strike: rng.gen_range(1.0..1_000.0),
            time_to_expiry: rng.gen_range(0.001..10.0),
            risk_free_rate: rng.gen_range(-0.05..0.25),
            volatility: rng.gen_range(0.005..2.0),
            option_type: OptionType::Call,
        };
        let put = call.with_option_type(OptionType::Put);

        let c = bs_analytic::price(&call).unwrap().price;
        let p = bs_analytic::price(&put).unwrap().price;
        let forward_gap = call.spot - call.strike * call.discount_factor();
        let err = (c - p - forward_gap).abs();
        worst = worst.max(err);

        assert!(err < 1e-6, "parity broken by {} for {:?}", err, call);
        assert!(c >= 0.0 && p >= 0.0);
    }

    println!("\nWorst put-call parity residual: {:e}", worst);
}

#[test]
fn test_reference_scenario_rounded() {
    let call = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
    let eval = bs_analytic::evaluate(&call).unwrap();
    assert_eq!(format!("{:.4}", eval.pricing.price), "10.4506");
    assert_eq!(format!("{:.4}", eval.greeks.delta), "0.6368");
    assert_eq!(format!("{:.4}", eval.greeks.gamma), "0.0188");
    assert_eq!(format!("{:.4}", eval.greeks.vega), "0.3752");
    assert_eq!(format!("{:.5}", eval.greeks.theta), "-0.01757");
    assert_eq!(format!("{:.4}", eval.greeks.rho), "0.5323");

    let put = bs_analytic::evaluate(&call.with_option_type(OptionType::Put)).unwrap();
    assert_eq!(format!("{:.4}", put.pricing.price), "5.5735");
    assert_eq!(format!("{:.4}", put.greeks.delta), "-0.3632");
}

#[test]
fn test_boundary_errors() {
    let zero_strike = OptionParameters {
        spot: 100.0,
        strike: 0.0,
        time_to_expiry: 1.0,
        risk_free_rate: 0.05,
        volatility: 0.2,
        option_type: OptionType::Call,
    };
    assert!(matches!(
        bs_analytic::price(&zero_strike),
        Err(EngineError::InvalidParameter { .. })
    ));
    assert!(matches!(
        historical_volatility(&[100.0], TRADING_DAYS_PER_YEAR),
        Err(EngineError::InsufficientData { .. })
    ));
}

#[test]
fn test_history_to_price_pipeline() {
    // Daily closes alternating ±1%: log returns are ±ln(1.01)
    let mut closes = vec![100.0];
    for i in 0..60 {
        let last = *closes.last().unwrap();
        closes.push(if i % 2 == 0 { last * 1.01 } else { last / 1.01 });
    }

    let estimate = historical_volatility(&closes, TRADING_DAYS_PER_YEAR).unwrap();
    let r = 1.01_f64.ln();
    // 60 returns alternating ±r: mean 0, sample variance 60 r² / 59
    let expected = (60.0 * r * r / 59.0).sqrt() * 252f64.sqrt();
    assert!((estimate.annualized - expected).abs() < 1e-12);

    let config = EngineConfig::default();
    let recent = trailing_volatility(&closes, config.volatility_window, config.trading_periods_per_year).unwrap();
    assert_eq!(recent.observations, 30);

    let as_of = expiry_at_midnight(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    let expiry = expiry_at_midnight(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    let t = year_fraction(as_of, expiry).unwrap();
    assert!((t - 90.0 / 365.0).abs() < 1e-15);

    let spot = *closes.last().unwrap();
    let params = OptionParameters::new(spot, 100.0, t, 0.05, estimate.annualized, OptionType::Put).unwrap();
    let eval = bs_analytic::evaluate(&params).unwrap();
    assert!(eval.pricing.price > 0.0);
    assert!(eval.greeks.delta < 0.0 && eval.greeks.delta > -1.0);

    let position = Position::with_config(2, &config).unwrap();
    assert!((position.market_value(eval.pricing.price) - 200.0 * eval.pricing.price).abs() < 1e-9);
}

#[test]
fn test_price_bounded_by_payoff_profile() {
    let call = OptionParameters::new(120.0, 100.0, 0.25, 0.03, 0.3, OptionType::Call).unwrap();
    let premium = bs_analytic::price(&call).unwrap().price;

    // A European call is worth at least its discounted intrinsic value
    assert!(premium >= call.spot - call.strike * call.discount_factor());
    assert!(premium >= intrinsic_value(OptionType::Call, call.strike, call.spot));

    let profile = payoff_profile(OptionType::Call, call.strike, premium).unwrap();
    assert!((profile.breakeven - (100.0 + premium)).abs() < 1e-12);
    assert_eq!(profile.max_loss, premium);
    assert!(profile.max_profit.is_none());
}

#[test]
fn test_expired_option_is_an_error_not_a_floor() {
    let day = expiry_at_midnight(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());
    let err = year_fraction(day, day).unwrap_err();
    assert!(err.is_invalid_parameter());
}
