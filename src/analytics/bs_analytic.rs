// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options, this has closed-form solutions involving
//! the cumulative normal distribution function Φ(x) and density φ(x).
//!
//! # Units
//!
//! Greeks follow trading-desk conventions: theta is per calendar day
//! ([`DAYS_PER_YEAR`]), vega and rho are per one percentage point
//! ([`VEGA_SCALE`], [`RHO_SCALE`]).

use crate::error::{EngineError, EngineResult};
use crate::math_utils::{norm_cdf, norm_pdf};
use crate::models::{OptionParameters, OptionType};

/// Theta divisor: annual theta to per-calendar-day theta
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Vega divisor: per unit of σ to per 1% volatility change
pub const VEGA_SCALE: f64 = 100.0;

/// Rho divisor: per unit of r to per 1% rate change
pub const RHO_SCALE: f64 = 100.0;

/// Option value with the normal-variate arguments it was computed from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingResult {
    pub price: f64,
    pub d1: f64,
    pub d2: f64,
}

/// First and second order sensitivities, in desk units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreeksResult {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ per 1% volatility
    pub vega: f64,
    /// ∂V/∂t per calendar day
    pub theta: f64,
    /// ∂V/∂r per 1% rate
    pub rho: f64,
}

/// Price and Greeks computed from one shared d1/d2
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub pricing: PricingResult,
    pub greeks: GreeksResult,
}

/// Greek selector used when extracting a single sensitivity from a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Greek {
    Delta,
    Gamma,
    Vega,
    Theta,
    Rho,
}

impl Greek {
    pub const ALL: [Greek; 5] = [Greek::Delta, Greek::Gamma, Greek::Vega, Greek::Theta, Greek::Rho];

    pub fn name(&self) -> &'static str {
        match self {
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Vega => "vega",
            Greek::Theta => "theta",
            Greek::Rho => "rho",
        }
    }
}

impl GreeksResult {
    pub fn get(&self, greek: Greek) -> f64 {
        match greek {
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Vega => self.vega,
            Greek::Theta => self.theta,
            Greek::Rho => self.rho,
        }
    }

    fn is_finite(&self) -> bool {
        Greek::ALL.iter().all(|g| self.get(*g).is_finite())
    }
}

/// Black-Scholes d₁ and d₂
///
/// # Formula
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
///
/// # Errors
/// - `InvalidParameter` for the same inputs [`price`] rejects
/// - `NumericalInstability` if S/K is so extreme that d₁ overflows
pub fn d1_d2(params: &OptionParameters) -> EngineResult<(f64, f64)> {
    params.validate()?;
    checked_d1_d2(params)
}

fn checked_d1_d2(params: &OptionParameters) -> EngineResult<(f64, f64)> {
    let OptionParameters {
        spot: s,
        strike: k,
        time_to_expiry: t,
        risk_free_rate: r,
        volatility: sigma,
        ..
    } = *params;
    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;
    ensure_finite("d1", d1, params)?;
    ensure_finite("d2", d2, params)?;
    Ok((d1, d2))
}

/// Black-Scholes European option price
///
/// # Formula
/// ```text
/// C(S,K,r,σ,T) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// P(S,K,r,σ,T) = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
///
/// # Errors
/// - `InvalidParameter` if S, K, T or σ is not finite and positive, or r is not finite
/// - `NumericalInstability` if the inputs are valid but the result overflows
pub fn price(params: &OptionParameters) -> EngineResult<PricingResult> {
    params.validate()?;
    let (d1, d2) = checked_d1_d2(params)?;
    let pricing = pricing_from(params, d1, d2);
    ensure_finite("price", pricing.price, params)?;
    Ok(pricing)
}

/// Black-Scholes Greeks
///
/// # Formulas
/// ```text
/// Δ_call = Φ(d₁)                    Δ_put = Φ(d₁) - 1
/// Γ      = φ(d₁) / (S σ √T)
/// ν      = S φ(d₁) √T / 100
/// Θ_call = [-S φ(d₁) σ / (2√T) - r K e^(-rT) Φ(d₂)]  / 365
/// Θ_put  = [-S φ(d₁) σ / (2√T) + r K e^(-rT) Φ(-d₂)] / 365
/// ρ_call =  K T e^(-rT) Φ(d₂)  / 100
/// ρ_put  = -K T e^(-rT) Φ(-d₂) / 100
/// ```
///
/// # Interpretation
/// - Gamma and vega are identical for calls and puts
/// - Vega is never negative: price is non-decreasing in volatility
/// - Theta is usually negative for long options
pub fn greeks(params: &OptionParameters) -> EngineResult<GreeksResult> {
    params.validate()?;
    let (d1, d2) = checked_d1_d2(params)?;
    let greeks = greeks_from(params, d1, d2);
    if !greeks.is_finite() {
        return Err(instability("greeks", params));
    }
    Ok(greeks)
}

/// Price and Greeks together, sharing one d1/d2 computation
pub fn evaluate(params: &OptionParameters) -> EngineResult<Evaluation> {
    params.validate()?;
    let (d1, d2) = checked_d1_d2(params)?;
    let pricing = pricing_from(params, d1, d2);
    ensure_finite("price", pricing.price, params)?;
    let greeks = greeks_from(params, d1, d2);
    if !greeks.is_finite() {
        return Err(instability("greeks", params));
    }
    Ok(Evaluation { pricing, greeks })
}

fn pricing_from(params: &OptionParameters, d1: f64, d2: f64) -> PricingResult {
    let s = params.spot;
    let discounted_strike = params.strike * params.discount_factor();
    let raw = match params.option_type {
        OptionType::Call => s * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionType::Put => discounted_strike * norm_cdf(-d2) - s * norm_cdf(-d1),
    };
    // Far out of the money the two terms cancel to within rounding of zero.
    // NaN must pass through so ensure_finite can report it.
    PricingResult {
        price: if raw < 0.0 { 0.0 } else { raw },
        d1,
        d2,
    }
}

fn greeks_from(params: &OptionParameters, d1: f64, d2: f64) -> GreeksResult {
    let s = params.spot;
    let k = params.strike;
    let r = params.risk_free_rate;
    let t = params.time_to_expiry;
    let sigma = params.volatility;

    let sqrt_t = t.sqrt();
    let exp_neg_rt = params.discount_factor();
    let pdf_d1 = norm_pdf(d1);

    let gamma = pdf_d1 / (s * sigma * sqrt_t);
    let vega = s * pdf_d1 * sqrt_t / VEGA_SCALE;
    let time_decay = -s * pdf_d1 * sigma / (2.0 * sqrt_t);

    match params.option_type {
        OptionType::Call => {
            let cdf_d2 = norm_cdf(d2);
            GreeksResult {
                delta: norm_cdf(d1),
                gamma,
                vega,
                theta: (time_decay - r * k * exp_neg_rt * cdf_d2) / DAYS_PER_YEAR,
                rho: k * t * exp_neg_rt * cdf_d2 / RHO_SCALE,
            }
        }
        OptionType::Put => {
            let cdf_neg_d2 = norm_cdf(-d2);
            GreeksResult {
                delta: norm_cdf(d1) - 1.0,
                gamma,
                vega,
                theta: (time_decay + r * k * exp_neg_rt * cdf_neg_d2) / DAYS_PER_YEAR,
                rho: -k * t * exp_neg_rt * cdf_neg_d2 / RHO_SCALE,
            }
        }
    }
}

fn ensure_finite(quantity: &str, value: f64, params: &OptionParameters) -> EngineResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(instability(quantity, params))
    }
}

fn instability(quantity: &str, params: &OptionParameters) -> EngineError {
    EngineError::NumericalInstability {
        quantity: quantity.to_string(),
        reason: format!(
            "non-finite result for S={}, K={}, T={}, r={}, σ={}",
            params.spot,
            params.strike,
            params.time_to_expiry,
            params.risk_free_rate,
            params.volatility
        ),
    }
}
