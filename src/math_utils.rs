// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::{PI, SQRT_2};

/// Standard normal cumulative distribution function Φ(x).
///
/// Evaluated through the complementary error function so the lower tail keeps
/// full relative precision instead of cancelling against 1.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erf::erfc(-x / SQRT_2)
}

/// Standard normal probability density function φ(x) = e^(-x²/2) / √(2π)
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// `steps` evenly spaced values from `min` to `max` inclusive.
pub fn linspace(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (steps - 1) as f64;
            (0..steps)
                .map(|i| if i == steps - 1 { max } else { min + step * i as f64 })
                .collect()
        }
    }
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Timer::new()
    }
}
