//! Mock rate models for testing
//!
//! These models have known analytical solutions, making them
//! ideal for validating integrator accuracy.

#![allow(dead_code)]

use cta_aging::physics::RateModel;

// =================================================================================================
// Exponential Decay: dy/dt = -k*y
// =================================================================================================

/// Exponential decay model: dy/dt = -k*y
///
/// Analytical solution: y(t) = y₀ * exp(-k*t)
pub struct ExponentialDecay {
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(decay_rate: f64) -> Self {
        Self { decay_rate }
    }

    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (-self.decay_rate * t).exp()
    }
}

impl RateModel for ExponentialDecay {
    fn derivative(&self, value: f64) -> f64 {
        -self.decay_rate * value
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Constant Growth: dy/dt = c
// =================================================================================================

/// Constant growth model: dy/dt = c
///
/// Every Runge–Kutta method integrates this exactly.
pub struct ConstantGrowth {
    pub rate: f64,
}

impl ConstantGrowth {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 + self.rate * t
    }
}

impl RateModel for ConstantGrowth {
    fn derivative(&self, _value: f64) -> f64 {
        self.rate
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}

// =================================================================================================
// Logistic Growth: dy/dt = r*y*(1 - y/K)
// =================================================================================================

/// Logistic growth: bounded by the carrying capacity, like HOAc by its ceiling
///
/// Analytical solution: y(t) = K / (1 + (K/y₀ - 1) * exp(-r*t))
pub struct LogisticGrowth {
    pub rate: f64,
    pub capacity: f64,
}

impl LogisticGrowth {
    pub fn new(rate: f64, capacity: f64) -> Self {
        Self { rate, capacity }
    }

    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        self.capacity / (1.0 + (self.capacity / y0 - 1.0) * (-self.rate * t).exp())
    }
}

impl RateModel for LogisticGrowth {
    fn derivative(&self, value: f64) -> f64 {
        self.rate * value * (1.0 - value / self.capacity)
    }

    fn admissible_range(&self) -> Option<(f64, f64)> {
        Some((0.0, self.capacity))
    }

    fn name(&self) -> &str {
        "Logistic Growth"
    }
}
