//! Integrator traits and types
//!
//! # Design
//!
//! - `Integrator` trait: advances a [`RateModel`] across one interval
//! - `IntegratorConfiguration`: tolerances, step bounds and budgets
//! - `IntegrationResult`: final value, optional step trajectory, counters
//!
//! An integrator is stateless: the same instance can be shared by every
//! phase of every sweep cell.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AgingError, IntegrationError, Result};
use crate::physics::RateModel;

// =================================================================================================
// Integrator configuration
// =================================================================================================

/// Numerical parameters of an integration run
///
/// # Defaults
///
/// | Field                        | Default     |
/// |------------------------------|-------------|
/// | `relative_tolerance`         | 1e-3        |
/// | `absolute_tolerance`         | 1e-6        |
/// | `max_step`                   | 1e5 s       |
/// | `first_step`                 | automatic   |
/// | `min_step`                   | 1e-10 s     |
/// | `max_steps`                  | 1 000 000   |
/// | `max_consecutive_rejections` | 50          |
/// | `record_steps`               | false       |
///
/// `max_step` is the knob that matters most: the same run mixes one-week
/// exhibitions with decades of storage, and without a cap the controller
/// happily steps over a whole season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfiguration {
    /// Relative error tolerance per step
    pub relative_tolerance: f64,

    /// Absolute error tolerance per step (mol/m³)
    pub absolute_tolerance: f64,

    /// Largest step the controller may take (s)
    pub max_step: f64,

    /// Initial step (s); chosen from the local derivative when `None`
    pub first_step: Option<f64>,

    /// Floor below which the step size is considered collapsed (s)
    pub min_step: f64,

    /// Budget of step attempts (accepted + rejected) per interval
    pub max_steps: usize,

    /// Rejected attempts in a row before giving up
    pub max_consecutive_rejections: usize,

    /// Keep every accepted step in the result
    pub record_steps: bool,
}

impl Default for IntegratorConfiguration {
    fn default() -> Self {
        Self {
            relative_tolerance: 1e-3,
            absolute_tolerance: 1e-6,
            max_step: 1e5,
            first_step: None,
            min_step: 1e-10,
            max_steps: 1_000_000,
            max_consecutive_rejections: 50,
            record_steps: false,
        }
    }
}

impl IntegratorConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(mut self, relative: f64, absolute: f64) -> Self {
        self.relative_tolerance = relative;
        self.absolute_tolerance = absolute;
        self
    }

    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    pub fn with_first_step(mut self, first_step: f64) -> Self {
        self.first_step = Some(first_step);
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn recording(mut self) -> Self {
        self.record_steps = true;
        self
    }

    /// Tolerance band used for the admissible-range check
    pub fn range_slack(&self, magnitude: f64) -> f64 {
        self.absolute_tolerance + self.relative_tolerance * magnitude.abs()
    }

    /// Validate that parameters are meaningful
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("relative tolerance", self.relative_tolerance),
            ("absolute tolerance", self.absolute_tolerance),
            ("max step", self.max_step),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(AgingError::configuration(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !self.min_step.is_finite() || self.min_step < 0.0 {
            return Err(AgingError::configuration(format!(
                "min step must be a non-negative finite value, got {}",
                self.min_step
            )));
        }
        if self.min_step >= self.max_step {
            return Err(AgingError::configuration(format!(
                "min step {} must be below max step {}",
                self.min_step, self.max_step
            )));
        }
        if let Some(first) = self.first_step
            && (!first.is_finite() || first <= 0.0)
        {
            return Err(AgingError::configuration(format!(
                "first step must be positive and finite, got {}",
                first
            )));
        }
        if self.max_steps == 0 {
            return Err(AgingError::configuration("max steps must be greater than 0"));
        }
        if self.max_consecutive_rejections == 0 {
            return Err(AgingError::configuration(
                "max consecutive rejections must be greater than 0",
            ));
        }

        Ok(())
    }
}

// =================================================================================================
// Integration result
// =================================================================================================

/// Work counters of one integration run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub function_evaluations: usize,
}

/// Outcome of integrating one interval
///
/// `time_points`/`trajectory` are only filled when
/// [`IntegratorConfiguration::record_steps`] is set; they then start with the
/// initial condition at t = 0 and end with the final value.
#[derive(Debug, Clone)]
pub struct IntegrationResult {
    /// State at the end of the interval
    pub final_value: f64,

    /// Times of accepted steps (s from interval start)
    pub time_points: Vec<f64>,

    /// State after each accepted step
    pub trajectory: Vec<f64>,

    pub stats: IntegrationStats,

    metadata: HashMap<String, String>,
}

impl IntegrationResult {
    pub fn new(final_value: f64, time_points: Vec<f64>, trajectory: Vec<f64>, stats: IntegrationStats) -> Self {
        Self {
            final_value,
            time_points,
            trajectory,
            stats,
            metadata: HashMap::new(),
        }
    }

    /// Number of recorded points
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

// =================================================================================================
// Integrator trait
// =================================================================================================

/// Numerical method advancing a scalar rate model in time
pub trait Integrator: Send + Sync {
    /// Integrate `model` from `initial` over `[0, duration]` seconds
    ///
    /// # Errors
    ///
    /// [`IntegrationError`] when the configuration or interval is invalid,
    /// the state becomes non-finite, leaves the model's admissible range, or
    /// the step controller cannot make progress within its budget.
    fn integrate(
        &self,
        model: &dyn RateModel,
        initial: f64,
        duration: f64,
        config: &IntegratorConfiguration,
    ) -> std::result::Result<IntegrationResult, IntegrationError>;

    /// State at each of `sample_times` (s, non-decreasing, ≥ 0)
    ///
    /// The integrator lands exactly on every sample time.
    fn integrate_sampled(
        &self,
        model: &dyn RateModel,
        initial: f64,
        sample_times: &[f64],
        config: &IntegratorConfiguration,
    ) -> std::result::Result<Vec<f64>, IntegrationError> {
        let mut samples = Vec::with_capacity(sample_times.len());
        let mut time = 0.0;
        let mut value = initial;

        for &target in sample_times {
            if !target.is_finite() || target < time {
                return Err(IntegrationError::InvalidInput(format!(
                    "sample times must be finite, non-negative and non-decreasing (got {} after {})",
                    target, time
                )));
            }
            if target > time {
                value = self.integrate(model, value, target - time, config)?.final_value;
                time = target;
            }
            samples.push(value);
        }

        Ok(samples)
    }

    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
