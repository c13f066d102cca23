//! Runge-Kutta 4 (RK4) fixed-step integrator
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method uses a weighted average of
//! four slope estimates:
//!
//! ```text
//! k₁ = f(yₙ)
//! k₂ = f(yₙ + dt/2 · k₁)
//! k₃ = f(yₙ + dt/2 · k₂)
//! k₄ = f(yₙ + dt · k₃)
//!
//! yₙ₊₁ = yₙ + dt/6 · (k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (global error ~ O(dt⁴))
//! - **Step**: fixed, `dt = duration / ceil(duration / max_step)`
//! - **Complexity**: 4 function evaluations per step
//! - **Error control**: none; tolerances only widen the range check
//!
//! # When to Use
//!
//! - Independent cross-check of [`DormandPrince`](super::DormandPrince)
//! - Benchmarks where a predictable step count is wanted
//!
//! Production runs should use the adaptive integrator.

use crate::error::IntegrationError;
use crate::physics::RateModel;
use crate::solver::{
    check_interval,
    check_state,
    IntegrationResult,
    IntegrationStats,
    Integrator,
    IntegratorConfiguration,
};

// =================================================================================================
// RK4 Integrator
// =================================================================================================

/// Classical fourth-order Runge-Kutta integrator with a fixed step
///
/// The step is the largest `dt ≤ max_step` that divides the interval into
/// a whole number of steps. `max_steps` caps that number.
///
/// # Example
///
/// ```rust
/// use cta_aging::physics::{ChemicalState, DegradationOde};
/// use cta_aging::solver::{Integrator, IntegratorConfiguration, Rk4Integrator};
///
/// let ode = DegradationOde::new(1e-16, &ChemicalState::reference());
/// let config = IntegratorConfiguration::default().with_max_step(3_600.0);
///
/// let result = Rk4Integrator::new().integrate(&ode, 52.0, 86_400.0, &config)?;
/// assert_eq!(result.stats.accepted_steps, 24);
/// # Ok::<(), cta_aging::IntegrationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4Integrator;

impl Rk4Integrator {
    /// Create a new RK4 integrator
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for Rk4Integrator {
    fn integrate(
        &self,
        model: &dyn RateModel,
        initial: f64,
        duration: f64,
        config: &IntegratorConfiguration,
    ) -> Result<IntegrationResult, IntegrationError> {
        // ====== Step 1: Validation ======

        check_interval(initial, duration, config)?;
        check_state(model, initial, 0.0, config)?;

        // ====== Step 2: Setup ======

        let steps: usize = if duration == 0.0 {
            0
        } else {
            (duration / config.max_step).ceil().max(1.0) as usize
        };

        if steps > config.max_steps {
            return Err(IntegrationError::StepBudgetExhausted {
                time: 0.0,
                duration,
                max_steps: config.max_steps,
            });
        }

        let dt = if steps == 0 { 0.0 } else { duration / steps as f64 };

        let record = config.record_steps;
        let capacity = if record { steps + 1 } else { 0 };
        let mut time_points = Vec::with_capacity(capacity);
        let mut trajectory = Vec::with_capacity(capacity);

        if record {
            time_points.push(0.0);
            trajectory.push(initial);
        }

        let mut value = initial;

        // ====== Step 3: Time Integration ======

        for step in 0..steps {
            let k1 = model.derivative(value);
            let k2 = model.derivative(value + k1 * (dt / 2.0));
            let k3 = model.derivative(value + k2 * (dt / 2.0));
            let k4 = model.derivative(value + k3 * dt);

            // Simpson weights: endpoints 1/6, midpoints 1/3
            value += (k1 + 2.0 * k2 + 2.0 * k3 + k4) * (dt / 6.0);

            // Time from the index, not by accumulation, so the last point
            // is exactly `duration`.
            let time = if step + 1 == steps { duration } else { (step as f64 + 1.0) * dt };

            check_state(model, value, time, config)?;

            if record {
                time_points.push(time);
                trajectory.push(value);
            }
        }

        // ====== Step 4: Build Result ======

        let stats = IntegrationStats {
            accepted_steps: steps,
            rejected_steps: 0,
            function_evaluations: 4 * steps,
        };

        let mut result = IntegrationResult::new(value, time_points, trajectory, stats);

        result.add_metadata("solver", "Runge-Kutta 4");
        result.add_metadata("time steps", &steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("duration", &duration.to_string());
        result.add_metadata("function evaluations", &(4 * steps).to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Runge Kutta (RK4)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
