//! Numerical integrators
//!
//! This module provides the trait and implementations that advance a
//! [`RateModel`] through time. An integrator applies a numerical method to
//! the equation supplied by the model; it knows nothing about seasons,
//! phases or sweeps.
//!
//! # Core Concepts
//!
//! 1. **Model** ([`RateModel`]) - WHAT to integrate
//! 2. **Configuration** ([`IntegratorConfiguration`]) - tolerances, step bounds, budgets
//! 3. **Integrator** ([`Integrator`] trait) - the method
//!
//! # Available Integrators
//!
//! - **[`DormandPrince`]**: embedded Runge–Kutta 5(4) with adaptive step
//!   control. The production integrator.
//! - **[`Rk4Integrator`]**: classical fixed-step RK4 with `dt ≤ max_step`.
//!   Used as an independent cross-check and in benchmarks.
//!
//! # Example
//!
//! ```rust
//! use cta_aging::physics::{ChemicalState, DegradationOde, KineticConstants};
//! use cta_aging::solver::{DormandPrince, Integrator, IntegratorConfiguration};
//!
//! let state = ChemicalState::reference();
//! let ode = DegradationOde::at_temperature(275.15, &KineticConstants::reference(), &state)?;
//!
//! let one_year = 365.25 * 86_400.0;
//! let result = DormandPrince::new()
//!     .integrate(&ode, state.acetic_acid, one_year, &IntegratorConfiguration::default())?;
//!
//! assert!(result.final_value > state.acetic_acid);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Error Handling
//!
//! Integrators return [`IntegrationError`] rather than a silently wrong
//! value:
//! - non-finite state or derivative
//! - state outside the model's admissible range (beyond tolerance)
//! - step size below the floor, too many rejections, step budget exhausted

// =================================================================================================
// Module Declarations
// =================================================================================================
mod methods;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    IntegrationResult,
    IntegrationStats,
    Integrator,
    IntegratorConfiguration,
};

pub use methods::{DormandPrince, Rk4Integrator};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::IntegrationError;
use crate::physics::RateModel;

/// Reject a bad interval or configuration before stepping starts
pub(crate) fn check_interval(
    initial: f64,
    duration: f64,
    config: &IntegratorConfiguration,
) -> Result<(), IntegrationError> {
    config
        .validate()
        .map_err(|e| IntegrationError::InvalidInput(e.to_string()))?;

    if !initial.is_finite() {
        return Err(IntegrationError::InvalidInput(format!(
            "initial value must be finite, got {}",
            initial
        )));
    }
    if !duration.is_finite() || duration < 0.0 {
        return Err(IntegrationError::InvalidInput(format!(
            "duration must be a non-negative finite number of seconds, got {}",
            duration
        )));
    }

    Ok(())
}

/// Validate a state produced at `time`
///
/// Checks for NaN/Inf and, when the model declares one, that the value
/// stays inside its admissible range widened by the solver tolerance.
pub(crate) fn check_state(
    model: &dyn RateModel,
    value: f64,
    time: f64,
    config: &IntegratorConfiguration,
) -> Result<(), IntegrationError> {
    if !value.is_finite() {
        return Err(IntegrationError::NonFinite { time, value });
    }

    if let Some((lower, upper)) = model.admissible_range() {
        let slack = config.range_slack(upper.abs().max(lower.abs()));
        if value < lower - slack || value > upper + slack {
            return Err(IntegrationError::OutOfBounds { time, value, lower, upper });
        }
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Bounded;

    impl RateModel for Bounded {
        fn derivative(&self, _value: f64) -> f64 {
            0.0
        }

        fn admissible_range(&self) -> Option<(f64, f64)> {
            Some((0.0, 100.0))
        }

        fn name(&self) -> &str {
            "Bounded"
        }
    }

    #[test]
    fn test_check_interval() {
        let config = IntegratorConfiguration::default();

        assert!(check_interval(1.0, 0.0, &config).is_ok());
        assert!(check_interval(1.0, 10.0, &config).is_ok());
        assert!(matches!(
            check_interval(1.0, -1.0, &config),
            Err(IntegrationError::InvalidInput(_))
        ));
        assert!(check_interval(f64::NAN, 1.0, &config).is_err());
        assert!(check_interval(1.0, f64::INFINITY, &config).is_err());

        let bad = IntegratorConfiguration::new().with_max_step(-1.0);
        assert!(matches!(check_interval(1.0, 1.0, &bad), Err(IntegrationError::InvalidInput(_))));
    }

    #[test]
    fn test_check_state_range_with_slack() {
        let config = IntegratorConfiguration::default();

        assert!(check_state(&Bounded, 50.0, 0.0, &config).is_ok());
        // slack = 1e-6 + 1e-3 * 100
        assert!(check_state(&Bounded, 100.05, 0.0, &config).is_ok());
        assert!(matches!(
            check_state(&Bounded, 101.0, 3.0, &config),
            Err(IntegrationError::OutOfBounds { time, .. }) if time == 3.0
        ));
        assert!(check_state(&Bounded, -1.0, 0.0, &config).is_err());
    }

    #[test]
    fn test_check_state_non_finite() {
        let config = IntegratorConfiguration::default();
        assert!(matches!(
            check_state(&Bounded, f64::NAN, 1.0, &config),
            Err(IntegrationError::NonFinite { .. })
        ));
    }
}
