//! Arrhenius rate constant
//!
//! ```text
//! k = A · exp(−Ea / (R · T))
//! ```
//!
//! Temperatures are in Kelvin. Non-positive values are rejected; values below
//! 200 K are accepted but logged, since they are usually Celsius entered by
//! mistake.

use log::warn;

use crate::error::{AgingError, Result};
use crate::physics::constants::{KineticConstants, SUSPICIOUS_KELVIN};

/// Reaction rate constant at `temperature` (K)
///
/// # Errors
///
/// [`AgingError::Domain`] when the temperature is non-positive or not finite.
///
/// # Example
///
/// ```rust
/// use cta_aging::physics::{rate_constant, KineticConstants};
///
/// let constants = KineticConstants::reference();
/// let cold = rate_constant(275.15, &constants)?;
/// let warm = rate_constant(293.15, &constants)?;
/// assert!(warm > cold);
/// # Ok::<(), cta_aging::AgingError>(())
/// ```
pub fn rate_constant(temperature: f64, constants: &KineticConstants) -> Result<f64> {
    check_temperature(temperature)?;

    let exponent = -constants.activation_energy / (constants.gas_constant * temperature);
    Ok(constants.pre_exponential * exponent.exp())
}

/// Validate a Kelvin temperature, warning on values that look like Celsius
pub fn check_temperature(temperature: f64) -> Result<()> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(AgingError::domain(format!(
            "temperature must be a positive Kelvin value, got {}",
            temperature
        )));
    }

    if temperature < SUSPICIOUS_KELVIN {
        warn!(
            "temperature {} K is below {} K; check that the source data is not in Celsius",
            temperature, SUSPICIOUS_KELVIN
        );
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_value() {
        let constants = KineticConstants::reference();
        let k = rate_constant(275.15, &constants).unwrap();

        let expected = 0.00103 * (-70_734.0_f64 / (8.314 * 275.15)).exp();
        assert!((k - expected).abs() <= expected * 1e-12);
        assert!(k > 0.0);
    }

    #[test]
    fn test_monotonic_in_temperature() {
        let constants = KineticConstants::reference();
        let temperatures = [275.15, 280.15, 288.15, 293.15, 298.15];

        let rates: Vec<f64> = temperatures
            .iter()
            .map(|&t| rate_constant(t, &constants).unwrap())
            .collect();

        for pair in rates.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_non_positive_temperature_rejected() {
        let constants = KineticConstants::reference();

        assert!(matches!(rate_constant(0.0, &constants), Err(AgingError::Domain(_))));
        assert!(matches!(rate_constant(-5.0, &constants), Err(AgingError::Domain(_))));
        assert!(rate_constant(f64::NAN, &constants).is_err());
        assert!(rate_constant(f64::INFINITY, &constants).is_err());
    }

    #[test]
    fn test_celsius_value_is_accepted_but_tiny() {
        // 20 (°C read as K) is physically allowed, just implausible.
        let constants = KineticConstants::reference();
        let k = rate_constant(20.0, &constants).unwrap();
        assert!(k >= 0.0);
        assert!(k < rate_constant(275.15, &constants).unwrap());
    }
}
