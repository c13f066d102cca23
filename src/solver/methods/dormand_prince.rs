//! Dormand–Prince 5(4) adaptive integrator
//!
//! # Mathematical Background
//!
//! Seven stages produce a fifth-order solution and an embedded fourth-order
//! one. Their difference estimates the local error, which drives the step
//! size:
//!
//! ```text
//! err  = h · Σ Eᵢ kᵢ
//! ‖err‖ = |err| / (atol + rtol · max(|yₙ|, |yₙ₊₁|))
//!
//! accept if ‖err‖ ≤ 1
//! h ← h · clamp(0.9 · ‖err‖^(−1/5), 0.2, 10)
//! ```
//!
//! The last stage is evaluated at the new solution and reused as the first
//! stage of the next step (FSAL), so an accepted step costs six evaluations.
//!
//! # Characteristics
//!
//! - **Order**: 5 (local extrapolation)
//! - **Step control**: error-per-step, capped by `max_step`
//! - **Termination**: bounded by `max_steps` attempts and
//!   `max_consecutive_rejections`; a step below `min_step` is a failure
//!
//! # Why adaptive?
//!
//! A single run integrates one-week exhibitions and fifty-year storage
//! spans. The acid level barely moves for years and then climbs steeply,
//! so a fixed step is either wasteful early or inaccurate late.

use log::trace;

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
// Butcher tableau
// =================================================================================================

const A21: f64 = 1.0 / 5.0;

const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;

const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;

const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;

const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights (B2 = B7 = 0)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Fifth minus fourth order weights (E2 = 0)
const E1: f64 = -71.0 / 57600.0;
const E3: f64 = 71.0 / 16695.0;
const E4: f64 = -71.0 / 1920.0;
const E5: f64 = 17253.0 / 339200.0;
const E6: f64 = -22.0 / 525.0;
const E7: f64 = 1.0 / 40.0;

// =================================================================================================
// Step controller
// =================================================================================================

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const ERROR_EXPONENT: f64 = -1.0 / 5.0;

/// One attempted step
struct Trial {
    value: f64,
    slope: f64,
    error: f64,
}

/// Adaptive embedded Runge–Kutta 5(4) integrator
///
/// # Example
///
/// ```rust
/// use cta_aging::physics::{ChemicalState, DegradationOde};
/// use cta_aging::solver::{DormandPrince, Integrator, IntegratorConfiguration};
///
/// let ode = DegradationOde::new(1e-16, &ChemicalState::reference());
/// let config = IntegratorConfiguration::default().recording();
///
/// let result = DormandPrince::new().integrate(&ode, 52.0, 30.0 * 86_400.0, &config)?;
///
/// assert_eq!(result.time_points.last(), Some(&(30.0 * 86_400.0)));
/// assert!(result.trajectory.windows(2).all(|w| w[1] >= w[0]));
/// # Ok::<(), cta_aging::IntegrationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DormandPrince;

impl DormandPrince {
    pub fn new() -> Self {
        Self
    }

    /// Attempt one step of size `h` from `(value, slope)`
    fn attempt(model: &dyn RateModel, value: f64, slope: f64, h: f64) -> Trial {
        let k1 = slope;
        let k2 = model.derivative(value + h * (A21 * k1));
        let k3 = model.derivative(value + h * (A31 * k1 + A32 * k2));
        let k4 = model.derivative(value + h * (A41 * k1 + A42 * k2 + A43 * k3));
        let k5 = model.derivative(value + h * (A51 * k1 + A52 * k2 + A53 * k3 + A54 * k4));
        let k6 = model.derivative(
            value + h * (A61 * k1 + A62 * k2 + A63 * k3 + A64 * k4 + A65 * k5),
        );

        let next = value + h * (B1 * k1 + B3 * k3 + B4 * k4 + B5 * k5 + B6 * k6);
        let k7 = model.derivative(next);

        let error = h * (E1 * k1 + E3 * k3 + E4 * k4 + E5 * k5 + E6 * k6 + E7 * k7);

        Trial { value: next, slope: k7, error }
    }

    /// Starting step from the local scale of the solution
    ///
    /// Hairer, Nørsett & Wanner, *Solving ODEs I*, §II.4. Costs one extra
    /// evaluation.
    fn initial_step(
        model: &dyn RateModel,
        value: f64,
        slope: f64,
        duration: f64,
        config: &IntegratorConfiguration,
    ) -> f64 {
        let scale = config.absolute_tolerance + value.abs() * config.relative_tolerance;
        let d0 = value.abs() / scale;
        let d1 = slope.abs() / scale;

        let h0 = if d0 < 1e-5 || d1 < 1e-5 { 1e-6 } else { 0.01 * d0 / d1 };
        let h0 = h0.min(duration);

        let trial = model.derivative(value + h0 * slope);
        let d2 = ((trial - slope) / scale).abs() / h0;

        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(-ERROR_EXPONENT)
        };

        (100.0 * h0).min(h1).min(duration)
    }

    fn growth_factor(error_norm: f64) -> f64 {
        if error_norm == 0.0 {
            MAX_FACTOR
        } else {
            (SAFETY * error_norm.powf(ERROR_EXPONENT)).min(MAX_FACTOR)
        }
    }

    fn shrink_factor(error_norm: f64) -> f64 {
        if error_norm.is_finite() {
            (SAFETY * error_norm.powf(ERROR_EXPONENT)).max(MIN_FACTOR)
        } else {
            MIN_FACTOR
        }
    }
}

impl Integrator for DormandPrince {
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

        let record = config.record_steps;
        let mut time_points = Vec::new();
        let mut trajectory = Vec::new();
        if record {
            time_points.push(0.0);
            trajectory.push(initial);
        }

        let mut stats = IntegrationStats::default();

        if duration == 0.0 {
            return Ok(finish(initial, time_points, trajectory, stats, duration));
        }

        // ====== Step 2: Setup ======

        let mut time = 0.0;
        let mut value = initial;
        let mut slope = model.derivative(value);
        stats.function_evaluations += 1;

        if !slope.is_finite() {
            return Err(IntegrationError::NonFinite { time, value: slope });
        }

        let mut h = match config.first_step {
            Some(first) => first,
            None => {
                stats.function_evaluations += 1;
                Self::initial_step(model, value, slope, duration, config)
            }
        };
        h = h.min(config.max_step);

        let mut rejections = 0usize;
        let mut attempts = 0usize;

        // ====== Step 3: Adaptive stepping ======

        while time < duration {
            if attempts >= config.max_steps {
                return Err(IntegrationError::StepBudgetExhausted {
                    time,
                    duration,
                    max_steps: config.max_steps,
                });
            }
            attempts += 1;

            let remaining = duration - time;
            let floor = config.min_step.max(10.0 * f64::EPSILON * time.abs());

            // The final step is clipped to land exactly on `duration`, even
            // when the remainder is below the floor.
            let last = h >= remaining;
            if last {
                h = remaining;
            } else if h < floor {
                return Err(IntegrationError::StepSizeCollapse { time, step: h, floor });
            }

            let trial = Self::attempt(model, value, slope, h);
            stats.function_evaluations += 6;

            let scale = config.absolute_tolerance
                + config.relative_tolerance * value.abs().max(trial.value.abs());
            let error_norm = (trial.error / scale).abs();

            let acceptable = trial.value.is_finite() && trial.slope.is_finite() && error_norm <= 1.0;

            if acceptable {
                let mut factor = Self::growth_factor(error_norm);
                if rejections > 0 {
                    factor = factor.min(1.0);
                }

                time = if last { duration } else { time + h };
                value = trial.value;
                slope = trial.slope;

                check_state(model, value, time, config)?;

                stats.accepted_steps += 1;
                rejections = 0;

                if record {
                    time_points.push(time);
                    trajectory.push(value);
                }

                h = (h * factor).min(config.max_step);
            } else {
                stats.rejected_steps += 1;
                rejections += 1;

                if rejections >= config.max_consecutive_rejections {
                    if !trial.value.is_finite() {
                        return Err(IntegrationError::NonFinite { time: time + h, value: trial.value });
                    }
                    return Err(IntegrationError::TooManyRejections { time, rejections });
                }

                h *= Self::shrink_factor(error_norm);
                trace!("{}: rejected step at t = {:.6e} s, retrying with h = {:.3e} s", model.name(), time, h);
            }
        }

        // ====== Step 4: Build Result ======

        Ok(finish(value, time_points, trajectory, stats, duration))
    }

    fn name(&self) -> &str {
        "Dormand-Prince 5(4)"
    }
}

fn finish(
    value: f64,
    time_points: Vec<f64>,
    trajectory: Vec<f64>,
    stats: IntegrationStats,
    duration: f64,
) -> IntegrationResult {
    let mut result = IntegrationResult::new(value, time_points, trajectory, stats);

    result.add_metadata("solver", "Dormand-Prince 5(4)");
    result.add_metadata("duration", &duration.to_string());
    result.add_metadata("accepted steps", &stats.accepted_steps.to_string());
    result.add_metadata("rejected steps", &stats.rejected_steps.to_string());
    result.add_metadata("function evaluations", &stats.function_evaluations.to_string());

    result
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{ChemicalState, DegradationOde, KineticConstants};

    // ====== Mock Models for Testing ======

    /// dy/dt = -k * y, y(t) = y₀ exp(-k t)
    struct ExponentialDecay {
        decay_rate: f64,
    }

    impl RateModel for ExponentialDecay {
        fn derivative(&self, value: f64) -> f64 {
            -self.decay_rate * value
        }

        fn name(&self) -> &str {
            "Exponential Decay"
        }
    }

    /// dy/dt = y², blows up at t = 1/y₀
    struct BlowUp;

    impl RateModel for BlowUp {
        fn derivative(&self, value: f64) -> f64 {
            value * value
        }

        fn name(&self) -> &str {
            "Blow-up"
        }
    }

    /// Finite only at y = 1
    struct Poisoned;

    impl RateModel for Poisoned {
        fn derivative(&self, value: f64) -> f64 {
            if value == 1.0 { 1.0 } else { f64::NAN }
        }

        fn name(&self) -> &str {
            "Poisoned"
        }
    }

    fn tight() -> IntegratorConfiguration {
        IntegratorConfiguration::new()
            .with_tolerances(1e-10, 1e-12)
            .with_max_step(f64::INFINITY)
    }

    // ====== Accuracy ======

    #[test]
    fn test_exponential_decay_accuracy() {
        let model = ExponentialDecay { decay_rate: 0.3 };
        let result = DormandPrince::new().integrate(&model, 1.0, 10.0, &tight()).unwrap();

        let exact = (-0.3_f64 * 10.0).exp();
        assert!(
            (result.final_value - exact).abs() < 1e-8,
            "got {}, expected {}",
            result.final_value,
            exact
        );
    }

    #[test]
    fn test_accuracy_improves_with_tolerance() {
        let model = ExponentialDecay { decay_rate: 1.0 };
        let exact = (-5.0_f64).exp();

        let loose = IntegratorConfiguration::new().with_tolerances(1e-3, 1e-6);
        let loose_error = (DormandPrince::new().integrate(&model, 1.0, 5.0, &loose).unwrap().final_value - exact).abs();
        let tight_error = (DormandPrince::new().integrate(&model, 1.0, 5.0, &tight()).unwrap().final_value - exact).abs();

        assert!(tight_error < loose_error);
    }

    #[test]
    fn test_max_step_is_respected() {
        let model = ExponentialDecay { decay_rate: 1e-6 };
        let config = IntegratorConfiguration::new().with_max_step(10.0).recording();

        let result = DormandPrince::new().integrate(&model, 1.0, 1000.0, &config).unwrap();

        assert!(result.stats.accepted_steps >= 100);
        for pair in result.time_points.windows(2) {
            assert!(pair[1] - pair[0] <= 10.0 + 1e-9);
        }
    }

    // ====== Edge cases ======

    #[test]
    fn test_zero_duration_returns_initial() {
        let model = ExponentialDecay { decay_rate: 1.0 };
        let result = DormandPrince::new()
            .integrate(&model, 3.5, 0.0, &IntegratorConfiguration::default())
            .unwrap();

        assert_eq!(result.final_value, 3.5);
        assert_eq!(result.stats.accepted_steps, 0);
    }

    #[test]
    fn test_zero_acid_stays_zero() {
        let ode = DegradationOde::new(1e-10, &ChemicalState::reference());
        let result = DormandPrince::new()
            .integrate(&ode, 0.0, 1e8, &IntegratorConfiguration::default())
            .unwrap();

        assert_eq!(result.final_value, 0.0);
    }

    #[test]
    fn test_lands_exactly_on_duration() {
        let model = ExponentialDecay { decay_rate: 0.1 };
        let config = IntegratorConfiguration::default().recording();
        let duration = 7.0 * 86_400.0;

        let result = DormandPrince::new().integrate(&model, 1.0, duration, &config).unwrap();

        assert_eq!(result.time_points.first(), Some(&0.0));
        assert_eq!(result.time_points.last(), Some(&duration));
        assert_eq!(result.trajectory.len(), result.time_points.len());
        assert_eq!(result.trajectory.last(), Some(&result.final_value));
    }

    #[test]
    fn test_degradation_trajectory_monotonic_and_bounded() {
        let state = ChemicalState::reference();
        let ode = DegradationOde::at_temperature(298.15, &KineticConstants::reference(), &state).unwrap();
        let config = IntegratorConfiguration::default().recording();
        let fifty_years = 50.0 * 365.25 * 86_400.0;

        let result = DormandPrince::new()
            .integrate(&ode, state.acetic_acid, fifty_years, &config)
            .unwrap();

        for pair in result.trajectory.windows(2) {
            assert!(pair[1] >= pair[0], "{} -> {}", pair[0], pair[1]);
        }
        for &hoac in &result.trajectory {
            assert!(hoac >= 0.0 && hoac <= state.acid_ceiling() + config.range_slack(state.acid_ceiling()));
        }
        assert!(result.final_value > state.acetic_acid);
    }

    // ====== Failure modes ======

    #[test]
    fn test_step_budget_exhausted() {
        let model = ExponentialDecay { decay_rate: 1e-9 };
        let config = IntegratorConfiguration::new().with_max_step(1e5).with_max_steps(5);

        let err = DormandPrince::new().integrate(&model, 1.0, 1e7, &config).unwrap_err();
        assert!(matches!(err, IntegrationError::StepBudgetExhausted { max_steps: 5, .. }));
    }

    #[test]
    fn test_step_size_collapse() {
        let model = ExponentialDecay { decay_rate: 1.0 };
        let config = IntegratorConfiguration::new().with_first_step(1e-12);

        let err = DormandPrince::new().integrate(&model, 1.0, 1.0, &config).unwrap_err();
        assert!(matches!(err, IntegrationError::StepSizeCollapse { .. }));
    }

    #[test]
    fn test_too_many_rejections() {
        let model = ExponentialDecay { decay_rate: 1.0 };
        let config = IntegratorConfiguration {
            max_consecutive_rejections: 1,
            ..IntegratorConfiguration::new()
                .with_tolerances(1e-10, 1e-12)
                .with_first_step(1e3)
                .with_max_step(1e4)
        };

        let err = DormandPrince::new().integrate(&model, 1.0, 1e4, &config).unwrap_err();
        assert!(matches!(err, IntegrationError::TooManyRejections { rejections: 1, .. }));
    }

    #[test]
    fn test_non_finite_derivative() {
        let config = IntegratorConfiguration {
            max_consecutive_rejections: 3,
            ..IntegratorConfiguration::default()
        };
        let err = DormandPrince::new()
            .integrate(&Poisoned, 1.0, 1.0, &config)
            .unwrap_err();
        assert!(matches!(err, IntegrationError::NonFinite { .. }));
    }

    #[test]
    fn test_blow_up_fails_instead_of_returning() {
        let config = IntegratorConfiguration::new().with_max_step(0.1).with_max_steps(100_000);
        let result = DormandPrince::new().integrate(&BlowUp, 1.0, 2.0, &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_initial_value_out_of_range() {
        let ode = DegradationOde::new(1e-16, &ChemicalState::reference());
        let err = DormandPrince::new()
            .integrate(&ode, 5_000.0, 1.0, &IntegratorConfiguration::default())
            .unwrap_err();
        assert!(matches!(err, IntegrationError::OutOfBounds { .. }));
    }

    #[test]
    fn test_metadata() {
        let model = ExponentialDecay { decay_rate: 1.0 };
        let result = DormandPrince::new()
            .integrate(&model, 1.0, 1.0, &IntegratorConfiguration::default())
            .unwrap();

        assert_eq!(result.metadata("solver"), Some("Dormand-Prince 5(4)"));
        assert_eq!(
            result.metadata("accepted steps"),
            Some(result.stats.accepted_steps.to_string().as_str())
        );
        assert_eq!(DormandPrince::new().name(), "Dormand-Prince 5(4)");
    }

    #[test]
    fn test_sampled_integration() {
        let model = ExponentialDecay { decay_rate: 0.5 };
        let samples = DormandPrince::new()
            .integrate_sampled(&model, 1.0, &[0.0, 1.0, 2.0, 2.0, 4.0], &tight())
            .unwrap();

        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[2], samples[3]);
        for (i, t) in [0.0_f64, 1.0, 2.0, 2.0, 4.0].iter().enumerate() {
            assert!((samples[i] - (-0.5 * t).exp()).abs() < 1e-8);
        }
    }

    #[test]
    fn test_sampled_rejects_decreasing_times() {
        let model = ExponentialDecay { decay_rate: 0.5 };
        let err = DormandPrince::new()
            .integrate_sampled(&model, 1.0, &[2.0, 1.0], &IntegratorConfiguration::default())
            .unwrap_err();
        assert!(matches!(err, IntegrationError::InvalidInput(_)));
    }
}
