//! Rate model trait
//!
//! A rate model provides the right-hand side `f(y)` of a scalar autonomous
//! ODE `dy/dt = f(y)`. It does NOT integrate anything; that is the
//! integrator's job.

// =================================================================================================
// Rate Model Trait
// =================================================================================================

/// Trait for scalar rate models
///
/// # Responsibility
/// Evaluates the instantaneous rate of change at a given state.
///
/// The model provides the "physics" (equation), the integrator provides
/// the "numerics" (method to advance it).
///
/// # Thread safety
/// Models are shared read-only between sweep workers, hence `Send + Sync`.
pub trait RateModel: Send + Sync {
    /// Right-hand side f(y) of dy/dt = f(y)
    fn derivative(&self, value: f64) -> f64;

    /// Physically admissible range `[lower, upper]` of the state
    ///
    /// Integrators check every accepted step against this range (within
    /// tolerance) and fail instead of returning an out-of-range value.
    fn admissible_range(&self) -> Option<(f64, f64)> {
        None
    }

    /// Name of the model (used in logs and result metadata)
    fn name(&self) -> &str;

    /// Description of the model (optional)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
