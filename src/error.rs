//! Error types
//!
//! Three failure families are distinguished:
//!
//! - **Domain**: non-physical input (non-positive temperature, negative
//!   duration, initial acid above the stoichiometric ceiling).
//! - **Configuration**: an incomplete setup, e.g. a season missing from a
//!   climate table.
//! - **Integration**: the ODE solver could not produce a trustworthy value.
//!
//! Domain and configuration errors are raised before any integration work.
//! Integration errors are scoped to a single sweep cell and are therefore
//! `Clone + PartialEq` so they can be stored inside a [`ResultMatrix`].
//!
//! [`ResultMatrix`]: crate::sweep::ResultMatrix

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AgingError>;

/// Unified error type for aging simulations.
#[derive(Error, Debug)]
pub enum AgingError {
    /// Non-physical input value
    #[error("Domain error: {0}")]
    Domain(String),

    /// Missing or inconsistent configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Solver failure for one integration interval
    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),

    /// Scenario (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgingError {
    /// Creates a domain error.
    pub fn domain(message: impl Into<String>) -> Self {
        AgingError::Domain(message.into())
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        AgingError::Configuration(message.into())
    }

    /// True for errors that only affect the current grid cell.
    pub fn is_cell_local(&self) -> bool {
        matches!(self, AgingError::Integration(_))
    }
}

/// Failure modes of the adaptive integrator.
///
/// Times are reported in seconds from the start of the integration interval.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
    /// Arguments rejected before stepping started
    #[error("invalid integrator input: {0}")]
    InvalidInput(String),

    /// NaN or infinity appeared in the state or the derivative
    #[error("non-finite state {value} at t = {time:.6e} s")]
    NonFinite { time: f64, value: f64 },

    /// The controller asked for a step below the floor
    #[error("step size collapsed to {step:.3e} s at t = {time:.6e} s (floor {floor:.3e} s)")]
    StepSizeCollapse { time: f64, step: f64, floor: f64 },

    /// Error estimate did not shrink after repeated step reductions
    #[error("{rejections} consecutive rejected steps at t = {time:.6e} s")]
    TooManyRejections { time: f64, rejections: usize },

    /// Step attempt budget spent before reaching the end of the interval
    #[error("step budget of {max_steps} exhausted at t = {time:.6e} s of {duration:.6e} s")]
    StepBudgetExhausted { time: f64, duration: f64, max_steps: usize },

    /// State left its admissible range by more than the solver tolerance
    #[error("state {value} left admissible range [{lower}, {upper}] at t = {time:.6e} s")]
    OutOfBounds { time: f64, value: f64, lower: f64, upper: f64 },
}
