//! Degradation physics
//!
//! This module provides the equations of the aging model. It knows nothing
//! about how they are integrated or scheduled.
//!
//! # Core Concepts
//!
//! - **Kinetic constants**: Arrhenius parameters (A, Ea, R), fixed per run
//! - **Chemical state**: initial reactant reservoirs plus the current acid level
//! - **Rate constant**: `k = A · exp(−Ea / RT)`
//! - **Rate model**: right-hand side of `dHOAc/dt = f(HOAc)` at constant `k`
//!
//! # Architecture
//!
//! Physical models are **separate from numerical integrators**:
//! - The model provides the **equation** (physics)
//! - The integrator provides the **method** to advance it (numerics)
//!
//! # Example
//!
//! ```rust
//! use cta_aging::physics::{ChemicalState, DegradationOde, KineticConstants, RateModel};
//!
//! let state = ChemicalState::reference();
//! let ode = DegradationOde::at_temperature(275.15, &KineticConstants::reference(), &state)?;
//!
//! assert!(ode.derivative(state.acetic_acid) > 0.0);
//! assert_eq!(ode.derivative(0.0), 0.0);
//! # Ok::<(), cta_aging::AgingError>(())
//! ```

// module declaration
pub mod arrhenius;
pub mod constants;
pub mod degradation;
pub mod traits;

// re-export commonly used types for convenience
pub use arrhenius::{check_temperature, rate_constant};
pub use constants::{
    celsius_to_kelvin,
    free_acidity,
    kelvin_to_celsius,
    ChemicalState,
    KineticConstants,
    DAYS_PER_MONTH,
    DAYS_PER_YEAR,
    SECONDS_PER_DAY,
};
pub use degradation::DegradationOde;
pub use traits::RateModel;
