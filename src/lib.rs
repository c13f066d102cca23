//! cta-aging: Degradation Kinetics of Cellulose-Triacetate Film
//!
//! Estimates how much acetic acid (HOAc) builds up in archival triacetate film
//! over decades when it alternates between exhibition rooms and a cold vault.
//!
//! # Architecture
//!
//! cta-aging follows two principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - [`physics`] defines the equations (Arrhenius rate, autocatalytic ODE)
//!    - [`solver`] provides the methods (adaptive Dormand–Prince, fixed RK4)
//!
//! 2. **Explicit configuration**
//!    - every run takes a [`scenario::ScenarioConfig`]; there are no global constants
//!    - each sweep cell owns its own chemical state
//!
//! On top of these sit [`climate`] (season → temperature), [`schedule`]
//! (the exhibition / cold-storage state machine) and [`sweep`] (the grid of
//! schedules).
//!
//! # Quick Start
//!
//! ```rust
//! use cta_aging::prelude::*;
//!
//! let config = ScenarioConfig::reference();
//! let integrator = DormandPrince::new();
//!
//! // One schedule: 2-week exhibitions, 1-year storage, 2015 → 2100
//! let hoac = PhaseScheduler::new(&config, PhasePlan::new(14, 12), &integrator)?.run()?;
//! assert!(hoac > config.initial.acetic_acid);
//!
//! // The full grid
//! let matrix = SweepEngine::new(config).run(&SweepGrid::reference())?;
//! assert_eq!(matrix.shape(), (5, 4));
//! # Ok::<(), cta_aging::AgingError>(())
//! ```
//!
//! # Modules
//!
//! - [`physics`]: constants, Arrhenius rate, degradation ODE
//! - [`solver`]: numerical integrators
//! - [`climate`]: seasonal temperature lookup
//! - [`schedule`]: phase timeline and per-phase integration
//! - [`scenario`]: run configuration and isothermal scenarios
//! - [`sweep`]: exhibition × cold-storage parameter sweep
//! - [`error`]: error types

pub mod error;
pub mod physics;
pub mod solver;

pub mod climate;
pub mod scenario;
pub mod schedule;
pub mod sweep;

pub use error::{AgingError, IntegrationError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use cta_aging::prelude::*;
    //! ```
    pub use crate::climate::{ClimateProfile, Season, SeasonTable};
    pub use crate::error::{AgingError, IntegrationError};
    pub use crate::physics::{ChemicalState, DegradationOde, KineticConstants, RateModel};
    pub use crate::scenario::{IsothermalCase, ScenarioConfig};
    pub use crate::schedule::{PhasePlan, PhaseScheduler};
    pub use crate::solver::{DormandPrince, Integrator, IntegratorConfiguration, Rk4Integrator};
    pub use crate::sweep::{CellOutcome, ResultMatrix, SweepEngine, SweepGrid};
}
