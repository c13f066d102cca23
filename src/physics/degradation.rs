//! Autocatalytic deacetylation of cellulose triacetate
//!
//! # Mathematical Background
//!
//! Acetyl groups react with absorbed water to release acetic acid, and the
//! acid catalyses its own production:
//!
//! ```text
//! ROAc + H2O  →  ROH + HOAc        (catalysed by HOAc)
//!
//! dHOAc/dt = k · (ROAc₀ − HOAc) · (H2O₀ − HOAc) · HOAc
//! ```
//!
//! The rate is zero when no acid is present and again when either reactant
//! is exhausted, so HOAc follows an S-shaped curve bounded above by
//! `min(ROAc₀, H2O₀)`. Growth is slow while HOAc is small and accelerates
//! sharply once it builds up: the "vinegar syndrome".

use crate::error::Result;
use crate::physics::arrhenius::rate_constant;
use crate::physics::constants::{ChemicalState, KineticConstants};
use crate::physics::traits::RateModel;

/// Instantaneous dHOAc/dt (mol·m⁻³·s⁻¹)
///
/// Exactly zero at `hoac == 0` regardless of `k`.
pub fn derivative(hoac: f64, roac0: f64, h2o0: f64, k: f64) -> f64 {
    k * (roac0 - hoac) * (h2o0 - hoac) * hoac
}

// =================================================================================================
// Degradation ODE
// =================================================================================================

/// Degradation ODE at one constant temperature
///
/// Holds the rate constant for the current phase and the initial reactant
/// reservoirs. A new instance is built for each phase of a schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegradationOde {
    rate_constant: f64,
    acetyl: f64,
    water: f64,
}

impl DegradationOde {
    /// Build from an already computed rate constant
    pub fn new(rate_constant: f64, state: &ChemicalState) -> Self {
        Self {
            rate_constant,
            acetyl: state.acetyl,
            water: state.water,
        }
    }

    /// Build from a temperature via the Arrhenius relation
    pub fn at_temperature(
        temperature: f64,
        constants: &KineticConstants,
        state: &ChemicalState,
    ) -> Result<Self> {
        Ok(Self::new(rate_constant(temperature, constants)?, state))
    }

    pub fn rate_constant(&self) -> f64 {
        self.rate_constant
    }

    /// `min(ROAc₀, H2O₀)`
    pub fn ceiling(&self) -> f64 {
        self.acetyl.min(self.water)
    }
}

impl RateModel for DegradationOde {
    fn derivative(&self, value: f64) -> f64 {
        derivative(value, self.acetyl, self.water, self.rate_constant)
    }

    fn admissible_range(&self) -> Option<(f64, f64)> {
        Some((0.0, self.ceiling()))
    }

    fn name(&self) -> &str {
        "CTA autocatalytic deacetylation"
    }

    fn description(&self) -> Option<&str> {
        Some("dHOAc/dt = k (ROAc0 - HOAc) (H2O0 - HOAc) HOAc")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
