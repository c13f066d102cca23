//! Scenario configuration
//!
//! Everything a run needs, passed explicitly: kinetic constants, initial
//! concentrations, calendar span, climate and integrator settings. Nothing is
//! read from module-level globals, so two sweeps with different constant sets
//! can run side by side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::climate::ClimateProfile;
use crate::error::{AgingError, Result};
use crate::physics::{ChemicalState, KineticConstants};
use crate::solver::IntegratorConfiguration;

const REFERENCE_START: NaiveDate = match NaiveDate::from_ymd_opt(2015, 1, 1) {
    Some(date) => date,
    None => panic!("invalid reference start date"),
};

const REFERENCE_END: NaiveDate = match NaiveDate::from_ymd_opt(2100, 1, 1) {
    Some(date) => date,
    None => panic!("invalid reference end date"),
};

/// Immutable inputs of a simulation run
///
/// # JSON layout
///
/// ```json
/// {
///   "kinetics": { "pre_exponential": 0.00103, "activation_energy": 70734.0, "gas_constant": 8.314 },
///   "initial": { "roac": 13403.6, "h2o": 2137.2, "hoac": 52.0 },
///   "start_date": "2015-01-01",
///   "end_date": "2100-01-01",
///   "climate": {
///     "location": "Italy",
///     "exhibition": { "winter": 293.15, "summer": 298.15, "spring_autumn": 291.15 },
///     "cold_storage_temperature": 275.15
///   },
///   "integrator": { "max_step": 100000.0 }
/// }
/// ```
///
/// `integrator` may be omitted or partial; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub kinetics: KineticConstants,

    /// Initial reservoirs and starting acid level
    pub initial: ChemicalState,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    pub climate: ClimateProfile,

    #[serde(default)]
    pub integrator: IntegratorConfiguration,
}

impl ScenarioConfig {
    pub fn new(
        kinetics: KineticConstants,
        initial: ChemicalState,
        start_date: NaiveDate,
        end_date: NaiveDate,
        climate: ClimateProfile,
    ) -> Self {
        Self {
            kinetics,
            initial,
            start_date,
            end_date,
            climate,
            integrator: IntegratorConfiguration::default(),
        }
    }

    /// Reference run: reference constants and film, Italy, 2015 → 2100
    pub fn reference() -> Self {
        Self::new(
            KineticConstants::reference(),
            ChemicalState::reference(),
            REFERENCE_START,
            REFERENCE_END,
            ClimateProfile::italy(),
        )
    }

    pub fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn with_kinetics(mut self, kinetics: KineticConstants) -> Self {
        self.kinetics = kinetics;
        self
    }

    pub fn with_initial(mut self, initial: ChemicalState) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_climate(mut self, climate: ClimateProfile) -> Self {
        self.climate = climate;
        self
    }

    pub fn with_integrator(mut self, integrator: IntegratorConfiguration) -> Self {
        self.integrator = integrator;
        self
    }

    /// Length of the calendar span in days
    pub fn simulated_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Eager checks run before any integration work
    ///
    /// # Errors
    ///
    /// - [`AgingError::Domain`] for non-physical values or `end < start`
    /// - [`AgingError::Configuration`] for an incomplete climate table or
    ///   unusable integrator settings
    pub fn validate(&self) -> Result<()> {
        self.kinetics.validate()?;
        self.initial.validate()?;
        self.climate.validate()?;
        self.integrator.validate()?;

        if self.end_date < self.start_date {
            return Err(AgingError::domain(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::reference()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
