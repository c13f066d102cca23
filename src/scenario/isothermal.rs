//! Constant-temperature aging scenarios
//!
//! A film kept at one temperature for decades, sampled at a fixed
//! resolution. The classic comparison is a good (2 °C), average (7 °C) and
//! bad (15 °C) storage room over fifty years.
//!
//! A case may also carry its own initial state, which is how the moisture
//! comparison of [`IsothermalCase::moisture_cases`] is expressed: one warm
//! temperature, three different water reservoirs.

use serde::{Deserialize, Serialize};

use crate::error::{AgingError, Result};
use crate::physics::{
    celsius_to_kelvin,
    free_acidity,
    ChemicalState,
    DegradationOde,
    DAYS_PER_YEAR,
    SECONDS_PER_DAY,
};
use crate::scenario::ScenarioConfig;
use crate::solver::Integrator;

/// One named storage temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsothermalCase {
    pub label: String,

    /// Storage temperature (K)
    pub temperature: f64,

    /// Starting state for this case; `None` uses the scenario's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<ChemicalState>,
}

impl IsothermalCase {
    pub fn new(label: impl Into<String>, temperature: f64) -> Self {
        Self {
            label: label.into(),
            temperature,
            initial: None,
        }
    }

    pub fn with_initial(mut self, initial: ChemicalState) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Initial state of this case, falling back to `default`
    pub fn initial_or(&self, default: &ChemicalState) -> ChemicalState {
        self.initial.unwrap_or(*default)
    }

    /// Case labelled `"{celsius}°C"`
    pub fn from_celsius(celsius: f64) -> Self {
        Self::new(format!("{}°C", celsius), celsius_to_kelvin(celsius))
    }

    /// 2 °C, 7 °C and 15 °C
    pub fn reference_cases() -> Vec<Self> {
        vec![
            Self::from_celsius(2.0),
            Self::from_celsius(7.0),
            Self::from_celsius(15.0),
        ]
    }

    /// Film at 35 °C with a high, medium and low water content
    ///
    /// | Case     | HOAc₀ | ROAc₀   | H2O₀   |
    /// |----------|-------|---------|--------|
    /// | `Case A` | 52    | 13356.8 | 2137.2 |
    /// | `Case B` | 59.8  | 13349.0 | 1605.2 |
    /// | `Case C` | 52    | 13356.8 | 1010.0 |
    pub fn moisture_cases() -> Vec<Self> {
        let temperature = celsius_to_kelvin(35.0);
        let case = |label: &str, acetyl: f64, water: f64, acetic_acid: f64| {
            Self::new(label, temperature).with_initial(ChemicalState::new(acetyl, water, acetic_acid))
        };

        vec![
            case("Case A", 13_356.8, 2_137.2, 52.0),
            case("Case B", 13_349.0, 1_605.2, 59.8),
            case("Case C", 13_356.8, 1_010.0, 52.0),
        ]
    }
}

/// HOAc over time for one case
#[derive(Debug, Clone, PartialEq)]
pub struct IsothermalSeries {
    pub case: IsothermalCase,

    /// One value per entry of [`IsothermalTable::years`]
    pub acetic_acid: Vec<f64>,
}

impl IsothermalSeries {
    /// HOAc at the end of the span
    pub fn final_value(&self) -> Option<f64> {
        self.acetic_acid.last().copied()
    }

    /// The series converted to free acidity (mL of 0.1 M NaOH per gram)
    pub fn free_acidity(&self) -> Vec<f64> {
        self.acetic_acid.iter().map(|&hoac| free_acidity(hoac)).collect()
    }
}

/// Sample times shared by every series, plus one series per case
#[derive(Debug, Clone, PartialEq)]
pub struct IsothermalTable {
    /// Sample times in years from the start
    pub years: Vec<f64>,

    pub series: Vec<IsothermalSeries>,
}

impl IsothermalTable {
    /// Series by label
    pub fn series(&self, label: &str) -> Option<&IsothermalSeries> {
        self.series.iter().find(|s| s.case.label == label)
    }
}

/// Integrate each case over `years`, sampling `samples_per_year` times a year
///
/// Uses the kinetic constants and integrator settings of `config`, and its
/// initial state for every case without one of its own. The calendar and
/// climate are ignored.
///
/// # Errors
///
/// - [`AgingError::Domain`] for a non-physical configuration, case temperature
///   or case initial state
/// - [`AgingError::Configuration`] when `samples_per_year` is zero
/// - [`AgingError::Integration`] when any case fails to integrate
///
/// # Example
///
/// ```rust
/// use cta_aging::scenario::{run_isothermal, IsothermalCase, ScenarioConfig};
/// use cta_aging::solver::DormandPrince;
///
/// let table = run_isothermal(
///     &ScenarioConfig::reference(),
///     &IsothermalCase::reference_cases(),
///     50,
///     1,
///     &DormandPrince::new(),
/// )?;
///
/// assert_eq!(table.years.len(), 51);
/// let cold = table.series("2°C").and_then(|s| s.final_value()).unwrap();
/// let warm = table.series("15°C").and_then(|s| s.final_value()).unwrap();
/// assert!(cold < warm);
/// # Ok::<(), cta_aging::AgingError>(())
/// ```
pub fn run_isothermal(
    config: &ScenarioConfig,
    cases: &[IsothermalCase],
    years: u32,
    samples_per_year: u32,
    integrator: &dyn Integrator,
) -> Result<IsothermalTable> {
    config.kinetics.validate()?;
    config.initial.validate()?;
    config.integrator.validate()?;

    if samples_per_year == 0 {
        return Err(AgingError::configuration("samples per year must be at least 1"));
    }

    let total = years as usize * samples_per_year as usize;
    let sample_years: Vec<f64> = (0..=total)
        .map(|i| i as f64 / f64::from(samples_per_year))
        .collect();
    let sample_times: Vec<f64> = sample_years
        .iter()
        .map(|y| y * DAYS_PER_YEAR * SECONDS_PER_DAY)
        .collect();

    let series = cases
        .iter()
        .map(|case| {
            let initial = case.initial_or(&config.initial);
            initial.validate()?;

            let ode = DegradationOde::at_temperature(case.temperature, &config.kinetics, &initial)?;
            let acetic_acid = integrator.integrate_sampled(
                &ode,
                initial.acetic_acid,
                &sample_times,
                &config.integrator,
            )?;

            Ok(IsothermalSeries { case: case.clone(), acetic_acid })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(IsothermalTable { years: sample_years, series })
}

// =================================================================================================
// Tests
// =================================================================================================
