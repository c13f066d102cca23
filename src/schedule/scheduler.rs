//! Phase-by-phase integration of one schedule

use log::debug;

use crate::error::Result;
use crate::physics::{rate_constant, ChemicalState, DegradationOde};
use crate::scenario::ScenarioConfig;
use crate::schedule::timeline::{PhasePlan, ScheduledPhase, SchedulerState, Timeline};
use crate::solver::Integrator;

/// What happened during one phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseRecord {
    pub scheduled: ScheduledPhase,

    /// Arrhenius rate constant used for the phase
    pub rate_constant: f64,

    /// HOAc entering the phase (mol/m³)
    pub acetic_acid_start: f64,

    /// HOAc leaving the phase (mol/m³)
    pub acetic_acid_end: f64,
}

/// Drives a [`Timeline`] and integrates HOAc across each phase
///
/// Phases are strictly sequential: each one starts from the final
/// concentration of the previous one.
///
/// # Errors
///
/// An [`IntegrationError`](crate::IntegrationError) ends the run for this
/// schedule only; the caller decides what it means for a wider sweep.
///
/// # Example
///
/// ```rust
/// use cta_aging::scenario::ScenarioConfig;
/// use cta_aging::schedule::{PhasePlan, PhaseScheduler};
/// use cta_aging::solver::DormandPrince;
///
/// let config = ScenarioConfig::reference();
/// let integrator = DormandPrince::new();
///
/// let hoac = PhaseScheduler::new(&config, PhasePlan::new(14, 12), &integrator)?.run()?;
/// assert!(hoac > config.initial.acetic_acid);
/// # Ok::<(), cta_aging::AgingError>(())
/// ```
pub struct PhaseScheduler<'a> {
    config: &'a ScenarioConfig,
    integrator: &'a dyn Integrator,
    timeline: Timeline<'a>,
    state: ChemicalState,
}

impl<'a> PhaseScheduler<'a> {
    /// Fresh run from `config.initial` at `config.start_date`
    ///
    /// # Errors
    ///
    /// The same eager checks as a sweep: [`ScenarioConfig::validate`] and
    /// [`PhasePlan::validate`].
    pub fn new(config: &'a ScenarioConfig, plan: PhasePlan, integrator: &'a dyn Integrator) -> Result<Self> {
        config.validate()?;
        plan.validate()?;

        Ok(Self {
            config,
            integrator,
            timeline: Timeline::new(&config.climate, plan, config.start_date, config.end_date),
            state: config.initial,
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.timeline.state()
    }

    /// Current chemical state
    pub fn chemical_state(&self) -> ChemicalState {
        self.state
    }

    pub fn acetic_acid(&self) -> f64 {
        self.state.acetic_acid
    }

    /// Integrate the next phase; `Ok(None)` once the timeline is done
    pub fn step(&mut self) -> Result<Option<PhaseRecord>> {
        let Some(scheduled) = self.timeline.next().transpose()? else {
            return Ok(None);
        };

        let k = rate_constant(scheduled.phase.temperature(), &self.config.kinetics)?;
        let ode = DegradationOde::new(k, &self.state);

        let start = self.state.acetic_acid;
        let result = self.integrator.integrate(
            &ode,
            start,
            scheduled.duration_seconds(),
            &self.config.integrator,
        )?;

        self.state = self.state.with_acetic_acid(result.final_value);

        debug!(
            "{} from {} for {} d at {:.2} K: HOAc {:.4} -> {:.4} ({} steps)",
            scheduled.phase.kind().name(),
            scheduled.start,
            scheduled.days,
            scheduled.phase.temperature(),
            start,
            result.final_value,
            result.stats.accepted_steps,
        );

        Ok(Some(PhaseRecord {
            scheduled,
            rate_constant: k,
            acetic_acid_start: start,
            acetic_acid_end: result.final_value,
        }))
    }

    /// Run to `end_date` and return the final HOAc
    pub fn run(mut self) -> Result<f64> {
        while self.step()?.is_some() {}
        Ok(self.state.acetic_acid)
    }

    /// Run to `end_date`, keeping one record per phase
    pub fn run_with_history(mut self) -> Result<Vec<PhaseRecord>> {
        let mut history = Vec::new();
        while let Some(record) = self.step()? {
            history.push(record);
        }
        Ok(history)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
