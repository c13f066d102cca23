//! Parameter sweep over exhibition × cold-storage lengths
//!
//! Every cell of a [`SweepGrid`] runs its own [`PhaseScheduler`] from the
//! configured initial state. Cells share nothing but the read-only
//! [`ScenarioConfig`], so they can be evaluated in any order and, with the
//! `parallel` feature, on rayon's thread pool.
//!
//! # Error scoping
//!
//! | Error                          | When             | Effect             |
//! |--------------------------------|------------------|--------------------|
//! | [`AgingError::Domain`]         | before any cell  | whole sweep fails  |
//! | [`AgingError::Configuration`]  | before any cell  | whole sweep fails  |
//! | [`AgingError::Integration`]    | inside one cell  | [`CellOutcome::Failed`] |
//!
//! # Example
//!
//! ```rust
//! use cta_aging::scenario::ScenarioConfig;
//! use cta_aging::sweep::run_sweep;
//!
//! let matrix = run_sweep(&[7, 28], &[6, 36], &ScenarioConfig::reference())?;
//!
//! assert_eq!(matrix.shape(), (2, 2));
//! assert!(matrix.is_complete());
//! println!("{matrix}");
//! # Ok::<(), cta_aging::AgingError>(())
//! ```

mod grid;
mod matrix;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info, warn};

use crate::error::{AgingError, Result};
use crate::scenario::ScenarioConfig;
use crate::schedule::{PhasePlan, PhaseScheduler};
use crate::solver::{DormandPrince, Integrator};

pub use grid::SweepGrid;
pub use matrix::{CellFailure, CellOutcome, ResultMatrix};

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// A single cell integrates tens of thousands of steps, so rayon pays off for
// any grid with more than one cell. The threshold stays adjustable at runtime
// for benchmarks that compare both paths. Relaxed ordering is enough: the
// value is a scheduling hint.
// =================================================================================================

/// Number of cells above which a sweep is dispatched to rayon
const DEFAULT_PARALLEL_THRESHOLD: usize = 1;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Current parallel-execution threshold
///
/// Sweeps with more cells than this run on rayon when the crate is built with
/// the `parallel` feature; smaller sweeps, or builds without the feature, run
/// sequentially.
///
/// ```rust
/// use cta_aging::sweep::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// ```rust
/// use cta_aging::sweep::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(100);
/// assert_eq!(parallel_threshold(), 100);
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Restores the previous threshold on drop
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Sweep Engine
// =================================================================================================

/// Runs one [`PhaseScheduler`] per grid cell
#[derive(Debug, Clone)]
pub struct SweepEngine<I: Integrator = DormandPrince> {
    config: ScenarioConfig,
    integrator: I,
}

impl SweepEngine<DormandPrince> {
    /// Engine with the adaptive Dormand–Prince integrator
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config, integrator: DormandPrince::new() }
    }
}

impl<I: Integrator> SweepEngine<I> {
    pub fn with_integrator(config: ScenarioConfig, integrator: I) -> Self {
        Self { config, integrator }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    /// Evaluate every cell of `grid`
    ///
    /// # Errors
    ///
    /// Domain and configuration problems in the scenario or the grid are
    /// reported before any integration starts. Integration failures never
    /// surface here; they are stored in the failing cell.
    pub fn run(&self, grid: &SweepGrid) -> Result<ResultMatrix> {
        self.config.validate()?;
        grid.validate()?;

        let plans = grid.plans();
        info!(
            "sweep of {} cells ({} exhibition × {} cold-storage lengths), {} to {}",
            plans.len(),
            grid.columns(),
            grid.rows(),
            self.config.start_date,
            self.config.end_date,
        );
        let started = Instant::now();

        let outcomes = if plans.len() > parallel_threshold() {
            self.evaluate_parallel(&plans)?
        } else {
            self.evaluate_sequential(&plans)?
        };

        let matrix = ResultMatrix::from_row_major(
            grid.exhibition_days.clone(),
            grid.cold_storage_months.clone(),
            outcomes,
        )
        .ok_or_else(|| AgingError::configuration("sweep produced a wrong number of cells"))?;

        info!(
            "sweep finished in {:.2?}: {} failed cells",
            started.elapsed(),
            matrix.failures().len(),
        );

        Ok(matrix)
    }

    fn evaluate_sequential(&self, plans: &[PhasePlan]) -> Result<Vec<CellOutcome>> {
        plans.iter().map(|&plan| self.evaluate_cell(plan)).collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_parallel(&self, plans: &[PhasePlan]) -> Result<Vec<CellOutcome>> {
        use rayon::prelude::*;

        plans.par_iter().map(|&plan| self.evaluate_cell(plan)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_parallel(&self, plans: &[PhasePlan]) -> Result<Vec<CellOutcome>> {
        self.evaluate_sequential(plans)
    }

    /// Run a single schedule from the configured initial state
    ///
    /// Integration errors become [`CellOutcome::Failed`]; anything else is
    /// returned as an error.
    pub fn evaluate_cell(&self, plan: PhasePlan) -> Result<CellOutcome> {
        match PhaseScheduler::new(&self.config, plan, &self.integrator)?.run() {
            Ok(value) => {
                debug!(
                    "cell {} d / {} mo: HOAc {:.4}",
                    plan.exhibition_days, plan.cold_storage_months, value
                );
                Ok(CellOutcome::Concentration(value))
            }
            Err(AgingError::Integration(error)) => {
                warn!(
                    "cell {} d / {} mo failed: {}",
                    plan.exhibition_days, plan.cold_storage_months, error
                );
                Ok(CellOutcome::Failed(error))
            }
            Err(other) => Err(other),
        }
    }
}

/// Sweep `exhibition_days × cold_storage_months` with the default integrator
pub fn run_sweep(
    exhibition_days: &[u32],
    cold_storage_months: &[u32],
    config: &ScenarioConfig,
) -> Result<ResultMatrix> {
    let grid = SweepGrid::new(exhibition_days.to_vec(), cold_storage_months.to_vec());
    SweepEngine::new(config.clone()).run(&grid)
}

// =================================================================================================
// Tests
// =================================================================================================
