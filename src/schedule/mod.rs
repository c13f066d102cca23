//! Exhibition / cold-storage scheduling
//!
//! A schedule alternates fixed-length exhibitions and cold-storage periods
//! from a start date to an end date. For each phase the scheduler:
//!
//! 1. picks the temperature (season of the opening month, or the vault)
//! 2. computes the Arrhenius rate constant
//! 3. integrates HOAc across the phase
//! 4. advances the calendar and toggles the phase
//!
//! - **`timeline`**: [`Timeline`], the lazy phase generator and its
//!   [`SchedulerState`] machine
//! - **`scheduler`**: [`PhaseScheduler`], integration on top of the timeline

mod scheduler;
mod timeline;

pub use scheduler::{PhaseRecord, PhaseScheduler};
pub use timeline::{Phase, PhaseKind, PhasePlan, ScheduledPhase, SchedulerState, Timeline};
