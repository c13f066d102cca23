//! Calendar timeline of alternating phases
//!
//! # State machine
//!
//! ```text
//!            ┌──────────────┐  phase ends before end_date  ┌──────────────┐
//!  start ──▶ │  Exhibition  │ ───────────────────────────▶ │ ColdStorage  │
//!            └──────┬───────┘ ◀─────────────────────────── └──────┬───────┘
//!                   │          phase ends before end_date         │
//!                   │ date ≥ end_date                date ≥ end_date
//!                   ▼                                             ▼
//!            ┌───────────────────────────────────────────────────────┐
//!            │                         Done                          │
//!            └───────────────────────────────────────────────────────┘
//! ```
//!
//! The last phase is truncated so the timeline ends exactly on `end_date`;
//! total simulated time is always `end_date − start_date`.
//!
//! Phases are produced lazily: an 85-year timeline is never materialised.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::climate::{season_of, ClimateProfile, Season};
use crate::error::{AgingError, Result};
use crate::physics::{DAYS_PER_MONTH, SECONDS_PER_DAY};

// =================================================================================================
// Phase plan
// =================================================================================================

/// Phase lengths of one schedule (one sweep cell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhasePlan {
    /// Length of every exhibition (days)
    pub exhibition_days: u32,

    /// Length of every cold-storage period (30-day months)
    pub cold_storage_months: u32,
}

impl PhasePlan {
    pub fn new(exhibition_days: u32, cold_storage_months: u32) -> Self {
        Self { exhibition_days, cold_storage_months }
    }

    /// Cold-storage length in days, with 1 month = 30 days
    pub fn cold_storage_days(&self) -> i64 {
        i64::from(self.cold_storage_months) * DAYS_PER_MONTH
    }

    /// Both phases must advance the calendar
    pub fn validate(&self) -> Result<()> {
        if self.exhibition_days == 0 {
            return Err(AgingError::domain("exhibition length must be at least one day"));
        }
        if self.cold_storage_months == 0 {
            return Err(AgingError::domain("cold-storage length must be at least one month"));
        }
        Ok(())
    }
}

// =================================================================================================
// Phases
// =================================================================================================

/// Kind of phase, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Exhibition,
    ColdStorage,
}

impl PhaseKind {
    /// The phase that follows this one
    pub fn toggle(self) -> Self {
        match self {
            PhaseKind::Exhibition => PhaseKind::ColdStorage,
            PhaseKind::ColdStorage => PhaseKind::Exhibition,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhaseKind::Exhibition => "exhibition",
            PhaseKind::ColdStorage => "cold storage",
        }
    }
}

/// A phase with its nominal duration and effective temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Exhibition {
        duration_days: u32,
        season: Season,
        temperature: f64,
    },
    ColdStorage {
        duration_months: u32,
        temperature: f64,
    },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Exhibition { .. } => PhaseKind::Exhibition,
            Phase::ColdStorage { .. } => PhaseKind::ColdStorage,
        }
    }

    /// Effective temperature (K)
    pub fn temperature(&self) -> f64 {
        match self {
            Phase::Exhibition { temperature, .. } | Phase::ColdStorage { temperature, .. } => *temperature,
        }
    }

    /// Planned length in days, before any truncation
    pub fn nominal_days(&self) -> i64 {
        match self {
            Phase::Exhibition { duration_days, .. } => i64::from(*duration_days),
            Phase::ColdStorage { duration_months, .. } => i64::from(*duration_months) * DAYS_PER_MONTH,
        }
    }
}

/// A phase placed on the calendar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledPhase {
    pub phase: Phase,

    /// First simulated day
    pub start: NaiveDate,

    /// Effective length in days (shorter than nominal when truncated)
    pub days: i64,
}

impl ScheduledPhase {
    /// Day after the last simulated day
    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(self.days.unsigned_abs())
    }

    pub fn is_truncated(&self) -> bool {
        self.days < self.phase.nominal_days()
    }

    /// Integration span in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.days as f64 * SECONDS_PER_DAY
    }
}

// =================================================================================================
// Timeline
// =================================================================================================

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Exhibition,
    ColdStorage,
    Done,
}

impl From<PhaseKind> for SchedulerState {
    fn from(kind: PhaseKind) -> Self {
        match kind {
            PhaseKind::Exhibition => SchedulerState::Exhibition,
            PhaseKind::ColdStorage => SchedulerState::ColdStorage,
        }
    }
}

/// Lazy sequence of phases from `start` to `end`
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use cta_aging::climate::ClimateProfile;
/// use cta_aging::schedule::{PhaseKind, PhasePlan, Timeline};
///
/// let climate = ClimateProfile::italy();
/// let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
///
/// let phases: Vec<_> = Timeline::new(&climate, PhasePlan::new(14, 6), start, end)
///     .collect::<Result<_, _>>()?;
///
/// assert_eq!(phases[0].phase.kind(), PhaseKind::Exhibition);
/// assert_eq!(phases.iter().map(|p| p.days).sum::<i64>(), 365);
/// # Ok::<(), cta_aging::AgingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    climate: &'a ClimateProfile,
    plan: PhasePlan,
    date: NaiveDate,
    end: NaiveDate,
    state: SchedulerState,
}

impl<'a> Timeline<'a> {
    pub fn new(climate: &'a ClimateProfile, plan: PhasePlan, start: NaiveDate, end: NaiveDate) -> Self {
        let state = if start >= end {
            SchedulerState::Done
        } else {
            SchedulerState::Exhibition
        };

        Self { climate, plan, date: start, end, state }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Simulated date reached so far
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    fn build_phase(&self, kind: PhaseKind) -> Result<Phase> {
        let temperature = self.climate.temperature_for(kind, self.date)?;

        Ok(match kind {
            PhaseKind::Exhibition => Phase::Exhibition {
                duration_days: self.plan.exhibition_days,
                season: season_of(self.date),
                temperature,
            },
            PhaseKind::ColdStorage => Phase::ColdStorage {
                duration_months: self.plan.cold_storage_months,
                temperature,
            },
        })
    }

    /// Produce the next phase and advance the calendar
    fn advance(&mut self, kind: PhaseKind) -> Result<ScheduledPhase> {
        let phase = self.build_phase(kind)?;

        let remaining = (self.end - self.date).num_days();
        let days = phase.nominal_days().min(remaining);
        if days <= 0 {
            return Err(AgingError::domain(format!(
                "{} phase starting {} has no duration",
                kind.name(),
                self.date
            )));
        }

        let scheduled = ScheduledPhase { phase, start: self.date, days };

        self.date = scheduled.end();
        self.state = if self.date >= self.end {
            SchedulerState::Done
        } else {
            kind.toggle().into()
        };

        Ok(scheduled)
    }
}

impl Iterator for Timeline<'_> {
    type Item = Result<ScheduledPhase>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = match self.state {
            SchedulerState::Exhibition => PhaseKind::Exhibition,
            SchedulerState::ColdStorage => PhaseKind::ColdStorage,
            SchedulerState::Done => return None,
        };

        let item = self.advance(kind);
        if item.is_err() {
            self.state = SchedulerState::Done;
        }
        Some(item)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::SeasonTable;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn collect(timeline: Timeline<'_>) -> Vec<ScheduledPhase> {
        timeline.collect::<Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn test_plan_validation() {
        assert!(PhasePlan::new(7, 6).validate().is_ok());
        assert!(matches!(PhasePlan::new(0, 6).validate(), Err(AgingError::Domain(_))));
        assert!(matches!(PhasePlan::new(7, 0).validate(), Err(AgingError::Domain(_))));
        assert_eq!(PhasePlan::new(7, 18).cold_storage_days(), 540);
    }

    #[test]
    fn test_phase_kind_toggle() {
        assert_eq!(PhaseKind::Exhibition.toggle(), PhaseKind::ColdStorage);
        assert_eq!(PhaseKind::ColdStorage.toggle(), PhaseKind::Exhibition);
    }

    #[test]
    fn test_empty_timeline() {
        let climate = ClimateProfile::italy();
        let mut timeline = Timeline::new(&climate, PhasePlan::new(7, 6), date(2020, 1, 1), date(2020, 1, 1));

        assert_eq!(timeline.state(), SchedulerState::Done);
        assert!(timeline.next().is_none());
    }

    #[test]
    fn test_alternation_and_dates() {
        let climate = ClimateProfile::italy();
        let phases = collect(Timeline::new(
            &climate,
            PhasePlan::new(14, 6),
            date(2015, 1, 1),
            date(2016, 6, 1),
        ));

        for (i, scheduled) in phases.iter().enumerate() {
            let expected = if i % 2 == 0 { PhaseKind::Exhibition } else { PhaseKind::ColdStorage };
            assert_eq!(scheduled.phase.kind(), expected);
        }
        for pair in phases.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start);
        }

        assert_eq!(phases[0].start, date(2015, 1, 1));
        assert_eq!(phases[1].start, date(2015, 1, 15));
        assert_eq!(phases[1].days, 180);
        assert_eq!(phases[2].start, date(2015, 7, 14));
    }

    #[test]
    fn test_seasonal_temperature_from_phase_start() {
        let climate = ClimateProfile::italy();
        let phases = collect(Timeline::new(
            &climate,
            PhasePlan::new(14, 6),
            date(2015, 1, 1),
            date(2016, 1, 1),
        ));

        // Jan 1 → winter, Jul 14 → summer
        match phases[0].phase {
            Phase::Exhibition { season, temperature, .. } => {
                assert_eq!(season, Season::Winter);
                assert!((temperature - 293.15).abs() < 1e-9);
            }
            other => panic!("expected exhibition, got {:?}", other),
        }
        match phases[2].phase {
            Phase::Exhibition { season, .. } => assert_eq!(season, Season::Summer),
            other => panic!("expected exhibition, got {:?}", other),
        }
        assert!((phases[1].phase.temperature() - 275.15).abs() < 1e-9);
    }

    #[test]
    fn test_truncation_reaches_end_exactly() {
        let climate = ClimateProfile::italy();
        let start = date(2015, 1, 1);
        let end = date(2015, 3, 1);
        let phases = collect(Timeline::new(&climate, PhasePlan::new(28, 1), start, end));

        let total: i64 = phases.iter().map(|p| p.days).sum();
        assert_eq!(total, (end - start).num_days());

        let last = phases.last().unwrap();
        assert_eq!(last.end(), end);
        assert!(last.is_truncated());
        assert!(phases[..phases.len() - 1].iter().all(|p| !p.is_truncated()));
    }

    #[test]
    fn test_single_truncated_exhibition() {
        let climate = ClimateProfile::italy();
        let phases = collect(Timeline::new(&climate, PhasePlan::new(28, 6), date(2015, 1, 1), date(2015, 1, 8)));

        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].days, 7);
        assert_eq!(phases[0].duration_seconds(), 7.0 * 86_400.0);
    }

    #[test]
    fn test_missing_season_stops_timeline() {
        let mut table = SeasonTable::new();
        table.insert(Season::Winter, 293.15);
        let climate = ClimateProfile::new("partial", table, 275.15);

        // January exhibition works, the July one does not
        let mut timeline = Timeline::new(&climate, PhasePlan::new(14, 6), date(2015, 1, 1), date(2020, 1, 1));

        assert!(timeline.next().unwrap().is_ok());
        assert!(timeline.next().unwrap().is_ok());
        assert!(matches!(timeline.next(), Some(Err(AgingError::Configuration(_)))));
        assert!(timeline.next().is_none());
        assert_eq!(timeline.state(), SchedulerState::Done);
    }
}
