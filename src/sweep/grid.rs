//! Sweep grid definition

use serde::{Deserialize, Serialize};

use crate::error::{AgingError, Result};
use crate::schedule::PhasePlan;

/// Exhibition lengths (days) × cold-storage lengths (months)
///
/// Rows of the resulting matrix follow `cold_storage_months`, columns follow
/// `exhibition_days`, both in the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepGrid {
    pub exhibition_days: Vec<u32>,
    pub cold_storage_months: Vec<u32>,
}

impl SweepGrid {
    pub fn new(exhibition_days: Vec<u32>, cold_storage_months: Vec<u32>) -> Self {
        Self { exhibition_days, cold_storage_months }
    }

    /// 1 to 4 weeks of exhibition against 6 to 36 months of storage
    pub fn reference() -> Self {
        Self::new(vec![7, 14, 21, 28], vec![6, 12, 18, 24, 36])
    }

    pub fn rows(&self) -> usize {
        self.cold_storage_months.len()
    }

    pub fn columns(&self) -> usize {
        self.exhibition_days.len()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Schedule of the cell at `(row, column)`, if in range
    pub fn plan(&self, row: usize, column: usize) -> Option<PhasePlan> {
        let months = *self.cold_storage_months.get(row)?;
        let days = *self.exhibition_days.get(column)?;
        Some(PhasePlan::new(days, months))
    }

    /// Every cell in row-major order
    pub fn plans(&self) -> Vec<PhasePlan> {
        self.cold_storage_months
            .iter()
            .flat_map(|&months| {
                self.exhibition_days
                    .iter()
                    .map(move |&days| PhasePlan::new(days, months))
            })
            .collect()
    }

    /// # Errors
    ///
    /// - [`AgingError::Configuration`] when either axis is empty
    /// - [`AgingError::Domain`] for a zero-length phase
    pub fn validate(&self) -> Result<()> {
        if self.exhibition_days.is_empty() {
            return Err(AgingError::configuration("no exhibition lengths to sweep"));
        }
        if self.cold_storage_months.is_empty() {
            return Err(AgingError::configuration("no cold-storage lengths to sweep"));
        }

        if self.exhibition_days.contains(&0) {
            return Err(AgingError::domain("exhibition length must be at least one day"));
        }
        if self.cold_storage_months.contains(&0) {
            return Err(AgingError::domain("cold-storage length must be at least one month"));
        }

        Ok(())
    }
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self::reference()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        let grid = SweepGrid::reference();

        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.len(), 20);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_plans_are_row_major() {
        let grid = SweepGrid::new(vec![7, 14], vec![6, 12]);
        let plans = grid.plans();

        assert_eq!(
            plans,
            vec![
                PhasePlan::new(7, 6),
                PhasePlan::new(14, 6),
                PhasePlan::new(7, 12),
                PhasePlan::new(14, 12),
            ]
        );
        assert_eq!(grid.plan(1, 0), Some(PhasePlan::new(7, 12)));
        assert_eq!(grid.plan(2, 0), None);
    }

    #[test]
    fn test_input_order_kept() {
        let grid = SweepGrid::new(vec![28, 7], vec![36, 6]);
        assert_eq!(grid.plan(0, 0), Some(PhasePlan::new(28, 36)));
    }

    #[test]
    fn test_empty_axis_rejected() {
        let grid = SweepGrid::new(vec![], vec![6]);
        assert!(grid.is_empty());
        assert!(matches!(grid.validate(), Err(AgingError::Configuration(_))));

        let grid = SweepGrid::new(vec![7], vec![]);
        assert!(matches!(grid.validate(), Err(AgingError::Configuration(_))));
    }

    #[test]
    fn test_zero_length_rejected() {
        let grid = SweepGrid::new(vec![7, 0], vec![6]);
        assert!(matches!(grid.validate(), Err(AgingError::Domain(_))));

        let grid = SweepGrid::new(vec![7], vec![0, 6]);
        assert!(matches!(grid.validate(), Err(AgingError::Domain(_))));
    }
}
