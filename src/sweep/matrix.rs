//! Sweep results
//!
//! A [`ResultMatrix`] stores one [`CellOutcome`] per grid cell in a
//! `nalgebra::DMatrix`. Rows follow the cold-storage lengths and columns the
//! exhibition lengths, in input order.

use std::fmt;

use nalgebra::DMatrix;

use crate::error::IntegrationError;

/// Final state of one grid cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutcome {
    /// HOAc at the end date (mol/m³)
    Concentration(f64),

    /// The integrator gave up somewhere along the cell's timeline
    Failed(IntegrationError),
}

impl CellOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            CellOutcome::Concentration(value) => Some(*value),
            CellOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&IntegrationError> {
        match self {
            CellOutcome::Concentration(_) => None,
            CellOutcome::Failed(error) => Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CellOutcome::Failed(_))
    }
}

/// A failed cell and where it sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFailure<'a> {
    pub exhibition_days: u32,
    pub cold_storage_months: u32,
    pub error: &'a IntegrationError,
}

/// Fully populated value-or-error grid, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMatrix {
    exhibition_days: Vec<u32>,
    cold_storage_months: Vec<u32>,
    cells: DMatrix<CellOutcome>,
}

impl ResultMatrix {
    /// Build from outcomes listed in row-major order
    ///
    /// Returns `None` when `outcomes` does not hold exactly one entry per cell.
    pub(crate) fn from_row_major(
        exhibition_days: Vec<u32>,
        cold_storage_months: Vec<u32>,
        outcomes: Vec<CellOutcome>,
    ) -> Option<Self> {
        let rows = cold_storage_months.len();
        let columns = exhibition_days.len();
        if outcomes.len() != rows * columns {
            return None;
        }

        let cells = DMatrix::from_fn(rows, columns, |i, j| outcomes[i * columns + j].clone());

        Some(Self { exhibition_days, cold_storage_months, cells })
    }

    pub fn exhibition_days(&self) -> &[u32] {
        &self.exhibition_days
    }

    pub fn cold_storage_months(&self) -> &[u32] {
        &self.cold_storage_months
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        self.cells.shape()
    }

    pub fn cells(&self) -> &DMatrix<CellOutcome> {
        &self.cells
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&CellOutcome> {
        self.cells.get((row, column))
    }

    /// HOAc at `(row, column)`; `None` if out of range or failed
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.get(row, column).and_then(CellOutcome::value)
    }

    /// Cell by its phase lengths rather than its indices
    pub fn lookup(&self, exhibition_days: u32, cold_storage_months: u32) -> Option<&CellOutcome> {
        let row = self.cold_storage_months.iter().position(|&m| m == cold_storage_months)?;
        let column = self.exhibition_days.iter().position(|&d| d == exhibition_days)?;
        self.get(row, column)
    }

    /// True when no cell failed
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_failed())
    }

    /// Failed cells in row-major order
    pub fn failures(&self) -> Vec<CellFailure<'_>> {
        let mut failures = Vec::new();
        for (i, &months) in self.cold_storage_months.iter().enumerate() {
            for (j, &days) in self.exhibition_days.iter().enumerate() {
                if let CellOutcome::Failed(error) = &self.cells[(i, j)] {
                    failures.push(CellFailure {
                        exhibition_days: days,
                        cold_storage_months: months,
                        error,
                    });
                }
            }
        }
        failures
    }

    /// Numeric matrix, only when every cell succeeded
    pub fn values(&self) -> Option<DMatrix<f64>> {
        let (rows, columns) = self.shape();
        let mut values = DMatrix::zeros(rows, columns);
        for i in 0..rows {
            for j in 0..columns {
                values[(i, j)] = self.cells[(i, j)].value()?;
            }
        }
        Some(values)
    }
}

fn exhibition_label(days: u32) -> String {
    match days {
        7 => "1 week".to_string(),
        d if d % 7 == 0 => format!("{} weeks", d / 7),
        1 => "1 day".to_string(),
        d => format!("{} days", d),
    }
}

impl fmt::Display for ResultMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12}", "")?;
        for &days in &self.exhibition_days {
            write!(f, "{:>12}", exhibition_label(days))?;
        }
        writeln!(f)?;

        for (i, &months) in self.cold_storage_months.iter().enumerate() {
            write!(f, "{:<12}", format!("{} months", months))?;
            for j in 0..self.exhibition_days.len() {
                match &self.cells[(i, j)] {
                    CellOutcome::Concentration(value) => write!(f, "{:>12.4}", value)?,
                    CellOutcome::Failed(_) => write!(f, "{:>12}", "failed")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
