//! Seasonal temperature model
//!
//! Exhibition rooms follow the season of the calendar month in which an
//! exhibition opens; cold storage runs at one fixed temperature all year.
//!
//! | Months        | Season         |
//! |---------------|----------------|
//! | Dec, Jan, Feb | `Winter`       |
//! | Jun, Jul, Aug | `Summer`       |
//! | otherwise     | `SpringAutumn` |

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AgingError, Result};
use crate::physics::{celsius_to_kelvin, check_temperature};
use crate::schedule::PhaseKind;

// =================================================================================================
// Season
// =================================================================================================

/// Climatic season used to pick an exhibition temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Summer,
    SpringAutumn,
}

impl Season {
    /// Every season, in table order
    pub const ALL: [Season; 3] = [Season::Winter, Season::Summer, Season::SpringAutumn];

    /// Season of a calendar month (1 = January)
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            6..=8 => Season::Summer,
            _ => Season::SpringAutumn,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Summer => "summer",
            Season::SpringAutumn => "spring/autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Season of a calendar date
pub fn season_of(date: NaiveDate) -> Season {
    Season::from_month(date.month())
}

// =================================================================================================
// Season table
// =================================================================================================

/// Season → exhibition temperature (K) for one location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonTable {
    temperatures: BTreeMap<Season, f64>,
}

impl SeasonTable {
    /// Empty table, to be filled with [`SeasonTable::insert`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete table from Kelvin values
    pub fn from_kelvin(winter: f64, summer: f64, spring_autumn: f64) -> Self {
        let mut table = Self::new();
        table.insert(Season::Winter, winter);
        table.insert(Season::Summer, summer);
        table.insert(Season::SpringAutumn, spring_autumn);
        table
    }

    /// Complete table from Celsius values
    pub fn from_celsius(winter: f64, summer: f64, spring_autumn: f64) -> Self {
        Self::from_kelvin(
            celsius_to_kelvin(winter),
            celsius_to_kelvin(summer),
            celsius_to_kelvin(spring_autumn),
        )
    }

    /// Italian exhibition rooms: 20 °C winter, 25 °C summer, 18 °C spring/autumn
    pub fn italy() -> Self {
        Self::from_celsius(20.0, 25.0, 18.0)
    }

    pub fn insert(&mut self, season: Season, temperature: f64) {
        self.temperatures.insert(season, temperature);
    }

    /// Temperature for `season`
    ///
    /// # Errors
    ///
    /// [`AgingError::Configuration`] when the season has no entry.
    pub fn get(&self, season: Season) -> Result<f64> {
        self.temperatures.get(&season).copied().ok_or_else(|| {
            AgingError::configuration(format!("no exhibition temperature for season {}", season))
        })
    }

    /// Entries in season order
    pub fn iter(&self) -> impl Iterator<Item = (Season, f64)> + '_ {
        self.temperatures.iter().map(|(&season, &temperature)| (season, temperature))
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// All three seasons present, all temperatures physical
    pub fn validate(&self) -> Result<()> {
        for season in Season::ALL {
            check_temperature(self.get(season)?)?;
        }
        Ok(())
    }
}

// =================================================================================================
// Climate profile
// =================================================================================================

/// Temperatures of one location: seasonal exhibition table plus cold storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateProfile {
    /// Free-form location label
    pub location: String,

    /// Exhibition temperatures by season (K)
    pub exhibition: SeasonTable,

    /// Cold-storage temperature (K), independent of the calendar
    pub cold_storage_temperature: f64,
}

impl ClimateProfile {
    pub fn new(location: impl Into<String>, exhibition: SeasonTable, cold_storage_temperature: f64) -> Self {
        Self {
            location: location.into(),
            exhibition,
            cold_storage_temperature,
        }
    }

    /// Italian exhibition climate with a 2 °C vault
    pub fn italy() -> Self {
        Self::new("Italy", SeasonTable::italy(), celsius_to_kelvin(2.0))
    }

    pub fn validate(&self) -> Result<()> {
        self.exhibition.validate()?;
        check_temperature(self.cold_storage_temperature)
    }

    /// Exhibition temperature for a phase opening on `date`
    pub fn exhibition_temperature(&self, date: NaiveDate) -> Result<f64> {
        self.exhibition.get(season_of(date))
    }

    /// Temperature that applies to a phase of `kind` starting on `date`
    pub fn temperature_for(&self, kind: PhaseKind, date: NaiveDate) -> Result<f64> {
        match kind {
            PhaseKind::Exhibition => self.exhibition_temperature(date),
            PhaseKind::ColdStorage => Ok(self.cold_storage_temperature),
        }
    }
}

impl Default for ClimateProfile {
    fn default() -> Self {
        Self::italy()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_season_of_every_month() {
        let expected = [
            Season::Winter,
            Season::Winter,
            Season::SpringAutumn,
            Season::SpringAutumn,
            Season::SpringAutumn,
            Season::Summer,
            Season::Summer,
            Season::Summer,
            Season::SpringAutumn,
            Season::SpringAutumn,
            Season::SpringAutumn,
            Season::Winter,
        ];
        for (month, season) in (1..=12).zip(expected) {
            assert_eq!(season_of(date(2030, month, 15)), season, "month {}", month);
        }
    }

    #[test]
    fn test_italy_table() {
        let table = SeasonTable::italy();
        assert_eq!(table.len(), 3);
        assert!((table.get(Season::Winter).unwrap() - 293.15).abs() < 1e-9);
        assert!((table.get(Season::Summer).unwrap() - 298.15).abs() < 1e-9);
        assert!((table.get(Season::SpringAutumn).unwrap() - 291.15).abs() < 1e-9);

        let seasons: Vec<Season> = table.iter().map(|(season, _)| season).collect();
        assert_eq!(seasons, Season::ALL.to_vec());
    }

    #[test]
    fn test_missing_season_is_configuration_error() {
        let mut table = SeasonTable::new();
        table.insert(Season::Winter, 293.15);
        table.insert(Season::Summer, 298.15);

        assert!(matches!(table.get(Season::SpringAutumn), Err(AgingError::Configuration(_))));
        assert!(matches!(table.validate(), Err(AgingError::Configuration(_))));
    }

    #[test]
    fn test_non_physical_entry_is_domain_error() {
        let table = SeasonTable::from_kelvin(293.15, -1.0, 291.15);
        assert!(matches!(table.validate(), Err(AgingError::Domain(_))));
    }

    #[test]
    fn test_temperature_for_phase() {
        let climate = ClimateProfile::italy();

        let summer = climate.temperature_for(PhaseKind::Exhibition, date(2020, 7, 1)).unwrap();
        assert!((summer - 298.15).abs() < 1e-9);

        let vault = climate.temperature_for(PhaseKind::ColdStorage, date(2020, 7, 1)).unwrap();
        assert!((vault - 275.15).abs() < 1e-9);

        let vault_winter = climate.temperature_for(PhaseKind::ColdStorage, date(2020, 1, 1)).unwrap();
        assert_eq!(vault, vault_winter);
    }

    #[test]
    fn test_season_table_json_keys() {
        let json = serde_json::to_string(&SeasonTable::italy()).unwrap();
        assert!(json.contains("\"spring_autumn\""));

        let back: SeasonTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SeasonTable::italy());
    }
}
