//! Physical constants and the chemical state of a film sample
//!
//! All concentrations are in mol/m³, energies in J/mol, temperatures in K.

use serde::{Deserialize, Serialize};

use crate::error::{AgingError, Result};

// =================================================================================================
// Shared constants
// =================================================================================================

/// Ideal gas constant used by the reference parameter set (J/(mol·K))
pub const GAS_CONSTANT: f64 = 8.314;

/// Offset between the Celsius and Kelvin scales
pub const ZERO_CELSIUS: f64 = 273.15;

/// Seconds in one simulated day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fixed month length used for every cold-storage duration
pub const DAYS_PER_MONTH: i64 = 30;

/// Julian year, used when sampling isothermal runs by year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Temperatures below this value are almost certainly Celsius read as Kelvin.
pub const SUSPICIOUS_KELVIN: f64 = 200.0;

/// mol/m³ of HOAc per unit of free acidity
pub const FREE_ACIDITY_DIVISOR: f64 = 130.0;

/// Convert a Celsius temperature to Kelvin
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + ZERO_CELSIUS
}

/// Convert a Kelvin temperature to Celsius
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - ZERO_CELSIUS
}

/// Free acidity (mL of 0.1 M NaOH per gram of film) for an HOAc concentration in mol/m³
pub fn free_acidity(acetic_acid: f64) -> f64 {
    acetic_acid / FREE_ACIDITY_DIVISOR
}

// =================================================================================================
// Kinetic constants
// =================================================================================================

/// Arrhenius parameters of the deacetylation reaction
///
/// Fixed for a whole simulation run. Several inconsistent sets circulate for
/// the same reaction, so the set is always passed explicitly rather than read
/// from a global.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticConstants {
    /// Pre-exponential factor A (m⁶·mol⁻²·s⁻¹)
    pub pre_exponential: f64,

    /// Activation energy Ea (J/mol)
    pub activation_energy: f64,

    /// Gas constant R (J/(mol·K))
    pub gas_constant: f64,
}

impl KineticConstants {
    pub fn new(pre_exponential: f64, activation_energy: f64, gas_constant: f64) -> Self {
        Self { pre_exponential, activation_energy, gas_constant }
    }

    /// Reference set: A = 0.00103, Ea = 70 734 J/mol, R = 8.314
    pub fn reference() -> Self {
        Self::new(0.00103, 70_734.0, GAS_CONSTANT)
    }

    /// Reject non-finite or non-positive parameters
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("pre-exponential factor", self.pre_exponential),
            ("activation energy", self.activation_energy),
            ("gas constant", self.gas_constant),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(AgingError::domain(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for KineticConstants {
    fn default() -> Self {
        Self::reference()
    }
}

// =================================================================================================
// Chemical state
// =================================================================================================

/// Concentrations of the three species in a film sample
///
/// Only acetic acid is integrated. Acetyl groups and water are consumed one
/// to one as acid forms, so their current values are derived from the
/// initial reservoirs:
///
/// ```text
/// ROAc(t) = ROAc₀ − HOAc(t)
/// H2O(t)  = H2O₀  − HOAc(t)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChemicalState {
    /// Initial acetyl-group concentration ROAc₀
    #[serde(rename = "roac")]
    pub acetyl: f64,

    /// Initial water concentration H2O₀
    #[serde(rename = "h2o")]
    pub water: f64,

    /// Current acetic-acid concentration HOAc
    #[serde(rename = "hoac")]
    pub acetic_acid: f64,
}

impl ChemicalState {
    pub fn new(acetyl: f64, water: f64, acetic_acid: f64) -> Self {
        Self { acetyl, water, acetic_acid }
    }

    /// Reference film: ROAc₀ = 13 403.6, H2O₀ = 2 137.2, HOAc₀ = 52
    pub fn reference() -> Self {
        Self::new(13_403.6, 2_137.2, 52.0)
    }

    /// Upper bound on HOAc: the first reactant to run out caps acid production
    pub fn acid_ceiling(&self) -> f64 {
        self.acetyl.min(self.water)
    }

    /// Acetyl groups left at the current acid level
    pub fn remaining_acetyl(&self) -> f64 {
        self.acetyl - self.acetic_acid
    }

    /// Water left at the current acid level
    pub fn remaining_water(&self) -> f64 {
        self.water - self.acetic_acid
    }

    /// Same reservoirs, new acid concentration
    pub fn with_acetic_acid(&self, acetic_acid: f64) -> Self {
        Self { acetic_acid, ..*self }
    }

    /// `0 ≤ HOAc ≤ min(ROAc₀, H2O₀)`
    pub fn is_physical(&self) -> bool {
        self.acetic_acid >= 0.0 && self.acetic_acid <= self.acid_ceiling()
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("ROAc0", self.acetyl),
            ("H2O0", self.water),
            ("HOAc0", self.acetic_acid),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(AgingError::domain(format!(
                    "{} must be a non-negative finite concentration, got {}",
                    name, value
                )));
            }
        }

        if !self.is_physical() {
            return Err(AgingError::domain(format!(
                "HOAc0 = {} exceeds min(ROAc0, H2O0) = {}",
                self.acetic_acid,
                self.acid_ceiling()
            )));
        }

        Ok(())
    }
}

impl Default for ChemicalState {
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
    fn test_temperature_conversion() {
        assert_eq!(celsius_to_kelvin(2.0), 275.15);
        assert!((kelvin_to_celsius(288.15) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_free_acidity() {
        assert_eq!(free_acidity(0.0), 0.0);
        assert_eq!(free_acidity(130.0), 1.0);
        assert!((free_acidity(52.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_reference_constants_are_valid() {
        assert!(KineticConstants::reference().validate().is_ok());
        assert!(ChemicalState::reference().validate().is_ok());
    }

    #[test]
    fn test_invalid_kinetic_constants() {
        let constants = KineticConstants::new(0.00103, -1.0, GAS_CONSTANT);
        assert!(matches!(constants.validate(), Err(AgingError::Domain(_))));

        let constants = KineticConstants::new(f64::NAN, 70_734.0, GAS_CONSTANT);
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_acid_ceiling_and_derived_species() {
        let state = ChemicalState::reference();
        assert_eq!(state.acid_ceiling(), 2_137.2);
        assert!((state.remaining_water() - 2_085.2).abs() < 1e-9);
        assert!((state.remaining_acetyl() - 13_351.6).abs() < 1e-9);
    }

    #[test]
    fn test_acid_above_ceiling_is_rejected() {
        let state = ChemicalState::reference().with_acetic_acid(3_000.0);
        assert!(!state.is_physical());
        assert!(matches!(state.validate(), Err(AgingError::Domain(_))));
    }

    #[test]
    fn test_negative_concentration_is_rejected() {
        let state = ChemicalState::new(100.0, -5.0, 0.0);
        assert!(state.validate().is_err());
    }
}
