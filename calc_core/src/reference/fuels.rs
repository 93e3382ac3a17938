//! Fuel Profiles
//!
//! Working-mass characteristics of the three fuels burned at the reference
//! thermal power plant: Donetsk gas coal (grade GR), high-sulfur fuel oil
//! (grade 40) and natural gas from the Urengoy–Uzhhorod pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Fuel types known to the emission estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelKind {
    /// Solid fuel, burned amount in tonnes
    Coal,
    /// Liquid fuel (mazut), burned amount in tonnes
    FuelOil,
    /// Gaseous fuel, burned amount in cubic meters
    NaturalGas,
}

impl FuelKind {
    /// All fuel kinds in reporting order
    pub const ALL: [FuelKind; 3] = [FuelKind::Coal, FuelKind::FuelOil, FuelKind::NaturalGas];

    /// Short machine-readable code (matches the serde name)
    pub fn code(&self) -> &'static str {
        match self {
            FuelKind::Coal => "coal",
            FuelKind::FuelOil => "fuel_oil",
            FuelKind::NaturalGas => "natural_gas",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FuelKind::Coal => "Coal",
            FuelKind::FuelOil => "Fuel oil",
            FuelKind::NaturalGas => "Natural gas",
        }
    }

    /// Unit the burned amount is measured in
    pub fn quantity_unit(&self) -> &'static str {
        match self {
            FuelKind::Coal | FuelKind::FuelOil => "t",
            FuelKind::NaturalGas => "m³",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "coal" => Ok(FuelKind::Coal),
            "fuel_oil" | "oil" | "mazut" => Ok(FuelKind::FuelOil),
            "natural_gas" | "gas" => Ok(FuelKind::NaturalGas),
            _ => Err(CalcError::fuel_not_found(s)),
        }
    }
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for FuelKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelKind::from_str_flexible(s)
    }
}

/// Combustion characteristics of one fuel.
///
/// ## JSON Example
///
/// ```json
/// {
///   "kind": "coal",
///   "heat_of_combustion": 20.47,
///   "fly_ash_fraction": 0.8,
///   "ash_content_pct": 25.2,
///   "ash_combustibles_pct": 1.5
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelProfile {
    pub kind: FuelKind,
    /// Lower heat of combustion of the working mass (MJ/kg, MJ/m³ for gas)
    pub heat_of_combustion: f64,
    /// Share of the ash leaving the furnace as fly ash (0..1)
    pub fly_ash_fraction: f64,
    /// Ash content of the working mass (%)
    pub ash_content_pct: f64,
    /// Combustible matter in the fly ash (%)
    pub ash_combustibles_pct: f64,
}

/// Donetsk gas coal, grade GR
pub const COAL: FuelProfile = FuelProfile {
    kind: FuelKind::Coal,
    heat_of_combustion: 20.47,
    fly_ash_fraction: 0.8,
    ash_content_pct: 25.20,
    ash_combustibles_pct: 1.5,
};

/// High-sulfur fuel oil, grade 40
pub const FUEL_OIL: FuelProfile = FuelProfile {
    kind: FuelKind::FuelOil,
    heat_of_combustion: 39.48,
    fly_ash_fraction: 1.0,
    ash_content_pct: 0.15,
    ash_combustibles_pct: 0.0,
};

/// Natural gas; ash-free, so it never emits solid particles
pub const NATURAL_GAS: FuelProfile = FuelProfile {
    kind: FuelKind::NaturalGas,
    heat_of_combustion: 33.08,
    fly_ash_fraction: 0.0,
    ash_content_pct: 0.0,
    ash_combustibles_pct: 0.0,
};

/// Ash collector efficiency shared by all boilers at the reference plant
pub const DEFAULT_FILTER_EFFICIENCY: f64 = 0.985;

/// Ordered set of fuel profiles the estimator looks fuels up in.
///
/// At most one profile per [`FuelKind`]; [`FuelTable::with_profile`] replaces
/// an existing entry in place so the reporting order is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelTable {
    profiles: Vec<FuelProfile>,
}

impl FuelTable {
    /// Table holding the three reference fuels
    pub fn builtin() -> Self {
        FuelTable {
            profiles: vec![COAL, FUEL_OIL, NATURAL_GAS],
        }
    }

    /// Look up the profile for a fuel
    pub fn get(&self, kind: FuelKind) -> Option<&FuelProfile> {
        self.profiles.iter().find(|p| p.kind == kind)
    }

    /// Like [`FuelTable::get`], failing with `FuelNotFound`
    pub fn require(&self, kind: FuelKind) -> CalcResult<&FuelProfile> {
        self.get(kind).ok_or_else(|| CalcError::fuel_not_found(kind.code()))
    }

    /// Replace the profile for `profile.kind`, or append it if absent
    pub fn with_profile(mut self, profile: FuelProfile) -> Self {
        match self.profiles.iter_mut().find(|p| p.kind == profile.kind) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
        self
    }

    pub fn profiles(&self) -> &[FuelProfile] {
        &self.profiles
    }
}

impl Default for FuelTable {
    fn default() -> Self {
        FuelTable::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_kind_parsing() {
        assert_eq!(FuelKind::from_str_flexible("Coal").unwrap(), FuelKind::Coal);
        assert_eq!(FuelKind::from_str_flexible("fuel oil").unwrap(), FuelKind::FuelOil);
        assert_eq!(FuelKind::from_str_flexible("mazut").unwrap(), FuelKind::FuelOil);
        assert_eq!("natural-gas".parse::<FuelKind>().unwrap(), FuelKind::NaturalGas);

        let err = FuelKind::from_str_flexible("peat").unwrap_err();
        assert_eq!(err.error_code(), "FUEL_NOT_FOUND");
    }

    #[test]
    fn test_fuel_kind_serialization() {
        let json = serde_json::to_string(&FuelKind::FuelOil).unwrap();
        assert_eq!(json, "\"fuel_oil\"");
        for kind in FuelKind::ALL {
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn test_builtin_table() {
        let table = FuelTable::builtin();
        assert_eq!(table.profiles().len(), 3);
        assert_eq!(table.get(FuelKind::Coal), Some(&COAL));
        assert_eq!(table.get(FuelKind::NaturalGas).unwrap().kind.quantity_unit(), "m³");
    }

    #[test]
    fn test_with_profile_replaces_in_place() {
        let washed = FuelProfile { ash_content_pct: 12.0, ..COAL };
        let table = FuelTable::builtin().with_profile(washed);
        assert_eq!(table.profiles().len(), 3);
        assert_eq!(table.profiles()[0].ash_content_pct, 12.0);
        assert_eq!(table.require(FuelKind::FuelOil).unwrap(), &FUEL_OIL);
    }

    #[test]
    fn test_require_missing() {
        let table = FuelTable { profiles: vec![COAL] };
        assert!(table.require(FuelKind::NaturalGas).is_err());
    }
}
