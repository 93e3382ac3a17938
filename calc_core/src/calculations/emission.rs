//! # Particulate Emission Estimate
//!
//! Gross solid-particle emission for each fuel burned at a facility and the
//! facility total.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::emission::{estimate_facility, EmissionInput};
//! use calc_core::reference::{FuelKind, FuelTable, DEFAULT_FILTER_EFFICIENCY};
//!
//! let inputs = [
//!     EmissionInput::new(FuelKind::Coal, 1_096_363.0),
//!     EmissionInput::new(FuelKind::FuelOil, 70_945.0),
//!     EmissionInput::new(FuelKind::NaturalGas, 84_762.0),
//! ];
//! let result = estimate_facility(&inputs, DEFAULT_FILTER_EFFICIENCY, &FuelTable::builtin());
//!
//! assert_eq!(result.fuels.len(), 3);
//! assert!((result.total_t - 3367.49).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::emission as eq;
use crate::parsing::FieldText;
use crate::reference::{FuelKind, FuelProfile, FuelTable};

/// Burned amount of one fuel.
///
/// ## JSON Example
///
/// ```json
/// { "fuel": "coal", "amount": 1096363.0, "filter_efficiency": 0.985 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionInput {
    pub fuel: FuelKind,
    /// Tonnes for coal and fuel oil, cubic meters for gas
    pub amount: f64,
    /// Overrides the shared collector efficiency for this fuel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_efficiency: Option<f64>,
}

impl EmissionInput {
    pub fn new(fuel: FuelKind, amount: f64) -> Self {
        EmissionInput {
            fuel,
            amount,
            filter_efficiency: None,
        }
    }

    /// Build from form text; unusable text means nothing was burned
    pub fn from_text(fuel: FuelKind, amount: &FieldText) -> Self {
        EmissionInput::new(fuel, amount.value().unwrap_or(0.0))
    }

    pub fn with_filter_efficiency(mut self, efficiency: f64) -> Self {
        self.filter_efficiency = Some(efficiency);
        self
    }
}

/// Emission of one fuel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelEmission {
    pub fuel: FuelKind,
    /// Burned amount, in the fuel's quantity unit
    pub amount: f64,
    /// Collector efficiency applied
    pub filter_efficiency: f64,
    /// Emission factor k (g/GJ)
    pub emission_factor_g_per_gj: f64,
    /// Gross emission (t)
    pub emission_t: f64,
}

/// Emissions of all fuels burned at a facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityEmissions {
    pub fuels: Vec<FuelEmission>,
    /// Shared collector efficiency
    pub filter_efficiency: f64,
    /// Sum of the per-fuel emissions (t)
    pub total_t: f64,
}

impl FacilityEmissions {
    pub fn for_fuel(&self, fuel: FuelKind) -> Option<&FuelEmission> {
        self.fuels.iter().find(|f| f.fuel == fuel)
    }
}

/// Gross emission of `amount` of a fuel (t).
pub fn emission_rate(profile: &FuelProfile, filter_efficiency: f64, amount: f64) -> f64 {
    eq::emission_rate(profile, filter_efficiency, amount)
}

/// Evaluate one fuel against its profile.
pub fn estimate_fuel(profile: &FuelProfile, filter_efficiency: f64, amount: f64) -> FuelEmission {
    FuelEmission {
        fuel: profile.kind,
        amount,
        filter_efficiency,
        emission_factor_g_per_gj: eq::gross_emission_factor(profile, filter_efficiency),
        emission_t: eq::emission_rate(profile, filter_efficiency, amount),
    }
}

/// Estimate every input and the facility total.
///
/// Inputs whose fuel has no profile in `table` are skipped (logged at debug);
/// the built-in table covers every [`FuelKind`].
pub fn estimate_facility(inputs: &[EmissionInput], filter_efficiency: f64, table: &FuelTable) -> FacilityEmissions {
    let fuels: Vec<FuelEmission> = inputs
        .iter()
        .filter_map(|input| match table.get(input.fuel) {
            Some(profile) => Some(estimate_fuel(
                profile,
                input.filter_efficiency.unwrap_or(filter_efficiency),
                input.amount,
            )),
            None => {
                tracing::debug!(fuel = input.fuel.code(), "no profile for fuel, skipped");
                None
            }
        })
        .collect();

    let total_t = fuels.iter().fold(0.0, |acc, f| acc + f.emission_t);

    FacilityEmissions {
        fuels,
        filter_efficiency,
        total_t,
    }
}
