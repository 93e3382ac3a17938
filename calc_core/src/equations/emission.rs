//! # Particulate Emission Formulas
//!
//! Gross emission of solid particles from burning a fuel in a boiler fitted
//! with an ash collector.
//!
//! ## Notation
//!
//! - `Q` = Lower heat of combustion of the working mass (MJ/kg or MJ/m³)
//! - `a_fly` = Fraction of ash carried away as fly ash
//! - `A_r` = Ash content of the working mass (%)
//! - `G_fly` = Combustibles in fly ash (%)
//! - `η_f` = Ash collector (filter) efficiency
//! - `B` = Burned amount (t for coal and fuel oil, m³ for gas)
//!
//! The emission factor `k` is in g/GJ; the gross emission is in tonnes.

use crate::reference::FuelProfile;

/// Grams per gigajoule for a fuel expressed in MJ per unit
const G_PER_GJ: f64 = 1.0e6;

/// Tonnes per (g/GJ · MJ)
const T_PER_G_MJ: f64 = 1.0e-6;

/// Solid particle emission factor k (g/GJ).
///
/// # Formula
/// k = (10⁶ / Q) · a_fly · A_r / (100 − G_fly) · (1 − η_f)
///
/// Returns `0.0` when `Q` is zero or when `G_fly` is 100 %.
///
/// # Example
/// ```rust
/// use calc_core::equations::emission::gross_emission_factor;
/// use calc_core::reference::fuels::COAL;
///
/// let k = gross_emission_factor(&COAL, 0.985);
/// assert!((k - 149.98).abs() < 0.01);
/// ```
pub fn gross_emission_factor(profile: &FuelProfile, filter_efficiency: f64) -> f64 {
    let ash_denominator = 100.0 - profile.ash_combustibles_pct;
    if profile.heat_of_combustion == 0.0 || ash_denominator == 0.0 {
        return 0.0;
    }
    (G_PER_GJ / profile.heat_of_combustion)
        * profile.fly_ash_fraction
        * (profile.ash_content_pct / ash_denominator)
        * (1.0 - filter_efficiency)
}

/// Gross emission of solid particles (t) for a burned amount of fuel.
///
/// # Formula
/// E = 10⁻⁶ · k · Q · B
///
/// Linear in `amount`: doubling the amount doubles the emission exactly.
///
/// # Example
/// ```rust
/// use calc_core::equations::emission::emission_rate;
/// use calc_core::reference::fuels::{COAL, NATURAL_GAS};
///
/// let e = emission_rate(&COAL, 0.985, 1000.0);
/// assert!((e - 3.07).abs() < 0.01);
/// assert_eq!(emission_rate(&NATURAL_GAS, 0.985, 1000.0), 0.0);
/// ```
pub fn emission_rate(profile: &FuelProfile, filter_efficiency: f64, amount: f64) -> f64 {
    T_PER_G_MJ * gross_emission_factor(profile, filter_efficiency) * profile.heat_of_combustion * amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::fuels::{COAL, FUEL_OIL, NATURAL_GAS};
    use crate::reference::FuelKind;
    use proptest::prelude::*;

    fn unfiltered(profile: &FuelProfile, amount: f64) -> f64 {
        profile.fly_ash_fraction * (profile.ash_content_pct / (100.0 - profile.ash_combustibles_pct)) * amount
    }

    #[test]
    fn test_reference_factors() {
        // Donetsk gas coal, 98.5 % collector
        assert!((gross_emission_factor(&COAL, 0.985) - 149.98).abs() < 0.01);
        // Fuel oil
        assert!((gross_emission_factor(&FUEL_OIL, 0.985) - 0.57).abs() < 0.001);
        // Natural gas has no ash
        assert_eq!(gross_emission_factor(&NATURAL_GAS, 0.985), 0.0);
    }

    #[test]
    fn test_reference_emissions() {
        let coal = emission_rate(&COAL, 0.985, 1_096_363.0);
        assert!((coal - 3365.9).abs() < 0.5, "coal emission {}", coal);

        let oil = emission_rate(&FUEL_OIL, 0.985, 70_945.0);
        assert!((oil - 1.60).abs() < 0.01, "oil emission {}", oil);
    }

    #[test]
    fn test_full_filtration_is_zero() {
        for profile in [COAL, FUEL_OIL, NATURAL_GAS] {
            assert_eq!(emission_rate(&profile, 1.0, 12_345.0), 0.0);
        }
    }

    #[test]
    fn test_degenerate_profiles_are_zero() {
        let no_heat = FuelProfile { heat_of_combustion: 0.0, ..COAL };
        assert_eq!(gross_emission_factor(&no_heat, 0.0), 0.0);
        assert_eq!(emission_rate(&no_heat, 0.0, 100.0), 0.0);

        let all_combustible = FuelProfile { ash_combustibles_pct: 100.0, ..COAL };
        assert_eq!(gross_emission_factor(&all_combustible, 0.0), 0.0);
    }

    #[test]
    fn test_zero_amount() {
        assert_eq!(emission_rate(&COAL, 0.985, 0.0), 0.0);
        assert_eq!(COAL.kind, FuelKind::Coal);
    }

    proptest! {
        #[test]
        fn prop_linear_in_amount(amount in 0.0f64..1e7, eff in 0.0f64..1.0) {
            for profile in [COAL, FUEL_OIL, NATURAL_GAS] {
                prop_assert_eq!(
                    emission_rate(&profile, eff, 2.0 * amount),
                    2.0 * emission_rate(&profile, eff, amount)
                );
            }
        }

        #[test]
        fn prop_no_filtration_matches_simplified(amount in 0.0f64..1e7) {
            for profile in [COAL, FUEL_OIL, NATURAL_GAS] {
                let full = emission_rate(&profile, 0.0, amount);
                let simple = unfiltered(&profile, amount);
                prop_assert!((full - simple).abs() <= 1e-12 * simple.abs().max(1.0));
            }
        }
    }
}
