//! Plain-text rendering of results.
//!
//! Two decimals throughout, three for the utilization rate and the reference
//! voltage, none for the receiver count.

use std::fmt::{self, Write};

use calc_core::calculations::emission::FacilityEmissions;
use calc_core::calculations::load::AggregateResult;
use calc_core::equations::gross_emission_factor;
use calc_core::reference::FuelTable;
use calc_core::Report;

const RULE: &str = "═══════════════════════════════════════";

fn header(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "{}", RULE)
}

pub fn load(result: &AggregateResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    header(&mut out, "FACILITY LOAD (method of ordered diagrams)")?;

    writeln!(
        out,
        "{:>3}  {:<20} {:>6} {:>9} {:>6} {:>10} {:>10} {:>12} {:>12} {:>9}",
        "#", "Equipment", "n", "P, kW", "Kv", "n·P", "n·P·Kv", "n·P·Kv·tgφ", "n·P²", "I, A"
    )?;
    for item in &result.items {
        writeln!(
            out,
            "{:>3}  {:<20} {:>6.0} {:>9.2} {:>6.3} {:>10.2} {:>10.2} {:>12.2} {:>12.2} {:>9.2}",
            item.id,
            item.name,
            item.count,
            item.rated_power_kw,
            item.utilization_rate,
            item.product1,
            item.product2,
            item.product3,
            item.product4,
            item.group_current_a
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Totals:")?;
    writeln!(out, "  Σn           = {:.0}", result.total_count)?;
    writeln!(out, "  Σ n·P        = {:.2} kW", result.sum_rated_power)?;
    writeln!(out, "  Σ n·P·Kv     = {:.2} kW", result.sum_utilized_power)?;
    writeln!(out, "  Σ n·P·Kv·tgφ = {:.2} kvar", result.sum_reactive_power)?;
    writeln!(out, "  Σ n·P²       = {:.2} kW²", result.sum_squared_power)?;
    writeln!(out)?;
    writeln!(out, "  Kv = {:.3}", result.utilization_rate)?;
    writeln!(out, "  nₑ = {:.2}", result.effective_quantity)?;
    writeln!(out, "  Kr = {:.2}", result.kr)?;
    writeln!(out)?;
    writeln!(out, "  Pр = {:.2} kW", result.active_load)?;
    writeln!(out, "  Qр = {:.2} kvar", result.reactive_load)?;
    writeln!(out, "  Sр = {:.2} kVA", result.full_power)?;
    writeln!(
        out,
        "  Iр = {:.2} A (U = {:.3} kV)",
        result.group_current, result.reference_voltage
    )?;
    Ok(out)
}

pub fn emissions(result: &FacilityEmissions) -> Result<String, fmt::Error> {
    let mut out = String::new();
    header(&mut out, "PARTICULATE EMISSION")?;

    writeln!(
        out,
        "{:<12} {:>16} {:>14} {:>8} {:>12}",
        "Fuel", "Burned", "k, g/GJ", "η_filt", "M, t"
    )?;
    for fuel in &result.fuels {
        writeln!(
            out,
            "{:<12} {:>13.2} {:<2} {:>14.2} {:>8.3} {:>12.2}",
            fuel.fuel.display_name(),
            fuel.amount,
            fuel.fuel.quantity_unit(),
            fuel.emission_factor_g_per_gj,
            fuel.filter_efficiency,
            fuel.emission_t
        )?;
    }
    writeln!(out)?;
    writeln!(out, "  Total emission = {:.2} t", result.total_t)?;
    Ok(out)
}

pub fn report(report: &Report) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let meta = &report.meta;
    if !meta.facility.is_empty() {
        writeln!(out, "Facility: {}", meta.facility)?;
    }
    if !meta.job_id.is_empty() {
        writeln!(out, "Job:      {}", meta.job_id)?;
    }
    if !meta.engineer.is_empty() {
        writeln!(out, "Engineer: {}", meta.engineer)?;
    }
    writeln!(out, "Generated: {}", report.generated.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out)?;
    out.push_str(&load(&report.load)?);
    writeln!(out)?;
    out.push_str(&emissions(&report.emissions)?);
    Ok(out)
}

pub fn fuels(table: &FuelTable, filter_efficiency: f64) -> Result<String, fmt::Error> {
    let mut out = String::new();
    header(&mut out, "FUEL REFERENCE")?;
    writeln!(
        out,
        "{:<12} {:>10} {:>7} {:>8} {:>8} {:>10}",
        "Fuel", "Q, MJ", "a_fly", "A_r, %", "G_fly, %", "k, g/GJ"
    )?;
    for profile in table.profiles() {
        writeln!(
            out,
            "{:<12} {:>10.2} {:>7.2} {:>8.2} {:>8.2} {:>10.2}",
            profile.kind.display_name(),
            profile.heat_of_combustion,
            profile.fly_ash_fraction,
            profile.ash_content_pct,
            profile.ash_combustibles_pct,
            gross_emission_factor(profile, filter_efficiency)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "k at collector efficiency {:.3}", filter_efficiency)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::calculations::emission::{estimate_facility, EmissionInput};
    use calc_core::calculations::load::{aggregate, EquipmentItem, DEFAULT_KR};
    use calc_core::reference::{FuelKind, DEFAULT_FILTER_EFFICIENCY};

    #[test]
    fn test_load_worked_example() {
        let item = EquipmentItem::new(1, "Grinding machine")
            .with_count(3.0)
            .with_rated_power(10.0)
            .with_utilization_rate(0.6)
            .with_reactive_factor(0.75);
        let text = load(&aggregate(&[item], DEFAULT_KR)).unwrap();

        assert!(text.contains("Σn           = 3\n"));
        assert!(text.contains("Σ n·P        = 30.00 kW"));
        assert!(text.contains("Kv = 0.600"));
        assert!(text.contains("nₑ = 3.00"));
        assert!(text.contains("Pр = 20.88 kW"));
        assert!(text.contains("Qр = 15.66 kvar"));
        assert!(text.contains("Sр = 26.10 kVA"));
        assert!(text.contains("U = 10.000 kV"));
    }

    #[test]
    fn test_empty_load_prints_zeros() {
        let text = load(&aggregate(&[], DEFAULT_KR)).unwrap();
        assert!(text.contains("Pр = 0.00 kW"));
        assert!(!text.contains("-0.00"));
    }

    #[test]
    fn test_emissions_total() {
        let inputs = [EmissionInput::new(FuelKind::Coal, 1000.0)];
        let text = emissions(&estimate_facility(&inputs, DEFAULT_FILTER_EFFICIENCY, &FuelTable::builtin())).unwrap();
        assert!(text.contains("Coal"));
        assert!(text.contains("Total emission = 3.07 t"));
    }

    #[test]
    fn test_fuel_table() {
        let text = fuels(&FuelTable::builtin(), DEFAULT_FILTER_EFFICIENCY).unwrap();
        assert!(text.contains("Natural gas"));
        assert!(text.contains("149.98"));
    }
}
