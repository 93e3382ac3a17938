//! # Equation Registry
//!
//! Central registry of every formula used by the calculations. Each equation
//! carries metadata (plain-text formula, variables, reference, source
//! location) so the full set can be audited from one generated document.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::Equation;
//!
//! let meta = Equation::EffectiveQuantity.metadata();
//! println!("{}: {}", meta.name, meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Normative document a formula is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// Guidelines for calculating electrical loads (RTM 36.18.32.4-92)
    Rtm { section: &'static str },
    /// Emission estimation methodology for power plants (GKD 34.02.305-2002)
    Gkd { section: &'static str },
    /// Elementary circuit theory, no specific document
    CircuitTheory,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Rtm { section } => format!("RTM 36.18.32.4-92, {}", section),
            CodeReference::Gkd { section } => format!("GKD 34.02.305-2002, {}", section),
            CodeReference::CircuitTheory => "Circuit theory".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Rtm { .. } => "RTM",
            CodeReference::Gkd { .. } => "GKD",
            CodeReference::CircuitTheory => "Circuit theory",
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Groups for organizing the generated reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Quantities computed for each receiver group
    PerItem,
    /// Facility totals of the load calculation
    Aggregates,
    /// Particulate emission
    Emission,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::PerItem => "Per-Item Quantities",
            EquationCategory::Aggregates => "Facility Load Totals",
            EquationCategory::Emission => "Particulate Emission",
        }
    }

    /// Sort order in the generated reference (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::PerItem => 1,
            EquationCategory::Aggregates => 2,
            EquationCategory::Emission => 3,
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What the equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    /// Assumptions, guards and limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas used in the calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// n·P
    RatedPowerProduct,
    /// n·P·Kv
    UtilizedPowerProduct,
    /// n·P·Kv·tgφ
    ReactivePowerProduct,
    /// n·P²
    SquaredPowerProduct,
    /// n·P / (√3·U·cosφ·η)
    GroupCurrent,
    /// Σ(n·P·Kv) / Σ(n·P)
    GroupUtilizationRate,
    /// (Σn·P)² / Σn·P²
    EffectiveQuantity,
    /// Kr·Σ(n·P·Kv)
    ActiveLoad,
    /// Kr·Σ(n·P·Kv·tgφ)
    ReactiveLoad,
    /// √(Pр² + Qр²)
    FullPower,
    /// Pр / U_ref
    TotalGroupCurrent,
    /// (10⁶/Q)·a_fly·A_r/(100 − G_fly)·(1 − η_f)
    EmissionFactor,
    /// 10⁻⁶·k·Q·B
    GrossEmission,
    /// ΣE
    FacilityEmission,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::RatedPowerProduct => EquationMetadata {
                name: "Rated Power of a Group",
                description: "Total rated active power of n identical receivers",
                formula_plain: "n*P",
                reference: CodeReference::Rtm { section: "Table 1, column 4" },
                variables: vec![
                    Variable::new("n", "Number of receivers", "pcs"),
                    Variable::new("P", "Rated power of one receiver", "kW"),
                ],
                assumptions: vec!["Blank n or P counts as 0"],
                category: EquationCategory::PerItem,
                source_module: "equations/load.rs",
                source_function: "product1",
            },

            Equation::UtilizedPowerProduct => EquationMetadata {
                name: "Utilized Active Power of a Group",
                description: "Average active power drawn by the group",
                formula_plain: "n*P*Kv",
                reference: CodeReference::Rtm { section: "Table 1, column 6" },
                variables: vec![Variable::new("Kv", "Utilization rate", "-")],
                assumptions: vec!["Blank Kv counts as 0"],
                category: EquationCategory::PerItem,
                source_module: "equations/load.rs",
                source_function: "product2",
            },

            Equation::ReactivePowerProduct => EquationMetadata {
                name: "Utilized Reactive Power of a Group",
                description: "Average reactive power drawn by the group",
                formula_plain: "n*P*Kv*tg(phi)",
                reference: CodeReference::Rtm { section: "Table 1, column 7" },
                variables: vec![Variable::new("tg(phi)", "Reactive power factor", "-")],
                assumptions: vec!["Blank tg(phi) counts as 0"],
                category: EquationCategory::PerItem,
                source_module: "equations/load.rs",
                source_function: "product3",
            },

            Equation::SquaredPowerProduct => EquationMetadata {
                name: "Squared Power of a Group",
                description: "Contribution of the group to the effective number of receivers",
                formula_plain: "n*P^2",
                reference: CodeReference::Rtm { section: "Table 1, column 8" },
                variables: vec![
                    Variable::new("n", "Number of receivers", "pcs"),
                    Variable::new("P", "Rated power of one receiver", "kW"),
                ],
                assumptions: vec![],
                category: EquationCategory::PerItem,
                source_module: "equations/load.rs",
                source_function: "product4",
            },

            Equation::GroupCurrent => EquationMetadata {
                name: "Group Design Current",
                description: "Current drawn by the group at rated power",
                formula_plain: "Ip = n*P / (sqrt(3)*U*cos(phi)*eta)",
                reference: CodeReference::CircuitTheory,
                variables: vec![
                    Variable::new("U", "Supply voltage", "kV"),
                    Variable::new("cos(phi)", "Power factor", "-"),
                    Variable::new("eta", "Efficiency", "-"),
                    Variable::new("Ip", "Group current", "A"),
                ],
                assumptions: vec![
                    "Blank U, cos(phi) or eta counts as 1",
                    "Result is 0 when U, cos(phi) or eta is exactly 0",
                ],
                category: EquationCategory::PerItem,
                source_module: "equations/load.rs",
                source_function: "group_current",
            },

            Equation::GroupUtilizationRate => EquationMetadata {
                name: "Group Utilization Rate",
                description: "Power-weighted mean utilization rate of all groups",
                formula_plain: "Kv = sum(n*P*Kv) / sum(n*P)",
                reference: CodeReference::Rtm { section: "Eq. 2" },
                variables: vec![Variable::new("Kv", "Group utilization rate", "-")],
                assumptions: vec!["Result is 0 when sum(n*P) <= 0"],
                category: EquationCategory::Aggregates,
                source_module: "equations/load.rs",
                source_function: "utilization_rate",
            },

            Equation::EffectiveQuantity => EquationMetadata {
                name: "Effective Number of Receivers",
                description: "Number of identical receivers equivalent to the real mixed fleet",
                formula_plain: "ne = (sum(n*P))^2 / sum(n*P^2)",
                reference: CodeReference::Rtm { section: "Eq. 3" },
                variables: vec![Variable::new("ne", "Effective number of receivers", "pcs")],
                assumptions: vec!["Result is 0 when sum(n*P^2) <= 0"],
                category: EquationCategory::Aggregates,
                source_module: "equations/load.rs",
                source_function: "effective_quantity",
            },

            Equation::ActiveLoad => EquationMetadata {
                name: "Design Active Load",
                description: "Design-basis active load of the facility",
                formula_plain: "Pr = Kr * sum(n*P*Kv)",
                reference: CodeReference::Rtm { section: "Eq. 4" },
                variables: vec![
                    Variable::new("Kr", "Statistical load coefficient", "-"),
                    Variable::new("Pr", "Design active load", "kW"),
                ],
                assumptions: vec!["Kr = 1.16 for the reference shop"],
                category: EquationCategory::Aggregates,
                source_module: "equations/load.rs",
                source_function: "design_load",
            },

            Equation::ReactiveLoad => EquationMetadata {
                name: "Design Reactive Load",
                description: "Design-basis reactive load of the facility",
                formula_plain: "Qr = Kr * sum(n*P*Kv*tg(phi))",
                reference: CodeReference::Rtm { section: "Eq. 5" },
                variables: vec![Variable::new("Qr", "Design reactive load", "kvar")],
                assumptions: vec!["Same Kr as the active load"],
                category: EquationCategory::Aggregates,
                source_module: "equations/load.rs",
                source_function: "design_load",
            },

            Equation::FullPower => EquationMetadata {
                name: "Apparent Power",
                description: "Design apparent power of the facility",
                formula_plain: "Sr = sqrt(Pr^2 + Qr^2)",
                reference: CodeReference::CircuitTheory,
                variables: vec![Variable::new("Sr", "Apparent power", "kVA")],
                assumptions: vec![],
                category: EquationCategory::Aggregates,
                source_module: "equations/load.rs",
                source_function: "full_power",
            },

            Equation::TotalGroupCurrent => EquationMetadata {
                name: "Facility Design Current",
                description: "Design current of the facility at the reference voltage",
                formula_plain: "Ir = Pr / U_ref",
                reference: CodeReference::Rtm { section: "Eq. 7" },
                variables: vec![
                    Variable::new("U_ref", "Voltage of the reference item", "kV"),
                    Variable::new("Ir", "Design current", "A"),
                ],
                assumptions: vec![
                    "U_ref is the voltage of the first item unless another item is designated",
                    "U_ref = 10 kV when the reference item or its voltage is missing",
                    "Result is 0 when U_ref <= 0",
                ],
                category: EquationCategory::Aggregates,
                source_module: "equations/load.rs",
                source_function: "total_group_current",
            },

            Equation::EmissionFactor => EquationMetadata {
                name: "Solid Particle Emission Factor",
                description: "Mass of particles emitted per unit of heat released",
                formula_plain: "k = (10^6/Q) * a_fly * A_r/(100 - G_fly) * (1 - eta_f)",
                reference: CodeReference::Gkd { section: "Eq. 2.2" },
                variables: vec![
                    Variable::new("Q", "Lower heat of combustion, working mass", "MJ/kg"),
                    Variable::new("a_fly", "Fly ash fraction", "-"),
                    Variable::new("A_r", "Ash content, working mass", "%"),
                    Variable::new("G_fly", "Combustibles in fly ash", "%"),
                    Variable::new("eta_f", "Ash collector efficiency", "-"),
                    Variable::new("k", "Emission factor", "g/GJ"),
                ],
                assumptions: vec![
                    "No sulfur-oxide binding by ash",
                    "Result is 0 when Q = 0 or G_fly = 100",
                ],
                category: EquationCategory::Emission,
                source_module: "equations/emission.rs",
                source_function: "gross_emission_factor",
            },

            Equation::GrossEmission => EquationMetadata {
                name: "Gross Emission",
                description: "Total mass of particles emitted by burning B units of fuel",
                formula_plain: "E = 10^-6 * k * Q * B",
                reference: CodeReference::Gkd { section: "Eq. 2.1" },
                variables: vec![
                    Variable::new("B", "Burned fuel", "t (m3 for gas)"),
                    Variable::new("E", "Gross emission", "t"),
                ],
                assumptions: vec!["Blank B counts as 0"],
                category: EquationCategory::Emission,
                source_module: "equations/emission.rs",
                source_function: "emission_rate",
            },

            Equation::FacilityEmission => EquationMetadata {
                name: "Facility Emission",
                description: "Sum of the gross emissions of all fuels",
                formula_plain: "E_total = E_coal + E_oil + E_gas",
                reference: CodeReference::Gkd { section: "Sec. 2" },
                variables: vec![Variable::new("E_total", "Facility gross emission", "t")],
                assumptions: vec!["Summed without rounding"],
                category: EquationCategory::Emission,
                source_module: "calculations/emission.rs",
                source_function: "estimate_facility",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// All categories in sort order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![PerItem, Aggregates, Emission];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Per item
    Equation::RatedPowerProduct,
    Equation::UtilizedPowerProduct,
    Equation::ReactivePowerProduct,
    Equation::SquaredPowerProduct,
    Equation::GroupCurrent,
    // Totals
    Equation::GroupUtilizationRate,
    Equation::EffectiveQuantity,
    Equation::ActiveLoad,
    Equation::ReactiveLoad,
    Equation::FullPower,
    Equation::TotalGroupCurrent,
    // Emission
    Equation::EmissionFactor,
    Equation::GrossEmission,
    Equation::FacilityEmission,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the equations reference as markdown.
///
/// ```rust
/// use calc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Loadline Equations Reference"));
/// assert!(markdown.contains("Facility Load Totals"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Loadline Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the load and emission calculations,
with its variables, normative reference and implementing function.

## Input Conventions

| Situation | Value used |
|-----------|------------|
| Blank or malformed additive field (n, P, Kv, tg(phi), B) | 0 |
| Blank or malformed divisor field (U, cos(phi), eta) | 1 |
| Division by an exact zero | result is 0 |

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
