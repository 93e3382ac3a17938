//! # Engineering Equations
//!
//! Every formula the calculations use, in one place. Keeping them here
//! enables:
//! - Verification against the normative documents line by line
//! - A generated reference of all formulas (`cargo run --bin gen-equations`)
//! - Consistent zero-guards across calculation types
//!
//! ## Modules
//!
//! - [`load`] - Method of ordered diagrams (per-item products and totals)
//! - [`emission`] - Solid particle emission of burned fuel
//! - [`registry`] - Equation metadata and markdown generation
//!
//! ## References
//!
//! - RTM 36.18.32.4-92: Guidelines for calculating electrical loads
//! - GKD 34.02.305-2002: Emissions of pollutants from power plants, estimation methodology

pub mod emission;
pub mod load;
pub mod registry;

pub use emission::{emission_rate, gross_emission_factor};

pub use load::{
    design_load,
    effective_quantity,
    full_power,
    group_current,
    product1,
    product2,
    product3,
    product4,
    total_group_current,
    utilization_rate,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
