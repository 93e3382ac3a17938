//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` / `*Item` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - a pure function from inputs to results that cannot fail
//!
//! Inputs arrive as text from a form and are parsed once at the boundary
//! (see [`crate::parsing`]); the functions here only see floats.
//!
//! ## Available Calculations
//!
//! - [`load`] - Facility electrical load by the method of ordered diagrams
//! - [`emission`] - Solid particle emission from burned fuel

pub mod emission;
pub mod load;

// Re-export commonly used types
pub use emission::{estimate_facility, EmissionInput, FacilityEmissions, FuelEmission};
pub use load::{
    aggregate, aggregate_rows, aggregate_with, AggregateResult, EquipmentField, EquipmentItem, EquipmentRow,
    ItemResult, LoadSettings, ReferenceItem,
};
