//! # calc_core - Facility Load and Emission Calculation Engine
//!
//! `calc_core` is the computational heart of Loadline: electrical load sizing
//! of a facility by the method of ordered diagrams, and gross particulate
//! emission from the fuel it burns. All inputs and outputs are
//! JSON-serializable, so the same types serve a form, a file or an API.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a snapshot and return results
//! - **Total**: Blank or malformed input degrades to a default, never an error
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Traceable**: Every formula lives in [`equations`] with its source
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::load::{aggregate, EquipmentItem, DEFAULT_KR};
//!
//! let saw = EquipmentItem::new(4, "Circular saw")
//!     .with_count(4.0)
//!     .with_rated_power(20.0)
//!     .with_utilization_rate(0.15)
//!     .with_reactive_factor(1.33);
//!
//! let result = aggregate(&[saw], DEFAULT_KR);
//! println!("Pр = {:.2} kW", result.active_load);
//! ```
//!
//! ## Modules
//!
//! - [`parsing`] - Text-to-number boundary with role defaults
//! - [`equations`] - Every formula, plus the equation registry
//! - [`calculations`] - Load aggregation and emission estimate
//! - [`reference`] - Fuel properties and the reference equipment catalog
//! - [`worksheet`] - Worksheet container, settings and document decoding
//! - [`report`] - Evaluated worksheet results
//! - [`errors`] - Structured error types for the outer boundaries

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod parsing;
pub mod reference;
pub mod report;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use report::Report;
pub use worksheet::{FuelAmounts, GlobalSettings, Worksheet, WorksheetFormat, WorksheetMetadata};
