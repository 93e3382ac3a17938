//! # Reference Data
//!
//! Fixed physical constants and catalogs the calculations are parameterized
//! over. Nothing here is mutated at runtime; callers that need different
//! values build their own [`FuelTable`] or equipment rows.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::reference::{FuelKind, FuelTable};
//!
//! let table = FuelTable::builtin();
//! let coal = table.get(FuelKind::Coal).unwrap();
//! println!("{}: Q = {} MJ/{}", coal.kind, coal.heat_of_combustion, coal.kind.quantity_unit());
//! ```

pub mod equipment;
pub mod fuels;

pub use equipment::{default_rows, EquipmentCategory, EQUIPMENT_CATALOG};
pub use fuels::{FuelKind, FuelProfile, FuelTable, DEFAULT_FILTER_EFFICIENCY};
