//! # Worksheet
//!
//! The `Worksheet` is the root container for one facility: metadata,
//! settings, the equipment form and the burned fuel amounts. It is an
//! immutable snapshot of what a user typed; [`Worksheet::evaluate`] turns it
//! into a [`Report`].
//!
//! ## Structure
//!
//! ```text
//! Worksheet
//! ├── meta: WorksheetMetadata (schema version, engineer, job, facility)
//! ├── settings: GlobalSettings (Kr, collector efficiency, reference voltage)
//! ├── equipment: Vec<EquipmentRow> (raw form rows, in display order)
//! └── fuels: FuelAmounts (raw burned amounts)
//! ```
//!
//! Worksheets are read from JSON or TOML documents. Every section may be
//! omitted; missing sections take the reference-shop defaults.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::worksheet::Worksheet;
//!
//! let toml = r#"
//! [meta]
//! version = "0.1.0"
//! facility = "Woodworking shop"
//!
//! [[equipment]]
//! id = 1
//! name = "Grinding machine"
//! count = 3
//! rated_power = "10"
//! utilization_rate = 0.6
//! reactive_factor = 0.75
//!
//! [fuels]
//! coal = "1000"
//! "#;
//!
//! let worksheet = Worksheet::from_toml_str(toml).unwrap();
//! let report = worksheet.evaluate();
//! assert!((report.load.active_load - 20.88).abs() < 1e-9);
//! assert!(report.emissions.total_t > 0.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::emission::{estimate_facility, EmissionInput};
use crate::calculations::load::{
    aggregate_rows, EquipmentRow, LoadSettings, ReferenceItem, DEFAULT_KR, DEFAULT_REFERENCE_VOLTAGE,
};
use crate::errors::{CalcError, CalcResult};
use crate::parsing::FieldText;
use crate::reference::equipment::default_rows;
use crate::reference::{FuelKind, FuelProfile, FuelTable, DEFAULT_FILTER_EFFICIENCY};
use crate::report::Report;

/// Current schema version for worksheet documents
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Document encodings a worksheet can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorksheetFormat {
    Json,
    Toml,
}

impl WorksheetFormat {
    /// Pick the format from a file extension; anything but `.toml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => WorksheetFormat::Toml,
            _ => WorksheetFormat::Json,
        }
    }
}

/// Root worksheet container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    #[serde(default)]
    pub meta: WorksheetMetadata,

    #[serde(default)]
    pub settings: GlobalSettings,

    /// Equipment form rows, in display order
    #[serde(default = "default_rows")]
    pub equipment: Vec<EquipmentRow>,

    #[serde(default)]
    pub fuels: FuelAmounts,
}

impl Worksheet {
    /// Create a worksheet for the reference shop with every field blank.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calc_core::worksheet::Worksheet;
    ///
    /// let ws = Worksheet::new("J. Engineer", "26-014", "Sawmill No. 2");
    /// assert_eq!(ws.equipment.len(), 8);
    /// assert!(ws.equipment.iter().all(|row| row.is_blank()));
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, facility: impl Into<String>) -> Self {
        Worksheet {
            meta: WorksheetMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                facility: facility.into(),
            },
            settings: GlobalSettings::default(),
            equipment: default_rows(),
            fuels: FuelAmounts::default(),
        }
    }

    /// Decode a JSON worksheet with the built-in settings as fallback
    pub fn from_json_str(contents: &str) -> CalcResult<Self> {
        Self::from_str_as(contents, WorksheetFormat::Json, &GlobalSettings::default())
    }

    /// Decode a TOML worksheet with the built-in settings as fallback
    pub fn from_toml_str(contents: &str) -> CalcResult<Self> {
        Self::from_str_as(contents, WorksheetFormat::Toml, &GlobalSettings::default())
    }

    /// Decode in the given format and check the schema version.
    ///
    /// Settings keys the document leaves out are taken from `defaults`, so a
    /// worksheet without a `settings` section runs with the caller's values.
    ///
    /// ```rust
    /// use calc_core::worksheet::{GlobalSettings, Worksheet, WorksheetFormat};
    ///
    /// let defaults = GlobalSettings { kr: 1.0, ..GlobalSettings::default() };
    /// let ws = Worksheet::from_str_as(r#"{"settings": {"filter_efficiency": 0.9}}"#, WorksheetFormat::Json, &defaults)
    ///     .unwrap();
    /// assert_eq!(ws.settings.kr, 1.0);
    /// assert_eq!(ws.settings.filter_efficiency, 0.9);
    /// ```
    pub fn from_str_as(contents: &str, format: WorksheetFormat, defaults: &GlobalSettings) -> CalcResult<Self> {
        let document: WorksheetDocument = match format {
            WorksheetFormat::Json => serde_json::from_str(contents)?,
            WorksheetFormat::Toml => toml::from_str(contents)?,
        };
        validate_version(&document.meta.version)?;
        Ok(document.into_worksheet(defaults))
    }

    /// Number of rows with at least one field filled in
    pub fn filled_row_count(&self) -> usize {
        self.equipment.iter().filter(|r| !r.is_blank()).count()
    }

    /// Run both calculations on this snapshot.
    ///
    /// Never fails. Settings are used as given; call
    /// [`GlobalSettings::validate`] first to reject nonsense values.
    pub fn evaluate(&self) -> Report {
        tracing::debug!(
            rows = self.equipment.len(),
            filled = self.filled_row_count(),
            kr = self.settings.kr,
            "evaluating worksheet"
        );

        let load = aggregate_rows(&self.equipment, &self.settings.load_settings());
        let emissions = estimate_facility(
            &self.fuels.inputs(),
            self.settings.filter_efficiency,
            &self.settings.fuel_table(),
        );

        Report::new(self.meta.clone(), load, emissions)
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Worksheet::new("", "", "")
    }
}

/// Worksheet as written in a document, before settings are layered
#[derive(Deserialize)]
struct WorksheetDocument {
    #[serde(default)]
    meta: WorksheetMetadata,

    #[serde(default)]
    settings: SettingsOverrides,

    #[serde(default = "default_rows")]
    equipment: Vec<EquipmentRow>,

    #[serde(default)]
    fuels: FuelAmounts,
}

impl WorksheetDocument {
    fn into_worksheet(self, defaults: &GlobalSettings) -> Worksheet {
        Worksheet {
            meta: self.meta,
            settings: self.settings.apply(defaults),
            equipment: self.equipment,
            fuels: self.fuels,
        }
    }
}

/// Worksheet metadata stored in the document header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorksheetMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Facility the worksheet describes
    pub facility: String,
}

impl Default for WorksheetMetadata {
    fn default() -> Self {
        WorksheetMetadata {
            version: SCHEMA_VERSION.to_string(),
            engineer: String::new(),
            job_id: String::new(),
            facility: String::new(),
        }
    }
}

/// Settings shared by every row and fuel of a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Statistical load coefficient Kr
    pub kr: f64,

    /// Ash collector efficiency applied to every fuel (0..1)
    pub filter_efficiency: f64,

    /// Voltage used when the reference item has none (kV)
    pub default_reference_voltage: f64,

    /// Item whose voltage divides the design active load
    pub reference: ReferenceItem,

    /// Replacements for the built-in fuel profiles
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fuel_overrides: Vec<FuelProfile>,
}

impl GlobalSettings {
    /// Settings for the load aggregation
    pub fn load_settings(&self) -> LoadSettings {
        LoadSettings {
            kr: self.kr,
            reference: self.reference,
            default_reference_voltage: self.default_reference_voltage,
        }
    }

    /// Built-in fuel table with the overrides applied in order
    pub fn fuel_table(&self) -> FuelTable {
        self.fuel_overrides
            .iter()
            .fold(FuelTable::builtin(), |table, profile| table.with_profile(*profile))
    }

    /// Reject settings that make the results meaningless.
    ///
    /// The calculations accept any float; this check belongs to whatever
    /// presents the worksheet to a user.
    pub fn validate(&self) -> CalcResult<()> {
        check_finite("kr", self.kr)?;
        if self.kr < 0.0 {
            return Err(CalcError::invalid_input(
                "kr",
                self.kr.to_string(),
                "Load coefficient cannot be negative",
            ));
        }

        check_finite("filter_efficiency", self.filter_efficiency)?;
        if !(0.0..=1.0).contains(&self.filter_efficiency) {
            return Err(CalcError::invalid_input(
                "filter_efficiency",
                self.filter_efficiency.to_string(),
                "Collector efficiency must be between 0 and 1",
            ));
        }

        check_finite("default_reference_voltage", self.default_reference_voltage)?;

        for profile in &self.fuel_overrides {
            let field = format!("fuel_overrides.{}", profile.kind.code());
            check_finite(&field, profile.heat_of_combustion)?;
            check_finite(&field, profile.fly_ash_fraction)?;
            check_finite(&field, profile.ash_content_pct)?;
            check_finite(&field, profile.ash_combustibles_pct)?;
            if profile.heat_of_combustion <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    profile.heat_of_combustion.to_string(),
                    "Heat of combustion must be positive",
                ));
            }
        }

        Ok(())
    }
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            kr: DEFAULT_KR,
            filter_efficiency: DEFAULT_FILTER_EFFICIENCY,
            default_reference_voltage: DEFAULT_REFERENCE_VOLTAGE,
            reference: ReferenceItem::First,
            fuel_overrides: Vec::new(),
        }
    }
}

/// Settings keys present in a worksheet document.
///
/// Every key is optional; [`SettingsOverrides::apply`] fills the missing ones
/// from a base, which is how config-file values reach worksheet files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsOverrides {
    pub kr: Option<f64>,
    pub filter_efficiency: Option<f64>,
    pub default_reference_voltage: Option<f64>,
    pub reference: Option<ReferenceItem>,
    pub fuel_overrides: Option<Vec<FuelProfile>>,
}

impl SettingsOverrides {
    pub fn apply(self, base: &GlobalSettings) -> GlobalSettings {
        GlobalSettings {
            kr: self.kr.unwrap_or(base.kr),
            filter_efficiency: self.filter_efficiency.unwrap_or(base.filter_efficiency),
            default_reference_voltage: self
                .default_reference_voltage
                .unwrap_or(base.default_reference_voltage),
            reference: self.reference.unwrap_or(base.reference),
            fuel_overrides: self
                .fuel_overrides
                .unwrap_or_else(|| base.fuel_overrides.clone()),
        }
    }
}

fn check_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"))
    }
}

/// Burned fuel amounts as typed: tonnes of coal and fuel oil, m³ of gas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelAmounts {
    pub coal: FieldText,
    pub fuel_oil: FieldText,
    pub natural_gas: FieldText,
}

impl FuelAmounts {
    pub fn amount(&self, fuel: FuelKind) -> &FieldText {
        match fuel {
            FuelKind::Coal => &self.coal,
            FuelKind::FuelOil => &self.fuel_oil,
            FuelKind::NaturalGas => &self.natural_gas,
        }
    }

    pub fn set_amount(&mut self, fuel: FuelKind, text: impl Into<FieldText>) {
        let text = text.into();
        match fuel {
            FuelKind::Coal => self.coal = text,
            FuelKind::FuelOil => self.fuel_oil = text,
            FuelKind::NaturalGas => self.natural_gas = text,
        }
    }

    /// One input per fuel kind, blank amounts as zero
    pub fn inputs(&self) -> Vec<EmissionInput> {
        FuelKind::ALL
            .iter()
            .map(|kind| EmissionInput::from_text(*kind, self.amount(*kind)))
            .collect()
    }
}

/// Validate that a document version is compatible with the current schema.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // In 0.x a newer minor version may have breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    tracing::debug!(file_version, "worksheet schema accepted");
    Ok(())
}
