//! # Electrical Load Aggregation
//!
//! Sizes the design-basis electrical load of a facility from its list of
//! receiver groups, using the method of ordered diagrams.
//!
//! ## Data Flow
//!
//! ```text
//! EquipmentRow (raw form text)
//!     └─ EquipmentItem::from_row ─> EquipmentItem (parsed snapshot)
//!          └─ aggregate / aggregate_with ─> AggregateResult
//! ```
//!
//! The form owns mutation of the rows. Each recomputation takes an immutable
//! snapshot of all items and produces a fresh [`AggregateResult`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::load::{aggregate, EquipmentItem};
//!
//! let saw = EquipmentItem::new(4, "Circular saw")
//!     .with_count(3.0)
//!     .with_rated_power(10.0)
//!     .with_utilization_rate(0.6)
//!     .with_reactive_factor(0.75);
//!
//! let result = aggregate(&[saw], 1.16);
//! assert!((result.active_load - 20.88).abs() < 1e-9);
//! assert!((result.full_power - 26.10).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::load as eq;
use crate::parsing::{FieldRole, FieldText};

/// Statistical load coefficient of the reference shop
pub const DEFAULT_KR: f64 = 1.16;

/// Reference voltage used when the designated item has none (kV)
pub const DEFAULT_REFERENCE_VOLTAGE: f64 = 10.0;

// ============================================================================
// Input: raw rows
// ============================================================================

/// Editable fields of an equipment row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentField {
    Efficiency,
    PowerFactor,
    Voltage,
    Count,
    RatedPower,
    UtilizationRate,
    ReactiveFactor,
}

impl EquipmentField {
    /// Fields in form order
    pub const ALL: [EquipmentField; 7] = [
        EquipmentField::Efficiency,
        EquipmentField::PowerFactor,
        EquipmentField::Voltage,
        EquipmentField::Count,
        EquipmentField::RatedPower,
        EquipmentField::UtilizationRate,
        EquipmentField::ReactiveFactor,
    ];

    /// Form label with symbol and unit
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentField::Efficiency => "η (efficiency)",
            EquipmentField::PowerFactor => "cos φ (power factor)",
            EquipmentField::Voltage => "U, kV (supply voltage)",
            EquipmentField::Count => "n (number of receivers)",
            EquipmentField::RatedPower => "P, kW (rated power)",
            EquipmentField::UtilizationRate => "Kv (utilization rate)",
            EquipmentField::ReactiveFactor => "tg φ (reactive power factor)",
        }
    }

    /// Role deciding the fallback for a blank value
    pub fn role(&self) -> FieldRole {
        match self {
            EquipmentField::Efficiency | EquipmentField::PowerFactor | EquipmentField::Voltage => FieldRole::Divisor,
            EquipmentField::Count
            | EquipmentField::RatedPower
            | EquipmentField::UtilizationRate
            | EquipmentField::ReactiveFactor => FieldRole::Additive,
        }
    }
}

/// One row of the equipment form, exactly as typed.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": 4,
///   "name": "Circular saw",
///   "efficiency": "0.92",
///   "power_factor": "0.9",
///   "voltage": "0.38",
///   "count": 4,
///   "rated_power": "20",
///   "utilization_rate": "0.15",
///   "reactive_factor": "1.33"
/// }
/// ```
///
/// Fields may be omitted, blank, strings, or bare numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRow {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub efficiency: FieldText,
    #[serde(default)]
    pub power_factor: FieldText,
    #[serde(default)]
    pub voltage: FieldText,
    #[serde(default)]
    pub count: FieldText,
    #[serde(default)]
    pub rated_power: FieldText,
    #[serde(default)]
    pub utilization_rate: FieldText,
    #[serde(default)]
    pub reactive_factor: FieldText,
}

impl EquipmentRow {
    /// Create a blank row
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        EquipmentRow {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn field(&self, field: EquipmentField) -> &FieldText {
        match field {
            EquipmentField::Efficiency => &self.efficiency,
            EquipmentField::PowerFactor => &self.power_factor,
            EquipmentField::Voltage => &self.voltage,
            EquipmentField::Count => &self.count,
            EquipmentField::RatedPower => &self.rated_power,
            EquipmentField::UtilizationRate => &self.utilization_rate,
            EquipmentField::ReactiveFactor => &self.reactive_factor,
        }
    }

    /// Replace the text of one field
    pub fn set_field(&mut self, field: EquipmentField, text: impl Into<FieldText>) {
        let text = text.into();
        match field {
            EquipmentField::Efficiency => self.efficiency = text,
            EquipmentField::PowerFactor => self.power_factor = text,
            EquipmentField::Voltage => self.voltage = text,
            EquipmentField::Count => self.count = text,
            EquipmentField::RatedPower => self.rated_power = text,
            EquipmentField::UtilizationRate => self.utilization_rate = text,
            EquipmentField::ReactiveFactor => self.reactive_factor = text,
        }
    }

    /// Builder form of [`EquipmentRow::set_field`]
    pub fn with_field(mut self, field: EquipmentField, text: impl Into<FieldText>) -> Self {
        self.set_field(field, text);
        self
    }

    /// True when no field has been filled in
    pub fn is_blank(&self) -> bool {
        EquipmentField::ALL.iter().all(|f| self.field(*f).is_blank())
    }
}

// ============================================================================
// Input: parsed snapshot
// ============================================================================

/// Parsed equipment item.
///
/// Each numeric field is `None` when the source text was blank or malformed.
/// The accessors substitute the default for the field's role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: u32,
    pub name: String,
    pub efficiency: Option<f64>,
    pub power_factor: Option<f64>,
    pub voltage: Option<f64>,
    pub count: Option<f64>,
    pub rated_power: Option<f64>,
    pub utilization_rate: Option<f64>,
    pub reactive_factor: Option<f64>,
}

impl EquipmentItem {
    /// Create an item with every field missing
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        EquipmentItem {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a form row
    pub fn from_row(row: &EquipmentRow) -> Self {
        EquipmentItem {
            id: row.id,
            name: row.name.clone(),
            efficiency: row.efficiency.value(),
            power_factor: row.power_factor.value(),
            voltage: row.voltage.value(),
            count: row.count.value(),
            rated_power: row.rated_power.value(),
            utilization_rate: row.utilization_rate.value(),
            reactive_factor: row.reactive_factor.value(),
        }
    }

    pub fn with_efficiency(mut self, v: f64) -> Self {
        self.efficiency = Some(v);
        self
    }

    pub fn with_power_factor(mut self, v: f64) -> Self {
        self.power_factor = Some(v);
        self
    }

    pub fn with_voltage(mut self, v: f64) -> Self {
        self.voltage = Some(v);
        self
    }

    pub fn with_count(mut self, v: f64) -> Self {
        self.count = Some(v);
        self
    }

    pub fn with_rated_power(mut self, v: f64) -> Self {
        self.rated_power = Some(v);
        self
    }

    pub fn with_utilization_rate(mut self, v: f64) -> Self {
        self.utilization_rate = Some(v);
        self
    }

    pub fn with_reactive_factor(mut self, v: f64) -> Self {
        self.reactive_factor = Some(v);
        self
    }

    fn or_role(value: Option<f64>, role: FieldRole) -> f64 {
        value.unwrap_or_else(|| role.default_value())
    }

    /// η, 1.0 when missing
    pub fn efficiency(&self) -> f64 {
        Self::or_role(self.efficiency, FieldRole::Divisor)
    }

    /// cos φ, 1.0 when missing
    pub fn power_factor(&self) -> f64 {
        Self::or_role(self.power_factor, FieldRole::Divisor)
    }

    /// U in kV, 1.0 when missing
    pub fn voltage(&self) -> f64 {
        Self::or_role(self.voltage, FieldRole::Divisor)
    }

    /// n, 0.0 when missing
    pub fn count(&self) -> f64 {
        Self::or_role(self.count, FieldRole::Additive)
    }

    /// P in kW, 0.0 when missing
    pub fn rated_power(&self) -> f64 {
        Self::or_role(self.rated_power, FieldRole::Additive)
    }

    /// Kv, 0.0 when missing
    pub fn utilization_rate(&self) -> f64 {
        Self::or_role(self.utilization_rate, FieldRole::Additive)
    }

    /// tg φ, 0.0 when missing
    pub fn reactive_factor(&self) -> f64 {
        Self::or_role(self.reactive_factor, FieldRole::Additive)
    }

    /// Per-item products and group current
    pub fn evaluate(&self) -> ItemResult {
        let n = self.count();
        let p = self.rated_power();
        let kv = self.utilization_rate();
        let tg_phi = self.reactive_factor();

        ItemResult {
            id: self.id,
            name: self.name.clone(),
            count: n,
            rated_power_kw: p,
            utilization_rate: kv,
            product1: eq::product1(n, p),
            product2: eq::product2(n, p, kv),
            product3: eq::product3(n, p, kv, tg_phi),
            product4: eq::product4(n, p),
            group_current_a: eq::group_current(n, p, self.voltage(), self.power_factor(), self.efficiency()),
        }
    }
}

impl From<&EquipmentRow> for EquipmentItem {
    fn from(row: &EquipmentRow) -> Self {
        EquipmentItem::from_row(row)
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Which item supplies the reference voltage for the total group current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceItem {
    /// First item of the ordered collection
    #[default]
    First,
    /// Item with this id
    Id(u32),
}

/// Parameters of an aggregation that do not belong to any single item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadSettings {
    /// Statistical load coefficient Kr
    pub kr: f64,
    /// Item whose voltage divides the active load
    pub reference: ReferenceItem,
    /// Voltage used when the reference item or its voltage is missing (kV)
    pub default_reference_voltage: f64,
}

impl LoadSettings {
    pub fn with_kr(kr: f64) -> Self {
        LoadSettings {
            kr,
            ..Default::default()
        }
    }
}

impl Default for LoadSettings {
    fn default() -> Self {
        LoadSettings {
            kr: DEFAULT_KR,
            reference: ReferenceItem::First,
            default_reference_voltage: DEFAULT_REFERENCE_VOLTAGE,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Derived quantities of one equipment item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult {
    pub id: u32,
    pub name: String,
    /// n as used in the formulas
    pub count: f64,
    /// P as used in the formulas (kW)
    pub rated_power_kw: f64,
    /// Kv as used in the formulas
    pub utilization_rate: f64,
    /// n·P (kW)
    pub product1: f64,
    /// n·P·Kv (kW)
    pub product2: f64,
    /// n·P·Kv·tgφ (kvar)
    pub product3: f64,
    /// n·P² (kW²)
    pub product4: f64,
    /// Group design current (A)
    pub group_current_a: f64,
}

/// Facility load totals.
///
/// ## JSON Example
///
/// ```json
/// {
///   "items": [ ... ],
///   "total_count": 3.0,
///   "sum_rated_power": 30.0,
///   "sum_utilized_power": 18.0,
///   "sum_reactive_power": 13.5,
///   "sum_squared_power": 300.0,
///   "utilization_rate": 0.6,
///   "effective_quantity": 3.0,
///   "kr": 1.16,
///   "active_load_kw": 20.88,
///   "reactive_load_kvar": 15.66,
///   "full_power_kva": 26.1,
///   "reference_voltage_kv": 10.0,
///   "group_current_a": 2.088
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Per-item rows, in input order
    pub items: Vec<ItemResult>,
    /// Σn
    pub total_count: f64,
    /// Σ n·P (kW)
    pub sum_rated_power: f64,
    /// Σ n·P·Kv (kW)
    pub sum_utilized_power: f64,
    /// Σ n·P·Kv·tgφ (kvar)
    pub sum_reactive_power: f64,
    /// Σ n·P²
    pub sum_squared_power: f64,
    /// Group utilization rate Kv
    pub utilization_rate: f64,
    /// Effective number of receivers nₑ
    pub effective_quantity: f64,
    /// Kr applied to the sums
    pub kr: f64,
    /// Design active load Pр (kW)
    #[serde(rename = "active_load_kw")]
    pub active_load: f64,
    /// Design reactive load Qр (kvar)
    #[serde(rename = "reactive_load_kvar")]
    pub reactive_load: f64,
    /// Apparent power Sр (kVA)
    #[serde(rename = "full_power_kva")]
    pub full_power: f64,
    /// Voltage actually used for the group current (kV)
    #[serde(rename = "reference_voltage_kv")]
    pub reference_voltage: f64,
    /// Design group current Iр (A)
    #[serde(rename = "group_current_a")]
    pub group_current: f64,
}

// ============================================================================
// Operations
// ============================================================================

/// Aggregate with the given Kr and the default reference-voltage rule.
pub fn aggregate(items: &[EquipmentItem], kr: f64) -> AggregateResult {
    aggregate_with(items, &LoadSettings::with_kr(kr))
}

/// Aggregate a snapshot of items.
///
/// Never fails; an empty snapshot yields all-zero totals.
pub fn aggregate_with(items: &[EquipmentItem], settings: &LoadSettings) -> AggregateResult {
    let rows: Vec<ItemResult> = items.iter().map(EquipmentItem::evaluate).collect();

    let total_count = total(rows.iter().map(|r| r.count));
    let sum_rated_power = total(rows.iter().map(|r| r.product1));
    let sum_utilized_power = total(rows.iter().map(|r| r.product2));
    let sum_reactive_power = total(rows.iter().map(|r| r.product3));
    let sum_squared_power = total(rows.iter().map(|r| r.product4));

    let active_load = eq::design_load(settings.kr, sum_utilized_power);
    let reactive_load = eq::design_load(settings.kr, sum_reactive_power);
    let reference_voltage = reference_voltage(items, settings);

    AggregateResult {
        items: rows,
        total_count,
        sum_rated_power,
        sum_utilized_power,
        sum_reactive_power,
        sum_squared_power,
        utilization_rate: eq::utilization_rate(sum_utilized_power, sum_rated_power),
        effective_quantity: eq::effective_quantity(sum_rated_power, sum_squared_power),
        kr: settings.kr,
        active_load,
        reactive_load,
        full_power: eq::full_power(active_load, reactive_load),
        reference_voltage,
        group_current: eq::total_group_current(active_load, reference_voltage),
    }
}

/// Left-to-right sum starting at +0.0, so empty inputs print as `0.00`
fn total(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, v| acc + v)
}

/// Parse form rows and aggregate them.
pub fn aggregate_rows(rows: &[EquipmentRow], settings: &LoadSettings) -> AggregateResult {
    let items: Vec<EquipmentItem> = rows.iter().map(EquipmentItem::from_row).collect();
    aggregate_with(&items, settings)
}

/// Voltage of the designated reference item, or the configured default when
/// that item is absent or has no usable voltage.
pub fn reference_voltage(items: &[EquipmentItem], settings: &LoadSettings) -> f64 {
    let item = match settings.reference {
        ReferenceItem::First => items.first(),
        ReferenceItem::Id(id) => items.iter().find(|i| i.id == id),
    };
    item.and_then(|i| i.voltage).unwrap_or(settings.default_reference_voltage)
}
