//! # Numeric Input Boundary
//!
//! Every numeric field in a worksheet arrives as text typed into a form.
//! Text that is half-typed, empty, or otherwise not a number is normal while
//! the user is editing, so it is never an error here. It is replaced by a
//! default chosen by the role the field plays in the formulas:
//!
//! - **Additive** fields (count, rated power, Kv, tg φ) default to `0.0`,
//!   so a blank row contributes nothing to the sums.
//! - **Divisor** fields (efficiency, cos φ, voltage) default to `1.0`,
//!   so a blank field leaves the quotient unchanged.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::parsing::{parse_numeric, parse_for_role, FieldRole};
//!
//! assert_eq!(parse_numeric(" 4.5 ", 0.0), 4.5);
//! assert_eq!(parse_numeric("4.", 0.0), 4.0);
//! assert_eq!(parse_numeric("abc", 0.0), 0.0);
//! assert_eq!(parse_for_role("", FieldRole::Divisor), 1.0);
//! ```

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// How a field participates in the formulas, which decides its fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRole {
    /// Summed or multiplied into a sum; missing means zero.
    Additive,
    /// Appears in a denominator; missing means one.
    Divisor,
}

impl FieldRole {
    /// Value substituted when the field is blank or malformed
    pub fn default_value(self) -> f64 {
        match self {
            FieldRole::Additive => 0.0,
            FieldRole::Divisor => 1.0,
        }
    }
}

/// Parse text as a finite float, or `None`.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected even
/// though Rust's float parser accepts their spellings.
pub fn parse_optional(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse text as a float, substituting `default` for anything unusable.
pub fn parse_numeric(text: &str, default: f64) -> f64 {
    parse_optional(text).unwrap_or(default)
}

/// Parse text with the fallback for the given field role.
pub fn parse_for_role(text: &str, role: FieldRole) -> f64 {
    parse_numeric(text, role.default_value())
}

// ============================================================================
// Serde helper
// ============================================================================

/// Raw field text as it appears in a worksheet.
///
/// Files written by hand often use bare numbers while files exported from a
/// form use strings. Both deserialize into the same text so that the parsing
/// rules above apply uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldText(pub String);

impl FieldText {
    pub fn new(text: impl Into<String>) -> Self {
        FieldText(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parsed value, `None` when blank or malformed
    pub fn value(&self) -> Option<f64> {
        parse_optional(&self.0)
    }

    /// Parsed value with the fallback for `role`
    pub fn value_for(&self, role: FieldRole) -> f64 {
        parse_for_role(&self.0, role)
    }
}

impl From<&str> for FieldText {
    fn from(s: &str) -> Self {
        FieldText(s.to_string())
    }
}

impl From<String> for FieldText {
    fn from(s: String) -> Self {
        FieldText(s)
    }
}

impl From<f64> for FieldText {
    fn from(v: f64) -> Self {
        FieldText(v.to_string())
    }
}

impl fmt::Display for FieldText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct FieldTextVisitor;

impl<'de> Visitor<'de> for FieldTextVisitor {
    type Value = FieldText;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or numeric text")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldText, E> {
        Ok(FieldText(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FieldText, E> {
        Ok(FieldText(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FieldText, E> {
        Ok(FieldText(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldText, E> {
        Ok(FieldText(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldText, E> {
        Ok(FieldText(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<FieldText, E> {
        Ok(FieldText::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<FieldText, E> {
        Ok(FieldText::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<FieldText, D::Error> {
        d.deserialize_any(FieldTextVisitor)
    }
}

impl<'de> Deserialize<'de> for FieldText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldTextVisitor)
    }
}
