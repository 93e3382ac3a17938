//! # Report
//!
//! Results of evaluating a worksheet, stamped with the time they were
//! produced. A report is plain data; rendering it is up to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::emission::FacilityEmissions;
use crate::calculations::load::AggregateResult;
use crate::worksheet::WorksheetMetadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub meta: WorksheetMetadata,
    pub generated: DateTime<Utc>,
    pub load: AggregateResult,
    pub emissions: FacilityEmissions,
}

impl Report {
    pub fn new(meta: WorksheetMetadata, load: AggregateResult, emissions: FacilityEmissions) -> Self {
        Report {
            meta,
            generated: Utc::now(),
            load,
            emissions,
        }
    }

    /// Short one-line summary for logs and status lines
    pub fn summary(&self) -> String {
        format!(
            "Pр = {:.2} kW, Sр = {:.2} kVA, Iр = {:.2} A, emission = {:.2} t",
            self.load.active_load, self.load.full_power, self.load.group_current, self.emissions.total_t
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::worksheet::Worksheet;

    #[test]
    fn test_blank_summary() {
        let report = Worksheet::default().evaluate();
        assert_eq!(
            report.summary(),
            "Pр = 0.00 kW, Sр = 0.00 kVA, Iр = 0.00 A, emission = 0.00 t"
        );
    }

    #[test]
    fn test_report_serializes_with_timestamp() {
        let report = Worksheet::default().evaluate();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["generated"].is_string());
        assert_eq!(json["load"]["active_load_kw"], 0.0);
        assert_eq!(json["emissions"]["fuels"].as_array().unwrap().len(), 3);
    }
}
