use serde::{Deserialize, Serialize};

use super::enums::LabStatus;
use super::flexible::deserialize_flexible_text;

/// Sample report offered by "Load Sample" in the dashboard.
pub const SAMPLE_LAB_REPORT: &str = "Glucose: 118 mg/dL
HbA1c: 6.1%
Total Cholesterol: 215 mg/dL
LDL: 142 mg/dL
HDL: 38 mg/dL
Triglycerides: 178 mg/dL
Hemoglobin: 13.1 g/dL
WBC: 4.2 K/uL
Creatinine: 1.3 mg/dL
TSH: 3.8 mIU/L";

/// One analyte from a decoded lab report.
///
/// `value` stays a string: the model copies it from the report and the
/// original formatting ("6.1", "<0.5", "trace") is what the user recognises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabValue {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_flexible_text")]
    pub value: String,
    #[serde(default, deserialize_with = "deserialize_flexible_text")]
    pub unit: String,
    pub status: LabStatus,
    #[serde(default, deserialize_with = "deserialize_flexible_text")]
    pub range: String,
    #[serde(default, deserialize_with = "deserialize_flexible_text")]
    pub explanation: String,
}

/// Structured result of the lab analysis flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabAnalysis {
    pub summary: String,
    pub values: Vec<LabValue>,
    pub doctor_questions: Vec<String>,
    pub lifestyle_tips: Vec<String>,
}

impl LabAnalysis {
    /// Values whose status is anything other than normal.
    pub fn flagged_values(&self) -> impl Iterator<Item = &LabValue> {
        self.values.iter().filter(|v| v.status.is_flagged())
    }
}
