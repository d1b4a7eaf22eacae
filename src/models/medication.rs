use serde::{Deserialize, Serialize};

use super::enums::MedicationStatus;
use super::flexible::deserialize_flexible_text;

/// A suggested or user-entered medication. Editable after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_flexible_text")]
    pub dose: String,
    #[serde(default, deserialize_with = "deserialize_flexible_text")]
    pub frequency: String,
    pub status: MedicationStatus,
    #[serde(default, deserialize_with = "deserialize_flexible_text")]
    pub reason: String,
    #[serde(default, deserialize_with = "deserialize_flexible_text")]
    pub warning: String,
}

/// Structured result of the medication suggestion flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedAnalysis {
    pub summary: String,
    pub medications: Vec<Medication>,
    pub doctor_questions: Vec<String>,
    pub lifestyle_tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_model_shaped_entry() {
        let med: Medication = serde_json::from_str(
            r#"{"name":"Metformin","dose":"500mg","frequency":"twice daily",
                "status":"recommended","reason":"Elevated HbA1c","warning":"Take with food"}"#,
        )
        .unwrap();
        assert_eq!(med.name, "Metformin");
        assert_eq!(med.status, MedicationStatus::Recommended);
        assert_eq!(med.warning, "Take with food");
    }

    #[test]
    fn med_analysis_wire_names() {
        let json = serde_json::to_value(MedAnalysis::default()).unwrap();
        assert!(json.get("medications").is_some());
        assert!(json.get("doctorQuestions").is_some());
        assert!(json.get("lifestyleTips").is_some());
    }
}
