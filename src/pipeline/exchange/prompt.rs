use crate::models::LabAnalysis;

use super::ExchangeError;

pub const LAB_ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a medical data interpreter. The user will paste raw lab results.
Return ONLY valid JSON in this exact shape, no markdown, no extra text:
{
  "summary": "2-3 sentence plain-English overview of the person's overall health",
  "values": [
    {
      "name": "test name",
      "value": "numeric value",
      "unit": "unit",
      "status": "normal|low|high|critical",
      "range": "reference range e.g. 70-99 mg/dL",
      "explanation": "1 sentence plain-English explanation"
    }
  ],
  "doctorQuestions": ["Question 1", "Question 2", "Question 3"],
  "lifestyleTips": ["Tip 1", "Tip 2", "Tip 3"]
}"#;

pub const MED_SUGGESTION_SYSTEM_PROMPT: &str = r#"You are a clinical pharmacology assistant. The user will provide a structured analysis of their lab results as JSON.
Suggest medications or supplements a doctor might discuss for the flagged values, and lifestyle measures where no medication is warranted.
Return ONLY valid JSON in this exact shape, no markdown, no extra text:
{
  "summary": "2-3 sentence plain-English overview of the suggestions",
  "medications": [
    {
      "name": "medication or supplement name",
      "dose": "typical starting dose",
      "frequency": "how often",
      "status": "recommended|optional|lifestyle",
      "reason": "1 sentence linking it to a specific lab value",
      "warning": "1 sentence on the main risk or interaction"
    }
  ],
  "doctorQuestions": ["Question 1", "Question 2", "Question 3"],
  "lifestyleTips": ["Tip 1", "Tip 2", "Tip 3"]
}"#;

/// Join instruction and payload into the single prompt sent to the model.
pub fn build_exchange_prompt(system: &str, payload: &str) -> String {
    format!("{system}\n\n{payload}")
}

/// Payload for the medication flow: the lab analysis as JSON.
pub fn build_med_suggestion_payload(analysis: &LabAnalysis) -> Result<String, ExchangeError> {
    serde_json::to_string_pretty(analysis).map_err(|e| ExchangeError::JsonParsing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabStatus, LabValue};

    #[test]
    fn prompt_joins_with_blank_line() {
        assert_eq!(build_exchange_prompt("S", "P"), "S\n\nP");
        assert_eq!(build_exchange_prompt("", ""), "\n\n");
    }

    #[test]
    fn lab_prompt_names_every_required_key() {
        for key in ["summary", "values", "doctorQuestions", "lifestyleTips"] {
            assert!(LAB_ANALYSIS_SYSTEM_PROMPT.contains(key), "missing {key}");
        }
        assert!(LAB_ANALYSIS_SYSTEM_PROMPT.contains("normal|low|high|critical"));
        assert!(LAB_ANALYSIS_SYSTEM_PROMPT.contains("no markdown"));
    }

    #[test]
    fn med_prompt_names_every_required_key() {
        for key in ["summary", "medications", "doctorQuestions", "lifestyleTips", "warning"] {
            assert!(MED_SUGGESTION_SYSTEM_PROMPT.contains(key), "missing {key}");
        }
        assert!(MED_SUGGESTION_SYSTEM_PROMPT.contains("recommended|optional|lifestyle"));
    }

    #[test]
    fn med_payload_is_lab_analysis_json() {
        let analysis = LabAnalysis {
            summary: "Mild dyslipidemia".into(),
            values: vec![LabValue {
                name: "LDL".into(),
                value: "142".into(),
                unit: "mg/dL".into(),
                status: LabStatus::High,
                range: "<100".into(),
                explanation: String::new(),
            }],
            ..Default::default()
        };
        let payload = build_med_suggestion_payload(&analysis).unwrap();
        let back: LabAnalysis = serde_json::from_str(&payload).unwrap();
        assert_eq!(back, analysis);
        assert!(payload.contains("\"status\": \"high\""));
    }
}
