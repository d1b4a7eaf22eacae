use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{LabAnalysis, MedAnalysis};

use super::ExchangeError;

const LAB_REQUIRED_KEYS: &[&str] = &["summary", "values", "doctorQuestions", "lifestyleTips"];
const MED_REQUIRED_KEYS: &[&str] = &["summary", "medications", "doctorQuestions", "lifestyleTips"];

/// Remove every ```` ```json ```` / ```` ``` ```` marker and trim.
///
/// Text without fences comes back unchanged apart from surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Strip fences and parse the remainder as JSON into `T`.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Result<T, ExchangeError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(ExchangeError::EmptyResponse);
    }
    serde_json::from_str(&cleaned).map_err(|e| ExchangeError::JsonParsing(e.to_string()))
}

/// Parse a lab-analysis reply, checking the required keys first.
pub fn parse_lab_analysis(raw: &str) -> Result<LabAnalysis, ExchangeError> {
    let object = extract_object(raw, LAB_REQUIRED_KEYS)?;
    Ok(LabAnalysis {
        summary: string_field(&object, "summary"),
        values: parse_array_lenient(object.get("values")),
        doctor_questions: string_array(object.get("doctorQuestions")),
        lifestyle_tips: string_array(object.get("lifestyleTips")),
    })
}

/// Parse a medication-suggestion reply, checking the required keys first.
pub fn parse_med_analysis(raw: &str) -> Result<MedAnalysis, ExchangeError> {
    let object = extract_object(raw, MED_REQUIRED_KEYS)?;
    Ok(MedAnalysis {
        summary: string_field(&object, "summary"),
        medications: parse_array_lenient(object.get("medications")),
        doctor_questions: string_array(object.get("doctorQuestions")),
        lifestyle_tips: string_array(object.get("lifestyleTips")),
    })
}

fn extract_object(raw: &str, required: &[&str]) -> Result<Map<String, Value>, ExchangeError> {
    let value: Value = extract_json(raw)?;
    let Value::Object(object) = value else {
        return Err(ExchangeError::JsonParsing(
            "Expected a JSON object at the top level".into(),
        ));
    };
    if let Some(missing) = required.iter().find(|key| !object.contains_key(**key)) {
        return Err(ExchangeError::SchemaViolation((*missing).to_string()));
    }
    Ok(object)
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => vec![],
    }
}

/// Parse an array leniently: skip items that fail to deserialize.
fn parse_array_lenient<T: for<'de> Deserialize<'de>>(value: Option<&Value>) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match serde_json::from_value(v.clone()) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping malformed entry");
                    None
                }
            })
            .collect(),
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabStatus, MedicationStatus};

    #[test]
    fn fenced_json_is_parsed() {
        let value: Value = extract_json("```json\n{\"a\":1}\n```").unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[test]
    fn bare_fences_are_stripped_too() {
        let value: Value = extract_json("```\n[1, 2]\n```").unwrap();
        assert_eq!(value, serde_json::json!([1, 2]));
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        let text = "  {\"summary\": \"ok\"}\n";
        assert_eq!(strip_code_fences(text), text.trim());
        let once = strip_code_fences(text);
        assert_eq!(strip_code_fences(&once), once);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let result: Result<Value, _> = extract_json("not json");
        assert!(matches!(result, Err(ExchangeError::JsonParsing(_))));
    }

    #[test]
    fn empty_reply_is_distinguished() {
        for raw in ["", "   ", "```json\n```"] {
            let result: Result<Value, _> = extract_json(raw);
            assert!(matches!(result, Err(ExchangeError::EmptyResponse)), "raw: {raw:?}");
        }
    }

    #[test]
    fn parse_lab_minimal_reply() {
        let analysis = parse_lab_analysis(
            r#"{"summary":"ok","values":[],"doctorQuestions":[],"lifestyleTips":[]}"#,
        )
        .unwrap();
        assert_eq!(analysis.summary, "ok");
        assert!(analysis.values.is_empty());
    }

    #[test]
    fn parse_lab_full_reply_with_fences() {
        let raw = r#"```json
{
  "summary": "Blood sugar and LDL are elevated.",
  "values": [
    {"name": "Glucose", "value": "118", "unit": "mg/dL", "status": "high",
     "range": "70-99 mg/dL", "explanation": "Fasting glucose is above range."},
    {"name": "Hemoglobin", "value": "13.1", "unit": "g/dL", "status": "Normal",
     "range": "12-16 g/dL", "explanation": "Within range."}
  ],
  "doctorQuestions": ["Should I repeat the HbA1c test?"],
  "lifestyleTips": ["Walk 30 minutes daily", ""]
}
```"#;
        let analysis = parse_lab_analysis(raw).unwrap();
        assert_eq!(analysis.values.len(), 2);
        assert_eq!(analysis.values[0].status, LabStatus::High);
        assert_eq!(analysis.values[1].status, LabStatus::Normal);
        assert_eq!(analysis.doctor_questions.len(), 1);
        assert_eq!(analysis.lifestyle_tips, vec!["Walk 30 minutes daily"]);
    }

    #[test]
    fn missing_required_key_is_schema_violation() {
        let result = parse_lab_analysis(r#"{"summary":"ok","values":[],"doctorQuestions":[]}"#);
        match result {
            Err(ExchangeError::SchemaViolation(key)) => assert_eq!(key, "lifestyleTips"),
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn top_level_array_is_rejected() {
        let result = parse_lab_analysis("[]");
        assert!(matches!(result, Err(ExchangeError::JsonParsing(_))));
    }

    #[test]
    fn malformed_values_are_skipped() {
        let analysis = parse_lab_analysis(
            r#"{"summary":"s","values":[
                {"name":"LDL","value":"142","status":"high"},
                {"name":"Mystery","status":"borderline"},
                {"value":"1"}
            ],"doctorQuestions":[],"lifestyleTips":[]}"#,
        )
        .unwrap();
        assert_eq!(analysis.values.len(), 1);
        assert_eq!(analysis.values[0].name, "LDL");
    }

    #[test]
    fn unquoted_numbers_and_nulls_keep_the_entry() {
        let analysis = parse_lab_analysis(
            r#"{"summary":"s","values":[
                {"name":"Glucose","value":118,"unit":"mg/dL","status":"high","range":"70-99"},
                {"name":"HbA1c","value":"6.1","unit":null,"status":"high","explanation":null},
                {"name":"TSH","value":"3.8","unit":"mIU/L","status":"normal"}
            ],"doctorQuestions":[],"lifestyleTips":[]}"#,
        )
        .unwrap();
        let names: Vec<&str> = analysis.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Glucose", "HbA1c", "TSH"]);
        assert_eq!(analysis.values[0].value, "118");
        assert!(analysis.values[1].unit.is_empty());
        assert!(analysis.values[1].explanation.is_empty());
        assert_eq!(analysis.flagged_values().count(), 2);
    }

    #[test]
    fn numeric_medication_fields_are_kept() {
        let analysis = parse_med_analysis(
            r#"{"summary":"s","medications":[
                {"name":"Vitamin D","dose":1000,"frequency":null,"status":"optional",
                 "reason":"Low level","warning":"None"}
            ],"doctorQuestions":[],"lifestyleTips":[]}"#,
        )
        .unwrap();
        assert_eq!(analysis.medications.len(), 1);
        assert_eq!(analysis.medications[0].dose, "1000");
        assert!(analysis.medications[0].frequency.is_empty());
    }

    #[test]
    fn parse_med_reply() {
        let analysis = parse_med_analysis(
            r#"{"summary":"Consider a statin.","medications":[
                {"name":"Atorvastatin","dose":"10mg","frequency":"once daily",
                 "status":"recommended","reason":"LDL 142","warning":"Muscle pain"},
                {"name":"Omega-3","dose":"1g","frequency":"daily",
                 "status":"optional","reason":"Triglycerides","warning":"Fishy aftertaste"}
            ],"doctorQuestions":["Is a statin right for me?"],"lifestyleTips":[]}"#,
        )
        .unwrap();
        assert_eq!(analysis.medications.len(), 2);
        assert_eq!(analysis.medications[0].status, MedicationStatus::Recommended);
        assert_eq!(analysis.medications[1].name, "Omega-3");
    }

    #[test]
    fn med_reply_without_medications_key_is_rejected() {
        let result = parse_med_analysis(
            r#"{"summary":"s","values":[],"doctorQuestions":[],"lifestyleTips":[]}"#,
        );
        assert!(matches!(result, Err(ExchangeError::SchemaViolation(k)) if k == "medications"));
    }

    #[test]
    fn null_summary_becomes_empty() {
        let analysis = parse_lab_analysis(
            r#"{"summary":null,"values":null,"doctorQuestions":null,"lifestyleTips":null}"#,
        )
        .unwrap();
        assert!(analysis.summary.is_empty());
        assert!(analysis.values.is_empty());
    }
}
