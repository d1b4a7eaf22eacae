use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Accept a string, number, bool or null where free text is expected.
///
/// Models copy values like `118` or `6.1` out of reports without quoting
/// them; `null` becomes an empty string. Arrays and objects are rejected.
pub(crate) fn deserialize_flexible_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "expected text, number or null, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_flexible_text")]
        text: String,
    }

    fn parse(json: &str) -> Result<String, serde_json::Error> {
        serde_json::from_str::<Holder>(json).map(|h| h.text)
    }

    #[test]
    fn scalars_become_text() {
        assert_eq!(parse(r#"{"text":"6.1%"}"#).unwrap(), "6.1%");
        assert_eq!(parse(r#"{"text":118}"#).unwrap(), "118");
        assert_eq!(parse(r#"{"text":6.1}"#).unwrap(), "6.1");
        assert_eq!(parse(r#"{"text":true}"#).unwrap(), "true");
    }

    #[test]
    fn null_and_missing_become_empty() {
        assert_eq!(parse(r#"{"text":null}"#).unwrap(), "");
        assert_eq!(parse("{}").unwrap(), "");
    }

    #[test]
    fn nested_values_are_rejected() {
        assert!(parse(r#"{"text":[1,2]}"#).is_err());
        assert!(parse(r#"{"text":{"a":1}}"#).is_err());
    }
}
