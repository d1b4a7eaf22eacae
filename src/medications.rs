//! Manual medication editing.
//!
//! Pure functions over the ordered medication list. Each returns a new
//! list and never contacts the model. Out-of-range indices and blank names
//! leave the list as it was.

use serde::Deserialize;

use crate::models::{Medication, MedicationStatus};

pub const MANUAL_REASON: &str = "Manually added by user.";
pub const MANUAL_WARNING: &str = "Consult your doctor before taking.";

/// Manual medication entry input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualMedicationInput {
    pub name: String,
    #[serde(default)]
    pub dose: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

/// Replace the entry at `index`.
pub fn edit_at(medications: &[Medication], index: usize, replacement: Medication) -> Vec<Medication> {
    medications
        .iter()
        .enumerate()
        .map(|(i, m)| if i == index { replacement.clone() } else { m.clone() })
        .collect()
}

/// Drop the entry at `index`, keeping the others in order.
pub fn remove_at(medications: &[Medication], index: usize) -> Vec<Medication> {
    medications
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, m)| m.clone())
        .collect()
}

/// Build a manual entry, or `None` when the name is blank.
pub fn manual_entry(input: &ManualMedicationInput) -> Option<Medication> {
    let name = input.name.trim();
    if name.is_empty() {
        return None;
    }
    let trimmed = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().to_string();
    Some(Medication {
        name: name.to_string(),
        dose: trimmed(&input.dose),
        frequency: trimmed(&input.frequency),
        status: MedicationStatus::Optional,
        reason: MANUAL_REASON.to_string(),
        warning: MANUAL_WARNING.to_string(),
    })
}

/// Append a manual entry.
pub fn append_manual(medications: &[Medication], input: &ManualMedicationInput) -> Vec<Medication> {
    let mut next = medications.to_vec();
    if let Some(entry) = manual_entry(input) {
        next.push(entry);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn med(name: &str) -> Medication {
        Medication {
            name: name.into(),
            dose: "5mg".into(),
            frequency: "daily".into(),
            status: MedicationStatus::Recommended,
            reason: "r".into(),
            warning: "w".into(),
        }
    }

    fn three() -> Vec<Medication> {
        vec![med("Atorvastatin"), med("Metformin"), med("Vitamin D")]
    }

    fn names(list: &[Medication]) -> Vec<&str> {
        list.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn edit_replaces_only_target_index() {
        let list = three();
        let replacement = Medication {
            dose: "1000mg".into(),
            ..med("Metformin XR")
        };
        let edited = edit_at(&list, 1, replacement.clone());
        assert_eq!(edited.len(), 3);
        assert_eq!(edited[0], list[0]);
        assert_eq!(edited[1], replacement);
        assert_eq!(edited[2], list[2]);
    }

    #[test]
    fn edit_out_of_range_is_noop() {
        let list = three();
        assert_eq!(edit_at(&list, 3, med("X")), list);
    }

    #[test]
    fn remove_first_keeps_relative_order() {
        let list = three();
        let removed = remove_at(&list, 0);
        assert_eq!(names(&removed), vec!["Metformin", "Vitamin D"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let list = three();
        assert_eq!(remove_at(&list, 7), list);
    }

    #[test]
    fn add_uses_optional_status_and_templates() {
        let input = ManualMedicationInput {
            name: "  Aspirin ".into(),
            dose: Some("81mg".into()),
            frequency: None,
        };
        let added = append_manual(&three(), &input);
        assert_eq!(added.len(), 4);
        let entry = &added[3];
        assert_eq!(entry.name, "Aspirin");
        assert_eq!(entry.dose, "81mg");
        assert_eq!(entry.frequency, "");
        assert_eq!(entry.status, MedicationStatus::Optional);
        assert_eq!(entry.reason, MANUAL_REASON);
        assert_eq!(entry.warning, MANUAL_WARNING);
    }

    #[test]
    fn add_with_blank_name_is_noop() {
        let list = three();
        let input = ManualMedicationInput {
            name: "   ".into(),
            dose: Some("10mg".into()),
            frequency: Some("daily".into()),
        };
        assert_eq!(append_manual(&list, &input).len(), list.len());
        assert!(manual_entry(&input).is_none());
    }
}
