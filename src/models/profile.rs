//! The session's health profile: an immutable snapshot.
//!
//! Every change builds a new `HealthProfile` from the previous one plus the
//! fields being overridden. Nothing here performs I/O.

use serde::{Deserialize, Serialize};

use super::lab::LabAnalysis;
use super::medication::{MedAnalysis, Medication};

/// Everything derived so far in this session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    pub lab_raw_text: String,
    pub lab_analysis: Option<LabAnalysis>,
    pub med_analysis: Option<MedAnalysis>,
    pub medications: Vec<Medication>,
    pub last_updated: Option<String>,
}

/// Header-banner numbers for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub total_values: usize,
    pub flagged_values: usize,
    pub medication_count: usize,
    pub last_updated: Option<String>,
}

impl HealthProfile {
    /// Empty profile, as created at application start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot after a successful lab analysis.
    pub fn with_lab_result(&self, raw_text: &str, analysis: LabAnalysis, at: &str) -> Self {
        Self {
            lab_raw_text: raw_text.to_string(),
            lab_analysis: Some(analysis),
            last_updated: Some(at.to_string()),
            ..self.clone()
        }
    }

    /// Snapshot after a successful medication suggestion.
    ///
    /// The editable list restarts from the suggested medications.
    pub fn with_med_analysis(&self, analysis: MedAnalysis, at: &str) -> Self {
        Self {
            medications: analysis.medications.clone(),
            med_analysis: Some(analysis),
            last_updated: Some(at.to_string()),
            ..self.clone()
        }
    }

    /// Snapshot with a replaced medication list.
    ///
    /// The list is mirrored into `med_analysis` when one exists so both views agree.
    pub fn with_medications(&self, medications: Vec<Medication>) -> Self {
        let med_analysis = self.med_analysis.as_ref().map(|analysis| MedAnalysis {
            medications: medications.clone(),
            ..analysis.clone()
        });
        Self {
            medications,
            med_analysis,
            ..self.clone()
        }
    }

    /// Whether the medication suggestion flow may start.
    pub fn can_suggest_medications(&self) -> bool {
        self.lab_analysis.is_some()
    }

    /// Banner summary; `None` until a lab analysis exists.
    pub fn summary(&self) -> Option<ProfileSummary> {
        let analysis = self.lab_analysis.as_ref()?;
        Some(ProfileSummary {
            total_values: analysis.values.len(),
            flagged_values: analysis.flagged_values().count(),
            medication_count: self.medications.len(),
            last_updated: self.last_updated.clone(),
        })
    }
}
