//! Privacy report for pasted lab text.
//!
//! Scores how sensitive a report is by the categories of test it mentions,
//! and fingerprints it with SHA-256 so the user can see what would be sent
//! without the text itself being echoed anywhere.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};

const MAX_SCORE: u32 = 100;

struct SensitivityCategory {
    label: &'static str,
    weight: u32,
    regex: Regex,
}

static CATEGORIES: LazyLock<Vec<SensitivityCategory>> = LazyLock::new(|| {
    vec![
        SensitivityCategory {
            label: "metabolic",
            weight: 20,
            regex: Regex::new(r"(?i)\b(?:glucose|hba1c|diabetes)\b").unwrap(),
        },
        SensitivityCategory {
            label: "lipids",
            weight: 15,
            regex: Regex::new(r"(?i)\b(?:cholesterol|ldl|hdl|triglycerides?)\b").unwrap(),
        },
        SensitivityCategory {
            label: "blood_count",
            weight: 10,
            regex: Regex::new(r"(?i)\b(?:hemoglobin|wbc|rbc|platelets?)\b").unwrap(),
        },
        SensitivityCategory {
            label: "kidney_liver",
            weight: 15,
            regex: Regex::new(r"(?i)\b(?:creatinine|kidneys?|livers?|alt|ast)\b").unwrap(),
        },
        SensitivityCategory {
            label: "endocrine",
            weight: 15,
            regex: Regex::new(r"(?i)\b(?:tsh|thyroid|hormones?)\b").unwrap(),
        },
        SensitivityCategory {
            label: "stigmatized_conditions",
            weight: 25,
            regex: Regex::new(r"(?i)\b(?:hiv|hepatitis|stds?|cancers?)\b").unwrap(),
        },
    ]
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrivacyReport {
    /// 0-100, higher is more sensitive.
    pub score: u32,
    /// Hex SHA-256 of the text.
    pub hash: String,
    /// Matched category labels, in fixed order.
    pub categories: Vec<&'static str>,
}

/// Sum of the weights of every category mentioned, capped at 100.
pub fn sensitivity_score(text: &str) -> u32 {
    matched_categories(text)
        .map(|c| c.weight)
        .sum::<u32>()
        .min(MAX_SCORE)
}

/// Hex-encoded SHA-256 of the text.
pub fn content_hash(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

pub fn privacy_report(text: &str) -> PrivacyReport {
    PrivacyReport {
        score: sensitivity_score(text),
        hash: content_hash(text),
        categories: matched_categories(text).map(|c| c.label).collect(),
    }
}

fn matched_categories(text: &str) -> impl Iterator<Item = &'static SensitivityCategory> + '_ {
    CATEGORIES.iter().filter(move |c| c.regex.is_match(text))
}
