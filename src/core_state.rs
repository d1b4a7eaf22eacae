//! Session state and the two analysis flows.
//!
//! `CoreState` owns the current `HealthProfile` snapshot and one
//! `FlowStatus` per flow. It is shared as `Arc<CoreState>` between the
//! HTTP surface and anything else driving the flows. The snapshot is
//! never mutated in place: every change swaps in a new `Arc`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde::Serialize;

use crate::config::ExchangeConfig;
use crate::medications::{self, ManualMedicationInput};
use crate::models::{HealthProfile, Medication};
use crate::pipeline::exchange::{
    build_med_suggestion_payload, parse_lab_analysis, parse_med_analysis, ExchangeError,
    GeminiClient, LlmClient, LAB_ANALYSIS_SYSTEM_PROMPT, MED_SUGGESTION_SYSTEM_PROMPT,
};

pub const LAB_PARSE_FAILURE: &str =
    "Could not parse response. Make sure your lab results are formatted clearly.";
pub const MED_PARSE_FAILURE: &str = "Could not parse medication suggestions. Please try again.";
pub const EMPTY_RESPONSE_MESSAGE: &str =
    "The AI service returned an empty response. Please try again.";

// ═══════════════════════════════════════════════════════════
// Flow status
// ═══════════════════════════════════════════════════════════

/// Which analysis flow an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    LabAnalysis,
    MedSuggestion,
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LabAnalysis => write!(f, "Lab analysis"),
            Self::MedSuggestion => write!(f, "Medication suggestion"),
        }
    }
}

/// Busy flag and last user-facing error for one flow.
pub struct FlowStatus {
    busy: AtomicBool,
    last_error: Mutex<Option<String>>,
}

/// Observable copy of a `FlowStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowSnapshot {
    pub busy: bool,
    pub error: Option<String>,
}

/// Held for the duration of a flow. Dropping it clears the busy flag.
pub struct FlowGuard<'a> {
    status: &'a FlowStatus,
}

impl Drop for FlowGuard<'_> {
    fn drop(&mut self) {
        self.status.busy.store(false, Ordering::Release);
    }
}

impl FlowStatus {
    fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            last_error: Mutex::new(None),
        }
    }

    /// Enter the analyzing state, or `None` if already there.
    fn try_begin(&self) -> Option<FlowGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.set_error(None);
        Some(FlowGuard { status: self })
    }

    fn set_error(&self, message: Option<String>) {
        if let Ok(mut last) = self.last_error.lock() {
            *last = message;
        }
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            busy: self.busy.load(Ordering::Acquire),
            error: self.last_error.lock().map(|e| e.clone()).unwrap_or(None),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Input text is empty")]
    EmptyInput,

    #[error("{0} is already running")]
    Busy(FlowKind),

    #[error("Analyze lab results before requesting medication suggestions")]
    LabAnalysisRequired,

    #[error("{kind} failed: {source}")]
    Exchange {
        kind: FlowKind,
        #[source]
        source: ExchangeError,
    },

    #[error("Internal lock error")]
    LockPoisoned,
}

impl FlowError {
    /// Whether the endpoint failed, as opposed to the model's reply.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Exchange { source, .. } if source.is_transport())
    }

    /// Message shown to the user. Transport and parse failures share one text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Exchange {
                source: ExchangeError::EmptyResponse,
                ..
            } => EMPTY_RESPONSE_MESSAGE.to_string(),
            Self::Exchange {
                kind: FlowKind::LabAnalysis,
                ..
            } => LAB_PARSE_FAILURE.to_string(),
            Self::Exchange {
                kind: FlowKind::MedSuggestion,
                ..
            } => MED_PARSE_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    profile: RwLock<Arc<HealthProfile>>,
    lab_flow: FlowStatus,
    med_flow: FlowStatus,
    llm: Box<dyn LlmClient + Send + Sync>,
}

impl CoreState {
    /// Fresh session with an empty profile.
    pub fn new(llm: Box<dyn LlmClient + Send + Sync>) -> Self {
        Self {
            profile: RwLock::new(Arc::new(HealthProfile::new())),
            lab_flow: FlowStatus::new(),
            med_flow: FlowStatus::new(),
            llm,
        }
    }

    /// Session backed by the real endpoint. Call outside an async context.
    pub fn from_config(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        let client = GeminiClient::new(config)?;
        tracing::info!(model = %config.model, "Exchange client ready");
        Ok(Self::new(Box::new(client)))
    }

    // ── Read path ───────────────────────────────────────────

    /// Current profile snapshot.
    pub fn snapshot(&self) -> Result<Arc<HealthProfile>, FlowError> {
        self.profile
            .read()
            .map(|p| Arc::clone(&p))
            .map_err(|_| FlowError::LockPoisoned)
    }

    pub fn lab_status(&self) -> FlowSnapshot {
        self.lab_flow.snapshot()
    }

    pub fn med_status(&self) -> FlowSnapshot {
        self.med_flow.snapshot()
    }

    // ── Write path ──────────────────────────────────────────

    /// Build the next snapshot from the current one and swap it in.
    fn commit<F>(&self, update: F) -> Result<Arc<HealthProfile>, FlowError>
    where
        F: FnOnce(&HealthProfile) -> HealthProfile,
    {
        let mut guard = self.profile.write().map_err(|_| FlowError::LockPoisoned)?;
        let next = Arc::new(update(&guard));
        *guard = Arc::clone(&next);
        Ok(next)
    }

    fn record_failure(&self, status: &FlowStatus, err: FlowError) -> FlowError {
        if err.is_transport() {
            tracing::warn!(error = %err, "Analysis flow failed before a reply arrived");
        } else {
            tracing::warn!(error = %err, "Analysis flow got an unusable reply");
        }
        status.set_error(Some(err.user_message()));
        err
    }

    // ── Lab analysis flow ───────────────────────────────────

    /// Analyze pasted lab text.
    ///
    /// On failure the profile is left as it was and the lab flow's error is set.
    pub fn run_lab_analysis(&self, raw_text: &str) -> Result<Arc<HealthProfile>, FlowError> {
        if raw_text.trim().is_empty() {
            return Err(FlowError::EmptyInput);
        }
        let _guard = self
            .lab_flow
            .try_begin()
            .ok_or(FlowError::Busy(FlowKind::LabAnalysis))?;

        tracing::info!(input_chars = raw_text.len(), "Lab analysis started");

        let analysis = self
            .llm
            .generate(LAB_ANALYSIS_SYSTEM_PROMPT, raw_text)
            .and_then(|reply| parse_lab_analysis(&reply))
            .map_err(|source| {
                self.record_failure(
                    &self.lab_flow,
                    FlowError::Exchange {
                        kind: FlowKind::LabAnalysis,
                        source,
                    },
                )
            })?;

        let values = analysis.values.len();
        let flagged = analysis.flagged_values().count();
        let now = now_timestamp();
        let profile = self.commit(|p| p.with_lab_result(raw_text, analysis, &now))?;

        tracing::info!(values, flagged, "Lab analysis completed");
        Ok(profile)
    }

    // ── Medication suggestion flow ──────────────────────────

    /// Ask for medication suggestions based on the current lab analysis.
    ///
    /// Rejected without any call while no lab analysis exists.
    pub fn run_med_suggestion(&self) -> Result<Arc<HealthProfile>, FlowError> {
        let current = self.snapshot()?;
        let lab = current
            .lab_analysis
            .as_ref()
            .ok_or(FlowError::LabAnalysisRequired)?;

        let _guard = self
            .med_flow
            .try_begin()
            .ok_or(FlowError::Busy(FlowKind::MedSuggestion))?;

        tracing::info!(lab_values = lab.values.len(), "Medication suggestion started");

        let analysis = build_med_suggestion_payload(lab)
            .and_then(|payload| self.llm.generate(MED_SUGGESTION_SYSTEM_PROMPT, &payload))
            .and_then(|reply| parse_med_analysis(&reply))
            .map_err(|source| {
                self.record_failure(
                    &self.med_flow,
                    FlowError::Exchange {
                        kind: FlowKind::MedSuggestion,
                        source,
                    },
                )
            })?;

        let suggested = analysis.medications.len();
        let now = now_timestamp();
        let profile = self.commit(|p| p.with_med_analysis(analysis, &now))?;

        tracing::info!(suggested, "Medication suggestion completed");
        Ok(profile)
    }

    // ── Manual medication editing ───────────────────────────

    /// Replace the medication at `index`. Out of range leaves the list unchanged.
    pub fn edit_medication(
        &self,
        index: usize,
        replacement: Medication,
    ) -> Result<Arc<HealthProfile>, FlowError> {
        tracing::debug!(index, "Editing medication");
        self.commit(|p| p.with_medications(medications::edit_at(&p.medications, index, replacement)))
    }

    /// Remove the medication at `index`. Out of range leaves the list unchanged.
    pub fn remove_medication(&self, index: usize) -> Result<Arc<HealthProfile>, FlowError> {
        tracing::debug!(index, "Removing medication");
        self.commit(|p| p.with_medications(medications::remove_at(&p.medications, index)))
    }

    /// Append a manually entered medication. A blank name leaves the list unchanged.
    pub fn add_medication(
        &self,
        input: &ManualMedicationInput,
    ) -> Result<Arc<HealthProfile>, FlowError> {
        tracing::debug!("Adding manual medication");
        self.commit(|p| p.with_medications(medications::append_manual(&p.medications, input)))
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
