pub mod enums;
mod flexible;
pub mod lab;
pub mod medication;
pub mod profile;

pub use enums::{InvalidEnum, LabStatus, MedicationStatus};
pub use lab::{LabAnalysis, LabValue, SAMPLE_LAB_REPORT};
pub use medication::{MedAnalysis, Medication};
pub use profile::{HealthProfile, ProfileSummary};
