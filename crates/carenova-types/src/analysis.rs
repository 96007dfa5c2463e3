//! The structured assessment returned at the end of a conversation.

use serde::{Deserialize, Serialize};

/// Severity band reported by the backend.
///
/// The backend sends severity as free text ("Mild", "Moderate", "Severe"); this
/// classification is only used to pick a presentation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityLevel {
    Mild,
    Moderate,
    Severe,
    Unknown,
}

/// Symptom analysis payload carried by an `analysis` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnalysisResult {
    /// Severity label, e.g. "Moderate".
    pub severity: String,
    /// Confidence indicator, e.g. "78%".
    pub confidence: String,
    pub possible_conditions: Vec<String>,
    /// Why the symptoms match the listed conditions (optional).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explanation: Vec<String>,
    pub home_care_tips: Vec<String>,
    pub when_to_see_doctor: Vec<String>,
    pub disclaimer: String,
}

impl AnalysisResult {
    /// Classify the free-text severity label.
    pub fn severity_level(&self) -> SeverityLevel {
        match self.severity.trim().to_lowercase().as_str() {
            "mild" | "low" => SeverityLevel::Mild,
            "moderate" | "medium" => SeverityLevel::Moderate,
            "severe" | "high" | "emergency" => SeverityLevel::Severe,
            _ => SeverityLevel::Unknown,
        }
    }
}
