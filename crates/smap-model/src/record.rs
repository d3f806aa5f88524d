//! Mapping records and their human-review status.
//!
//! A `MappingRecord` is one table's proposed (or corrected) mapping onto a
//! schema.org class. The record carries the AI's confidence and rationale
//! as provenance; corrections overwrite the class and rationale but never
//! re-score the record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display default applied when a confidence score is absent.
///
/// This value is for presentation only and must never be written back
/// into a record.
pub const DEFAULT_CONFIDENCE: f32 = 0.5;

/// Human review state of a mapping record.
///
/// This is a hub graph, not a progression: every operation is legal from
/// every state, and reapplying an operation is idempotent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Initial state of every record produced by the mapping collaborator.
    #[default]
    #[serde(rename = "AI_GENERATED")]
    AiGenerated,
    /// Human confirmed the proposal as-is.
    #[serde(rename = "VERIFIED")]
    Verified,
    /// Human replaced the proposed class via a correction session.
    #[serde(rename = "CORRECTED")]
    Corrected,
    /// Human flagged the proposal as questionable.
    #[serde(rename = "FLAGGED")]
    Flagged,
}

impl VerificationStatus {
    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::AiGenerated => "AI_GENERATED",
            VerificationStatus::Verified => "VERIFIED",
            VerificationStatus::Corrected => "CORRECTED",
            VerificationStatus::Flagged => "FLAGGED",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AI_GENERATED" => Ok(VerificationStatus::AiGenerated),
            "VERIFIED" => Ok(VerificationStatus::Verified),
            "CORRECTED" => Ok(VerificationStatus::Corrected),
            "FLAGGED" => Ok(VerificationStatus::Flagged),
            other => Err(format!("unknown verification status: {other}")),
        }
    }
}

/// Low/medium/high classification of a confidence score, display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Classify a score; an absent score falls back to the display
    /// default of 0.5 and therefore lands in the low tier.
    pub fn from_score(score: Option<f32>) -> Self {
        let s = score.unwrap_or(DEFAULT_CONFIDENCE);
        if s >= 0.8 {
            ConfidenceTier::High
        } else if s >= 0.6 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::High => "high",
        }
    }
}

/// Rounded percentage for badge display, using the display default when
/// the score is absent.
pub fn confidence_percent(score: Option<f32>) -> u8 {
    (score.unwrap_or(DEFAULT_CONFIDENCE) * 100.0).round() as u8
}

/// Mapping of one source column onto a schema.org property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub original_name: String,
    pub schema_property: String,
    pub confidence: f32,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_keywords: Vec<String>,
}

/// One table's proposed or corrected semantic mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Stable key back to the raw table this record was mapped from.
    pub original_table: String,
    /// Proposed schema.org class name.
    pub schema_class: String,
    /// Human-readable justification for the mapping.
    pub rationale: String,
    /// Per-column property mappings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnMapping>,
    /// Class-level confidence in [0, 1]. Absence is a valid state; the
    /// 0.5 display default is never persisted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f32>,
    /// AI-suggested seeds for the correction search.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_keywords: Vec<String>,
    #[serde(default)]
    pub verification_status: VerificationStatus,
}

impl MappingRecord {
    /// Confidence tier for badge display.
    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_score(self.confidence_score)
    }
}
