//! Process-wide pipeline state, one instance per user session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::MappingRecord;
use crate::table::RawTable;

/// Workflow step. ARTIFACT_READY is not a fourth variant: it is the
/// sub-state of `MappingReview` selected by the presence of a final
/// artifact, see [`PipelineState::view`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Input,
    RawReview,
    MappingReview,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Input => "INPUT",
            Step::RawReview => "RAW_REVIEW",
            Step::MappingReview => "MAPPING_REVIEW",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Presentation view of the step, with the artifact sub-state made
/// explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepView {
    Input,
    RawReview,
    MappingReview,
    ArtifactReady,
}

/// Final generated output pair: SQL text plus a JSON mapping report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub sql: String,
    pub json: serde_json::Value,
}

/// The single mutable workflow value for one review session.
///
/// Mutated only through the orchestrator's own operations and through
/// record operations addressed by index; collaborator calls happen at an
/// explicit boundary outside this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub step: Step,
    /// True while an external call for the current step is outstanding.
    pub loading: bool,
    /// Label for the input origin: a file name, or "Database Connection".
    pub source_name: String,
    /// Set on entry to RAW_REVIEW.
    pub raw_tables: Vec<RawTable>,
    /// Set on entry to MAPPING_REVIEW; index-aligned with `raw_tables`.
    pub mapped_tables: Vec<MappingRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_artifact: Option<Artifact>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step as the presentation layer sees it.
    pub fn view(&self) -> StepView {
        match self.step {
            Step::Input => StepView::Input,
            Step::RawReview => StepView::RawReview,
            Step::MappingReview => {
                if self.final_artifact.is_some() {
                    StepView::ArtifactReady
                } else {
                    StepView::MappingReview
                }
            }
        }
    }
}
