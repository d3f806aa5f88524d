#![deny(unsafe_code)]

pub mod error;
pub mod profile;
pub mod record;
pub mod search;
pub mod state;
pub mod table;

pub use error::{Result, SmapError};
pub use profile::{ConnectionProfile, DatabaseKind, ProfileParams};
pub use record::{
    ColumnMapping, ConfidenceTier, DEFAULT_CONFIDENCE, MappingRecord, VerificationStatus,
    confidence_percent,
};
pub use search::{SearchResult, TranslationResponse};
pub use state::{Artifact, PipelineState, Step, StepView};
pub use table::{RawColumn, RawTable};
