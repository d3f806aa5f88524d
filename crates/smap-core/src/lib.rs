#![deny(unsafe_code)]

//! Core state machines of the mapping workstation: the pipeline
//! orchestrator, the per-record verification operations, and the search
//! & translate correction session. All external calls go through the
//! trait seams in [`collaborators`].

pub mod collaborators;
pub mod pipeline;
pub mod session;
pub mod verify;

pub use collaborators::{
    ArtifactGenerator, ClassCatalog, ProfileStore, SchemaExtractor, SemanticMapper, Translator,
};
pub use pipeline::{CONNECTION_SOURCE_NAME, Workflow, WorkflowOptions};
pub use session::{CorrectionSession, MIN_QUERY_CHARS, SearchDispatch};
