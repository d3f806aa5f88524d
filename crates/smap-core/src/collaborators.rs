//! External collaborator seams.
//!
//! Every suspension point of the workflow goes through one of these
//! traits, so the state machines stay testable without any network. The
//! HTTP implementations live in `smap-client`.

use std::collections::BTreeMap;

use smap_model::{Artifact, ConnectionProfile, MappingRecord, RawTable, Result, SearchResult};

/// Produces raw tables from an uploaded SQL file or a saved connection.
pub trait SchemaExtractor {
    fn extract_file(&self, file_name: &str, contents: &[u8]) -> Result<Vec<RawTable>>;
    fn extract_connection(&self, connection_name: &str) -> Result<Vec<RawTable>>;
}

/// Proposes schema.org classes for raw tables.
pub trait SemanticMapper {
    fn map_tables(&self, tables: &[RawTable]) -> Result<Vec<MappingRecord>>;
}

/// Emits the final SQL + JSON artifact from reviewed records.
pub trait ArtifactGenerator {
    fn generate(&self, records: &[MappingRecord]) -> Result<Artifact>;
}

/// Searches the semantic-class catalog.
pub trait ClassCatalog {
    fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Translates a class description for display.
pub trait Translator {
    fn translate(&self, text: &str) -> Result<String>;
}

/// Persistent connection-profile store, keyed by profile name.
pub trait ProfileStore {
    fn list(&self) -> Result<BTreeMap<String, ConnectionProfile>>;
    /// Saving under an existing name overwrites.
    fn save(&self, profile: &ConnectionProfile) -> Result<()>;
    fn delete(&self, name: &str) -> Result<()>;
}
