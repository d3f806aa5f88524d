//! Transient search results from the semantic-class catalog.

use serde::{Deserialize, Serialize};

/// One candidate schema.org class returned by the catalog.
///
/// Session-scoped: cached only for the lifetime of the current search
/// session and discarded when the correction session closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Filled lazily by the translation collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_description: Option<String>,
}

impl SearchResult {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            uri: None,
            translated_description: None,
        }
    }
}

/// Response body of the translation collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationResponse {
    pub translated: String,
}
