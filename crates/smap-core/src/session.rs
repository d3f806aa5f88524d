//! Search & translate correction session.
//!
//! One session edits one mapping record at a time. Searches are
//! dispatched with a monotonically increasing generation number; a
//! response whose generation is not the current one is dropped, so a
//! slow stale query can never clobber a newer one. Translate requests
//! are independent and mutate one result in place.

use smap_model::{Result, SearchResult, SmapError};

/// Minimum query length before a search is dispatched.
pub const MIN_QUERY_CHARS: usize = 2;

/// A search request handed to the catalog collaborator. The caller
/// feeds the response back through [`CorrectionSession::apply_results`]
/// with the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDispatch {
    pub generation: u64,
    pub query: String,
}

/// Transient state of one open correction session.
#[derive(Debug, Clone)]
pub struct CorrectionSession {
    edit_index: usize,
    query: String,
    results: Vec<SearchResult>,
    searching: bool,
    generation: u64,
}

impl CorrectionSession {
    /// Open a session against one record index. Query and results start
    /// empty.
    pub fn open(edit_index: usize) -> Self {
        Self {
            edit_index,
            query: String::new(),
            results: Vec::new(),
            searching: false,
            generation: 0,
        }
    }

    pub fn edit_index(&self) -> usize {
        self.edit_index
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Update the live query. Queries shorter than [`MIN_QUERY_CHARS`]
    /// dispatch nothing and leave prior results displayed unchanged.
    pub fn query_change(&mut self, text: &str) -> Option<SearchDispatch> {
        self.query = text.to_string();
        if text.chars().count() < MIN_QUERY_CHARS {
            return None;
        }
        Some(self.dispatch())
    }

    /// Adopt an AI-suggested keyword as the query and dispatch
    /// immediately, bypassing the length guard.
    pub fn keyword_shortcut(&mut self, keyword: &str) -> SearchDispatch {
        self.query = keyword.to_string();
        self.dispatch()
    }

    fn dispatch(&mut self) -> SearchDispatch {
        self.generation += 1;
        self.searching = true;
        SearchDispatch {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Apply a search response. Returns false (and changes nothing) when
    /// the generation is stale.
    pub fn apply_results(&mut self, generation: u64, results: Vec<SearchResult>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.results = results;
        self.searching = false;
        true
    }

    /// Record a failed search. Prior results stay displayed; the spinner
    /// stops only for the current generation.
    pub fn search_failed(&mut self, generation: u64) {
        if generation == self.generation {
            self.searching = false;
        }
    }

    /// Store a translated description on one result, in place. Other
    /// results are untouched and the session stays open.
    pub fn apply_translation(&mut self, result_index: usize, translated: String) -> Result<()> {
        let len = self.results.len();
        let result = self
            .results
            .get_mut(result_index)
            .ok_or(SmapError::IndexOutOfRange {
                index: result_index,
                len,
            })?;
        result.translated_description = Some(translated);
        Ok(())
    }

    /// The result the user picked; the caller applies the correction and
    /// closes the session.
    pub fn select(&self, result_index: usize) -> Result<&SearchResult> {
        self.results
            .get(result_index)
            .ok_or(SmapError::IndexOutOfRange {
                index: result_index,
                len: self.results.len(),
            })
    }
}
