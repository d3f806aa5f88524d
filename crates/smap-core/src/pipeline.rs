//! Pipeline orchestrator.
//!
//! Sequences upload → raw-table review → mapping review → artifact, with
//! one manual back-edge from raw review to input. Operations are step-
//! gated, and the `loading` flag serializes the three step-transition
//! collaborator calls: at most one may be in flight at a time. A failed
//! call leaves the state exactly as it was before the call.

use tracing::{debug, info};

use smap_model::{
    Artifact, PipelineState, RawTable, Result, SearchResult, SmapError, Step, StepView,
    VerificationStatus,
};

use crate::collaborators::{ArtifactGenerator, SchemaExtractor, SemanticMapper};
use crate::session::CorrectionSession;
use crate::verify;

/// Source label used when tables come from a saved connection instead of
/// an uploaded file.
pub const CONNECTION_SOURCE_NAME: &str = "Database Connection";

/// Explicit choices the workflow would otherwise inherit silently.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowOptions {
    /// Keep `raw_tables`/`mapped_tables` when navigating back from raw
    /// review to input (cheap resume). When false, the back edge clears
    /// them so a different source cannot show stale data.
    pub keep_stale_data: bool,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            keep_stale_data: true,
        }
    }
}

/// One user session's workflow: the pipeline state machine plus the
/// at-most-one open correction session.
#[derive(Debug, Default)]
pub struct Workflow {
    state: PipelineState,
    options: WorkflowOptions,
    session: Option<CorrectionSession>,
}

impl Workflow {
    pub fn new(options: WorkflowOptions) -> Self {
        Self {
            state: PipelineState::new(),
            options,
            session: None,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn view(&self) -> StepView {
        self.state.view()
    }

    /// Submit an uploaded SQL file. Valid only in INPUT.
    pub fn submit_file(
        &mut self,
        extractor: &dyn SchemaExtractor,
        file_name: &str,
        contents: &[u8],
    ) -> Result<()> {
        self.guard("submit_source", Step::Input)?;
        info!(file = file_name, "extracting tables from upload");
        self.state.loading = true;
        let outcome = extractor.extract_file(file_name, contents);
        self.state.loading = false;
        let tables = outcome?;
        self.enter_raw_review(file_name.to_string(), tables);
        Ok(())
    }

    /// Submit a saved database connection. Valid only in INPUT.
    pub fn submit_connection(
        &mut self,
        extractor: &dyn SchemaExtractor,
        connection_name: &str,
    ) -> Result<()> {
        self.guard("submit_source", Step::Input)?;
        info!(connection = connection_name, "extracting tables from connection");
        self.state.loading = true;
        let outcome = extractor.extract_connection(connection_name);
        self.state.loading = false;
        let tables = outcome?;
        self.enter_raw_review(CONNECTION_SOURCE_NAME.to_string(), tables);
        Ok(())
    }

    fn enter_raw_review(&mut self, source_name: String, tables: Vec<RawTable>) {
        info!(tables = tables.len(), source = %source_name, "entering raw review");
        self.state.source_name = source_name;
        self.state.raw_tables = tables;
        self.state.step = Step::RawReview;
    }

    /// Send the raw tables to the mapping collaborator. Valid only in
    /// RAW_REVIEW. Every returned record starts as AI_GENERATED.
    pub fn request_mapping(&mut self, mapper: &dyn SemanticMapper) -> Result<()> {
        self.guard("request_mapping", Step::RawReview)?;
        info!(tables = self.state.raw_tables.len(), "requesting semantic mapping");
        self.state.loading = true;
        let outcome = mapper.map_tables(&self.state.raw_tables);
        self.state.loading = false;
        let mut records = outcome?;
        if records.len() != self.state.raw_tables.len() {
            return Err(SmapError::Transport(format!(
                "mapper returned {} records for {} tables",
                records.len(),
                self.state.raw_tables.len()
            )));
        }
        for record in &mut records {
            record.verification_status = VerificationStatus::AiGenerated;
        }
        self.state.mapped_tables = records;
        self.state.step = Step::MappingReview;
        Ok(())
    }

    /// Send the reviewed records to the generator. Valid only in
    /// MAPPING_REVIEW with no artifact yet.
    pub fn request_generation(&mut self, generator: &dyn ArtifactGenerator) -> Result<&Artifact> {
        self.guard("request_generation", Step::MappingReview)?;
        if self.state.final_artifact.is_some() {
            return Err(SmapError::InvalidStep {
                operation: "request_generation",
                step: self.state.step,
            });
        }
        info!(records = self.state.mapped_tables.len(), "requesting artifact generation");
        self.state.loading = true;
        let outcome = generator.generate(&self.state.mapped_tables);
        self.state.loading = false;
        let artifact = outcome?;
        Ok(self.state.final_artifact.insert(artifact))
    }

    /// Manual back edge RAW_REVIEW → INPUT. Whether the carried tables
    /// survive is the `keep_stale_data` choice.
    pub fn go_back(&mut self) -> Result<()> {
        self.guard("go_back", Step::RawReview)?;
        debug!(keep_stale_data = self.options.keep_stale_data, "navigating back to input");
        self.state.step = Step::Input;
        if !self.options.keep_stale_data {
            self.state.raw_tables.clear();
            self.state.mapped_tables.clear();
            self.state.source_name.clear();
        }
        Ok(())
    }

    /// Discard all session state and return to INPUT. Available from
    /// ARTIFACT_READY.
    pub fn reset(&mut self) -> Result<()> {
        if self.view() != StepView::ArtifactReady {
            return Err(SmapError::InvalidStep {
                operation: "reset",
                step: self.state.step,
            });
        }
        info!("resetting workflow");
        self.state = PipelineState::new();
        self.session = None;
        Ok(())
    }

    /// Open a correction session against one record. Only one session can
    /// be open; opening again replaces it with a fresh one.
    pub fn open_correction(&mut self, index: usize) -> Result<&mut CorrectionSession> {
        if self.state.step != Step::MappingReview {
            return Err(SmapError::InvalidStep {
                operation: "open_correction",
                step: self.state.step,
            });
        }
        let len = self.state.mapped_tables.len();
        if index >= len {
            return Err(SmapError::IndexOutOfRange { index, len });
        }
        Ok(self.session.insert(CorrectionSession::open(index)))
    }

    pub fn session(&self) -> Option<&CorrectionSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut CorrectionSession> {
        self.session.as_mut()
    }

    /// Apply the selected search result to the session's record and close
    /// the session.
    pub fn select_result(&mut self, result_index: usize) -> Result<()> {
        let session = self.session.as_ref().ok_or(SmapError::Validation(
            "no correction session is open".to_string(),
        ))?;
        let chosen: SearchResult = session.select(result_index)?.clone();
        let edit_index = session.edit_index();
        verify::apply_correction(&mut self.state, edit_index, &chosen)?;
        self.session = None;
        Ok(())
    }

    /// Close the session without mutating the record.
    pub fn cancel_correction(&mut self) {
        self.session = None;
    }

    /// Confirm the record the open session points at, then close it.
    pub fn confirm_and_close(&mut self) -> Result<()> {
        self.status_and_close(verify::confirm)
    }

    /// Flag the record the open session points at, then close it.
    pub fn flag_and_close(&mut self) -> Result<()> {
        self.status_and_close(verify::flag)
    }

    /// Reset the record label the open session points at, then close it.
    pub fn reset_status_and_close(&mut self) -> Result<()> {
        self.status_and_close(verify::reset_status)
    }

    fn status_and_close(
        &mut self,
        op: fn(&mut PipelineState, usize) -> Result<()>,
    ) -> Result<()> {
        let session = self.session.as_ref().ok_or(SmapError::Validation(
            "no correction session is open".to_string(),
        ))?;
        op(&mut self.state, session.edit_index())?;
        self.session = None;
        Ok(())
    }

    /// Direct record operations, outside any session.
    pub fn confirm(&mut self, index: usize) -> Result<()> {
        verify::confirm(&mut self.state, index)
    }

    pub fn flag(&mut self, index: usize) -> Result<()> {
        verify::flag(&mut self.state, index)
    }

    pub fn reset_status(&mut self, index: usize) -> Result<()> {
        verify::reset_status(&mut self.state, index)
    }

    fn guard(&self, operation: &'static str, expected: Step) -> Result<()> {
        if self.state.loading {
            return Err(SmapError::Busy { operation });
        }
        if self.state.step != expected {
            return Err(SmapError::InvalidStep {
                operation,
                step: self.state.step,
            });
        }
        Ok(())
    }
}
