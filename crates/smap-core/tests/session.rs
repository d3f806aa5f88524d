use smap_core::collaborators::{SchemaExtractor, SemanticMapper};
use smap_core::{CorrectionSession, Workflow};
use smap_model::{
    MappingRecord, RawColumn, RawTable, Result, SearchResult, SmapError, VerificationStatus,
};

fn results(names: &[&str]) -> Vec<SearchResult> {
    names
        .iter()
        .map(|n| SearchResult::new(*n, format!("{n} description")))
        .collect()
}

#[test]
fn short_query_dispatches_nothing() {
    let mut session = CorrectionSession::open(0);
    assert!(session.query_change("").is_none());
    assert!(session.query_change("P").is_none());
    assert_eq!(session.query(), "P");
    assert!(!session.is_searching());
}

#[test]
fn second_character_dispatches_exactly_one_search() {
    let mut session = CorrectionSession::open(0);
    assert!(session.query_change("P").is_none());
    let dispatch = session.query_change("Pe").expect("dispatch");
    assert_eq!(dispatch.query, "Pe");
    assert_eq!(dispatch.generation, 1);
    assert!(session.is_searching());
}

#[test]
fn short_query_keeps_prior_results_displayed() {
    let mut session = CorrectionSession::open(0);
    let dispatch = session.query_change("Pe").expect("dispatch");
    assert!(session.apply_results(dispatch.generation, results(&["Person"])));

    assert!(session.query_change("P").is_none());
    assert_eq!(session.results().len(), 1, "prior results remain unchanged");
}

#[test]
fn keyword_shortcut_bypasses_length_guard() {
    let mut session = CorrectionSession::open(0);
    let dispatch = session.keyword_shortcut("Person");
    assert_eq!(dispatch.query, "Person");
    assert_eq!(session.query(), "Person");
    assert!(session.is_searching());
}

#[test]
fn stale_response_is_dropped() {
    let mut session = CorrectionSession::open(0);
    let first = session.query_change("Pe").expect("first dispatch");
    let second = session.query_change("Per").expect("second dispatch");

    // The slow first response arrives after the second dispatch.
    assert!(!session.apply_results(first.generation, results(&["Place"])));
    assert!(session.results().is_empty());
    assert!(session.is_searching(), "newer dispatch still outstanding");

    assert!(session.apply_results(second.generation, results(&["Person"])));
    assert_eq!(session.results()[0].name, "Person");
    assert!(!session.is_searching());
}

#[test]
fn stale_failure_does_not_stop_current_spinner() {
    let mut session = CorrectionSession::open(0);
    let first = session.query_change("Pe").expect("first dispatch");
    let second = session.query_change("Per").expect("second dispatch");

    session.search_failed(first.generation);
    assert!(session.is_searching());
    session.search_failed(second.generation);
    assert!(!session.is_searching());
}

#[test]
fn translation_mutates_one_result_in_place() {
    let mut session = CorrectionSession::open(0);
    let dispatch = session.query_change("Or").expect("dispatch");
    assert!(session.apply_results(dispatch.generation, results(&["Organization", "Order"])));

    session
        .apply_translation(1, "translated order".to_string())
        .expect("translate");
    assert_eq!(session.results()[0].translated_description, None);
    assert_eq!(
        session.results()[1].translated_description.as_deref(),
        Some("translated order")
    );
}

#[test]
fn translation_index_out_of_range() {
    let mut session = CorrectionSession::open(0);
    let err = session
        .apply_translation(3, "x".to_string())
        .expect_err("must fail");
    assert!(matches!(err, SmapError::IndexOutOfRange { index: 3, len: 0 }));
}

// Workflow-level session behavior against a one-record review state.

struct OneTable;

impl SchemaExtractor for OneTable {
    fn extract_file(&self, _f: &str, _c: &[u8]) -> Result<Vec<RawTable>> {
        Ok(vec![RawTable::new(
            "users",
            vec![RawColumn {
                name: "id".to_string(),
                data_type: "INTEGER".to_string(),
            }],
        )])
    }

    fn extract_connection(&self, _n: &str) -> Result<Vec<RawTable>> {
        self.extract_file("", b"")
    }
}

struct OneRecord;

impl SemanticMapper for OneRecord {
    fn map_tables(&self, _tables: &[RawTable]) -> Result<Vec<MappingRecord>> {
        Ok(vec![MappingRecord {
            original_table: "users".to_string(),
            schema_class: "Person".to_string(),
            rationale: "AI rationale.".to_string(),
            columns: vec![],
            confidence_score: Some(0.4),
            search_keywords: vec!["Person".to_string()],
            verification_status: VerificationStatus::AiGenerated,
        }])
    }
}

fn review_workflow() -> Workflow {
    let mut workflow = Workflow::default();
    workflow.submit_file(&OneTable, "shop.sql", b"").expect("submit");
    workflow.request_mapping(&OneRecord).expect("map");
    workflow
}

#[test]
fn opening_a_session_resets_query_and_results() {
    let mut workflow = review_workflow();
    {
        let session = workflow.open_correction(0).expect("open");
        let dispatch = session.query_change("Or").expect("dispatch");
        assert!(session.apply_results(dispatch.generation, results(&["Organization"])));
    }
    // Re-opening replaces the session with a fresh one.
    let session = workflow.open_correction(0).expect("reopen");
    assert_eq!(session.query(), "");
    assert!(session.results().is_empty());
}

#[test]
fn open_correction_validates_step_and_index() {
    let mut workflow = Workflow::default();
    assert!(matches!(
        workflow.open_correction(0),
        Err(SmapError::InvalidStep { .. })
    ));

    let mut workflow = review_workflow();
    assert!(matches!(
        workflow.open_correction(7),
        Err(SmapError::IndexOutOfRange { index: 7, len: 1 })
    ));
}

#[test]
fn selecting_a_result_corrects_the_record_and_closes() {
    let mut workflow = review_workflow();
    let session = workflow.open_correction(0).expect("open");
    let dispatch = session.query_change("Or").expect("dispatch");
    assert!(session.apply_results(dispatch.generation, results(&["Organization"])));

    workflow.select_result(0).expect("select");
    assert!(workflow.session().is_none(), "session closed");

    let record = &workflow.state().mapped_tables[0];
    assert_eq!(record.schema_class, "Organization");
    assert_eq!(record.verification_status, VerificationStatus::Corrected);
    assert_eq!(
        record.rationale,
        "Manual override by user. (Selected: Organization)"
    );
    assert_eq!(record.confidence_score, Some(0.4), "score untouched");
}

#[test]
fn cancel_closes_without_mutating_the_record() {
    let mut workflow = review_workflow();
    let before = workflow.state().mapped_tables[0].clone();
    let session = workflow.open_correction(0).expect("open");
    session.query_change("Pe");
    workflow.cancel_correction();

    assert!(workflow.session().is_none());
    assert_eq!(workflow.state().mapped_tables[0], before);
}

#[test]
fn status_shortcuts_close_the_session() {
    let mut workflow = review_workflow();
    workflow.open_correction(0).expect("open");
    workflow.confirm_and_close().expect("confirm");
    assert!(workflow.session().is_none());
    assert_eq!(
        workflow.state().mapped_tables[0].verification_status,
        VerificationStatus::Verified
    );

    workflow.open_correction(0).expect("open");
    workflow.flag_and_close().expect("flag");
    assert_eq!(
        workflow.state().mapped_tables[0].verification_status,
        VerificationStatus::Flagged
    );

    workflow.open_correction(0).expect("open");
    workflow.reset_status_and_close().expect("reset");
    assert_eq!(
        workflow.state().mapped_tables[0].verification_status,
        VerificationStatus::AiGenerated
    );
}
