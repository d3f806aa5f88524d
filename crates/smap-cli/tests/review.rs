use std::io::Cursor;

use smap_cli::review::run_review;
use smap_core::Workflow;
use smap_core::collaborators::{ClassCatalog, SchemaExtractor, SemanticMapper, Translator};
use smap_model::{
    MappingRecord, RawColumn, RawTable, Result, SearchResult, VerificationStatus,
};

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
            confidence_score: Some(0.55),
            search_keywords: vec!["Person".to_string()],
            verification_status: VerificationStatus::AiGenerated,
        }])
    }
}

struct FixedCatalog;

impl ClassCatalog for FixedCatalog {
    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let mut result = SearchResult::new("Organization", "A business or agency.");
        if !query.to_lowercase().starts_with("or") {
            result = SearchResult::new("Thing", "The most generic type.");
        }
        Ok(vec![result])
    }
}

struct EchoTranslator;

impl Translator for EchoTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        Ok(format!("translated: {text}"))
    }
}

fn review_workflow() -> Workflow {
    let mut workflow = Workflow::default();
    workflow.submit_file(&OneTable, "shop.sql", b"").expect("submit");
    workflow.request_mapping(&OneRecord).expect("map");
    workflow
}

fn run(workflow: &mut Workflow, script: &str) -> String {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    run_review(
        workflow,
        &FixedCatalog,
        &EchoTranslator,
        &mut input,
        &mut output,
    )
    .expect("review");
    String::from_utf8(output).expect("utf8 output")
}

#[test]
fn enter_keeps_the_record_untouched() {
    let mut workflow = review_workflow();
    let before = workflow.state().mapped_tables[0].clone();
    run(&mut workflow, "\n");
    assert_eq!(workflow.state().mapped_tables[0], before);
}

#[test]
fn verify_and_flag_choices_update_the_label() {
    let mut workflow = review_workflow();
    run(&mut workflow, "v\n");
    assert_eq!(
        workflow.state().mapped_tables[0].verification_status,
        VerificationStatus::Verified
    );

    let mut workflow = review_workflow();
    run(&mut workflow, "f\n");
    assert_eq!(
        workflow.state().mapped_tables[0].verification_status,
        VerificationStatus::Flagged
    );
}

#[test]
fn correction_via_search_selects_a_result() {
    let mut workflow = review_workflow();
    // correct -> search "Organization" -> select result 0
    let output = run(&mut workflow, "c\nOrganization\n0\n");
    assert!(output.contains("Organization"));

    let record = &workflow.state().mapped_tables[0];
    assert_eq!(record.schema_class, "Organization");
    assert_eq!(record.verification_status, VerificationStatus::Corrected);
    assert_eq!(record.confidence_score, Some(0.55));
}

#[test]
fn translate_then_select() {
    let mut workflow = review_workflow();
    let output = run(&mut workflow, "c\nOrganization\nt0\n0\n");
    assert!(output.contains("translated: A business or agency."));
    assert_eq!(
        workflow.state().mapped_tables[0].schema_class,
        "Organization"
    );
}

#[test]
fn blank_search_line_cancels_the_correction() {
    let mut workflow = review_workflow();
    let before = workflow.state().mapped_tables[0].clone();
    let output = run(&mut workflow, "c\n\n");
    assert!(output.contains("correction cancelled"));
    assert_eq!(workflow.state().mapped_tables[0], before);
    assert!(workflow.session().is_none());
}

#[test]
fn short_query_warns_and_keeps_session_open() {
    let mut workflow = review_workflow();
    let output = run(&mut workflow, "c\nX\n\n");
    assert!(output.contains("query too short"));
    assert_eq!(
        workflow.state().mapped_tables[0].verification_status,
        VerificationStatus::AiGenerated
    );
}

#[test]
fn quit_leaves_remaining_records_untouched() {
    let mut workflow = review_workflow();
    run(&mut workflow, "q\n");
    assert_eq!(
        workflow.state().mapped_tables[0].verification_status,
        VerificationStatus::AiGenerated
    );
}

#[test]
fn end_of_input_is_a_clean_exit() {
    let mut workflow = review_workflow();
    run(&mut workflow, "");
    assert_eq!(
        workflow.state().mapped_tables[0].verification_status,
        VerificationStatus::AiGenerated
    );
}
