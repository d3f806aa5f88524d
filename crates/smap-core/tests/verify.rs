use smap_core::verify;
use smap_model::{
    MappingRecord, PipelineState, RawColumn, RawTable, SearchResult, SmapError, Step,
    VerificationStatus,
};

fn review_state() -> PipelineState {
    let mut state = PipelineState::new();
    state.step = Step::MappingReview;
    state.raw_tables = vec![RawTable::new(
        "users",
        vec![RawColumn {
            name: "id".to_string(),
            data_type: "INTEGER".to_string(),
        }],
    )];
    state.mapped_tables = vec![MappingRecord {
        original_table: "users".to_string(),
        schema_class: "Person".to_string(),
        rationale: "Initial AI rationale.".to_string(),
        columns: vec![],
        confidence_score: Some(0.72),
        search_keywords: vec![],
        verification_status: VerificationStatus::AiGenerated,
    }];
    state
}

#[test]
fn confirm_only_changes_the_label() {
    let mut state = review_state();
    let before = state.mapped_tables[0].clone();
    verify::confirm(&mut state, 0).expect("confirm");

    let after = &state.mapped_tables[0];
    assert_eq!(after.verification_status, VerificationStatus::Verified);
    assert_eq!(after.schema_class, before.schema_class);
    assert_eq!(after.rationale, before.rationale);
    assert_eq!(after.confidence_score, before.confidence_score);
}

#[test]
fn every_operation_is_legal_from_every_state() {
    let chosen = SearchResult::new("Organization", "A business or agency.");
    for start in [
        VerificationStatus::AiGenerated,
        VerificationStatus::Verified,
        VerificationStatus::Corrected,
        VerificationStatus::Flagged,
    ] {
        let mut state = review_state();
        state.mapped_tables[0].verification_status = start;

        verify::confirm(&mut state, 0).expect("confirm");
        assert_eq!(
            state.mapped_tables[0].verification_status,
            VerificationStatus::Verified
        );

        verify::flag(&mut state, 0).expect("flag");
        assert_eq!(
            state.mapped_tables[0].verification_status,
            VerificationStatus::Flagged
        );

        verify::reset_status(&mut state, 0).expect("reset");
        assert_eq!(
            state.mapped_tables[0].verification_status,
            VerificationStatus::AiGenerated
        );

        verify::apply_correction(&mut state, 0, &chosen).expect("correct");
        assert_eq!(
            state.mapped_tables[0].verification_status,
            VerificationStatus::Corrected
        );
    }
}

#[test]
fn correction_sets_class_and_rationale_only() {
    let mut state = review_state();
    let chosen = SearchResult::new("Organization", "A business or agency.");
    verify::apply_correction(&mut state, 0, &chosen).expect("correct");

    let record = &state.mapped_tables[0];
    assert_eq!(record.schema_class, "Organization");
    assert_eq!(
        record.rationale,
        "Manual override by user. (Selected: Organization)"
    );
    assert_eq!(record.verification_status, VerificationStatus::Corrected);
    // Corrected records keep their original score as provenance.
    assert_eq!(record.confidence_score, Some(0.72));
}

#[test]
fn correction_is_idempotent() {
    let mut state = review_state();
    let chosen = SearchResult::new("Organization", "A business or agency.");
    verify::apply_correction(&mut state, 0, &chosen).expect("first");
    let once = state.mapped_tables[0].clone();
    verify::apply_correction(&mut state, 0, &chosen).expect("second");
    assert_eq!(state.mapped_tables[0], once);
}

#[test]
fn reset_then_anything_succeeds() {
    let mut state = review_state();
    verify::apply_correction(&mut state, 0, &SearchResult::new("Event", "Something happening."))
        .expect("correct");
    verify::reset_status(&mut state, 0).expect("reset");
    verify::flag(&mut state, 0).expect("flag");
    verify::confirm(&mut state, 0).expect("confirm");
    assert_eq!(
        state.mapped_tables[0].verification_status,
        VerificationStatus::Verified
    );
}

#[test]
fn other_records_stay_untouched() {
    let mut state = review_state();
    let mut second = state.mapped_tables[0].clone();
    second.original_table = "orders".to_string();
    second.schema_class = "Order".to_string();
    state.mapped_tables.push(second.clone());

    verify::confirm(&mut state, 0).expect("confirm");
    assert_eq!(state.mapped_tables[1], second);
}

#[test]
fn out_of_range_index_is_a_validation_failure() {
    let mut state = review_state();
    let err = verify::confirm(&mut state, 5).expect_err("must fail");
    assert!(matches!(
        err,
        SmapError::IndexOutOfRange { index: 5, len: 1 }
    ));
}

#[test]
fn operations_require_mapping_review_step() {
    let mut state = review_state();
    state.step = Step::RawReview;
    assert!(matches!(
        verify::confirm(&mut state, 0),
        Err(SmapError::InvalidStep { .. })
    ));
}
