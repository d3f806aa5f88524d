//! Per-record verification operations.
//!
//! The verification status is a hub graph with no privileged state: any
//! operation is legal from any current state, one record is mutated per
//! operation, and reapplying an operation with the same inputs yields an
//! identical record.

use smap_model::{
    MappingRecord, PipelineState, Result, SearchResult, SmapError, Step, VerificationStatus,
};

/// Mark record `index` as human-verified. Label-only change.
pub fn confirm(state: &mut PipelineState, index: usize) -> Result<()> {
    record_mut(state, "confirm", index)?.verification_status = VerificationStatus::Verified;
    Ok(())
}

/// Mark record `index` as questionable. Label-only change.
pub fn flag(state: &mut PipelineState, index: usize) -> Result<()> {
    record_mut(state, "flag", index)?.verification_status = VerificationStatus::Flagged;
    Ok(())
}

/// Return record `index` to its initial label. The class, rationale and
/// confidence are not restored to any earlier value.
pub fn reset_status(state: &mut PipelineState, index: usize) -> Result<()> {
    record_mut(state, "reset_status", index)?.verification_status =
        VerificationStatus::AiGenerated;
    Ok(())
}

/// Replace the proposed class of record `index` with a human-chosen one.
///
/// The confidence score is left untouched: corrected records keep their
/// original score as provenance and are not re-scored.
pub fn apply_correction(
    state: &mut PipelineState,
    index: usize,
    chosen: &SearchResult,
) -> Result<()> {
    let record = record_mut(state, "apply_correction", index)?;
    record.schema_class = chosen.name.clone();
    record.rationale = correction_rationale(&chosen.name);
    record.verification_status = VerificationStatus::Corrected;
    Ok(())
}

/// Rationale text recorded for a manual correction.
pub fn correction_rationale(class_name: &str) -> String {
    format!("Manual override by user. (Selected: {class_name})")
}

fn record_mut<'a>(
    state: &'a mut PipelineState,
    operation: &'static str,
    index: usize,
) -> Result<&'a mut MappingRecord> {
    if state.step != Step::MappingReview {
        return Err(SmapError::InvalidStep {
            operation,
            step: state.step,
        });
    }
    let len = state.mapped_tables.len();
    state
        .mapped_tables
        .get_mut(index)
        .ok_or(SmapError::IndexOutOfRange { index, len })
}
