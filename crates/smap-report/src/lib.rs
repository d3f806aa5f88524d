#![deny(unsafe_code)]

//! Artifact export.
//!
//! Writes the generated SQL and the pretty-printed JSON report into a
//! user-chosen destination subfolder. Declining either prompt is a
//! benign cancellation, never a failure; write handles are released on
//! every exit path.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use smap_model::Artifact;

/// File name of the exported SQL text.
pub const SQL_FILE_NAME: &str = "schema_mapped.sql";

/// File name of the exported JSON mapping report.
pub const JSON_FILE_NAME: &str = "mapping_report.json";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize mapping report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination acquisition seam. A `None` from either prompt means the
/// user cancelled, which the exporter treats as a benign no-op.
pub trait DestinationPicker {
    /// Pick the parent directory the export subfolder is created in.
    fn pick_parent(&self) -> Option<PathBuf>;

    /// Confirm (possibly edit) the subfolder name.
    fn confirm_folder_name(&self, default: &str) -> Option<String>;
}

/// Outcome of an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written {
        dir: PathBuf,
        sql_path: PathBuf,
        json_path: PathBuf,
    },
    /// The user declined a prompt. Nothing was written.
    Cancelled,
}

/// Default export folder name: source base name (extension stripped)
/// plus `_mapped`.
pub fn default_folder_name(source_name: &str) -> String {
    let base = match source_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => source_name,
    };
    format!("{base}_mapped")
}

/// Export the artifact: acquire a destination, create the subfolder,
/// write the SQL text then the JSON report.
pub fn export(
    picker: &dyn DestinationPicker,
    source_name: &str,
    artifact: &Artifact,
) -> Result<ExportOutcome, ExportError> {
    let default = default_folder_name(source_name);
    let Some(folder_name) = picker.confirm_folder_name(&default) else {
        return Ok(ExportOutcome::Cancelled);
    };
    let Some(parent) = picker.pick_parent() else {
        return Ok(ExportOutcome::Cancelled);
    };

    let dir = parent.join(folder_name);
    fs::create_dir_all(&dir).map_err(|source| ExportError::Io {
        path: dir.clone(),
        source,
    })?;

    let sql_path = dir.join(SQL_FILE_NAME);
    write_file(&sql_path, artifact.sql.as_bytes())?;

    let json_path = dir.join(JSON_FILE_NAME);
    let report = serde_json::to_string_pretty(&artifact.json)?;
    write_file(&json_path, report.as_bytes())?;

    info!(dir = %dir.display(), "exported artifact");
    Ok(ExportOutcome::Written {
        dir,
        sql_path,
        json_path,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    // File handle is released when it leaves scope, on success and on
    // every error path alike.
    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(contents).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    Ok(())
}
