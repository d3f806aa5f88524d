use std::fs;
use std::path::PathBuf;

use smap_model::Artifact;
use smap_report::{DestinationPicker, ExportOutcome, JSON_FILE_NAME, SQL_FILE_NAME, export};

struct FixedPicker {
    parent: PathBuf,
}

impl DestinationPicker for FixedPicker {
    fn pick_parent(&self) -> Option<PathBuf> {
        Some(self.parent.clone())
    }

    fn confirm_folder_name(&self, default: &str) -> Option<String> {
        Some(default.to_string())
    }
}

struct CancellingPicker {
    cancel_at_folder_name: bool,
}

impl DestinationPicker for CancellingPicker {
    fn pick_parent(&self) -> Option<PathBuf> {
        None
    }

    fn confirm_folder_name(&self, default: &str) -> Option<String> {
        if self.cancel_at_folder_name {
            None
        } else {
            Some(default.to_string())
        }
    }
}

fn artifact() -> Artifact {
    Artifact {
        sql: "CREATE TABLE person (id INTEGER);\n".to_string(),
        json: serde_json::json!({ "tables": [{ "original_table": "users" }] }),
    }
}

#[test]
fn writes_sql_then_json_into_the_confirmed_subfolder() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let picker = FixedPicker {
        parent: tmp.path().to_path_buf(),
    };

    let outcome = export(&picker, "shop.sql", &artifact()).expect("export");
    let ExportOutcome::Written {
        dir,
        sql_path,
        json_path,
    } = outcome
    else {
        panic!("expected written outcome");
    };

    assert_eq!(dir, tmp.path().join("shop_mapped"));
    assert_eq!(sql_path, dir.join(SQL_FILE_NAME));
    assert_eq!(json_path, dir.join(JSON_FILE_NAME));

    let sql = fs::read_to_string(&sql_path).expect("read sql");
    assert_eq!(sql, "CREATE TABLE person (id INTEGER);\n");

    let report = fs::read_to_string(&json_path).expect("read json");
    assert!(report.contains('\n'), "report is pretty-printed");
    let parsed: serde_json::Value = serde_json::from_str(&report).expect("parse report");
    assert_eq!(parsed["tables"][0]["original_table"], "users");
}

#[test]
fn cancelling_the_folder_prompt_writes_nothing() {
    let outcome = export(
        &CancellingPicker {
            cancel_at_folder_name: true,
        },
        "shop.sql",
        &artifact(),
    )
    .expect("export");
    assert_eq!(outcome, ExportOutcome::Cancelled);
}

#[test]
fn cancelling_the_directory_picker_writes_nothing() {
    let outcome = export(
        &CancellingPicker {
            cancel_at_folder_name: false,
        },
        "shop.sql",
        &artifact(),
    )
    .expect("export");
    assert_eq!(outcome, ExportOutcome::Cancelled);
}

#[test]
fn export_is_repeatable_over_an_existing_folder() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let picker = FixedPicker {
        parent: tmp.path().to_path_buf(),
    };
    export(&picker, "shop.sql", &artifact()).expect("first export");
    export(&picker, "shop.sql", &artifact()).expect("second export");
}
