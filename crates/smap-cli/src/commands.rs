use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use smap_client::HttpWorkstation;
use smap_connect::{ConnectionForm, to_profile};
use smap_core::collaborators::{ClassCatalog, ProfileStore, Translator};
use smap_core::{MIN_QUERY_CHARS, Workflow, WorkflowOptions};
use smap_model::DatabaseKind;
use smap_report::{ExportOutcome, export};

use smap_cli::review::run_review;

use crate::cli::{AddConnectionArgs, ConnectArgs, MapArgs, RunArgs, SearchArgs};
use crate::picker::{TerminalPicker, confirm_on_terminal};
use crate::summary::{
    print_mapping_summary, print_profiles, print_raw_tables, print_search_results,
};

pub fn run_map(args: &MapArgs, base_url: &str) -> Result<()> {
    let workstation = HttpWorkstation::new(base_url)?;
    let contents = fs::read(&args.sql_file)
        .with_context(|| format!("read {}", args.sql_file.display()))?;
    let file_name = args
        .sql_file
        .file_name()
        .and_then(|n| n.to_str())
        .context("SQL file path has no usable file name")?
        .to_string();

    let mut workflow = Workflow::new(WorkflowOptions::default());
    workflow.submit_file(&workstation, &file_name, &contents)?;

    let default_parent = args
        .sql_file
        .parent()
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."));
    run_pipeline(&mut workflow, &workstation, &args.run, default_parent)
}

pub fn run_connect(args: &ConnectArgs, base_url: &str) -> Result<()> {
    let workstation = HttpWorkstation::new(base_url)?;
    let mut workflow = Workflow::new(WorkflowOptions::default());
    workflow.submit_connection(&workstation, &args.name)?;
    run_pipeline(&mut workflow, &workstation, &args.run, PathBuf::from("."))
}

/// Raw review → mapping → optional interactive review → generation →
/// export.
fn run_pipeline(
    workflow: &mut Workflow,
    workstation: &HttpWorkstation,
    args: &RunArgs,
    default_parent: PathBuf,
) -> Result<()> {
    println!("Source: {}", workflow.state().source_name);
    print_raw_tables(&workflow.state().raw_tables);

    workflow.request_mapping(workstation)?;
    print_mapping_summary(&workflow.state().mapped_tables);

    if args.review {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        run_review(workflow, workstation, workstation, &mut input, &mut output)?;
        print_mapping_summary(&workflow.state().mapped_tables);
    }

    if args.dry_run {
        info!("dry run: skipping generation and export");
        return Ok(());
    }

    let artifact = workflow.request_generation(workstation)?.clone();
    println!("Generated SQL:");
    println!("{}", artifact.sql);

    let parent = args.output_dir.clone().unwrap_or(default_parent);
    let picker = TerminalPicker::new(parent, args.assume_yes);
    match export(&picker, &workflow.state().source_name, &artifact)? {
        ExportOutcome::Written {
            dir,
            sql_path,
            json_path,
        } => {
            println!("Exported to {}", dir.display());
            println!("  {}", sql_path.display());
            println!("  {}", json_path.display());
        }
        ExportOutcome::Cancelled => {
            println!("Export cancelled.");
        }
    }
    Ok(())
}

pub fn run_connections_list(base_url: &str) -> Result<()> {
    let workstation = HttpWorkstation::new(base_url)?;
    let profiles = workstation.list()?;
    print_profiles(&profiles);
    Ok(())
}

pub fn run_connections_add(args: &AddConnectionArgs, base_url: &str) -> Result<()> {
    let kind: DatabaseKind = args.kind.into();
    if kind.is_server()
        && args.port.is_none()
        && let Some(port) = kind.default_port()
    {
        info!(port, "no port given; the conventional server port applies");
    }
    let form = ConnectionForm {
        name: args.name.clone(),
        kind,
        path: args.path.clone().unwrap_or_default(),
        host: args.host.clone().unwrap_or_default(),
        port: args.port.clone().unwrap_or_default(),
        username: args.username.clone().unwrap_or_default(),
        password: args.password.clone().unwrap_or_default(),
        database: args.database.clone().unwrap_or_default(),
        use_custom: args.custom_string.is_some(),
        custom_string: args.custom_string.clone().unwrap_or_default(),
    };
    // Fail fast: the form is validated before any request goes out.
    let profile = to_profile(&form)?;

    let workstation = HttpWorkstation::new(base_url)?;
    workstation.save(&profile)?;
    println!("Saved connection '{}' ({}).", profile.name, profile.kind);
    Ok(())
}

pub fn run_connections_delete(name: &str, yes: bool, base_url: &str) -> Result<()> {
    if !yes && !confirm_on_terminal(&format!("Delete connection '{name}'?")) {
        println!("Not deleted.");
        return Ok(());
    }
    let workstation = HttpWorkstation::new(base_url)?;
    workstation.delete(name)?;
    println!("Deleted connection '{name}'.");
    Ok(())
}

pub fn run_search(args: &SearchArgs, base_url: &str) -> Result<()> {
    if args.query.chars().count() < MIN_QUERY_CHARS {
        bail!("query must be at least {MIN_QUERY_CHARS} characters");
    }
    let workstation = HttpWorkstation::new(base_url)?;
    let mut results = workstation.search(&args.query)?;
    if args.translate {
        for result in &mut results {
            result.translated_description = Some(workstation.translate(&result.description)?);
        }
    }
    print_search_results(&results);
    Ok(())
}
