//! Interactive human-in-the-loop review.
//!
//! Walks the mapped records one by one. Each record can be kept,
//! confirmed, flagged, reset, or corrected through a search session
//! against the class catalog, with optional translation of result
//! descriptions. I/O goes through generic reader/writer handles so the
//! loop is testable with scripted input.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::warn;

use smap_core::collaborators::{ClassCatalog, Translator};
use smap_core::{MIN_QUERY_CHARS, Workflow};
use smap_model::{SmapError, confidence_percent};

/// Run the review loop over every mapped record.
pub fn run_review(
    workflow: &mut Workflow,
    catalog: &dyn ClassCatalog,
    translator: &dyn Translator,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let count = workflow.state().mapped_tables.len();
    for index in 0..count {
        print_record(workflow, index, output)?;
        loop {
            write!(
                output,
                "[enter]=keep  v=verify  f=flag  r=reset  c=correct  q=quit review > "
            )?;
            output.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(());
            };
            match line.trim() {
                "" => break,
                "v" => {
                    workflow.confirm(index)?;
                    break;
                }
                "f" => {
                    workflow.flag(index)?;
                    break;
                }
                "r" => {
                    workflow.reset_status(index)?;
                    break;
                }
                "c" => {
                    correct_record(workflow, catalog, translator, index, input, output)?;
                    break;
                }
                "q" => return Ok(()),
                other => {
                    writeln!(output, "unknown choice: {other}")?;
                }
            }
        }
    }
    Ok(())
}

fn print_record(workflow: &Workflow, index: usize, output: &mut impl Write) -> Result<()> {
    let record = &workflow.state().mapped_tables[index];
    writeln!(output)?;
    writeln!(
        output,
        "[{index}] {} -> {}  ({}, {}%)",
        record.original_table,
        record.schema_class,
        record.verification_status,
        confidence_percent(record.confidence_score),
    )?;
    writeln!(output, "    {}", record.rationale)?;
    if !record.search_keywords.is_empty() {
        writeln!(output, "    keywords: {}", record.search_keywords.join(", "))?;
    }
    Ok(())
}

/// One correction session: search, optionally translate, then select or
/// cancel.
fn correct_record(
    workflow: &mut Workflow,
    catalog: &dyn ClassCatalog,
    translator: &dyn Translator,
    index: usize,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let keywords = workflow.state().mapped_tables[index].search_keywords.clone();
    workflow
        .open_correction(index)
        .context("open correction session")?;
    if !keywords.is_empty() {
        writeln!(output, "suggested keywords: {}", keywords.join(", "))?;
    }

    loop {
        write!(
            output,
            "search (##=select, t##=translate, blank=cancel) > "
        )?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            workflow.cancel_correction();
            return Ok(());
        };
        let line = line.trim().to_string();

        if line.is_empty() {
            workflow.cancel_correction();
            writeln!(output, "correction cancelled")?;
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix('t')
            && let Ok(result_index) = rest.parse::<usize>()
        {
            translate_result(workflow, translator, result_index, output)?;
            continue;
        }

        if let Ok(result_index) = line.parse::<usize>() {
            match workflow.select_result(result_index) {
                Ok(()) => {
                    let record = &workflow.state().mapped_tables[index];
                    writeln!(output, "corrected to {}", record.schema_class)?;
                    return Ok(());
                }
                Err(error) => {
                    writeln!(output, "error: {error}")?;
                    continue;
                }
            }
        }

        run_search(workflow, catalog, &line, output)?;
    }
}

fn run_search(
    workflow: &mut Workflow,
    catalog: &dyn ClassCatalog,
    query: &str,
    output: &mut impl Write,
) -> Result<()> {
    let Some(session) = workflow.session_mut() else {
        return Ok(());
    };
    let Some(dispatch) = session.query_change(query) else {
        writeln!(
            output,
            "query too short (minimum {MIN_QUERY_CHARS} characters)"
        )?;
        return Ok(());
    };
    match catalog.search(&dispatch.query) {
        Ok(results) => {
            session.apply_results(dispatch.generation, results);
            for (idx, result) in session.results().iter().enumerate() {
                let description = result
                    .translated_description
                    .as_deref()
                    .unwrap_or(&result.description);
                writeln!(output, "  {idx}: {} - {}", result.name, description)?;
            }
            if session.results().is_empty() {
                writeln!(output, "  no matches")?;
            }
        }
        Err(error) => {
            session.search_failed(dispatch.generation);
            warn!(%error, "catalog search failed");
            writeln!(output, "search failed: {error}")?;
        }
    }
    Ok(())
}

fn translate_result(
    workflow: &mut Workflow,
    translator: &dyn Translator,
    result_index: usize,
    output: &mut impl Write,
) -> Result<()> {
    let Some(session) = workflow.session_mut() else {
        return Ok(());
    };
    let description = match session.select(result_index) {
        Ok(result) => result.description.clone(),
        Err(error) => {
            writeln!(output, "error: {error}")?;
            return Ok(());
        }
    };
    match translator.translate(&description) {
        Ok(translated) => {
            session.apply_translation(result_index, translated.clone())?;
            writeln!(output, "  {result_index}: {translated}")?;
        }
        Err(SmapError::Transport(message)) => {
            // Translation is fire-and-forget; a failure leaves the
            // original description displayed.
            warn!(%message, "translation failed");
            writeln!(output, "translation failed: {message}")?;
        }
        Err(error) => return Err(error.into()),
    }
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
