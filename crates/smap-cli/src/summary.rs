use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use smap_model::{
    ConfidenceTier, ConnectionProfile, MappingRecord, RawTable, SearchResult, VerificationStatus,
    confidence_percent,
};

pub fn print_raw_tables(tables: &[RawTable]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Columns"),
        header_cell("Column names"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for raw in tables {
        let names: Vec<&str> = raw.columns.iter().map(|c| c.name.as_str()).collect();
        table.add_row(vec![
            Cell::new(&raw.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(raw.columns.len()),
            Cell::new(names.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_mapping_summary(records: &[MappingRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Table"),
        header_cell("Class"),
        header_cell("Status"),
        header_cell("Confidence"),
        header_cell("Rationale"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for (idx, record) in records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(&record.original_table)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&record.schema_class).fg(Color::Cyan),
            status_cell(record.verification_status),
            confidence_cell(record),
            Cell::new(&record.rationale),
        ]);
    }
    println!("{table}");
}

pub fn print_profiles(profiles: &BTreeMap<String, ConnectionProfile>) {
    if profiles.is_empty() {
        println!("No saved connections.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Type"),
        header_cell("Host"),
        header_cell("Database"),
        header_cell("Path"),
    ]);
    apply_table_style(&mut table);
    for profile in profiles.values() {
        table.add_row(vec![
            Cell::new(&profile.name).add_attribute(Attribute::Bold),
            Cell::new(profile.kind.as_str()),
            text_or_dash(&profile.params.host),
            text_or_dash(&profile.params.database),
            text_or_dash(&profile.params.path),
        ]);
    }
    println!("{table}");
}

pub fn print_search_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("No results.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Class"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, result) in results.iter().enumerate() {
        let description = result
            .translated_description
            .as_deref()
            .unwrap_or(&result.description);
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(&result.name)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(truncate(description, 120)),
        ]);
    }
    println!("{table}");
}

fn status_cell(status: VerificationStatus) -> Cell {
    match status {
        VerificationStatus::AiGenerated => dim_cell(status.as_str()),
        VerificationStatus::Verified => Cell::new(status.as_str())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        VerificationStatus::Corrected => Cell::new(status.as_str())
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        VerificationStatus::Flagged => Cell::new(status.as_str())
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
    }
}

fn confidence_cell(record: &MappingRecord) -> Cell {
    let percent = confidence_percent(record.confidence_score);
    let tier = record.tier();
    let label = format!("{} ({percent}%)", tier.label());
    match tier {
        ConfidenceTier::High => Cell::new(label).fg(Color::Green),
        ConfidenceTier::Medium => Cell::new(label).fg(Color::Yellow),
        ConfidenceTier::Low => Cell::new(label).fg(Color::Red),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}

fn text_or_dash(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
