//! Row extraction: turning statement text into mapped rows.
//!
//! Extraction quality is bounded by whatever produced the text (PDF text
//! extraction is outside this crate), so the contract is deliberately
//! narrow: find a header line the bank's field mapping recognizes, then
//! map each following line's cells by column position. Anything that
//! doesn't fit is skipped, never fatal.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use tracing::debug;

use kobo_core::{parse_statement_date, StandardField, StatementRow};

use crate::registry::FieldMapping;

/// A source of statement rows. The pipeline is generic over this seam so
/// a table-extraction backend (or a test fixture) can slot in without
/// changing the orchestration.
pub trait RowSource: Send + Sync {
    fn extract(&self, text: &str, mapping: &FieldMapping) -> Result<Vec<StatementRow>>;
}

/// Default source: header-mapped extraction from pipe- or
/// double-space-delimited statement text.
pub struct TabularTextSource;

impl RowSource for TabularTextSource {
    fn extract(&self, text: &str, mapping: &FieldMapping) -> Result<Vec<StatementRow>> {
        Ok(extract_tabular_rows(text, mapping))
    }
}

static CELL_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\||[ \t]{2,}").expect("static regex"));

/// Extract mapped rows from tabular statement text.
///
/// The first line where at least three cells resolve through the field
/// mapping is taken as the header; subsequent lines are mapped cell-by-cell
/// against the header's column positions. Lines with a different cell count
/// or no parsable transaction date are skipped.
pub fn extract_tabular_rows(text: &str, mapping: &FieldMapping) -> Vec<StatementRow> {
    let mut header: Option<Vec<Option<StandardField>>> = None;
    let mut rows = Vec::new();

    for line in text.lines() {
        let cells = split_cells(line);
        if cells.is_empty() {
            continue;
        }
        match &header {
            None => {
                let resolved: Vec<Option<StandardField>> =
                    cells.iter().map(|cell| mapping.resolve(cell)).collect();
                if resolved.iter().flatten().count() >= 3 {
                    header = Some(resolved);
                }
            }
            Some(fields) => {
                if let Some(row) = row_from_cells(&cells, fields) {
                    rows.push(row);
                } else {
                    debug!(line, "skipping unmapped statement line");
                }
            }
        }
    }

    rows
}

/// Split a line into trimmed cells on pipes or 2+ spaces, dropping the
/// empty edge cells a leading/trailing pipe produces. Interior empty cells
/// survive — an empty debit column is meaningful.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = CELL_SPLIT
        .split(line.trim())
        .map(|cell| cell.trim().to_string())
        .collect();
    while cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

fn row_from_cells(cells: &[String], fields: &[Option<StandardField>]) -> Option<StatementRow> {
    if cells.len() != fields.len() {
        return None;
    }

    let mut row = StatementRow::default();
    let mut has_date = false;
    for (cell, field) in cells.iter().zip(fields) {
        let Some(field) = field else { continue };
        if cell.is_empty() {
            continue;
        }
        match field {
            StandardField::TransactionDate => {
                has_date = parse_statement_date(cell).is_some();
                row.date = cell.clone();
            }
            StandardField::ValueDate => row.value_date = Some(cell.clone()),
            StandardField::Description => row.description = cell.clone(),
            StandardField::Debit => row.debit = Some(cell.clone()),
            StandardField::Credit => row.credit = Some(cell.clone()),
            StandardField::Balance => row.balance = cell.clone(),
            StandardField::Reference => row.reference = Some(cell.clone()),
            StandardField::Branch => row.branch = Some(cell.clone()),
        }
    }

    has_date.then_some(row)
}
