//! Transaction grouping: attach trailing fee/charge rows to the principal
//! transaction that incurred them.
//!
//! Nigerian banks print a transfer as a principal debit row immediately
//! followed by its commission, VAT, and levy rows on the same date. The
//! grouper reunites them so the rest of the app sees one transaction with
//! one total.

use kobo_core::{GroupedTransaction, StatementRow};

/// Grouping knobs. `look_ahead_rows` bounds how far past a principal row
/// the grouper will look for its fees.
#[derive(Debug, Clone)]
pub struct GroupOptions {
    pub look_ahead_rows: usize,
    pub clean_descriptions: bool,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            look_ahead_rows: 3,
            clean_descriptions: true,
        }
    }
}

/// Case-insensitive fee classification by keyword substring.
pub fn is_fee_row(description: &str, fee_keywords: &[String]) -> bool {
    let desc = description.to_uppercase();
    fee_keywords.iter().any(|keyword| desc.contains(keyword.as_str()))
}

/// Group rows in a single left-to-right pass, O(n * look_ahead_rows).
///
/// Each principal row claims the fee rows in its lookahead window that
/// share its exact date string. The scan stops at the first window row
/// that is not a date-matching fee — skipping over a mismatch could steal
/// a fee belonging to a later, unrelated transaction.
///
/// A fee row nothing claimed (an orphaned fee) becomes its own standalone
/// group: every input row appears in exactly one output group.
pub fn group_transactions(
    rows: &[StatementRow],
    options: &GroupOptions,
    fee_keywords: &[String],
) -> Vec<GroupedTransaction> {
    let mut consumed = vec![false; rows.len()];
    let mut grouped = Vec::new();

    for i in 0..rows.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;
        let row = &rows[i];

        if is_fee_row(&row.description, fee_keywords) {
            // Orphaned fee: no preceding principal claimed it. Keep it as
            // its own record rather than dropping it.
            grouped.push(GroupedTransaction::from_rows(
                row.clone(),
                Vec::new(),
                i,
                options.clean_descriptions,
            ));
            continue;
        }

        let mut fees: Vec<StatementRow> = Vec::new();
        let window_end = rows.len().min(i + 1 + options.look_ahead_rows);
        for j in i + 1..window_end {
            let candidate = &rows[j];
            if is_fee_row(&candidate.description, fee_keywords) && candidate.date == row.date {
                fees.push(candidate.clone());
                consumed[j] = true;
            } else {
                break;
            }
        }

        grouped.push(GroupedTransaction::from_rows(
            row.clone(),
            fees,
            i,
            options.clean_descriptions,
        ));
    }

    grouped
}
