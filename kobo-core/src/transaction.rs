//! A grouped transaction: one principal statement row plus the
//! fee/charge rows the bank printed immediately after it.

use serde::{Deserialize, Serialize};

use crate::row::StatementRow;
use crate::text::clean_description;

/// One logical transaction after grouping.
///
/// Every input row lands in exactly one of these, either as `main` or
/// inside some group's `fees` — grouping never drops or duplicates a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedTransaction {
    pub main: StatementRow,
    pub fees: Vec<StatementRow>,
    /// Symbol-stripped, whitespace-normalized narration of the main row.
    pub cleaned_description: String,
    /// Main row debit plus the sum of attached fee debits.
    pub total_debit: f64,
    /// Main row credit only — fees never contribute credit.
    pub total_credit: f64,
    /// Position of the main row in the original sequence, for traceability.
    pub original_index: usize,
}

impl GroupedTransaction {
    /// Build a group from its rows, deriving totals and the cleaned narration.
    pub fn from_rows(
        main: StatementRow,
        fees: Vec<StatementRow>,
        original_index: usize,
        clean: bool,
    ) -> Self {
        let fee_debits: f64 = fees.iter().map(StatementRow::debit_amount).sum();
        let total_debit = main.debit_amount() + fee_debits;
        let total_credit = main.credit_amount();
        let cleaned_description = if clean {
            clean_description(&main.description)
        } else {
            main.description.clone()
        };
        Self {
            main,
            fees,
            cleaned_description,
            total_debit,
            total_credit,
            original_index,
        }
    }

    pub fn has_fees(&self) -> bool {
        !self.fees.is_empty()
    }

    /// Sum of attached fee debits.
    pub fn fee_total(&self) -> f64 {
        self.fees.iter().map(StatementRow::debit_amount).sum()
    }
}
