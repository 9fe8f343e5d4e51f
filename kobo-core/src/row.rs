//! Statement row types: the canonical field vocabulary and the
//! pre-grouping row shape produced by bank-specific column mapping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::parse_optional_amount;
use crate::date::parse_statement_date;

/// Canonical transaction fields that bank-specific column headers map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardField {
    #[serde(rename = "transaction_date")]
    TransactionDate,
    #[serde(rename = "value_date")]
    ValueDate,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "balance")]
    Balance,
    #[serde(rename = "reference")]
    Reference,
    #[serde(rename = "branch")]
    Branch,
}

/// One statement row after field mapping, before grouping.
///
/// Dates and amounts stay exactly as the bank printed them — grouping
/// compares date strings verbatim, and amounts keep their thousands
/// separators until a total is actually needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: String,
    pub value_date: Option<String>,
    pub description: String,
    pub debit: Option<String>,
    pub credit: Option<String>,
    pub balance: String,
    pub reference: Option<String>,
    pub branch: Option<String>,
}

impl StatementRow {
    /// Parsed debit amount; absent or malformed is zero.
    pub fn debit_amount(&self) -> f64 {
        parse_optional_amount(self.debit.as_deref())
    }

    /// Parsed credit amount; absent or malformed is zero.
    pub fn credit_amount(&self) -> f64 {
        parse_optional_amount(self.credit.as_deref())
    }

    /// The transaction date as a real date, when the bank's format is known.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_statement_date(&self.date)
    }
}
