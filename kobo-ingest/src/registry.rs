//! Bank registry: column-header mappings, fee keywords, transaction-type
//! hints, and detection signatures for the banks we can ingest.
//!
//! All of it is immutable configuration owned by `BankRegistry` at
//! construction — callers go through accessors, never raw tables, so the
//! built-in set can be swapped for a config document without touching
//! calling code.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use kobo_core::StandardField;

/// Bank identifier used when no registered bank matches.
pub const GENERIC_BANK: &str = "generic";

/// Maps raw column headers, as a bank prints them, to standard fields.
///
/// Lookup is case-sensitive on the raw header — statement exports use
/// consistent uppercase headers, and guessing at case would let unrelated
/// columns collide. Several raw headers may map to the same field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    columns: Vec<(String, StandardField)>,
}

impl FieldMapping {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, StandardField)>,
        S: Into<String>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|(raw, field)| (raw.into(), field))
                .collect(),
        }
    }

    /// Resolve a raw column header to its standard field, if mapped.
    pub fn resolve(&self, raw_header: &str) -> Option<StandardField> {
        self.columns
            .iter()
            .find(|(raw, _)| raw == raw_header)
            .map(|(_, field)| *field)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One registered bank: its identifier, the substrings that identify its
/// statements, and its column-header mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankProfile {
    pub id: String,
    /// Matched anywhere in the uppercased statement text.
    pub detection_patterns: Vec<String>,
    pub field_mapping: FieldMapping,
}

/// Keyword list for one coarse transaction category. Advisory only —
/// final categorization belongs to the external LLM service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypePattern {
    pub category: String,
    pub patterns: Vec<String>,
}

/// The full ingestion vocabulary for a deployment.
///
/// Banks are held in an ordered list, not a map: detection ties are broken
/// by registration order, and that order must be deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRegistry {
    banks: Vec<BankProfile>,
    generic: FieldMapping,
    fee_keywords: Vec<String>,
    type_patterns: Vec<TypePattern>,
}

impl BankRegistry {
    /// The compiled-in Nigerian bank set.
    pub fn builtin() -> Self {
        use StandardField::*;

        let banks = vec![
            BankProfile {
                id: "gtbank".to_string(),
                detection_patterns: strings(&["GUARANTY TRUST", "GTBANK", "GTWORLD"]),
                field_mapping: FieldMapping::new([
                    ("TRANS DATE", TransactionDate),
                    ("VALUE DATE", ValueDate),
                    ("REMARKS", Description),
                    ("DEBIT", Debit),
                    ("CREDIT", Credit),
                    ("BALANCE", Balance),
                    ("REFERENCE", Reference),
                ]),
            },
            BankProfile {
                id: "firstbank".to_string(),
                detection_patterns: strings(&[
                    "FIRST BANK OF NIGERIA",
                    "FIRSTBANK",
                    "FIRSTMOBILE",
                ]),
                field_mapping: FieldMapping::new([
                    ("TRANS DATE", TransactionDate),
                    ("VALUE DATE", ValueDate),
                    ("NARRATION", Description),
                    ("DEBIT", Debit),
                    ("CREDIT", Credit),
                    ("BALANCE", Balance),
                    ("REFERENCE", Reference),
                    ("BRANCH", Branch),
                ]),
            },
            BankProfile {
                id: "access".to_string(),
                detection_patterns: strings(&["ACCESS BANK", "ACCESSMOBILE"]),
                field_mapping: FieldMapping::new([
                    ("TRANSACTION DATE", TransactionDate),
                    ("VALUE DATE", ValueDate),
                    ("NARRATIVE", Description),
                    ("WITHDRAWALS", Debit),
                    ("LODGEMENTS", Credit),
                    ("BALANCE", Balance),
                    ("REFERENCE", Reference),
                ]),
            },
            BankProfile {
                id: "zenith".to_string(),
                detection_patterns: strings(&["ZENITH BANK", "ZENITH INTERNATIONAL"]),
                field_mapping: FieldMapping::new([
                    ("EFFECTIVE DATE", TransactionDate),
                    ("VALUE DATE", ValueDate),
                    ("DESCRIPTION", Description),
                    ("DEBIT AMOUNT", Debit),
                    ("CREDIT AMOUNT", Credit),
                    ("BALANCE", Balance),
                    ("REFERENCE NO", Reference),
                    ("BRANCH", Branch),
                ]),
            },
            BankProfile {
                id: "uba".to_string(),
                detection_patterns: strings(&["UNITED BANK FOR AFRICA", "UBA PLC"]),
                field_mapping: FieldMapping::new([
                    ("TRAN DATE", TransactionDate),
                    ("VALUE DATE", ValueDate),
                    ("NARRATION", Description),
                    ("WITHDRAWALS", Debit),
                    ("DEPOSITS", Credit),
                    ("BALANCE", Balance),
                    ("REFERENCE", Reference),
                    ("BRANCH", Branch),
                ]),
            },
        ];

        // Superset mapping for statements from banks we don't know.
        let generic = FieldMapping::new([
            ("DATE", TransactionDate),
            ("TRANS DATE", TransactionDate),
            ("TRAN DATE", TransactionDate),
            ("TRANSACTION DATE", TransactionDate),
            ("EFFECTIVE DATE", TransactionDate),
            ("VALUE DATE", ValueDate),
            ("DESCRIPTION", Description),
            ("NARRATION", Description),
            ("NARRATIVE", Description),
            ("REMARKS", Description),
            ("DETAILS", Description),
            ("DEBIT", Debit),
            ("DEBIT AMOUNT", Debit),
            ("WITHDRAWALS", Debit),
            ("CREDIT", Credit),
            ("CREDIT AMOUNT", Credit),
            ("DEPOSITS", Credit),
            ("LODGEMENTS", Credit),
            ("BALANCE", Balance),
            ("REFERENCE", Reference),
            ("REFERENCE NO", Reference),
            ("REF", Reference),
            ("BRANCH", Branch),
        ]);

        let fee_keywords = strings(&[
            "COMMISSION",
            "VAT",
            "STAMP DUTY",
            "SMS CHARGE",
            "SMS ALERT",
            "COT",
            "TRANSFER LEVY",
            "EMT LEVY",
            "MAINTENANCE FEE",
            "PROCESSING FEE",
            "NIP CHARGE",
        ]);

        let type_patterns = vec![
            type_pattern("transfer", &["TRANSFER", "TRF", "NIP"]),
            type_pattern("airtime", &["AIRTIME", "RECHARGE", "VTU"]),
            type_pattern("data", &["DATA BUNDLE", "DATA PLAN", "INTERNET DATA"]),
            type_pattern("withdrawal", &["ATM", "WITHDRAWAL", "CASH WDL"]),
            type_pattern("purchase", &["POS", "PURCHASE", "WEB PAY"]),
            type_pattern("bill", &["DSTV", "GOTV", "PHCN", "ELECTRICITY", "BILL PAYMENT"]),
        ];

        Self {
            banks,
            generic,
            fee_keywords,
            type_patterns,
        }
    }

    /// Load a registry from a JSON config document with the same shape as
    /// the built-in set serializes to.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parse bank registry config")
    }

    /// Registered banks in registration order.
    pub fn banks(&self) -> &[BankProfile] {
        &self.banks
    }

    pub fn has_bank(&self, bank_id: &str) -> bool {
        self.banks.iter().any(|b| b.id == bank_id)
    }

    /// Column mapping for a bank, falling back to the generic mapping for
    /// identifiers we don't know. The fallback is expected, not an error.
    pub fn field_mapping(&self, bank_id: &str) -> &FieldMapping {
        match self.banks.iter().find(|b| b.id == bank_id) {
            Some(bank) => &bank.field_mapping,
            None => {
                if bank_id != GENERIC_BANK {
                    warn!(bank_id, "no field mapping registered, using generic");
                }
                &self.generic
            }
        }
    }

    /// Fee-classification substrings, in registration order.
    pub fn fee_keywords(&self) -> &[String] {
        &self.fee_keywords
    }

    pub fn type_patterns(&self) -> &[TypePattern] {
        &self.type_patterns
    }

    /// Coarse transaction-type hint for a narration; first matching
    /// category wins. Never authoritative.
    pub fn type_hint(&self, description: &str) -> Option<&str> {
        let desc = description.to_uppercase();
        self.type_patterns
            .iter()
            .find(|tp| tp.patterns.iter().any(|p| desc.contains(p.as_str())))
            .map(|tp| tp.category.as_str())
    }
}

impl Default for BankRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn type_pattern(category: &str, patterns: &[&str]) -> TypePattern {
    TypePattern {
        category: category.to_string(),
        patterns: strings(patterns),
    }
}
