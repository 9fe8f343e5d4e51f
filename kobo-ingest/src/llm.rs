//! LLM payload preparation: flatten grouped transactions into the minimal
//! record set and pipe-delimited text the external categorization service
//! consumes. The categorization call itself lives outside this crate.

use serde::{Deserialize, Serialize};

use kobo_core::GroupedTransaction;

use crate::registry::BankRegistry;

/// Whether a record's amount is money out or money in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxnKind {
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnKind::Debit => "debit",
            TxnKind::Credit => "credit",
        }
    }
}

/// One fee line item carried alongside its principal transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeLine {
    pub description: String,
    pub amount: f64,
}

/// Unmodified narrations retained for audit alongside the cleaned ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalDescriptions {
    pub main: String,
    pub fees: Vec<String>,
}

/// Flattened projection of a grouped transaction for the categorization
/// service. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmTransaction {
    pub id: usize,
    pub date: String,
    pub description: String,
    /// Whichever of the group's total debit/credit is non-zero.
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    pub has_fees: bool,
    pub fee_breakdown: Vec<FeeLine>,
    pub balance: String,
    pub reference: Option<String>,
    /// Coarse keyword hint from the registry; advisory only.
    pub type_hint: Option<String>,
    pub original: OriginalDescriptions,
}

/// Flatten grouped transactions into payload records with sequential ids.
///
/// A group with no extractable amount at all becomes an amount-zero debit
/// record rather than being dropped — the categorization prompt sees every
/// transaction the statement had.
pub fn prepare_for_llm(
    groups: &[GroupedTransaction],
    registry: &BankRegistry,
) -> Vec<LlmTransaction> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let (amount, kind) = if group.total_debit > 0.0 {
                (group.total_debit, TxnKind::Debit)
            } else if group.total_credit > 0.0 {
                (group.total_credit, TxnKind::Credit)
            } else {
                (0.0, TxnKind::Debit)
            };

            LlmTransaction {
                id: index + 1,
                date: group.main.date.clone(),
                description: group.cleaned_description.clone(),
                amount,
                kind,
                has_fees: group.has_fees(),
                fee_breakdown: group
                    .fees
                    .iter()
                    .map(|fee| FeeLine {
                        description: fee.description.clone(),
                        amount: fee.debit_amount(),
                    })
                    .collect(),
                balance: group.main.balance.clone(),
                reference: group.main.reference.clone(),
                type_hint: registry
                    .type_hint(&group.cleaned_description)
                    .map(str::to_string),
                original: OriginalDescriptions {
                    main: group.main.description.clone(),
                    fees: group.fees.iter().map(|f| f.description.clone()).collect(),
                },
            }
        })
        .collect()
}

/// Render payload records as the categorization prompt expects: one
/// pipe-delimited line per record, fields in fixed order. The hint field
/// is deliberately absent — the prompt format is frozen.
pub fn render_llm_text(records: &[LlmTransaction]) -> String {
    records.iter().map(render_line).collect::<Vec<_>>().join("\n")
}

fn render_line(record: &LlmTransaction) -> String {
    let mut line = format!(
        "DATE: {} | DESC: {} | AMOUNT: {:.2} | TYPE: {} | BALANCE: {}",
        record.date,
        record.description,
        record.amount,
        record.kind.as_str(),
        record.balance,
    );
    if record.has_fees {
        let fee_total: f64 = record.fee_breakdown.iter().map(|f| f.amount).sum();
        line.push_str(&format!(" | FEES: {fee_total:.2}"));
        for fee in &record.fee_breakdown {
            line.push_str(&format!(
                " | {}: {:.2}",
                fee.description.to_uppercase(),
                fee.amount,
            ));
        }
    }
    if let Some(reference) = &record.reference {
        line.push_str(&format!(" | REF: {reference}"));
    }
    line
}
