//! Pipeline orchestration: detect bank → normalize → extract rows →
//! group → prepare the LLM payload → assemble statistics.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use kobo_core::GroupedTransaction;

use crate::detect::detect_bank;
use crate::extract::{RowSource, TabularTextSource};
use crate::group::{group_transactions, GroupOptions};
use crate::llm::{prepare_for_llm, render_llm_text, LlmTransaction};
use crate::normalize::quick_clean;
use crate::registry::BankRegistry;

/// Caller knobs for one statement run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Skip detection and use this bank's vocabulary.
    pub bank_id: Option<String>,
    pub look_ahead_rows: usize,
    pub clean_descriptions: bool,
    /// Attach the `debug` block (warnings/errors) to the report.
    pub verbose: bool,
    /// Retain the untouched input text in the report.
    pub preserve_original: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            bank_id: None,
            look_ahead_rows: 3,
            clean_descriptions: true,
            verbose: false,
            preserve_original: false,
        }
    }
}

/// Run statistics for the import-review UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementStats {
    pub original_char_count: usize,
    pub cleaned_char_count: usize,
    pub total_transactions: usize,
    pub transactions_with_fees: usize,
    pub total_fee_rows: usize,
    pub total_fee_amount: f64,
    pub processing_time_ms: u64,
}

/// Operator-facing diagnostics, attached when `verbose` is set. Nothing
/// here ever aborts a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Everything one statement run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementReport {
    /// Text handed to the categorization service: the rendered payload
    /// lines when transactions were found, otherwise the normalized input.
    pub cleaned_text: String,
    pub original_text: Option<String>,
    pub grouped_transactions: Vec<GroupedTransaction>,
    pub llm_data: Vec<LlmTransaction>,
    pub bank_id: String,
    pub stats: StatementStats,
    pub debug: Option<DebugInfo>,
}

/// The statement pipeline: an immutable registry plus a row source.
///
/// One instance is safely shared across concurrent runs — processing keeps
/// no state between statements.
pub struct StatementPipeline {
    registry: BankRegistry,
    source: Box<dyn RowSource>,
}

impl StatementPipeline {
    pub fn new(registry: BankRegistry) -> Self {
        Self {
            registry,
            source: Box::new(TabularTextSource),
        }
    }

    /// Swap in a different row-extraction backend.
    pub fn with_source(registry: BankRegistry, source: Box<dyn RowSource>) -> Self {
        Self { registry, source }
    }

    pub fn registry(&self) -> &BankRegistry {
        &self.registry
    }

    /// Process one statement end to end.
    ///
    /// Async only so an I/O-bound row source can slot in without changing
    /// this contract; every step below is synchronous today. Malformed
    /// input never fails the run — it degrades into warnings and an empty
    /// transaction set.
    pub async fn process(&self, raw_text: &str, options: &PipelineOptions) -> StatementReport {
        let started = Instant::now();
        let mut diagnostics = DebugInfo::default();

        let bank_id = options
            .bank_id
            .clone()
            .unwrap_or_else(|| detect_bank(raw_text, &self.registry));
        if !self.registry.has_bank(&bank_id) {
            diagnostics
                .warnings
                .push(format!("unknown bank '{bank_id}', using generic field mapping"));
        }

        let normalized = quick_clean(raw_text);
        let mapping = self.registry.field_mapping(&bank_id);

        let rows = match self.source.extract(&normalized, mapping) {
            Ok(rows) => rows,
            Err(e) => {
                diagnostics.errors.push(format!("row extraction failed: {e:#}"));
                Vec::new()
            }
        };
        if rows.is_empty() {
            diagnostics.warnings.push("no transaction rows extracted".to_string());
        }
        debug!(%bank_id, rows = rows.len(), "extracted statement rows");

        let group_options = GroupOptions {
            look_ahead_rows: options.look_ahead_rows,
            clean_descriptions: options.clean_descriptions,
        };
        let grouped = group_transactions(&rows, &group_options, self.registry.fee_keywords());
        let llm_data = prepare_for_llm(&grouped, &self.registry);

        let cleaned_text = if llm_data.is_empty() {
            normalized
        } else {
            render_llm_text(&llm_data)
        };

        let stats = StatementStats {
            original_char_count: raw_text.chars().count(),
            cleaned_char_count: cleaned_text.chars().count(),
            total_transactions: grouped.len(),
            transactions_with_fees: grouped.iter().filter(|g| g.has_fees()).count(),
            total_fee_rows: grouped.iter().map(|g| g.fees.len()).sum(),
            total_fee_amount: grouped.iter().map(GroupedTransaction::fee_total).sum(),
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        StatementReport {
            cleaned_text,
            original_text: options.preserve_original.then(|| raw_text.to_string()),
            grouped_transactions: grouped,
            llm_data,
            bank_id,
            stats,
            debug: options.verbose.then_some(diagnostics),
        }
    }
}

impl Default for StatementPipeline {
    fn default() -> Self {
        Self::new(BankRegistry::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = "\
GUARANTY TRUST BANK PLC
STATEMENT OF ACCOUNT

| TRANS DATE | VALUE DATE | REMARKS | DEBIT | CREDIT | BALANCE | REFERENCE |
| 05-Jan-2024 | 05-Jan-2024 | NIP TRANSFER TO JOHN DOE | 5,000.00 | | 95,000.00 | TRF123 |
| 05-Jan-2024 | 05-Jan-2024 | TRANSFER COMMISSION | 50.00 | | 94,950.00 | TRF123 |
| 05-Jan-2024 | 05-Jan-2024 | VAT ON COMMISSION | 3.75 | | 94,946.25 | TRF123 |
| 06-Jan-2024 | 06-Jan-2024 | SALARY PAYMENT JAN | | 250,000.00 | 344,946.25 | SAL001 |
";

    #[tokio::test]
    async fn test_full_statement_run() {
        let pipeline = StatementPipeline::default();
        let report = pipeline.process(STATEMENT, &PipelineOptions::default()).await;

        assert_eq!(report.bank_id, "gtbank");
        assert_eq!(report.grouped_transactions.len(), 2);

        let transfer = &report.grouped_transactions[0];
        assert_eq!(transfer.fees.len(), 2);
        assert_eq!(transfer.total_debit, 5053.75);

        assert_eq!(report.stats.total_transactions, 2);
        assert_eq!(report.stats.transactions_with_fees, 1);
        assert_eq!(report.stats.total_fee_rows, 2);
        assert_eq!(report.stats.total_fee_amount, 53.75);

        assert!(report.cleaned_text.starts_with("DATE: 05-Jan-2024 | DESC:"));
        assert!(report.original_text.is_none());
        assert!(report.debug.is_none());
    }

    #[tokio::test]
    async fn test_caller_supplied_bank_skips_detection() {
        let pipeline = StatementPipeline::default();
        let options = PipelineOptions {
            bank_id: Some("firstbank".to_string()),
            ..Default::default()
        };
        let report = pipeline.process(STATEMENT, &options).await;
        assert_eq!(report.bank_id, "firstbank");
    }

    #[tokio::test]
    async fn test_empty_input_still_completes() {
        let pipeline = StatementPipeline::default();
        let options = PipelineOptions {
            verbose: true,
            ..Default::default()
        };
        let report = pipeline.process("", &options).await;

        assert!(report.grouped_transactions.is_empty());
        assert!(report.llm_data.is_empty());
        assert_eq!(report.stats.total_transactions, 0);
        assert_eq!(report.stats.total_fee_amount, 0.0);
        let diagnostics = report.debug.unwrap();
        assert!(diagnostics
            .warnings
            .iter()
            .any(|w| w.contains("no transaction rows")));
    }

    #[tokio::test]
    async fn test_preserve_original_keeps_input() {
        let pipeline = StatementPipeline::default();
        let options = PipelineOptions {
            preserve_original: true,
            ..Default::default()
        };
        let report = pipeline.process(STATEMENT, &options).await;
        assert_eq!(report.original_text.as_deref(), Some(STATEMENT));
    }

    #[tokio::test]
    async fn test_unknown_bank_warns_and_proceeds() {
        let pipeline = StatementPipeline::default();
        let options = PipelineOptions {
            bank_id: Some("polaris".to_string()),
            verbose: true,
            ..Default::default()
        };
        let report = pipeline.process(STATEMENT, &options).await;
        assert_eq!(report.bank_id, "polaris");
        // The generic mapping still understands the statement's headers.
        assert_eq!(report.grouped_transactions.len(), 2);
        let diagnostics = report.debug.unwrap();
        assert!(diagnostics.warnings.iter().any(|w| w.contains("polaris")));
    }
}
