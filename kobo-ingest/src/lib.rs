//! kobo-ingest: bank statement ingestion pipeline — bank detection, text
//! normalization, row extraction, fee grouping, and LLM payload
//! preparation for the Kobo import flow.

pub mod detect;
pub mod extract;
pub mod group;
pub mod llm;
pub mod normalize;
pub mod pipeline;
pub mod registry;

pub use detect::detect_bank;
pub use extract::{extract_tabular_rows, RowSource, TabularTextSource};
pub use group::{group_transactions, is_fee_row, GroupOptions};
pub use llm::{prepare_for_llm, render_llm_text, FeeLine, LlmTransaction, TxnKind};
pub use normalize::quick_clean;
pub use pipeline::{
    DebugInfo, PipelineOptions, StatementPipeline, StatementReport, StatementStats,
};
pub use registry::{BankProfile, BankRegistry, FieldMapping, TypePattern, GENERIC_BANK};
