//! kobo-core: shared transaction vocabulary for the Kobo statement pipeline

pub mod amount;
pub mod date;
pub mod row;
pub mod text;
pub mod transaction;

pub use amount::{parse_amount, parse_optional_amount};
pub use date::parse_statement_date;
pub use row::{StandardField, StatementRow};
pub use text::clean_description;
pub use transaction::GroupedTransaction;
