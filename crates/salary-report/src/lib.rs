//! Tabular input and output around the prediction engine.

pub mod batch;
pub mod error;
pub mod export;
pub mod rows;

pub use batch::read_batch_csv;
pub use error::ReportError;
pub use export::{write_breakdowns_csv, write_breakdowns_json};
pub use rows::BreakdownRow;
