//! Run Output
//!
//! Run statistics and the end-of-run agent tables.

pub mod export;
pub mod stats;

pub use export::{export_records, write_csv, write_jsonl, ExportError};
pub use stats::{write_summary, DayStats, RunSummary, StatsCollector};
