//! Vote table construction and collection for Rollcall.
//!
//! This crate ties the document source and the record decoders together:
//! building one session's vote table, collecting many sessions, and writing
//! the result to CSV or JSON.

pub mod export;
pub mod pipeline;
pub mod table;

#[cfg(test)]
mod testing;

pub use export::{ExportDocument, TOOL_VERSION, export_rows, write_csv, write_json};
pub use pipeline::{CollectConfig, CollectResult, ProgressReporter, SilentProgress, collect_votes};
pub use table::{SECRET_SESSION_TITLE, build_vote_table, build_vote_table_from_index};
