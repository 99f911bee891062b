//! Shared types, error model, and configuration for Rollcall.
//!
//! This crate is the foundation depended on by all other Rollcall crates.
//! It provides:
//! - [`RollcallError`]: the unified error type
//! - Domain types ([`Congress`], [`Session`], [`DocumentKey`], [`VoteRow`], [`VoteTable`])
//! - Configuration ([`AppConfig`], [`SourceConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CachePolicy, DEFAULT_BASE_URL, ExportFormat, OutputSection, SourceConfig,
    SourceSection, config_dir, config_file_path, init_config, load_config, load_config_from,
    parse_base_url,
};
pub use error::{Result, RollcallError};
pub use types::{
    Congress, DID_NOT_VOTE, DocumentKey, MAX_CONGRESS, MIN_CONGRESS, Party, PartyTally, Session,
    TaggedVoteRow, TieDetail, TiebreakVote, VoteRow, VoteTable,
};
