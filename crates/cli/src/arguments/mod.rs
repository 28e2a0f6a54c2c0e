//! Argument processing for the toolpipe CLI.
//!
//! This module turns the raw strings clap hands over into the types the core
//! crate works with:
//! - **Call-site options**: `-o name[=value]` options for the invoked tool
//! - **Encodings**: the `--encoding` label and `--lossy` switch

pub mod processing;

// Re-exports for convenience
pub use processing::{parse_option_spec, resolve_encoding};
