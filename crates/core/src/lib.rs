//! Toolpipe Core Library
//!
//! This crate runs external command line tools (file finders, interactive
//! choosers, HTML query tools, ...) as subprocesses: it turns option
//! specifications into command line flags, streams delimited input items into
//! the tool's stdin and captures what it prints.
//!
//! # Key Features
//!
//! - **Option Normalization**: `x` becomes `-x`, `preview` becomes `--preview`,
//!   name/value pairs become shell-quoted `--name=value` tokens
//! - **Piped Execution**: stream items into a tool and capture its output, even
//!   when the tool stops reading early
//! - **Tool Wrappers**: ready-made wrappers for `fd`, `gum` and `htmlq`
//! - **Text Encodings**: input records and output in any WHATWG encoding
//! - **Error Handling**: Comprehensive error types for all failure modes
//!
//! # Examples
//!
//! ```no_run
//! use toolpipe_core::execution::Invocation;
//! use toolpipe_core::tool::CliTool;
//!
//! let fzf = CliTool::new("fzf", "--reverse")?;
//! let outcome = fzf.execute(1..=10, &Invocation::new("").with_value("header", "PICK ONE"))?;
//! if let Some(choice) = outcome.output() {
//!     println!("You picked {choice}");
//! }
//! # Ok::<(), toolpipe_core::error::Error>(())
//! ```

pub mod error;
pub mod execution;
pub mod options;
pub mod tool;
pub mod tools;
