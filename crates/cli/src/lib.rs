//! Toolpipe CLI Library
//!
//! This crate provides the command-line interface for toolpipe: it runs the
//! `fd`, `gum` and `htmlq` wrappers, feeding them items from the command line
//! or stdin.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`arguments`]: Call-site option and encoding processing
//! - [`input`]: Input items from trailing arguments or stdin
//!
//! # Examples
//!
//! The CLI binary (`tp`) can be used in several ways:
//!
//! ```bash
//! # Find files below a directory
//! tp fd --search-path ~/code files main
//!
//! # Choose among piped items
//! ls | tp gum choose -o no-limit -o header="PICK ONE"
//!
//! # Select links from a page
//! curl -s https://example.com | tp htmlq css a -o attribute=href
//!
//! # Read and write latin-1 text
//! iconv -t latin1 names.txt | tp --encoding latin1 gum filter
//! ```

pub mod arguments;
pub mod cli_args;
pub mod input;
