//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate.

use clap::{Parser, Subcommand};

/// Command-line arguments for the toolpipe CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use toolpipe_cli::cli_args::Args;
///
/// let args = Args::parse_from(["tp", "gum", "choose", "red", "green"]);
/// assert!(!args.strict);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Fail when the tool exits with a non-zero status.
    ///
    /// By default only the tool's output matters and its exit status is logged.
    #[arg(long, short = 's', action, global = true)]
    pub strict: bool,

    /// Text encoding of the items written to the tool and of its output.
    ///
    /// Any WHATWG label is accepted, e.g. `utf-8`, `latin1`, `shift_jis`.
    #[arg(long, default_value = "utf-8", global = true)]
    pub encoding: String,

    /// Replace text the encoding cannot represent instead of failing.
    #[arg(long, action, global = true)]
    pub lossy: bool,

    #[command(subcommand)]
    pub command: ToolCommand,
}

#[derive(Subcommand, Debug)]
pub enum ToolCommand {
    /// Find files and directories with `fd`.
    Fd {
        /// Restrict every search to this directory.
        #[arg(long)]
        search_path: Option<String>,

        #[command(subcommand)]
        action: FdAction,
    },

    /// Pick or filter items with `gum`.
    ///
    /// Items are taken from the trailing arguments, or from stdin lines.
    Gum {
        #[command(subcommand)]
        action: GumAction,
    },

    /// Query an HTML document read from stdin with `htmlq`.
    Htmlq {
        #[command(subcommand)]
        action: HtmlqAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum FdAction {
    /// Find files matching a pattern.
    Files { query: String },

    /// Find directories matching a pattern.
    Dirs { query: String },

    /// Run `fd` with a raw argument string.
    Raw {
        #[arg(allow_hyphen_values = true)]
        subcommand: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum GumAction {
    /// Choose from a list of items.
    Choose {
        #[command(flatten)]
        call_site: CallSiteArgs,

        items: Vec<String>,
    },

    /// Fuzzy filter a list of items.
    Filter {
        #[command(flatten)]
        call_site: CallSiteArgs,

        items: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HtmlqAction {
    /// Select elements matching a CSS selector.
    Css {
        selector: String,

        #[command(flatten)]
        call_site: CallSiteArgs,
    },
}

/// Options forwarded to the invoked tool.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct CallSiteArgs {
    /// An option for the tool, as `name` or `name=value`.
    ///
    /// `x` becomes `-x`, `header=Hi` becomes `--header=Hi`; names that already
    /// start with `-` or `+` are used as given.
    #[arg(
        long = "option",
        short = 'o',
        action = clap::ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub options: Vec<String>,
}
