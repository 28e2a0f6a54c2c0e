use std::io::{stdout, Write};
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use toolpipe_core::error::{Error, Result};
use toolpipe_core::execution::{Encoding, Outcome};
use toolpipe_core::tools::{Fd, Gum, Htmlq};

use toolpipe_cli::arguments::{parse_option_spec, resolve_encoding};
use toolpipe_cli::cli_args::{Args, FdAction, GumAction, HtmlqAction, ToolCommand};
use toolpipe_cli::input::{gather_items, read_document};

fn run_fd(search_path: Option<&str>, action: FdAction, encoding: Encoding) -> Result<Outcome> {
    let fd = Fd::new(search_path)?.with_encoding(encoding);

    match action {
        FdAction::Files { query } => fd.files(&query),
        FdAction::Dirs { query } => fd.dirs(&query),
        FdAction::Raw { subcommand } => fd.fd(&subcommand),
    }
}

fn run_gum(action: GumAction, encoding: Encoding) -> Result<Outcome> {
    let gum = Gum::new()?.with_encoding(encoding);

    match action {
        GumAction::Choose { call_site, items } => {
            let options = parse_option_spec(&call_site.options)?;
            gum.choose(gather_items(items, encoding)?, options)
        }
        GumAction::Filter { call_site, items } => {
            let options = parse_option_spec(&call_site.options)?;
            gum.filter(gather_items(items, encoding)?, options)
        }
    }
}

fn run_htmlq(action: HtmlqAction, encoding: Encoding) -> Result<Outcome> {
    let htmlq = Htmlq::new()?.with_encoding(encoding);

    match action {
        HtmlqAction::Css {
            selector,
            call_site,
        } => {
            let options = parse_option_spec(&call_site.options)?;
            htmlq.css(&read_document(encoding)?, &selector, options)
        }
    }
}

/// Prints the tool's output in `encoding`. In strict mode a failed tool is an
/// error, after its output has been printed.
fn print_outcome(outcome: Outcome, encoding: Encoding, strict: bool) -> Result<()> {
    let success = outcome.success();
    let code = outcome.status.code();

    if let Some(output) = outcome.into_output() {
        let mut stdout = stdout();
        stdout
            .write_all(&encoding.encode(&output)?)
            .map_err(Error::Stdio)?;
        stdout.flush().map_err(Error::Stdio)?;
    }

    if strict && !success {
        return Err(Error::SubProcessExit(code));
    }

    Ok(())
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let encoding = resolve_encoding(&args.encoding, args.lossy)?;
    debug!("Text encoding: {encoding}");

    let outcome = match args.command {
        ToolCommand::Fd {
            search_path,
            action,
        } => run_fd(search_path.as_deref(), action, encoding)?,
        ToolCommand::Gum { action } => run_gum(action, encoding)?,
        ToolCommand::Htmlq { action } => run_htmlq(action, encoding)?,
    };

    print_outcome(outcome, encoding, args.strict)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
