//! Input items for the invoked tool.

use std::io::{self, Read};

use crossterm::tty::IsTty;
use log::debug;
use toolpipe_core::error::{Error, Result};
use toolpipe_core::execution::Encoding;

/// Returns the trailing argument items, or the lines of stdin when there are
/// none and stdin is not a terminal.
///
/// # Errors
///
/// Returns an error if reading or decoding stdin fails.
pub fn gather_items(items: Vec<String>, encoding: Encoding) -> Result<Vec<String>> {
    if !items.is_empty() {
        return Ok(items);
    }

    let stdin = io::stdin();
    if stdin.is_tty() {
        debug!("No items given and stdin is a terminal");
        return Ok(Vec::new());
    }

    read_lines(stdin.lock(), encoding)
}

/// Reads a whole document from stdin, empty when stdin is a terminal.
///
/// # Errors
///
/// Returns an error if reading or decoding stdin fails.
pub fn read_document(encoding: Encoding) -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_tty() {
        return Ok(String::new());
    }

    read_text(stdin.lock(), encoding)
}

pub fn read_lines<R: Read>(reader: R, encoding: Encoding) -> Result<Vec<String>> {
    Ok(read_text(reader, encoding)?
        .lines()
        .map(str::to_string)
        .collect())
}

fn read_text<R: Read>(mut reader: R, encoding: Encoding) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(Error::Stdio)?;
    encoding.decode(&bytes)
}
