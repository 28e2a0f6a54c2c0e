use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::io::{ErrorKind, Read, Write};
use std::process::{ChildStdout, Command, ExitStatus, Stdio};
use std::thread;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::options::{CliOption, OptionSpec};

/// Delimiter written after every input item unless told otherwise.
pub const DEFAULT_DELIMITER: &str = "\n";

/// The text encoding of the records written to a tool and of its output.
///
/// Any WHATWG label understood by `encoding_rs` is accepted, e.g. `utf-8`,
/// `latin1` or `shift_jis`. Strict by default: unencodable input and
/// undecodable output are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    codec: &'static encoding_rs::Encoding,
    lossy: bool,
}

impl Default for Encoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl Encoding {
    pub fn utf8() -> Self {
        Self {
            codec: encoding_rs::UTF_8,
            lossy: false,
        }
    }

    /// Looks up an encoding by label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEncoding`] for unknown labels and for encodings
    /// that cannot be written, such as UTF-16.
    pub fn for_label(label: &str) -> Result<Self> {
        match encoding_rs::Encoding::for_label(label.trim().as_bytes()) {
            // encoding_rs encodes UTF-16 and `replacement` as UTF-8
            Some(codec) if codec.output_encoding() == codec => Ok(Self {
                codec,
                lossy: false,
            }),
            _ => Err(Error::UnknownEncoding(label.to_string())),
        }
    }

    /// Replaces undecodable output with U+FFFD and unencodable input with
    /// numeric character references instead of failing.
    #[must_use]
    pub fn lossy(mut self) -> Self {
        self.lossy = true;
        self
    }

    pub fn is_lossy(&self) -> bool {
        self.lossy
    }

    /// Canonical name, e.g. `windows-1252` for the `latin1` label.
    pub fn name(&self) -> &'static str {
        self.codec.name()
    }

    /// # Errors
    ///
    /// Returns [`Error::Encode`] when strict and `text` has characters the
    /// encoding cannot represent.
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        let (bytes, _, unmappable) = self.codec.encode(text);
        if unmappable && !self.lossy {
            return Err(Error::Encode {
                encoding: self.name(),
                text: text.to_string(),
            });
        }
        Ok(bytes)
    }

    /// # Errors
    ///
    /// Returns [`Error::Decode`] when strict and `bytes` are malformed.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        if self.lossy {
            let (text, _) = self.codec.decode_without_bom_handling(bytes);
            return Ok(text.into_owned());
        }

        self.codec
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned)
            .ok_or(Error::Decode {
                encoding: self.name(),
            })
    }
}

impl Display for Encoding {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())?;
        if self.lossy {
            formatter.write_str(" (lossy)")?;
        }
        Ok(())
    }
}

/// A single call of a tool: subcommand, call-site options and input framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    subcommand: String,
    options: OptionSpec,
    delimiter: String,
    encoding: Encoding,
}

impl Invocation {
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            subcommand: subcommand.into(),
            options: OptionSpec::new(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            encoding: Encoding::default(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, option: CliOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use]
    pub fn with_flag(self, name: impl Into<String>) -> Self {
        self.with_option(CliOption::flag(name))
    }

    #[must_use]
    pub fn with_value(self, name: impl Into<String>, value: impl Display) -> Self {
        self.with_option(CliOption::valued(name, value))
    }

    #[must_use]
    pub fn with_options(mut self, options: OptionSpec) -> Self {
        self.options.extend(options);
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    pub fn options(&self) -> &OptionSpec {
        &self.options
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl Default for Invocation {
    fn default() -> Self {
        Self::new("")
    }
}

/// How much of the input reached the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Every item was written.
    Complete { sent: usize },
    /// The tool closed its input early; items after `sent` were dropped.
    Partial { sent: usize },
}

impl Delivery {
    pub fn sent(&self) -> usize {
        match self {
            Delivery::Complete { sent } | Delivery::Partial { sent } => *sent,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Delivery::Complete { .. })
    }
}

impl Display for Delivery {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Delivery::Complete { sent } => write!(formatter, "complete write: {sent} items sent"),
            Delivery::Partial { sent } => write!(
                formatter,
                "partial write: {sent} items sent before the tool closed its input"
            ),
        }
    }
}

/// Result of running a tool to completion.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Captured standard output, `None` when the tool printed nothing.
    pub output: Option<String>,
    pub status: ExitStatus,
    pub delivery: Delivery,
}

impl Outcome {
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn into_output(self) -> Option<String> {
        self.output
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Returns the output, treating a non-zero exit as an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubProcessExit`] when the tool did not exit successfully.
    pub fn into_success(self) -> Result<Option<String>> {
        if self.status.success() {
            Ok(self.output)
        } else {
            Err(Error::SubProcessExit(self.status.code()))
        }
    }
}

/// Spawns `argv`, streams `items` into its stdin and captures its stdout.
///
/// Each item is written as its `Display` text followed by `delimiter`. Stderr
/// is inherited. If the tool stops reading, the remaining items are dropped
/// and reported as [`Delivery::Partial`]. The exit status is returned, not
/// checked.
///
/// # Errors
///
/// Returns an error if the program cannot be spawned, if writing fails for any
/// reason other than a closed pipe, or if the output cannot be read or decoded.
pub fn execute_piped<I>(
    argv: &[String],
    items: I,
    delimiter: &str,
    encoding: Encoding,
) -> Result<Outcome>
where
    I: IntoIterator,
    I::Item: Display,
{
    let Some((program, arguments)) = argv.split_first() else {
        return Err(Error::Misc("Cannot execute an empty command line".to_string()));
    };

    debug!("Executing command: {:?}", argv);

    let mut child = Command::new(program)
        .args(arguments)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::spawn_error(program.clone(), e))?;

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();

    // stdout is drained while writing so a chatty tool can't stall on a full pipe
    let (delivery, captured) = thread::scope(|scope| {
        let reader = scope.spawn(move || read_output(stdout));

        let delivery = match stdin {
            Some(stdin) => stream_items(stdin, items, delimiter, encoding),
            None => Ok(Delivery::Complete { sent: 0 }),
        };

        (delivery, reader.join())
    });

    let status = child.wait()?;
    let delivery = delivery?;
    let captured = captured
        .map_err(|_| Error::Misc("Output reader thread panicked".to_string()))?
        .map_err(Error::Stdio)?;

    if let Delivery::Partial { sent } = delivery {
        debug!("`{program}` closed its input after {sent} items");
    }

    if !status.success() {
        warn!("`{program}` exited with {status}");
    }

    let text = encoding.decode(&captured)?;
    let output = if text.is_empty() { None } else { Some(text) };

    Ok(Outcome {
        output,
        status,
        delivery,
    })
}

/// Writes every item plus delimiter in `encoding`, stopping quietly on a
/// broken pipe.
///
/// The writer is dropped on return, which closes the tool's input.
pub fn stream_items<W, I>(
    mut writer: W,
    items: I,
    delimiter: &str,
    encoding: Encoding,
) -> Result<Delivery>
where
    W: Write,
    I: IntoIterator,
    I::Item: Display,
{
    let mut sent = 0;

    for item in items {
        let record = format!("{item}{delimiter}");
        match writer.write_all(&encoding.encode(&record)?) {
            Ok(()) => sent += 1,
            Err(e) if e.kind() == ErrorKind::BrokenPipe => return Ok(Delivery::Partial { sent }),
            Err(e) => return Err(Error::Stdio(e)),
        }
    }

    match writer.flush() {
        Ok(()) => Ok(Delivery::Complete { sent }),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(Delivery::Partial { sent }),
        Err(e) => Err(Error::Stdio(e)),
    }
}

fn read_output(stdout: Option<ChildStdout>) -> std::io::Result<Vec<u8>> {
    let mut captured = Vec::new();
    if let Some(mut stdout) = stdout {
        stdout.read_to_end(&mut captured)?;
    }
    Ok(captured)
}
