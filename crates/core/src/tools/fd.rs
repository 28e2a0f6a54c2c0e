use crate::error::Result;
use crate::execution::{Encoding, Invocation, Outcome};
use crate::options::OptionSpec;
use crate::tool::CliTool;

/// `fd`, the file finder.
#[derive(Debug, Clone)]
pub struct Fd {
    tool: CliTool,
    encoding: Encoding,
}

impl Fd {
    pub const EXECUTABLE: &'static str = "fd";

    /// Creates the wrapper, optionally pinning every search to `search_path`.
    ///
    /// # Errors
    ///
    /// Only fails if the executable name is blank, which it never is here.
    pub fn new(search_path: Option<&str>) -> Result<Self> {
        let mut defaults = OptionSpec::new();
        if let Some(search_path) = search_path {
            defaults = defaults.with_value("search-path", shellexpand::tilde(search_path));
        }

        Ok(Self {
            tool: CliTool::new(Self::EXECUTABLE, defaults)?.with_label("Fd"),
            encoding: Encoding::default(),
        })
    }

    pub fn from_tool(tool: CliTool) -> Self {
        Self {
            tool,
            encoding: Encoding::default(),
        }
    }

    /// Sets the encoding of the input written to the tool and of its output.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn tool(&self) -> &CliTool {
        &self.tool
    }

    fn invocation(&self, subcommand: impl Into<String>) -> Invocation {
        Invocation::new(subcommand).with_encoding(self.encoding)
    }

    /// Lists files matching `query`.
    ///
    /// # Errors
    ///
    /// Propagates execution errors, see [`CliTool::execute`].
    pub fn files(&self, query: &str) -> Result<Outcome> {
        self.fd(&format!("-t f {}", shell_words::quote(query)))
    }

    /// Lists directories matching `query`.
    ///
    /// # Errors
    ///
    /// Propagates execution errors, see [`CliTool::execute`].
    pub fn dirs(&self, query: &str) -> Result<Outcome> {
        self.fd(&format!("-t d {}", shell_words::quote(query)))
    }

    /// Runs `fd` with a raw argument string and no input.
    ///
    /// Useful to drive other commands through `fd -x`.
    ///
    /// # Errors
    ///
    /// Propagates execution errors, see [`CliTool::execute`].
    pub fn fd(&self, subcommand: &str) -> Result<Outcome> {
        self.tool
            .execute(Vec::<String>::new(), &self.invocation(subcommand))
    }
}
