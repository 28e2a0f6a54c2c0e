use crate::error::Result;
use crate::execution::{Encoding, Invocation, Outcome};
use crate::options::OptionSpec;
use crate::tool::CliTool;

/// `htmlq`, CSS selectors over HTML.
#[derive(Debug, Clone)]
pub struct Htmlq {
    tool: CliTool,
    encoding: Encoding,
}

impl Htmlq {
    pub const EXECUTABLE: &'static str = "htmlq";

    /// # Errors
    ///
    /// Only fails if the executable name is blank, which it never is here.
    pub fn new() -> Result<Self> {
        Ok(Self {
            tool: CliTool::new(Self::EXECUTABLE, OptionSpec::new())?.with_label("Htmlq"),
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

    /// Selects from `html` the elements matching the CSS `selector`.
    ///
    /// # Errors
    ///
    /// Propagates execution errors, see [`CliTool::execute`].
    pub fn css(&self, html: &str, selector: &str, options: OptionSpec) -> Result<Outcome> {
        self.tool.execute(
            [html],
            &self
                .invocation(shell_words::quote(selector))
                .with_options(options),
        )
    }
}
