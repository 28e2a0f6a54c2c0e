use std::fmt::Display;

use crate::error::Result;
use crate::execution::{Encoding, Invocation, Outcome};
use crate::options::OptionSpec;
use crate::tool::CliTool;

/// `gum`, the interactive chooser.
#[derive(Debug, Clone)]
pub struct Gum {
    tool: CliTool,
    encoding: Encoding,
}

impl Gum {
    pub const EXECUTABLE: &'static str = "gum";

    /// # Errors
    ///
    /// Only fails if the executable name is blank, which it never is here.
    pub fn new() -> Result<Self> {
        Ok(Self {
            tool: CliTool::new(Self::EXECUTABLE, OptionSpec::new())?.with_label("Gum"),
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

    /// Lets the user pick from `choices`.
    ///
    /// # Errors
    ///
    /// Propagates execution errors, see [`CliTool::execute`].
    pub fn choose<I>(&self, choices: I, options: OptionSpec) -> Result<Outcome>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.tool
            .execute(choices, &self.invocation("choose").with_options(options))
    }

    /// Lets the user fuzzy filter `choices`.
    ///
    /// # Errors
    ///
    /// Propagates execution errors, see [`CliTool::execute`].
    pub fn filter<I>(&self, choices: I, options: OptionSpec) -> Result<Outcome>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.tool
            .execute(choices, &self.invocation("filter").with_options(options))
    }
}
