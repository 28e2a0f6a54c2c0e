//! A configured external command line tool.
//!
//! [`CliTool`] binds an executable to its default options and runs it through
//! [`execute_piped`](crate::execution::execute_piped): options given at the call
//! site are normalized, merged with the defaults, and the items are streamed
//! into the tool's stdin.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use log::debug;

use crate::error::{Error, Result};
use crate::execution::{execute_piped, Invocation, Outcome};
use crate::options::{flag_name, parse_options, OptionSpec};

/// How call-site flags and a tool's default flags are combined.
///
/// Call-site flags always come first on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Keep every token; the invoked program decides what a repeated flag means.
    #[default]
    KeepAll,
    /// Drop default tokens whose flag name was already given at the call site.
    CallSiteWins,
}

impl MergePolicy {
    /// Merges two token lists, call-site tokens first.
    pub fn merge(self, call_site: Vec<String>, defaults: &[String]) -> Vec<String> {
        match self {
            MergePolicy::KeepAll => {
                let mut tokens = call_site;
                tokens.extend(defaults.iter().cloned());
                tokens
            }
            MergePolicy::CallSiteWins => {
                let mut by_flag: IndexMap<String, Vec<String>> = IndexMap::new();
                for (flag, word) in call_site.iter().flat_map(|token| keyed_words(token)) {
                    by_flag.entry(flag).or_default().push(word);
                }

                for (flag, word) in defaults.iter().flat_map(|token| keyed_words(token)) {
                    if by_flag.contains_key(&flag) {
                        debug!("Dropping default `{word}` in favour of call-site `{flag}`");
                        continue;
                    }
                    by_flag.insert(flag, vec![word]);
                }

                by_flag.into_values().flatten().collect()
            }
        }
    }
}

/// Splits a token into its flags, each keyed by its flag name.
///
/// Raw tokens such as `--height=10 --reverse` hold several flags. A word that
/// is not a flag stays with the flag before it, as in `--prompt 'pick one'`.
/// Words are re-quoted so the merged line splits back into the same
/// arguments. A token with unbalanced quotes is kept whole and fails later,
/// when the command line is split.
fn keyed_words(token: &str) -> Vec<(String, String)> {
    let words = match shell_words::split(token) {
        Ok(words) if !(words.len() == 1 && words[0] == token) => words,
        _ => return vec![(flag_name(token).to_string(), token.to_string())],
    };

    let mut keyed: Vec<(String, String)> = Vec::new();
    for word in words {
        let quoted = shell_words::quote(&word).into_owned();
        match keyed.last_mut() {
            Some((_, text)) if !is_flag(&word) => {
                text.push(' ');
                text.push_str(&quoted);
            }
            _ => keyed.push((flag_name(&word).to_string(), quoted)),
        }
    }
    keyed
}

fn is_flag(word: &str) -> bool {
    word.starts_with('-') || word.starts_with('+')
}

/// An external tool with its default options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliTool {
    executable: String,
    options: Vec<String>,
    label: Option<String>,
    merge_policy: MergePolicy,
}

impl CliTool {
    /// Creates a tool, normalizing `default_options` once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingExecutable`] when `executable` is blank. The
    /// executable is not looked up on `PATH` here; a missing binary surfaces
    /// when the tool is first executed.
    pub fn new(executable: impl Into<String>, default_options: impl Into<OptionSpec>) -> Result<Self> {
        let executable = executable.into();
        if executable.trim().is_empty() {
            return Err(Error::MissingExecutable(executable));
        }

        Ok(Self {
            executable,
            options: parse_options(&default_options.into()),
            label: None,
            merge_policy: MergePolicy::default(),
        })
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Default flag tokens, appended after the call-site ones.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    /// Builds the argument vector for `invocation`.
    ///
    /// The line `<executable> <subcommand> <tokens…>` is split with shell word
    /// rules, so quoted values containing spaces stay a single argument.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Split`] if the line has unbalanced quotes.
    pub fn command_line(&self, invocation: &Invocation) -> Result<Vec<String>> {
        let call_site = parse_options(invocation.options());
        let tokens = self.merge_policy.merge(call_site, &self.options);

        let line = format!(
            "{} {} {}",
            self.executable,
            invocation.subcommand(),
            tokens.join(" ")
        );

        shell_words::split(&line).map_err(|e| Error::split_error(line.clone(), e))
    }

    /// Runs the tool once, feeding it `items`.
    ///
    /// # Errors
    ///
    /// See [`CliTool::command_line`] and [`execute_piped`].
    pub fn execute<I>(&self, items: I, invocation: &Invocation) -> Result<Outcome>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let argv = self.command_line(invocation)?;
        execute_piped(&argv, items, invocation.delimiter(), invocation.encoding())
    }

    /// Composes an item producing function with this tool.
    ///
    /// Calling the returned closure calls `func` and executes the tool on what
    /// it returns, using the bound `invocation`.
    pub fn wrap<'a, A, F, I>(
        &'a self,
        invocation: Invocation,
        func: F,
    ) -> impl Fn(A) -> Result<Outcome> + 'a
    where
        F: Fn(A) -> I + 'a,
        I: IntoIterator,
        I::Item: Display,
    {
        move |args| self.execute(func(args), &invocation)
    }
}

impl Display for CliTool {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}(executable_path={}, default_options={:?})",
            self.label.as_deref().unwrap_or("CliTool"),
            self.executable,
            self.options.join(" ")
        )
    }
}
