//! Option normalization.
//!
//! Converts the options a caller wants to pass to a tool into the flag tokens
//! that end up on its command line:
//!
//! - `x` becomes `-x`, `preview` becomes `--preview`
//! - names already starting with `-` or `+` are kept verbatim
//! - a name with a value becomes `--name=value`, the value shell-quoted
//!
//! A whole option line such as `"--reverse --bold"` is kept as a single raw
//! token and split later with the rest of the command line.

use std::fmt::{Display, Formatter};

use serde_yaml::Value;

use crate::error::{Error, Result};

/// One option as given by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliOption {
    /// A flag without a value, e.g. `reverse` or `-m`.
    Flag(String),
    /// A flag with a value, e.g. `("height", "40%")`.
    Valued(String, String),
    /// An already formed options string, passed through untouched.
    Raw(String),
}

impl CliOption {
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag(name.into())
    }

    pub fn valued(name: impl Into<String>, value: impl Display) -> Self {
        Self::Valued(name.into(), value.to_string())
    }

    /// Interprets a free-form option string.
    ///
    /// Blank strings yield nothing, a single word is a flag name and anything
    /// containing whitespace is taken as a raw options line.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if line.chars().any(char::is_whitespace) {
            Some(Self::Raw(line.to_string()))
        } else {
            Some(Self::Flag(line.to_string()))
        }
    }

    /// Renders the option as a command line token, `None` for blank flags.
    pub fn to_token(&self) -> Option<String> {
        match self {
            Self::Flag(name) => {
                if name.trim().is_empty() {
                    None
                } else {
                    Some(key_to_option(name))
                }
            }
            Self::Valued(name, value) => {
                if value.trim().is_empty() {
                    Some(key_to_option(name))
                } else {
                    // e.g. --info=default --margin='T R B L'
                    Some(format!(
                        "{}={}",
                        key_to_option(name),
                        shell_words::quote(value)
                    ))
                }
            }
            Self::Raw(line) => Some(line.clone()),
        }
    }
}

impl Display for CliOption {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_token() {
            Some(token) => formatter.write_str(&token),
            None => Ok(()),
        }
    }
}

/// An ordered collection of options, in the order they should be emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSpec(Vec<CliOption>);

impl OptionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a spec from a free-form option string, see [`CliOption::parse_line`].
    pub fn from_line(line: &str) -> Self {
        Self(CliOption::parse_line(line).into_iter().collect())
    }

    /// Validates untyped option data, e.g. options read from YAML or JSON.
    ///
    /// Accepted shapes are a string, `null`, or a sequence whose elements are
    /// either strings or two element `[name, value]` sequences.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OptionKey`] when a pair's name is not a string and
    /// [`Error::OptionShape`] for any other unsupported shape.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::String(line) => Ok(Self::from_line(line)),
            Value::Sequence(elements) => elements
                .iter()
                .map(option_from_value)
                .collect::<Result<Vec<_>>>()
                .map(|options| Self(options.into_iter().flatten().collect())),
            other => Err(Error::OptionShape(describe(other))),
        }
    }

    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.0.push(CliOption::flag(name));
        self
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.0.push(CliOption::valued(name, value));
        self
    }

    pub fn push(&mut self, option: CliOption) {
        self.0.push(option);
    }

    pub fn extend(&mut self, other: OptionSpec) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CliOption> {
        self.0.iter()
    }

    pub fn to_tokens(&self) -> Vec<String> {
        parse_options(self)
    }
}

impl From<Vec<CliOption>> for OptionSpec {
    fn from(options: Vec<CliOption>) -> Self {
        Self(options)
    }
}

impl From<&str> for OptionSpec {
    fn from(line: &str) -> Self {
        Self::from_line(line)
    }
}

impl FromIterator<CliOption> for OptionSpec {
    fn from_iter<T: IntoIterator<Item = CliOption>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Computes the shell option for a key.
///
/// ```
/// use toolpipe_core::options::key_to_option;
///
/// assert_eq!(key_to_option("x"), "-x");
/// assert_eq!(key_to_option("preview"), "--preview");
/// assert_eq!(key_to_option("+x"), "+x");
/// ```
pub fn key_to_option(key: &str) -> String {
    if key.starts_with('-') || key.starts_with('+') {
        // caller already wrote the flag syntax
        return key.to_string();
    }

    if key.chars().count() == 1 {
        format!("-{key}")
    } else {
        format!("--{key}")
    }
}

/// Normalizes options into flag tokens, keeping their order.
pub fn parse_options(spec: &OptionSpec) -> Vec<String> {
    spec.iter().filter_map(CliOption::to_token).collect()
}

/// The flag part of a token, i.e. everything before the first `=`.
pub fn flag_name(token: &str) -> &str {
    token.split_once('=').map_or(token, |(name, _)| name)
}

fn option_from_value(value: &Value) -> Result<Option<CliOption>> {
    match value {
        Value::String(name) => {
            if name.trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(CliOption::Flag(name.clone())))
            }
        }
        Value::Sequence(pair) if pair.len() == 2 => {
            let Value::String(name) = &pair[0] else {
                return Err(Error::OptionKey(describe(&pair[0])));
            };
            Ok(Some(CliOption::Valued(name.clone(), scalar_text(&pair[1]))))
        }
        other => Err(Error::OptionShape(describe(other))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        other => describe(other),
    }
}

fn describe(value: &Value) -> String {
    match serde_yaml::to_string(value) {
        Ok(text) => text.trim_end().replace('\n', " "),
        Err(_) => format!("{value:?}"),
    }
}
