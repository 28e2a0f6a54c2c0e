use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot find `{}` installed on PATH: the executable path may not be empty.", .0)]
    MissingExecutable(String),

    #[error(
        "Expected a str or a sequence of options, e.g., [\"-x\", [\"height\", \"40%\"]], received {}",
        .0
    )]
    OptionShape(String),

    #[error("Expected a str key, received {}", .0)]
    OptionKey(String),

    #[error("The sub process exited with non-success code: {}", describe_exit(.0))]
    SubProcessExit(Option<i32>),

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Could not spawn `{}`: {}", .program, .original)]
    Spawn {
        program: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(std::io::Error),

    #[error("Unknown or unsupported text encoding `{}`", .0)]
    UnknownEncoding(String),

    #[error("Input `{}` cannot be encoded as {}", .text, .encoding)]
    Encode {
        encoding: &'static str,
        text: String,
    },

    #[error("Sub process output is not valid {}", .encoding)]
    Decode { encoding: &'static str },

    #[error("Error splitting command line `{}`: {}", .line, .original)]
    Split {
        line: String,
        original: shell_words::ParseError,
    },

    #[error("Misc error: {}", .0)]
    Misc(String),

    #[error("Invalid parameter format `{}`, expected name or name=value", .0)]
    ParameterFormat(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    pub fn spawn_error(program: String, original: std::io::Error) -> Self {
        Self::Spawn { program, original }
    }

    pub fn split_error(line: String, original: shell_words::ParseError) -> Self {
        Self::Split { line, original }
    }
}
