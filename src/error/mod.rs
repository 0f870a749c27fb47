//! Error types for the netkit CLI

use std::process::ExitStatus;
use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Top-level application errors surfaced to the user
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors (environment, .env file, invalid values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input validation errors raised before any request is made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Errors reported by the resource API (non-2xx responses)
    #[error("API error: {0}")]
    Api(String),

    /// Transport-level HTTP failures
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal interaction failures (confirmation prompt)
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl AppError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api(message.into())
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) => 2,
            Self::Api(_) | Self::Http(_) | Self::Prompt(_) => 1,
        }
    }
}

/// Failure of a single diagnostic probe.
///
/// All three kinds surface identically in the run's error list; a probe
/// failure never aborts sibling probes.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The external process could not be started at all
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The external process ran but exited non-zero
    #[error("{tool} exited with {status}{stderr}")]
    NonZeroExit {
        tool: &'static str,
        status: ExitStatus,
        stderr: StderrExcerpt,
    },

    /// The process output did not meet the parser's minimum shape
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Parse failures for the probes whose parsers can reject input
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The resolver output contained no usable address line
    #[error("no address found in resolver output")]
    MissingAddress,

    /// The HTTP probe emitted fewer tokens than its format string promises
    #[error("unexpected http probe output: {0:?}")]
    HttpShape(String),
}

/// First line of a process's stderr, carried along for error display
#[derive(Debug, Default)]
pub struct StderrExcerpt(Option<String>);

impl StderrExcerpt {
    pub fn from_bytes(stderr: &[u8]) -> Self {
        let first = String::from_utf8_lossy(stderr)
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string);
        Self(first)
    }
}

impl std::fmt::Display for StderrExcerpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(line) => write!(f, ": {}", line),
            None => Ok(()),
        }
    }
}
