// error.rs - Crate-wide error type

use thiserror::Error;

/// Errors raised while loading data or fitting the mixture model.
///
/// Hitting the iteration limit or a degenerate mixing weight is not an
/// error; both are reported through [`crate::core::Termination`].
#[derive(Error, Debug)]
pub enum LdMixError {
    /// Malformed genotype data or estimator input
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A frequency table did not cover a queried label
    #[error("Label '{label}' missing from {table} frequency table")]
    MissingLabel { label: String, table: String },

    /// Invalid configuration or command line values
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Malformed input file
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LdMixError>;

impl LdMixError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn missing_label(label: impl Into<String>, table: impl Into<String>) -> Self {
        Self::MissingLabel {
            label: label.into(),
            table: table.into(),
        }
    }
}
