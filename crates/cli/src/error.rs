//! CLI failures and the exit code each one maps to.
//!
//! Codes: 0 success, 2 argument parse error (raised by clap before `run`),
//! 10 field, 11 I/O, 12 input, 13 serialization.

use backdrop_core::BackdropError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Unknown field name or unusable surface dimensions.
    #[error(transparent)]
    Field(BackdropError),
    /// Reading a scene file or writing the PNG failed.
    #[error("{0}")]
    Io(String),
    /// Malformed `--params`, scene document, palette or color.
    #[error("{0}")]
    Input(String),
    /// Encoding `--json` output failed.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

/// Library errors split three ways: I/O, bad user input, everything else.
impl From<BackdropError> for CliError {
    fn from(e: BackdropError) -> Self {
        match e {
            BackdropError::Io(msg) => CliError::Io(msg),
            BackdropError::InvalidColor(_)
            | BackdropError::InvalidPalette(_)
            | BackdropError::UnknownPalette(_)
            | BackdropError::InvalidScene(_) => CliError::Input(e.to_string()),
            BackdropError::InvalidDimensions | BackdropError::UnknownField(_) => {
                CliError::Field(e)
            }
        }
    }
}
