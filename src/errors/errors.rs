use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::UnterminatedStringLiteral => "UnterminatedStringLiteral",
            ErrorImpl::UnterminatedCharacterLiteral => "UnterminatedCharacterLiteral",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { character } if character.is_ascii_uppercase() => {
                ErrorTip::Suggestion(String::from("identifiers may only contain lowercase letters"))
            }
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedStringLiteral => {
                ErrorTip::Suggestion(String::from("add a closing `\"` to the literal"))
            }
            ErrorImpl::UnterminatedCharacterLiteral => {
                ErrorTip::Suggestion(String::from("add a closing `'` to the literal"))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.internal_error, self.position.line, self.position.column
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("Unrecognized character '{character}'")]
    UnrecognisedCharacter { character: char },
    #[error("Unterminated string literal")]
    UnterminatedStringLiteral,
    #[error("Unterminated character literal")]
    UnterminatedCharacterLiteral,
    /// A decimal that failed to re-parse while rounding. Unreachable from
    /// `tokenize`: scanned decimals are digits with one `.` and always parse.
    #[error("Error parsing number {token:?}")]
    NumberParseError { token: String },
}
