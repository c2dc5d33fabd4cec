//! Error types shared between the lexer and parser stages of the codec
use std::fmt::{Display, Formatter};

use crate::coords::Coords;

/// Global result type used throughout the codec stages
pub type ParserResult<T> = Result<T, ParserError>;

/// Enumeration of the stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The tokenisation stage
    Lexer,
    /// The tree construction stage
    Parser,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lexer => write!(f, "lexer"),
            Stage::Parser => write!(f, "parser"),
        }
    }
}

/// A global enumeration of error codes
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    EndOfInput,
    InvalidFile,
    InvalidCharacter(char),
    InvalidNumericRepresentation(String),
    InvalidEscapeSequence(String),
    InvalidUnicodeEscapeSequence(String),
    MatchFailed(String),
    UnexpectedToken,
    PairExpected,
    InvalidObject,
    InvalidArray,
    TrailingInput,
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Details::EndOfInput => write!(f, "unexpected end of input"),
            Details::InvalidFile => write!(f, "file could not be opened for parsing"),
            Details::InvalidCharacter(c) => write!(f, "invalid character found: '{c}'"),
            Details::InvalidNumericRepresentation(s) => write!(f, "invalid number: \"{s}\""),
            Details::InvalidEscapeSequence(s) => write!(f, "invalid escape sequence: \"{s}\""),
            Details::InvalidUnicodeEscapeSequence(s) => {
                write!(f, "invalid unicode escape sequence: \"{s}\"")
            }
            Details::MatchFailed(s) => write!(f, "match failed: {s}"),
            Details::UnexpectedToken => write!(f, "unexpected token found in input"),
            Details::PairExpected => write!(f, "expected a key/value pair"),
            Details::InvalidObject => write!(f, "invalid object structure"),
            Details::InvalidArray => write!(f, "invalid array structure"),
            Details::TrailingInput => write!(f, "trailing input found after document"),
        }
    }
}

/// The general error structure returned by the codec
#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Optional input coordinates
    pub coords: Option<Coords>,
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(f, "{} error: {} at {}", self.stage, self.details, coords),
            None => write!(f, "{} error: {}", self.stage, self.details),
        }
    }
}

impl std::error::Error for ParserError {}

#[macro_export]
macro_rules! lexer_error {
    ($details: expr) => {
        Err($crate::errors::ParserError {
            stage: $crate::errors::Stage::Lexer,
            details: $details,
            coords: None,
        })
    };
    ($details: expr, $coords: expr) => {
        Err($crate::errors::ParserError {
            stage: $crate::errors::Stage::Lexer,
            details: $details,
            coords: Some($coords),
        })
    };
}

#[macro_export]
macro_rules! parser_error {
    ($details: expr) => {
        Err($crate::errors::ParserError {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: None,
        })
    };
    ($details: expr, $coords: expr) => {
        Err($crate::errors::ParserError {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: Some($coords),
        })
    };
}
