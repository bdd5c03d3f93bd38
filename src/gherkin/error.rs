//! Parse errors
//!
//! Only malformed top-level structure is an error. Unrecognized text inside
//! a document is skipped by the scanner and never reaches this type.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `Feature` keyword not immediately followed by `:`
    MissingColon {
        source_name: String,
        line: usize,
        column: usize,
    },
    /// Input ended without a `Feature:` header
    MissingFeature { source_name: String },
    /// A second `Feature:` header
    DuplicateFeature {
        source_name: String,
        line: usize,
        column: usize,
    },
    /// `Scenario` seen before the `Feature:` header
    ScenarioBeforeFeature {
        source_name: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    pub fn source_name(&self) -> &str {
        match self {
            ParseError::MissingColon { source_name, .. }
            | ParseError::MissingFeature { source_name }
            | ParseError::DuplicateFeature { source_name, .. }
            | ParseError::ScenarioBeforeFeature { source_name, .. } => source_name,
        }
    }

    /// Offending `(line, column)`, when the error has one
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::MissingColon { line, column, .. }
            | ParseError::DuplicateFeature { line, column, .. }
            | ParseError::ScenarioBeforeFeature { line, column, .. } => Some((*line, *column)),
            ParseError::MissingFeature { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingColon {
                source_name,
                line,
                column,
            } => write!(
                f,
                "{source_name}:{line}:{column}: expected ':' after 'Feature'"
            ),
            ParseError::MissingFeature { source_name } => {
                write!(f, "{source_name}: no 'Feature:' header found")
            }
            ParseError::DuplicateFeature {
                source_name,
                line,
                column,
            } => write!(
                f,
                "{source_name}:{line}:{column}: only one 'Feature:' header is allowed"
            ),
            ParseError::ScenarioBeforeFeature {
                source_name,
                line,
                column,
            } => write!(
                f,
                "{source_name}:{line}:{column}: 'Scenario' before the 'Feature:' header"
            ),
        }
    }
}

impl std::error::Error for ParseError {}
