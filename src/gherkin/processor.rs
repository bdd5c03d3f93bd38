//! File processing API for Gherkin documents
//!
//! A processing spec names what to extract and how to render it:
//!
//! - `json`: the JSON document, streamed by the [`JsonEmitter`] sink
//! - `ast-json`, `ast-treeviz`, `ast-yaml`: the [`Ast`] rendered by a
//!   registered format
//! - `token-simple`, `token-json`: the classified scanner tokens
//!
//! [`JsonEmitter`]: crate::gherkin::formatter::JsonEmitter
//! [`Ast`]: crate::gherkin::ast::Ast

use crate::gherkin::config::DebugFlags;
use crate::gherkin::error::ParseError;
use crate::gherkin::formats::{FormatError, FormatRegistry};
use crate::gherkin::lexer::{Scanner, SpannedToken};
use crate::gherkin::parser::{parse_ast_with, parse_json_with};
use std::fmt;
use std::fs;
use std::path::Path;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
    /// Parser output written straight to JSON, with no tree
    Stream,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Treeviz,
    Yaml,
}

impl OutputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Yaml => "yaml",
        }
    }
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "json", "ast-treeviz" or "token-simple"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        if format_str == "json" {
            return Ok(ProcessingSpec {
                stage: ProcessingStage::Stream,
                format: OutputFormat::Json,
            });
        }

        let invalid = || ProcessingError::InvalidFormat(format_str.to_string());
        let (stage, format) = format_str.split_once('-').ok_or_else(invalid)?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(invalid()),
        };
        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "treeviz" => OutputFormat::Treeviz,
            "yaml" => OutputFormat::Yaml,
            _ => return Err(invalid()),
        };

        // Validate stage/format compatibility
        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Simple | OutputFormat::Json) => {}
            (ProcessingStage::Ast, OutputFormat::Json | OutputFormat::Treeviz | OutputFormat::Yaml) => {}
            _ => return Err(invalid()),
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            ProcessingSpec {
                stage: ProcessingStage::Stream,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Treeviz,
            },
            ProcessingSpec {
                stage: ProcessingStage::Ast,
                format: OutputFormat::Yaml,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json,
            },
        ]
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            ProcessingStage::Stream => write!(f, "{}", self.format.name()),
            ProcessingStage::Ast => write!(f, "ast-{}", self.format.name()),
            ProcessingStage::Token => write!(f, "token-{}", self.format.name()),
        }
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    Io(String),
    Parse(ParseError),
    Format(FormatError),
    InvalidFormat(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::Io(msg) => write!(f, "IO error: {msg}"),
            ProcessingError::Parse(err) => write!(f, "{err}"),
            ProcessingError::Format(err) => write!(f, "{err}"),
            ProcessingError::InvalidFormat(format) => write!(
                f,
                "Invalid format: {format} (available: {})",
                available_formats().join(", ")
            ),
        }
    }
}

impl From<ParseError> for ProcessingError {
    fn from(err: ParseError) -> Self {
        ProcessingError::Parse(err)
    }
}

impl From<FormatError> for ProcessingError {
    fn from(err: FormatError) -> Self {
        ProcessingError::Format(err)
    }
}

/// Process an in-memory document according to the given specification
pub fn process_source(
    source: &str,
    source_name: &str,
    spec: &ProcessingSpec,
    flags: &DebugFlags,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let scanner = Scanner::new(source, source_name);
            format_tokens(scanner.tokens(), spec.format)
        }
        ProcessingStage::Stream => {
            let document = parse_json_with(source, source_name, flags)?;
            serde_json::to_string_pretty(&document)
                .map_err(|e| FormatError::SerializationError(e.to_string()).into())
        }
        ProcessingStage::Ast => {
            let ast = parse_ast_with(source, source_name, flags)?;
            let registry = FormatRegistry::with_defaults();
            Ok(registry.serialize(&ast, spec.format.name())?)
        }
    }
}

/// Process a feature file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    flags: &DebugFlags,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path)
        .map_err(|e| ProcessingError::Io(format!("{}: {}", file_path.display(), e)))?;

    process_source(&content, &file_path.display().to_string(), spec, flags)
}

/// Format classified tokens, one `line:column token` entry per line for
/// `simple`
pub fn format_tokens(
    tokens: &[SpannedToken],
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&format!("{}:{} {}\n", token.line, token.column, token.token));
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| FormatError::SerializationError(e.to_string()).into()),
        other => Err(ProcessingError::InvalidFormat(format!(
            "token-{}",
            other.name()
        ))),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(|spec| spec.to_string())
        .collect()
}
