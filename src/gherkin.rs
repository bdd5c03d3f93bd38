//! Main module for gherkin library functionality

pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod formatter;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod processor;
pub mod testing;

pub use ast::{Ast, Location, NodeId, Rule, RuleKind};
pub use config::DebugFlags;
pub use error::ParseError;
pub use parser::{parse_ast, parse_json, Parser};
