//! # gherkin-ast
//!
//! Converts Gherkin feature documents into an abstract syntax tree and emits
//! it as JSON or as a diagnostic tree view.
//!
//! The pipeline is scanner → parser → formatter (sink). The parser only talks
//! to the [`Formatter`](gherkin::formatter::Formatter) trait, so the same run
//! can build an in-memory [`Ast`](gherkin::ast::Ast) or stream a JSON document.

pub mod gherkin;
