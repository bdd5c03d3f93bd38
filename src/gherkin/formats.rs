//! Output format implementations for finished ASTs
//!
//! This module contains the format implementations that serialize an [`Ast`]:
//! - json: the document shape consumed by downstream tooling
//! - treeviz: a compact tree dump for debugging
//! - yaml: the json document rendered as YAML
//!
//! [`Ast`]: crate::gherkin::ast::Ast

pub mod json;
pub mod registry;
pub mod treeviz;
pub mod yaml;

pub use json::{ast_to_json, JsonContainer, JsonFormat};
pub use registry::{AstFormat, FormatError, FormatRegistry};
pub use treeviz::{to_treeviz_str, TreevizFormat};
pub use yaml::YamlFormat;
