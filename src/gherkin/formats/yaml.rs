//! YAML rendering of the JSON document shape

use super::json::ast_to_json;
use super::registry::{AstFormat, FormatError};
use crate::gherkin::ast::Ast;

pub struct YamlFormat;

impl AstFormat for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, ast: &Ast) -> Result<String, FormatError> {
        serde_yaml::to_string(&ast_to_json(ast))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "JSON document shape rendered as YAML"
    }
}
