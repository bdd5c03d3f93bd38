//! Treeviz formatter for ASTs
//!
//! One line per node, nesting drawn with box characters:
//!
//!   └─ Feature: Login
//!     ├─ Comments
//!     └─ ScenarioDefinitions
//!       └─ Scenario: Good password
//!         ├─ Steps
//!         │ └─ Step: Given a registered user
//!         └─ Tags
//!
//! Labels are truncated to 30 characters. Grouping nodes have no label.

use super::registry::{AstFormat, FormatError};
use crate::gherkin::ast::{Ast, NodeId};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(ast: &Ast) -> String {
    let mut result = String::new();
    append_node(&mut result, ast, ast.root(), "", true);
    result
}

fn append_node(result: &mut String, ast: &Ast, id: NodeId, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let rule = ast.rule(id);
    let label = truncate(&rule.display_label(), 30);

    if label.is_empty() {
        result.push_str(&format!("{}{} {}\n", prefix, connector, rule.kind));
    } else {
        result.push_str(&format!("{}{} {}: {}\n", prefix, connector, rule.kind, label));
    }

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let children = ast.children(id);
    for (i, child) in children.iter().enumerate() {
        append_node(result, ast, *child, &new_prefix, i == children.len() - 1);
    }
}

/// Tree dump of the AST
pub struct TreevizFormat;

impl AstFormat for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, ast: &Ast) -> Result<String, FormatError> {
        Ok(to_treeviz_str(ast))
    }

    fn description(&self) -> &str {
        "One line per node tree view"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gherkin::parser::parse_ast;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_simple_feature() {
        let ast = parse_ast("Feature: F\n  Scenario: S\n    Given a thing\n", "test").unwrap();
        insta::assert_snapshot!(to_treeviz_str(&ast).trim_end(), @r"
        └─ Feature: F
          ├─ Comments
          └─ ScenarioDefinitions
            └─ Scenario: S
              ├─ Steps
              │ └─ Step: Given a thing
              └─ Tags
        ");
    }

    #[test]
    fn test_table_rows() {
        let source = "Feature: F\n  Scenario: S\n    Given t\n      | a | b |\n";
        let ast = parse_ast(source, "test").unwrap();
        let out = to_treeviz_str(&ast);

        assert!(out.contains("  │ └─ Step: Given t\n"));
        assert!(out.contains("└─ Arguments\n"));
        assert!(out.contains("├─ Cell: a\n"));
        assert!(out.contains("└─ Cell: b\n"));
    }

    #[test]
    fn test_long_labels_truncated() {
        let source = "Feature: A very long feature name that goes on and on\n";
        let ast = parse_ast(source, "test").unwrap();
        let first = to_treeviz_str(&ast).lines().next().unwrap().to_string();
        assert_eq!(first, "└─ Feature: A very long feature name that ...");
    }
}
