//! JSON document shape
//!
//! The field names and nesting produced here are the contract with
//! downstream tooling:
//!
//! - grouping kinds become arrays under a member of their parent
//!   (`tags`, `steps`, `rows`, `comments`, `scenarioDefinitions`)
//! - `Arguments` becomes the step's single `argument` object (`DataTable`)
//! - every other kind becomes an object with `type`, `location` and its
//!   kind-specific fields
//!
//! Both the streaming [`JsonEmitter`] sink and [`ast_to_json`] go through
//! [`JsonContainer`], so the two paths cannot drift apart.
//!
//! [`JsonEmitter`]: crate::gherkin::formatter::JsonEmitter

use super::registry::{AstFormat, FormatError};
use crate::gherkin::ast::{Ast, NodeId, Payload, Rule, RuleKind};
use serde_json::{Map, Value};

/// The JSON `type` of an object-valued kind
pub fn json_type(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Cell => "TableCell",
        RuleKind::Cells => "TableRow",
        RuleKind::Arguments => "DataTable",
        other => other.name(),
    }
}

/// Member of the parent object a child of this kind is stored under
pub fn member_name(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Comments => "comments",
        RuleKind::ScenarioDefinitions | RuleKind::Scenario => "scenarioDefinitions",
        RuleKind::Tags | RuleKind::Tag => "tags",
        RuleKind::Steps | RuleKind::Step => "steps",
        RuleKind::Rows | RuleKind::Cells => "rows",
        RuleKind::Arguments => "argument",
        RuleKind::Cell => "cells",
        RuleKind::Feature => "features",
    }
}

/// Leaf fields of a rule, without any children
pub fn rule_fields(rule: &Rule) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("type".into(), Value::from(json_type(rule.kind)));
    if let Some(keyword) = &rule.keyword {
        fields.insert("keyword".into(), Value::from(keyword.as_str()));
    }
    fields.insert(
        "location".into(),
        serde_json::json!({
            "line": rule.location.line,
            "column": rule.location.column,
        }),
    );
    if let Some(name) = &rule.name {
        fields.insert("name".into(), Value::from(name.as_str()));
    }

    match &rule.payload {
        Payload::Feature {
            description,
            language,
        } => {
            fields.insert("language".into(), Value::from(language.as_str()));
            fields.insert("description".into(), Value::from(description.as_str()));
        }
        Payload::Step { text } => {
            fields.insert("text".into(), Value::from(text.as_str()));
        }
        Payload::Cell { value } => {
            fields.insert("value".into(), Value::from(value.as_str()));
        }
        Payload::None => {}
    }

    fields
}

/// JSON value under construction for one open rule
#[derive(Debug, Clone, PartialEq)]
pub enum JsonContainer {
    Array(Vec<Value>),
    Object(Map<String, Value>),
}

impl JsonContainer {
    pub fn for_kind(kind: RuleKind) -> Self {
        if kind.is_group() {
            JsonContainer::Array(Vec::new())
        } else {
            JsonContainer::Object(Map::new())
        }
    }

    /// Attach a sealed child as the last child of this container
    pub fn attach(&mut self, child_kind: RuleKind, child: Value) {
        match self {
            JsonContainer::Array(items) => items.push(child),
            JsonContainer::Object(members) => {
                let member = member_name(child_kind);
                if child_kind.is_group() || child_kind == RuleKind::Arguments {
                    members.insert(member.into(), child);
                } else {
                    let slot = members
                        .entry(member)
                        .or_insert_with(|| Value::Array(Vec::new()));
                    if let Value::Array(items) = slot {
                        items.push(child);
                    }
                }
            }
        }
    }

    /// Close the container, merging in the rule's own fields for objects
    pub fn seal(self, rule: &Rule) -> Value {
        match self {
            JsonContainer::Array(items) => Value::Array(items),
            JsonContainer::Object(members) => {
                let mut object = rule_fields(rule);
                object.extend(members);
                Value::Object(object)
            }
        }
    }
}

/// Convert a finished tree to the JSON document shape
pub fn ast_to_json(ast: &Ast) -> Value {
    node_to_json(ast, ast.root())
}

fn node_to_json(ast: &Ast, id: NodeId) -> Value {
    let rule = ast.rule(id);
    let mut container = JsonContainer::for_kind(rule.kind);
    for child in ast.children(id) {
        container.attach(ast.kind(*child), node_to_json(ast, *child));
    }
    container.seal(rule)
}

/// Pretty-printed JSON document
pub struct JsonFormat;

impl AstFormat for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, ast: &Ast) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&ast_to_json(ast))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "JSON document (Feature/Scenario/Step objects)"
    }
}
