//! The rule model: node kinds and their payloads
//!
//! Rules are created empty by [`Rule::new`] when a sink opens them, then
//! filled in by the parser while they sit on top of the sink's open-node
//! stack. Kind-specific setters are no-ops (with a debug assertion) when
//! called on the wrong kind.

use super::location::Location;
use std::fmt;

/// The closed set of AST node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Feature,
    Scenario,
    Step,
    Tag,
    Cell,
    Tags,
    Steps,
    Comments,
    ScenarioDefinitions,
    Arguments,
    Rows,
    Cells,
}

impl RuleKind {
    pub const ALL: [RuleKind; 12] = [
        RuleKind::Feature,
        RuleKind::Scenario,
        RuleKind::Step,
        RuleKind::Tag,
        RuleKind::Cell,
        RuleKind::Tags,
        RuleKind::Steps,
        RuleKind::Comments,
        RuleKind::ScenarioDefinitions,
        RuleKind::Arguments,
        RuleKind::Rows,
        RuleKind::Cells,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Feature => "Feature",
            RuleKind::Scenario => "Scenario",
            RuleKind::Step => "Step",
            RuleKind::Tag => "Tag",
            RuleKind::Cell => "Cell",
            RuleKind::Tags => "Tags",
            RuleKind::Steps => "Steps",
            RuleKind::Comments => "Comments",
            RuleKind::ScenarioDefinitions => "ScenarioDefinitions",
            RuleKind::Arguments => "Arguments",
            RuleKind::Rows => "Rows",
            RuleKind::Cells => "Cells",
        }
    }

    /// Grouping kinds hold an ordered list of children and nothing else.
    /// In JSON they become arrays.
    pub fn is_group(&self) -> bool {
        matches!(
            self,
            RuleKind::Tags
                | RuleKind::Steps
                | RuleKind::Comments
                | RuleKind::ScenarioDefinitions
                | RuleKind::Rows
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    Feature {
        description: String,
        language: String,
    },
    Step {
        text: String,
    },
    Cell {
        value: String,
    },
}

/// An AST node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub keyword: Option<String>,
    pub name: Option<String>,
    pub location: Location,
    pub payload: Payload,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        let payload = match kind {
            RuleKind::Feature => Payload::Feature {
                description: String::new(),
                language: String::new(),
            },
            RuleKind::Step => Payload::Step {
                text: String::new(),
            },
            RuleKind::Cell => Payload::Cell {
                value: String::new(),
            },
            _ => Payload::None,
        };

        Rule {
            kind,
            keyword: None,
            name: None,
            location: Location::UNKNOWN,
            payload,
        }
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) -> &mut Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_location(&mut self, location: Location) -> &mut Self {
        self.location = location;
        self
    }

    pub fn set_description(&mut self, text: impl Into<String>) -> &mut Self {
        match &mut self.payload {
            Payload::Feature { description, .. } => *description = text.into(),
            _ => debug_assert!(false, "description set on {}", self.kind),
        }
        self
    }

    pub fn set_language(&mut self, text: impl Into<String>) -> &mut Self {
        match &mut self.payload {
            Payload::Feature { language, .. } => *language = text.into(),
            _ => debug_assert!(false, "language set on {}", self.kind),
        }
        self
    }

    pub fn set_text(&mut self, value: impl Into<String>) -> &mut Self {
        match &mut self.payload {
            Payload::Step { text } => *text = value.into(),
            _ => debug_assert!(false, "text set on {}", self.kind),
        }
        self
    }

    pub fn set_value(&mut self, text: impl Into<String>) -> &mut Self {
        match &mut self.payload {
            Payload::Cell { value } => *value = text.into(),
            _ => debug_assert!(false, "value set on {}", self.kind),
        }
        self
    }

    pub fn description(&self) -> Option<&str> {
        match &self.payload {
            Payload::Feature { description, .. } => Some(description),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.payload {
            Payload::Feature { language, .. } => Some(language),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Step { text } => Some(text),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match &self.payload {
            Payload::Cell { value } => Some(value),
            _ => None,
        }
    }

    /// Short human-readable label used by tree dumps
    pub fn display_label(&self) -> String {
        match (&self.payload, &self.keyword, &self.name) {
            (Payload::Step { text }, Some(keyword), _) => format!("{keyword} {text}"),
            (Payload::Cell { value }, _, _) => value.clone(),
            (_, _, Some(name)) => name.clone(),
            _ => String::new(),
        }
    }
}
