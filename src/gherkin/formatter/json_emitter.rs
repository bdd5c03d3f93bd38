//! Sink that writes the JSON document directly
//!
//! Each open rule is a frame holding the rule's fields and the JSON
//! container its children are attached to. Closing a rule seals the frame
//! into a value and attaches it to the parent frame, using the same
//! [`JsonContainer`] rules as [`ast_to_json`], so both paths agree.
//!
//! [`ast_to_json`]: crate::gherkin::formats::ast_to_json

use super::Formatter;
use crate::gherkin::ast::{Rule, RuleKind};
use crate::gherkin::formats::{FormatError, JsonContainer};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Default)]
pub struct JsonEmitter {
    frames: Vec<(Rule, JsonContainer)>,
    roots: Vec<Value>,
    document: Option<Value>,
    trace: bool,
}

impl JsonEmitter {
    /// `trace` enables `gherkin::formatter` debug events
    pub fn new(trace: bool) -> Self {
        JsonEmitter {
            trace,
            ..Default::default()
        }
    }

    /// The finished document, once `finish` has run
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    pub fn into_value(self) -> Value {
        match self.document {
            Some(document) => document,
            None => panic!("JsonEmitter::into_value called before finish"),
        }
    }

    pub fn to_string_pretty(&self) -> Result<String, FormatError> {
        let document = self.document.as_ref().ok_or_else(|| {
            FormatError::SerializationError("document is not finished".to_string())
        })?;
        serde_json::to_string_pretty(document)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

impl Formatter for JsonEmitter {
    fn start_rule(&mut self, kind: RuleKind) -> &mut Rule {
        if self.trace {
            debug!(target: "gherkin::formatter", depth = self.frames.len(), "open {kind}");
        }
        self.frames
            .push((Rule::new(kind), JsonContainer::for_kind(kind)));
        let top = self.frames.len() - 1;
        &mut self.frames[top].0
    }

    fn current_rule(&mut self) -> Option<&mut Rule> {
        self.frames.last_mut().map(|(rule, _)| rule)
    }

    fn end_rule(&mut self, kind: RuleKind) {
        let (rule, container) = match self.frames.pop() {
            Some(frame) => frame,
            None => panic!("end_rule({kind}) with no open rule"),
        };
        assert_eq!(rule.kind, kind, "end_rule({kind}) while {} is open", rule.kind);

        let value = container.seal(&rule);
        match self.frames.last_mut() {
            Some((_, parent)) => parent.attach(kind, value),
            None => self.roots.push(value),
        }
        if self.trace {
            debug!(target: "gherkin::formatter", depth = self.frames.len(), "close {kind}");
        }
    }

    fn finish(&mut self) {
        if self.document.is_some() {
            return;
        }
        assert!(
            self.frames.is_empty(),
            "finish with {} rule(s) still open",
            self.frames.len()
        );
        assert_eq!(self.roots.len(), 1, "a document has exactly one root");

        self.document = self.roots.pop();
        if self.trace {
            debug!(target: "gherkin::formatter", "document finished");
        }
    }
}
