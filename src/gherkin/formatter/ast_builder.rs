//! Sink that builds an [`Ast`]

use super::Formatter;
use crate::gherkin::ast::tree::Arena;
use crate::gherkin::ast::{Ast, NodeId, Rule, RuleKind};
use crate::gherkin::formats::to_treeviz_str;
use tracing::debug;

/// Builds the tree with an explicit stack of open nodes.
///
/// Closed top-level rules are collected in `roots`, which plays the part of
/// a synthetic root: a finished document has exactly one of them.
#[derive(Debug, Default)]
pub struct AstBuilder {
    arena: Arena,
    stack: Vec<NodeId>,
    roots: Vec<NodeId>,
    ast: Option<Ast>,
    trace: bool,
}

impl AstBuilder {
    /// `trace` enables `gherkin::astbuilder` debug events
    pub fn new(trace: bool) -> Self {
        AstBuilder {
            trace,
            ..Default::default()
        }
    }

    /// Number of rules currently open
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The finished tree, once `finish` has run
    pub fn ast(&self) -> Option<&Ast> {
        self.ast.as_ref()
    }

    pub fn into_ast(self) -> Ast {
        match self.ast {
            Some(ast) => ast,
            None => panic!("AstBuilder::into_ast called before finish"),
        }
    }
}

impl Formatter for AstBuilder {
    fn start_rule(&mut self, kind: RuleKind) -> &mut Rule {
        let id = self.arena.alloc(Rule::new(kind));
        if self.trace {
            debug!(target: "gherkin::astbuilder", depth = self.stack.len(), "start {kind}");
        }
        self.stack.push(id);
        self.arena.rule_mut(id)
    }

    fn current_rule(&mut self) -> Option<&mut Rule> {
        let id = *self.stack.last()?;
        Some(self.arena.rule_mut(id))
    }

    fn end_rule(&mut self, kind: RuleKind) {
        let id = match self.stack.pop() {
            Some(id) => id,
            None => panic!("end_rule({kind}) with no open rule"),
        };
        let open = self.arena.rule(id).kind;
        assert_eq!(open, kind, "end_rule({kind}) while {open} is open");

        match self.stack.last() {
            Some(parent) => self.arena.attach(*parent, id),
            None => self.roots.push(id),
        }
        if self.trace {
            debug!(target: "gherkin::astbuilder", depth = self.stack.len(), "end {kind}");
        }
    }

    fn finish(&mut self) {
        if self.ast.is_some() {
            return;
        }
        assert!(
            self.stack.is_empty(),
            "finish with {} rule(s) still open",
            self.stack.len()
        );
        assert_eq!(self.roots.len(), 1, "a document has exactly one root");

        let arena = std::mem::take(&mut self.arena);
        let ast = arena.into_ast(self.roots[0]);
        if self.trace {
            debug!(target: "gherkin::astbuilder", nodes = ast.len(), "finished\n{}", to_treeviz_str(&ast));
        }
        self.ast = Some(ast);
    }
}
