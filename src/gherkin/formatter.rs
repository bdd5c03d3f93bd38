//! Output sinks driven by the parser
//!
//! The parser never builds output itself. It reports structure as a stream
//! of properly nested `start_rule` / `end_rule` calls and fills in fields of
//! the open rule in between. A [`Formatter`] decides what to make of that:
//!
//! - [`AstBuilder`] keeps an arena of nodes and produces an [`Ast`]
//! - [`JsonEmitter`] writes the JSON document directly, with no tree
//!
//! Calls that break the nesting discipline (closing a kind that is not the
//! open one, closing with nothing open, finishing with rules still open)
//! are parser bugs and panic.
//!
//! [`Ast`]: crate::gherkin::ast::Ast

pub mod ast_builder;
pub mod json_emitter;

pub use ast_builder::AstBuilder;
pub use json_emitter::JsonEmitter;

use crate::gherkin::ast::{Rule, RuleKind};

pub trait Formatter {
    /// Open a rule of `kind` as a child of the currently open rule and
    /// return it so the caller can fill in its fields
    fn start_rule(&mut self, kind: RuleKind) -> &mut Rule;

    /// The innermost open rule
    fn current_rule(&mut self) -> Option<&mut Rule>;

    /// Seal the innermost open rule, which must be of `kind`, and attach it
    /// as the last child of its parent
    fn end_rule(&mut self, kind: RuleKind);

    /// Called once after the root rule is closed
    fn finish(&mut self);
}
