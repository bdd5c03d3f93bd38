//! AST definitions for Gherkin documents
//!
//! A document is a tree of [`Rule`]s stored in an index arena ([`Ast`]).
//! Every rule has a [`RuleKind`], optional keyword and name, and a
//! [`Location`]; kind-specific data lives in its [`Payload`].

pub mod location;
pub mod rule;
pub mod tree;

pub use location::Location;
pub use rule::{Payload, Rule, RuleKind};
pub use tree::{Ast, Node, NodeId};
