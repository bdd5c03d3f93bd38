//! Index arena holding a finished document tree
//!
//! Nodes refer to each other by [`NodeId`] (an index into the arena) rather
//! than by pointer, so parent back-references need no shared ownership. A
//! node gets its parent exactly once, when the sink seals it.

use super::rule::{Rule, RuleKind};

/// Index of a node inside an [`Ast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub rule: Rule,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Growable node storage used while a tree is under construction
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn alloc(&mut self, rule: Rule) -> NodeId {
        self.nodes.push(Node {
            rule,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn rule_mut(&mut self, id: NodeId) -> &mut Rule {
        &mut self.nodes[id.0].rule
    }

    pub(crate) fn rule(&self, id: NodeId) -> &Rule {
        &self.nodes[id.0].rule
    }

    /// Append `child` as the last child of `parent`
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.nodes[child.0].parent.is_none(),
            "node {} attached twice",
            child.0
        );
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub(crate) fn into_ast(self, root: NodeId) -> Ast {
        Ast {
            nodes: self.nodes,
            root,
        }
    }
}

/// A finished, immutable document tree rooted at the `Feature` node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn rule(&self, id: NodeId) -> &Rule {
        &self.nodes[id.0].rule
    }

    pub fn kind(&self, id: NodeId) -> RuleKind {
        self.nodes[id.0].rule.kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The `Feature` rule at the root
    pub fn feature(&self) -> &Rule {
        self.rule(self.root)
    }

    /// First direct child of the given kind
    pub fn child_of_kind(&self, id: NodeId, kind: RuleKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.kind(*child) == kind)
    }

    /// Children of the named group under `id`, or nothing if the group is absent
    pub fn group(&self, id: NodeId, group: RuleKind) -> &[NodeId] {
        self.child_of_kind(id, group)
            .map(|g| self.children(g))
            .unwrap_or(&[])
    }

    pub fn scenarios(&self) -> &[NodeId] {
        self.group(self.root, RuleKind::ScenarioDefinitions)
    }

    pub fn steps(&self, scenario: NodeId) -> &[NodeId] {
        self.group(scenario, RuleKind::Steps)
    }

    pub fn tags(&self, id: NodeId) -> &[NodeId] {
        self.group(id, RuleKind::Tags)
    }

    /// Table rows (`Cells` nodes) of a step's data table
    pub fn rows(&self, step: NodeId) -> &[NodeId] {
        self.child_of_kind(step, RuleKind::Arguments)
            .map(|arguments| self.group(arguments, RuleKind::Rows))
            .unwrap_or(&[])
    }

    /// Cell values of a step's data table, row by row
    pub fn table(&self, step: NodeId) -> Vec<Vec<&str>> {
        self.rows(step)
            .iter()
            .map(|row| {
                self.children(*row)
                    .iter()
                    .filter_map(|cell| self.rule(*cell).value())
                    .collect()
            })
            .collect()
    }

    /// Number of ancestors between `id` and the root
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// All node ids reachable from the root, in pre-order
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }
}
