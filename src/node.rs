use crate::action::Action;
use crate::chart::{StateKind, TableState};
use crate::Token;

mod tree;

/// A derivation-tree node.
///
/// Children line up with the symbols of the state's rule body, left to
/// right: a nonterminal yields the node of the state that completed it, a
/// wildcard the node of the wildcard match, and a terminal a leaf holding the
/// token it matched. Nodes are built fresh for every derivation, so a tree
/// never shares subtrees with another.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node {
    pub(crate) value: NodeValue,
    pub(crate) children: Vec<Node>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NodeValue {
    State(TableState),
    /// A terminal matched the token that ends at chart position `end`.
    Terminal { token: Token, end: usize },
}

impl Node {
    pub(crate) fn new(state: TableState, children: Vec<Node>) -> Node {
        Node { value: NodeValue::State(state), children }
    }

    pub(crate) fn terminal(token: Token, end: usize) -> Node {
        Node { value: NodeValue::Terminal { token, end }, children: vec![] }
    }

    pub fn value(&self) -> &NodeValue { &self.value }
    pub fn children(&self) -> &[Node] { &self.children }

    pub fn state(&self) -> Option<&TableState> {
        match &self.value {
            NodeValue::State(state) => Some(state),
            NodeValue::Terminal { .. } => None,
        }
    }

    /// The semantic action of the rule body this node instantiates, if any.
    pub fn action(&self) -> Option<&Action> {
        match &self.value {
            NodeValue::State(TableState { kind: StateKind::Rule(body), .. }) => body.action.as_ref(),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match &self.value {
            NodeValue::State(state) => &state.name,
            NodeValue::Terminal { token, .. } => &token.text,
        }
    }

    /// Chart positions `(start, end)` covered by this node.
    pub fn span(&self) -> (usize, usize) {
        match &self.value {
            NodeValue::State(state) => (state.start, state.end),
            NodeValue::Terminal { end, .. } => (end - 1, *end),
        }
    }
}

#[cfg(test)]
#[path = "tests/node.rs"]
mod tests_for_node;
