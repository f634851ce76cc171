//! Rewrite outcome types.
//!
//! Defines the possible outcomes of applying a rule to a node.

use crate::node::NodeRef;

/// Result of applying a rewrite rule to a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The rule did not match or decided not to transform the node.
    Unchanged,

    /// Replace the node with a single new node.
    Replaced(NodeRef),

    /// Remove the node. Only list slots can drop a node; optional slots
    /// become empty and required slots keep the original.
    Deleted,

    /// Replace the node with several nodes, spliced into the parent list.
    Spliced(Vec<NodeRef>),
}

impl RewriteOutcome {
    /// Check if this outcome represents a change.
    pub fn is_changed(&self) -> bool {
        !matches!(self, RewriteOutcome::Unchanged)
    }

    /// Nodes that take the place of `original` in a list slot.
    pub fn into_nodes(self, original: &NodeRef) -> Vec<NodeRef> {
        match self {
            RewriteOutcome::Unchanged => vec![original.clone()],
            RewriteOutcome::Replaced(node) => vec![node],
            RewriteOutcome::Deleted => Vec::new(),
            RewriteOutcome::Spliced(nodes) => nodes,
        }
    }

    /// Collapse a node list back into the narrowest outcome.
    pub fn from_nodes(mut nodes: Vec<NodeRef>) -> Self {
        match nodes.len() {
            0 => RewriteOutcome::Deleted,
            1 => RewriteOutcome::Replaced(nodes.remove(0)),
            _ => RewriteOutcome::Spliced(nodes),
        }
    }
}
