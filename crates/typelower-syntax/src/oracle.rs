//! Type-resolution oracle interface.
//!
//! The host front end owns type checking. The rewriter only asks two
//! questions: what type does this node have, and what syntax spells that
//! type. Either answer may be missing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::location::Span;
use crate::node::{Node, NodeRef};

/// Opaque handle to a type known to the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemanticType(pub u32);

/// Read-only type resolution service.
pub trait TypeOracle {
    /// Resolve the semantic type of a node, or `None` if unresolved.
    fn resolve_type(&self, node: &Node) -> Option<SemanticType>;

    /// Materialize a semantic type as a syntax subtree.
    fn materialize(&self, ty: SemanticType) -> Option<NodeRef>;
}

/// An oracle that never resolves anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOracle;

impl TypeOracle for NoOracle {
    fn resolve_type(&self, _node: &Node) -> Option<SemanticType> {
        None
    }

    fn materialize(&self, _ty: SemanticType) -> Option<NodeRef> {
        None
    }
}

/// Oracle backed by lookup tables, keyed by source span.
///
/// Front ends that precompute their answers can ship them in this form.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TableOracle {
    types: HashMap<Span, SemanticType>,
    nodes: HashMap<SemanticType, NodeRef>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the node at `span` has type `ty`.
    pub fn with_type(mut self, span: Span, ty: SemanticType) -> Self {
        self.types.insert(span, ty);
        self
    }

    /// Record the syntax for `ty`.
    pub fn with_materialized(mut self, ty: SemanticType, node: NodeRef) -> Self {
        self.nodes.insert(ty, node);
        self
    }
}

impl TypeOracle for TableOracle {
    fn resolve_type(&self, node: &Node) -> Option<SemanticType> {
        self.types.get(&node.span?).copied()
    }

    fn materialize(&self, ty: SemanticType) -> Option<NodeRef> {
        self.nodes.get(&ty).cloned()
    }
}
