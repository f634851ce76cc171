//! Contexts handed to rewrite rules.

use tracing::warn;

use crate::error::TransformResult;
use crate::factory::NodeFactory;
use crate::node::NodeRef;
use crate::oracle::TypeOracle;

use super::catalog::RuleCatalog;
use super::result::RewriteOutcome;
use super::walker::TreeWalker;

/// Per-file transformation state shared by every rule invocation.
pub struct TransformContext<'a> {
    oracle: &'a dyn TypeOracle,
    factory: NodeFactory,
    max_redispatch_depth: usize,
}

impl<'a> TransformContext<'a> {
    pub fn new(oracle: &'a dyn TypeOracle, factory: NodeFactory) -> Self {
        Self {
            oracle,
            factory,
            max_redispatch_depth: 8,
        }
    }

    /// Bound the nesting of oracle-materialized subtrees.
    pub fn with_max_redispatch_depth(mut self, depth: usize) -> Self {
        self.max_redispatch_depth = depth;
        self
    }

    pub fn oracle(&self) -> &'a dyn TypeOracle {
        self.oracle
    }

    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    pub fn max_redispatch_depth(&self) -> usize {
        self.max_redispatch_depth
    }
}

/// What a rule can see while rewriting one node.
pub struct RuleContext<'a> {
    pub(super) transform: &'a TransformContext<'a>,
    pub(super) catalog: &'a RuleCatalog,
    /// Enclosing nodes as they were before rewriting, nearest last.
    pub(super) ancestors: &'a [NodeRef],
    pub(super) depth: usize,
}

impl<'a> RuleContext<'a> {
    pub fn factory(&self) -> &NodeFactory {
        self.transform.factory()
    }

    pub fn oracle(&self) -> &'a dyn TypeOracle {
        self.transform.oracle()
    }

    /// The directly enclosing node.
    pub fn parent(&self) -> Option<&NodeRef> {
        self.ancestors.last()
    }

    /// Enclosing nodes from the nearest outwards.
    pub fn ancestors(&self) -> impl Iterator<Item = &NodeRef> {
        self.ancestors.iter().rev()
    }

    /// Run `node` through the same catalog as if it stood at the current
    /// position. Used for subtrees materialized by the oracle.
    ///
    /// Past the configured depth the node is returned as is.
    pub fn redispatch(&self, node: NodeRef) -> TransformResult<NodeRef> {
        if self.depth >= self.transform.max_redispatch_depth() {
            warn!(
                kind = %node.kind(),
                depth = self.depth,
                "re-dispatch depth exhausted, keeping materialized node"
            );
            return Ok(node);
        }
        let mut walker = TreeWalker::nested(
            self.transform,
            self.catalog,
            self.ancestors.to_vec(),
            self.depth + 1,
        );
        match walker.rewrite(&node)? {
            RewriteOutcome::Unchanged => Ok(node),
            RewriteOutcome::Replaced(new) => Ok(new),
            RewriteOutcome::Deleted | RewriteOutcome::Spliced(_) => {
                warn!(kind = %node.kind(), "materialized node did not rewrite to a single node");
                Ok(node)
            }
        }
    }
}
