//! Bottom-up tree walker.

use tracing::{trace, warn};

use crate::error::TransformResult;
use crate::node::NodeRef;

use super::catalog::RuleCatalog;
use super::context::{RuleContext, TransformContext};
use super::result::RewriteOutcome;

/// Walks a tree once, post-order, applying the catalog at every node.
///
/// Children are rewritten before their parent, so parent rules always see
/// their children in final form.
pub struct TreeWalker<'a> {
    transform: &'a TransformContext<'a>,
    catalog: &'a RuleCatalog,
    ancestors: Vec<NodeRef>,
    depth: usize,
    changes: usize,
}

impl<'a> TreeWalker<'a> {
    pub fn new(transform: &'a TransformContext<'a>, catalog: &'a RuleCatalog) -> Self {
        Self::nested(transform, catalog, Vec::new(), 0)
    }

    pub(super) fn nested(
        transform: &'a TransformContext<'a>,
        catalog: &'a RuleCatalog,
        ancestors: Vec<NodeRef>,
        depth: usize,
    ) -> Self {
        Self {
            transform,
            catalog,
            ancestors,
            depth,
            changes: 0,
        }
    }

    /// Number of nodes a rule changed so far.
    pub fn changes(&self) -> usize {
        self.changes
    }

    /// Rewrite a whole tree rooted at `root`.
    ///
    /// The root must rewrite to a single node; a root deletion or splice is
    /// ignored.
    pub fn walk(&mut self, root: &NodeRef) -> TransformResult<NodeRef> {
        match self.rewrite(root)? {
            RewriteOutcome::Unchanged => Ok(root.clone()),
            RewriteOutcome::Replaced(node) => Ok(node),
            RewriteOutcome::Deleted | RewriteOutcome::Spliced(_) => {
                warn!(kind = %root.kind(), "root cannot be deleted or spliced, keeping it");
                Ok(root.clone())
            }
        }
    }

    /// Rewrite one subtree and report how its slot should change.
    pub fn rewrite(&mut self, node: &NodeRef) -> TransformResult<RewriteOutcome> {
        trace!(kind = %node.kind(), depth = self.ancestors.len(), "visit");

        self.ancestors.push(node.clone());
        let rebuilt = node.try_map_children(&mut |child| self.rewrite(child));
        self.ancestors.pop();

        let (current, children_changed) = match rebuilt? {
            Some(node) => (node.into_ref(), true),
            None => (node.clone(), false),
        };

        let cx = RuleContext {
            transform: self.transform,
            catalog: self.catalog,
            ancestors: &self.ancestors,
            depth: self.depth,
        };
        let outcome = self.catalog.apply(&current, &cx)?;
        if outcome.is_changed() {
            self.changes += 1;
        }

        Ok(match outcome {
            RewriteOutcome::Unchanged if children_changed => RewriteOutcome::Replaced(current),
            outcome => outcome,
        })
    }
}
