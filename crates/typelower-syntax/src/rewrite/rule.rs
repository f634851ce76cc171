//! Rewrite rule trait.

use crate::error::TransformResult;
use crate::node::NodeRef;

use super::context::RuleContext;
use super::result::RewriteOutcome;

/// A rule that can match and transform nodes of the kinds it is
/// registered for.
///
/// Rules are pure: the same node and context always give the same outcome.
/// A rule whose precondition does not hold returns
/// [`RewriteOutcome::Unchanged`] rather than an error; errors are reserved
/// for input the rewriter cannot reduce at all.
pub trait RewriteRule {
    /// Attempt to rewrite a node.
    ///
    /// The node's children have already been rewritten.
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome>;

    /// Optional: return a human-readable name for debugging.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
