//! Oracle-backed resolution of indexed access and type queries.

use tracing::{debug, warn};
use typelower_syntax::rewrite::{RewriteOutcome, RewriteRule, RuleContext};
use typelower_syntax::{NodeRef, TransformResult};

/// `T["k"]` and `typeof x` are replaced by the type the oracle resolves
/// them to, and the materialized node goes through the catalog again.
///
/// An unresolved node is left as is.
pub struct OracleResolution;

impl RewriteRule for OracleResolution {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let oracle = cx.oracle();
        let Some(ty) = oracle.resolve_type(node) else {
            debug!(kind = %node.kind(), span = ?node.span, "oracle could not resolve type");
            return Ok(RewriteOutcome::Unchanged);
        };
        let Some(materialized) = oracle.materialize(ty) else {
            warn!(kind = %node.kind(), ty = ty.0, "oracle resolved a type it cannot materialize");
            return Ok(RewriteOutcome::Unchanged);
        };
        Ok(RewriteOutcome::Replaced(cx.redispatch(materialized)?))
    }
}
