//! Kind-indexed rule catalog.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::TransformResult;
use crate::kind::SyntaxKind;
use crate::node::{Node, NodeRef};

use super::context::RuleContext;
use super::result::RewriteOutcome;
use super::rule::RewriteRule;

/// Maps each node kind to the ordered rules that apply to it.
///
/// Kinds without an entry pass through unchanged.
#[derive(Clone, Default)]
pub struct RuleCatalog {
    rules: HashMap<SyntaxKind, Vec<Arc<dyn RewriteRule>>>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to the list for `kind`.
    pub fn with_rule<R>(self, kind: SyntaxKind, rule: R) -> Self
    where
        R: RewriteRule + 'static,
    {
        self.with_rule_for(&[kind], rule)
    }

    /// Append one rule instance to the lists of several kinds.
    pub fn with_rule_for<R>(mut self, kinds: &[SyntaxKind], rule: R) -> Self
    where
        R: RewriteRule + 'static,
    {
        let rule: Arc<dyn RewriteRule> = Arc::new(rule);
        for kind in kinds {
            self.rules.entry(*kind).or_default().push(rule.clone());
        }
        self
    }

    /// Rules registered for a kind, in application order.
    pub fn rules_for(&self, kind: SyntaxKind) -> &[Arc<dyn RewriteRule>] {
        self.rules.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Rules applicable to `node`.
    pub fn dispatch(&self, node: &Node) -> &[Arc<dyn RewriteRule>] {
        self.rules_for(node.kind())
    }

    /// Run every rule for the node's kind over the cumulative result.
    ///
    /// Each rule sees the output of the rule before it. Once a rule splices
    /// or replaces the node with a different kind, later rules only see the
    /// nodes that still have the original kind.
    pub fn apply(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let kind = node.kind();
        let rules = self.rules_for(kind);
        if rules.is_empty() {
            return Ok(RewriteOutcome::Unchanged);
        }

        let mut current = vec![node.clone()];
        let mut changed = false;
        for rule in rules {
            let mut next = Vec::with_capacity(current.len());
            for item in current {
                if item.kind() != kind {
                    next.push(item);
                    continue;
                }
                let outcome = rule.rewrite(&item, cx)?;
                if outcome.is_changed() {
                    debug!(rule = rule.name(), %kind, "rule fired");
                    changed = true;
                }
                next.extend(outcome.into_nodes(&item));
            }
            current = next;
        }

        if !changed || matches!(current.as_slice(), [only] if Arc::ptr_eq(only, node)) {
            return Ok(RewriteOutcome::Unchanged);
        }
        Ok(RewriteOutcome::from_nodes(current))
    }
}
