//! Rule-dispatched rewriting infrastructure.
//!
//! # Overview
//!
//! - [`RewriteRule`]: a pure node-to-outcome function
//! - [`RuleCatalog`]: ordered rules per [`SyntaxKind`](crate::SyntaxKind)
//! - [`TreeWalker`]: single post-order pass applying the catalog
//! - [`TransformContext`] / [`RuleContext`]: oracle, factory, and the
//!   ancestor chain a rule may consult
//!
//! # Usage
//!
//! ```
//! use typelower_syntax::rewrite::{
//!     RewriteOutcome, RewriteRule, RuleCatalog, RuleContext, TransformContext, TreeWalker,
//! };
//! use typelower_syntax::{Keyword, NoOracle, Node, NodeData, NodeFactory, NodeRef, SyntaxKind};
//! use typelower_syntax::TransformResult;
//!
//! struct AnyToSentinel;
//!
//! impl RewriteRule for AnyToSentinel {
//!     fn rewrite(
//!         &self,
//!         _node: &NodeRef,
//!         cx: &RuleContext<'_>,
//!     ) -> TransformResult<RewriteOutcome> {
//!         Ok(RewriteOutcome::Replaced(cx.factory().sentinel()))
//!     }
//! }
//!
//! let catalog = RuleCatalog::new().with_rule(SyntaxKind::AnyKeyword, AnyToSentinel);
//! let cx = TransformContext::new(&NoOracle, NodeFactory::default());
//! let ty = Node::new(NodeData::ArrayType {
//!     element: Node::new(NodeData::Keyword(Keyword::Any)).into_ref(),
//! })
//! .into_ref();
//!
//! let out = TreeWalker::new(&cx, &catalog).walk(&ty).unwrap();
//! assert_eq!(out.to_string(), "JSValue[]");
//! ```

mod catalog;
mod context;
mod result;
mod rule;
mod walker;

pub use catalog::RuleCatalog;
pub use context::{RuleContext, TransformContext};
pub use result::RewriteOutcome;
pub use rule::RewriteRule;
pub use walker::TreeWalker;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformResult;
    use crate::factory::NodeFactory;
    use crate::kind::SyntaxKind;
    use crate::node::{
        BindingKind, BindingName, EntityName, Keyword, Literal, Node, NodeData, NodeRef,
    };
    use crate::oracle::{NoOracle, SemanticType, TableOracle};
    use crate::location::Span;
    use crate::printer::print;

    fn node(data: NodeData) -> NodeRef {
        Node::new(data).into_ref()
    }

    struct AnyToSentinel;

    impl RewriteRule for AnyToSentinel {
        fn rewrite(
            &self,
            _node: &NodeRef,
            cx: &RuleContext<'_>,
        ) -> TransformResult<RewriteOutcome> {
            Ok(RewriteOutcome::Replaced(cx.factory().sentinel()))
        }
    }

    /// Turns `var` into `let`.
    struct VarToLet;

    impl RewriteRule for VarToLet {
        fn rewrite(
            &self,
            node: &NodeRef,
            _cx: &RuleContext<'_>,
        ) -> TransformResult<RewriteOutcome> {
            let NodeData::VariableDeclarationList {
                binding: BindingKind::Var,
                declarations,
            } = &node.data
            else {
                return Ok(RewriteOutcome::Unchanged);
            };
            Ok(RewriteOutcome::Replaced(
                node.with_data(NodeData::VariableDeclarationList {
                    binding: BindingKind::Let,
                    declarations: declarations.clone(),
                })
                .into_ref(),
            ))
        }
    }

    /// Records the binding kind it saw by renaming every binding to it.
    struct StampBindingKind;

    impl RewriteRule for StampBindingKind {
        fn rewrite(
            &self,
            node: &NodeRef,
            _cx: &RuleContext<'_>,
        ) -> TransformResult<RewriteOutcome> {
            let NodeData::VariableDeclarationList {
                binding,
                declarations,
            } = &node.data
            else {
                return Ok(RewriteOutcome::Unchanged);
            };
            let stamped = declarations
                .iter()
                .map(|decl| match &decl.data {
                    NodeData::VariableDeclaration {
                        ty, initializer, ..
                    } => decl
                        .with_data(NodeData::VariableDeclaration {
                            name: BindingName::ident(binding.as_str()),
                            ty: ty.clone(),
                            initializer: initializer.clone(),
                        })
                        .into_ref(),
                    _ => decl.clone(),
                })
                .collect();
            Ok(RewriteOutcome::Replaced(
                node.with_data(NodeData::VariableDeclarationList {
                    binding: *binding,
                    declarations: stamped,
                })
                .into_ref(),
            ))
        }
    }

    /// Resolves `this` through the oracle and re-dispatches the result.
    struct ResolveThis;

    impl RewriteRule for ResolveThis {
        fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
            let Some(materialized) = cx
                .oracle()
                .resolve_type(node)
                .and_then(|ty| cx.oracle().materialize(ty))
            else {
                return Ok(RewriteOutcome::Unchanged);
            };
            Ok(RewriteOutcome::Replaced(cx.redispatch(materialized)?))
        }
    }

    fn var_list() -> NodeRef {
        node(NodeData::VariableDeclarationList {
            binding: BindingKind::Var,
            declarations: vec![node(NodeData::VariableDeclaration {
                name: BindingName::ident("x"),
                ty: None,
                initializer: Some(node(NodeData::Literal(Literal::Numeric("1".to_owned())))),
            })],
        })
    }

    #[test]
    fn unregistered_kinds_pass_through() {
        let cx = TransformContext::new(&NoOracle, NodeFactory::default());
        let catalog = RuleCatalog::new();
        let list = var_list();

        let mut walker = TreeWalker::new(&cx, &catalog);
        let out = walker.walk(&list).unwrap();
        assert!(std::sync::Arc::ptr_eq(&out, &list));
        assert_eq!(walker.changes(), 0);
        assert!(catalog.dispatch(&list).is_empty());
    }

    #[test]
    fn rules_apply_to_the_cumulative_result() {
        let cx = TransformContext::new(&NoOracle, NodeFactory::default());
        let catalog = RuleCatalog::new()
            .with_rule(SyntaxKind::VariableDeclarationList, VarToLet)
            .with_rule(SyntaxKind::VariableDeclarationList, StampBindingKind);

        let out = TreeWalker::new(&cx, &catalog).walk(&var_list()).unwrap();
        assert_eq!(print(&out), "let let = 1");
    }

    #[test]
    fn children_are_rewritten_before_parents() {
        let f = NodeFactory::default();
        let cx = TransformContext::new(&NoOracle, f.clone());
        let catalog = RuleCatalog::new().with_rule(SyntaxKind::AnyKeyword, AnyToSentinel);
        let ty = f.union(vec![
            f.array(f.keyword(Keyword::Any)),
            f.type_reference(EntityName::simple("Map"), vec![f.keyword(Keyword::Any)]),
        ]);

        let mut walker = TreeWalker::new(&cx, &catalog);
        let out = walker.walk(&ty).unwrap();
        assert_eq!(print(&out), "JSValue[] | Map<JSValue>");
        assert_eq!(walker.changes(), 2);
    }

    #[test]
    fn redispatch_runs_materialized_nodes_through_the_catalog() {
        let f = NodeFactory::default();
        let oracle = TableOracle::new()
            .with_type(Span::new(10, 14), SemanticType(7))
            .with_materialized(SemanticType(7), f.array(f.keyword(Keyword::Any)));
        let cx = TransformContext::new(&oracle, f.clone());
        let catalog = RuleCatalog::new()
            .with_rule(SyntaxKind::AnyKeyword, AnyToSentinel)
            .with_rule(SyntaxKind::ThisType, ResolveThis);

        let this = Node::spanned(NodeData::ThisType, Span::new(10, 14)).into_ref();
        let out = TreeWalker::new(&cx, &catalog).walk(&this).unwrap();
        assert_eq!(print(&out), "JSValue[]");
    }

    #[test]
    fn redispatch_stops_at_the_depth_limit() {
        let f = NodeFactory::default();
        // `this` materializes to another spanned `this` with the same type.
        let looping = Node::spanned(NodeData::ThisType, Span::new(0, 4)).into_ref();
        let oracle = TableOracle::new()
            .with_type(Span::new(0, 4), SemanticType(1))
            .with_materialized(SemanticType(1), looping.clone());
        let cx = TransformContext::new(&oracle, f).with_max_redispatch_depth(3);
        let catalog = RuleCatalog::new().with_rule(SyntaxKind::ThisType, ResolveThis);

        let out = TreeWalker::new(&cx, &catalog).walk(&looping).unwrap();
        assert_eq!(out.kind(), SyntaxKind::ThisType);
    }
}
