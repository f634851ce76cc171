//! Sentinel substitution.
//!
//! # Overview
//!
//! After imports are reorganized, names bound by restricted imports no
//! longer resolve. Every type reference whose leftmost identifier is such a
//! name becomes the sentinel, however deeply it is nested. A restricted
//! base in an `extends` or `implements` clause is removed instead, since a
//! declaration cannot inherit from the sentinel.
//!
//! Local type aliases whose body is the sentinel are resolved the same way,
//! so `type S = { a: number }` reduced to `type S = JSValue` by the rule
//! walk leaves no `S` in signatures.
//!
//! # Usage
//!
//! ```
//! use typelower_passes::{AliasEntry, AliasTable, substitute_sentinels};
//! use typelower_syntax::build::*;
//! use typelower_syntax::rewrite::TransformContext;
//! use typelower_syntax::{NoOracle, NodeFactory, print};
//!
//! let mut aliases = AliasTable::new();
//! aliases.insert(AliasEntry {
//!     local_name: "Want".to_owned(),
//!     original_name: "Want".to_owned(),
//!     is_restricted: true,
//! });
//! let file = source_file(vec![function("start", vec![param("w", type_ref("Want"))], None)]);
//!
//! let cx = TransformContext::new(&NoOracle, NodeFactory::default());
//! let out = substitute_sentinels(&cx, &file, &aliases).unwrap();
//! assert_eq!(print(&out), "function start(w: JSValue);\n");
//! ```

use std::collections::HashSet;

use tracing::debug;
use typelower_syntax::rewrite::{
    RewriteOutcome, RewriteRule, RuleCatalog, RuleContext, TransformContext, TreeWalker,
};
use typelower_syntax::{NodeData, NodeFactory, NodeRef, SyntaxKind, TransformResult};

use crate::imports::AliasTable;
use crate::rules::type_params_of;

/// Rewrites references rooted at one of `names`.
struct SentinelReference {
    names: HashSet<String>,
}

impl SentinelReference {
    /// Whether an enclosing declaration binds `name` as a type parameter.
    fn is_shadowed(name: &str, cx: &RuleContext<'_>) -> bool {
        cx.ancestors().any(|ancestor| {
            type_params_of(ancestor).iter().any(|tp| {
                matches!(&tp.data, NodeData::TypeParameter { name: bound, .. } if bound == name)
            })
        })
    }
}

impl RewriteRule for SentinelReference {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let root = match &node.data {
            NodeData::TypeReference { name, .. } | NodeData::TypeQuery { name } => name.root(),
            _ => return Ok(RewriteOutcome::Unchanged),
        };
        if !self.names.contains(root)
            || cx.factory().is_sentinel(node)
            || Self::is_shadowed(root, cx)
        {
            return Ok(RewriteOutcome::Unchanged);
        }

        let is_heritage = cx.parent().is_some_and(|parent| {
            matches!(
                parent.kind(),
                SyntaxKind::ClassDeclaration | SyntaxKind::InterfaceDeclaration
            )
        });
        if is_heritage {
            debug!(name = root, "removing restricted heritage entry");
            return Ok(RewriteOutcome::Deleted);
        }
        Ok(RewriteOutcome::Replaced(cx.factory().sentinel()))
    }
}

/// Names of top-level, non-generic type aliases that reduce to the
/// sentinel, directly or through other such aliases or restricted names.
fn sentinel_aliases(
    statements: &[NodeRef],
    factory: &NodeFactory,
    mut names: HashSet<String>,
) -> HashSet<String> {
    loop {
        let before = names.len();
        for stmt in statements {
            let NodeData::TypeAliasDeclaration {
                name,
                type_params,
                ty,
                ..
            } = &stmt.data
            else {
                continue;
            };
            if !type_params.is_empty() || names.contains(name) {
                continue;
            }
            let reduces = factory.is_sentinel(ty)
                || matches!(&ty.data, NodeData::TypeReference { name: target, type_args }
                    if type_args.is_empty() && names.contains(target.root()));
            if reduces {
                names.insert(name.clone());
            }
        }
        if names.len() == before {
            return names;
        }
    }
}

/// Replace references to restricted imports and sentinel aliases.
pub fn substitute_sentinels(
    cx: &TransformContext<'_>,
    file: &NodeRef,
    aliases: &AliasTable,
) -> TransformResult<NodeRef> {
    let restricted = aliases.restricted_names().map(str::to_owned).collect();
    let statements = file.statements().unwrap_or_default();
    let mut names = sentinel_aliases(statements, cx.factory(), restricted);
    names.remove(cx.factory().sentinel_name());
    if names.is_empty() {
        return Ok(file.clone());
    }
    debug!(count = names.len(), "substituting sentinel references");

    let catalog = RuleCatalog::new().with_rule_for(
        &[SyntaxKind::TypeReference, SyntaxKind::TypeQuery],
        SentinelReference { names },
    );
    TreeWalker::new(cx, &catalog).walk(file)
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use typelower_syntax::build::*;
    use typelower_syntax::{Keyword, Node, NodeData, NoOracle, print};

    use super::*;
    use crate::imports::AliasEntry;

    fn restricted(names: &[&str]) -> AliasTable {
        let mut table = AliasTable::new();
        for name in names {
            table.insert(AliasEntry {
                local_name: (*name).to_owned(),
                original_name: (*name).to_owned(),
                is_restricted: true,
            });
        }
        table
    }

    fn substitute(file: &NodeRef, aliases: &AliasTable) -> String {
        let cx = TransformContext::new(&NoOracle, NodeFactory::default());
        print(&substitute_sentinels(&cx, file, aliases).unwrap())
    }

    #[test]
    fn nested_references_become_the_sentinel() {
        let file = source_file(vec![
            type_alias(
                "Handler",
                union(vec![
                    array(type_ref("Want")),
                    type_ref_with("Map", vec![keyword(Keyword::String), type_ref("ctx.Context")]),
                    keyword(Keyword::Number),
                ]),
            ),
            variable_statement(
                typelower_syntax::BindingKind::Let,
                vec![variable("w", Some(type_query("Want")), None)],
            ),
        ]);
        assert_snapshot!(substitute(&file, &restricted(&["Want", "ctx"])), @r"
        type Handler = JSValue[] | Map<string, JSValue> | number;
        let w: JSValue;
        ");
    }

    #[test]
    fn restricted_bases_are_removed() {
        let decl = Node::new(NodeData::ClassDeclaration {
            modifiers: Default::default(),
            name: Some("Page".to_owned()),
            type_params: vec![],
            extends: Some(type_ref("UIAbility")),
            implements: vec![
                type_ref("Serializable"),
                type_ref_with("Box", vec![type_ref("UIAbility")]),
            ],
            members: vec![],
        })
        .into_ref();
        let file = source_file(vec![decl]);
        assert_snapshot!(
            substitute(&file, &restricted(&["UIAbility", "Serializable"])),
            @"class Page implements Box<JSValue> {}"
        );
    }

    #[test]
    fn type_parameters_shadow_restricted_names() {
        let f = Node::new(NodeData::FunctionDeclaration {
            modifiers: Default::default(),
            generator: false,
            name: Some("id".to_owned()),
            type_params: vec![type_param("Want", None, None)],
            params: vec![param("w", type_ref("Want"))],
            ret: Some(type_ref("Want")),
        })
        .into_ref();
        let file = source_file(vec![f, function("g", vec![param("w", type_ref("Want"))], None)]);
        assert_snapshot!(substitute(&file, &restricted(&["Want"])), @r"
        function id<Want>(w: Want): Want;
        function g(w: JSValue);
        ");
    }

    #[test]
    fn sentinel_aliases_propagate_to_use_sites() {
        let file = source_file(vec![
            type_alias("S", type_ref("JSValue")),
            type_alias("T", type_ref("S")),
            function("f", vec![param("x", type_ref("S"))], Some(type_ref("T"))),
        ]);
        assert_snapshot!(substitute(&file, &AliasTable::new()), @r"
        type S = JSValue;
        type T = JSValue;
        function f(x: JSValue): JSValue;
        ");
    }

    #[test]
    fn files_without_candidates_are_untouched() {
        let file = source_file(vec![function("f", vec![param("x", type_ref("S"))], None)]);
        let cx = TransformContext::new(&NoOracle, NodeFactory::default());
        let out = substitute_sentinels(&cx, &file, &AliasTable::new()).unwrap();
        assert!(NodeRef::ptr_eq(&out, &file));
    }
}
