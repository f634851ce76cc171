//! Literal type narrowing.
//!
//! Two independent preconditions decide when a literal type is widened to
//! its general type. A bare numeric literal type is always widened. Boolean
//! and bigint literal types are only widened where a declaration pins them
//! down: a binding, a property, or a type parameter bound.

use typelower_syntax::rewrite::{RewriteOutcome, RewriteRule, RuleContext};
use typelower_syntax::{Keyword, Literal, NodeData, NodeRef, TransformResult};

use super::literal_type_keyword;

/// `1` and `-1` in type position become `number`.
pub struct NumericLiteralType;

impl RewriteRule for NumericLiteralType {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        if literal_type_keyword(node) != Some(Keyword::Number) {
            return Ok(RewriteOutcome::Unchanged);
        }
        Ok(RewriteOutcome::Replaced(cx.factory().keyword(Keyword::Number)))
    }
}

/// `type A = "x"` becomes `type A = string`.
pub struct StringLiteralAlias;

impl RewriteRule for StringLiteralAlias {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::TypeAliasDeclaration {
            modifiers,
            name,
            type_params,
            ty,
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        if literal_type_keyword(ty) != Some(Keyword::String) {
            return Ok(RewriteOutcome::Unchanged);
        }
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::TypeAliasDeclaration {
                modifiers: modifiers.clone(),
                name: name.clone(),
                type_params: type_params.clone(),
                ty: cx.factory().keyword(Keyword::String),
            })
            .into_ref(),
        ))
    }
}

/// Widens boolean literals in a type parameter's constraint and default,
/// either standing alone or as union members.
pub struct TypeParameterLiteralWidening;

impl TypeParameterLiteralWidening {
    fn widen(ty: &NodeRef, cx: &RuleContext<'_>) -> Option<NodeRef> {
        let factory = cx.factory();
        match &ty.data {
            NodeData::LiteralType { literal } => match &literal.data {
                NodeData::Literal(Literal::True | Literal::False) => {
                    Some(factory.keyword(Keyword::Boolean))
                }
                _ => None,
            },
            NodeData::UnionType { types } => {
                let mut changed = false;
                let widened = types
                    .iter()
                    .map(|member| match Self::widen(member, cx) {
                        Some(new) => {
                            changed = true;
                            new
                        }
                        None => member.clone(),
                    })
                    .collect();
                changed.then(|| factory.union(widened))
            }
            _ => None,
        }
    }
}

impl RewriteRule for TypeParameterLiteralWidening {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::TypeParameter {
            name,
            constraint,
            default,
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        let new_constraint = constraint.as_ref().and_then(|c| Self::widen(c, cx));
        let new_default = default.as_ref().and_then(|d| Self::widen(d, cx));
        if new_constraint.is_none() && new_default.is_none() {
            return Ok(RewriteOutcome::Unchanged);
        }
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::TypeParameter {
                name: name.clone(),
                constraint: new_constraint.or_else(|| constraint.clone()),
                default: new_default.or_else(|| default.clone()),
            })
            .into_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use typelower_syntax::build::*;
    use typelower_syntax::{Keyword, NodeData, PrefixOperator};

    use crate::rules::test_util::rewrite;

    #[test]
    fn bare_numeric_literal_types_become_number() {
        let negative = typelower_syntax::Node::new(NodeData::PrefixUnary {
            operator: PrefixOperator::Minus,
            operand: number("1"),
        })
        .into_ref();
        let ty = union(vec![
            literal_type(number("0x10")),
            literal_type(negative),
            literal_type(boolean(true)),
            literal_type(string("a")),
        ]);
        assert_eq!(rewrite(&ty), r#"number | number | true | "a""#);
    }

    #[test]
    fn string_literal_alias_becomes_string() {
        let alias = type_alias("Mode", literal_type(string("fast")));
        assert_eq!(rewrite(&alias), "type Mode = string;");

        let alias = type_alias(
            "Modes",
            union(vec![literal_type(string("a")), literal_type(string("b"))]),
        );
        assert_eq!(rewrite(&alias), r#"type Modes = "a" | "b";"#);
    }

    #[test]
    fn type_parameter_bounds_are_widened() {
        let tp = type_param(
            "T",
            Some(union(vec![
                literal_type(number("1")),
                literal_type(boolean(true)),
                literal_type(string("a")),
            ])),
            Some(literal_type(boolean(false))),
        );
        assert_eq!(rewrite(&tp), r#"T extends number | boolean | "a" = boolean"#);
    }

    #[test]
    fn unbounded_type_parameters_are_untouched() {
        let tp = type_param("T", None, Some(keyword(Keyword::String)));
        assert_eq!(rewrite(&tp), "T = string");
    }
}
