//! Variable binding rules.

use typelower_syntax::rewrite::{RewriteOutcome, RewriteRule, RuleContext};
use typelower_syntax::{BindingKind, Keyword, NodeData, NodeRef, PrefixOperator, TransformResult};

use super::{literal_keyword, literal_type_keyword};

/// Binding lists without `let` or `const` get `let`.
pub struct NormalizeMutability;

impl RewriteRule for NormalizeMutability {
    fn rewrite(&self, node: &NodeRef, _cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
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

/// Gives typed bindings a general type and drops their initializer.
///
/// | Binding                                      | Type      |
/// |----------------------------------------------|-----------|
/// | boolean literal or logical/comparison value  | `boolean` |
/// | `const` with a bigint literal                | `bigint`  |
/// | `let` with a numeric or string literal       | `number` / `string` |
/// | annotated with a boolean literal type        | `boolean` |
/// | annotated with a string literal type         | `string`  |
/// | `const` annotated with a bigint literal type | `bigint`  |
///
/// Only lists already carrying `let` or `const` are touched.
pub struct NarrowBindingInitializers;

impl NarrowBindingInitializers {
    fn narrowed_type(
        binding: BindingKind,
        ty: Option<&NodeRef>,
        init: Option<&NodeRef>,
    ) -> Option<Keyword> {
        if let Some(ty) = ty {
            return match literal_type_keyword(ty)? {
                Keyword::Boolean => Some(Keyword::Boolean),
                Keyword::String => Some(Keyword::String),
                Keyword::BigInt if binding == BindingKind::Const => Some(Keyword::BigInt),
                _ => None,
            };
        }

        let init = init?;
        match &init.data {
            NodeData::Binary { operator, .. } if operator.is_logical_or_comparison() => {
                return Some(Keyword::Boolean);
            }
            NodeData::PrefixUnary {
                operator: PrefixOperator::Not,
                ..
            } => return Some(Keyword::Boolean),
            _ => {}
        }
        match (literal_keyword(init)?, binding) {
            (Keyword::Boolean, _) => Some(Keyword::Boolean),
            (Keyword::BigInt, BindingKind::Const) => Some(Keyword::BigInt),
            (Keyword::Number | Keyword::String, BindingKind::Let) => literal_keyword(init),
            _ => None,
        }
    }
}

impl RewriteRule for NarrowBindingInitializers {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::VariableDeclarationList {
            binding,
            declarations,
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        if *binding == BindingKind::Var {
            return Ok(RewriteOutcome::Unchanged);
        }

        let mut changed = false;
        let narrowed = declarations
            .iter()
            .map(|decl| {
                let NodeData::VariableDeclaration {
                    name,
                    ty,
                    initializer,
                } = &decl.data
                else {
                    return decl.clone();
                };
                match Self::narrowed_type(*binding, ty.as_ref(), initializer.as_ref()) {
                    Some(keyword) => {
                        changed = true;
                        decl.with_data(NodeData::VariableDeclaration {
                            name: name.clone(),
                            ty: Some(cx.factory().keyword(keyword)),
                            initializer: None,
                        })
                        .into_ref()
                    }
                    None => decl.clone(),
                }
            })
            .collect();

        if !changed {
            return Ok(RewriteOutcome::Unchanged);
        }
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::VariableDeclarationList {
                binding: *binding,
                declarations: narrowed,
            })
            .into_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use typelower_syntax::build::*;
    use typelower_syntax::{BinaryOperator, BindingKind, Node, NodeData};

    use crate::rules::test_util::rewrite;

    fn comparison() -> typelower_syntax::NodeRef {
        Node::new(NodeData::Binary {
            left: ident("a"),
            operator: BinaryOperator::Lt,
            right: number("2"),
        })
        .into_ref()
    }

    #[test]
    fn unqualified_bindings_become_let() {
        let stmt = variable_statement(BindingKind::Var, vec![variable("x", None, None)]);
        assert_eq!(rewrite(&stmt), "let x;");
    }

    #[test]
    fn const_bindings_keep_their_qualifier() {
        let stmt = variable_statement(
            BindingKind::Const,
            vec![variable("x", None, Some(number("1")))],
        );
        assert_eq!(rewrite(&stmt), "const x = 1;");
    }

    #[test]
    fn mutability_is_normalized_before_narrowing() {
        let stmt = variable_statement(
            BindingKind::Var,
            vec![
                variable("x", None, Some(number("1"))),
                variable("s", None, Some(string("a"))),
                variable("ok", None, Some(comparison())),
            ],
        );
        assert_eq!(rewrite(&stmt), "let x: number, s: string, ok: boolean;");
    }

    #[test]
    fn const_bigint_and_boolean_initializers() {
        let stmt = variable_statement(
            BindingKind::Const,
            vec![
                variable("big", None, Some(bigint("10"))),
                variable("flag", None, Some(boolean(false))),
                variable("name", None, Some(string("n"))),
            ],
        );
        assert_eq!(
            rewrite(&stmt),
            r#"const big: bigint, flag: boolean, name = "n";"#
        );
    }

    #[test]
    fn literal_annotations_are_widened() {
        let stmt = variable_statement(
            BindingKind::Const,
            vec![
                variable("t", Some(literal_type(boolean(true))), None),
                variable("s", Some(literal_type(string("x"))), None),
                variable("n", Some(literal_type(bigint("1"))), None),
            ],
        );
        assert_eq!(rewrite(&stmt), "const t: boolean, s: string, n: bigint;");
    }
}
