//! Class and interface member rules.

use typelower_syntax::rewrite::{RewriteOutcome, RewriteRule, RuleContext};
use typelower_syntax::{
    BindingName, Keyword, Literal, MemberName, Modifier, Modifiers, Node, NodeData, NodeRef,
    SyntaxKind, TransformResult,
};

use super::{literal_keyword, literal_type_keyword, params_of, with_params};

/// Deletes `private` and `#name` properties and methods.
///
/// Only the public surface of a declaration is observable, so private
/// members are dropped rather than rewritten.
pub struct PrivateMemberElision;

impl RewriteRule for PrivateMemberElision {
    fn rewrite(&self, node: &NodeRef, _cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let (modifiers, name) = match &node.data {
            NodeData::PropertyDeclaration {
                modifiers, name, ..
            }
            | NodeData::MethodDeclaration {
                modifiers, name, ..
            } => (modifiers, name),
            _ => return Ok(RewriteOutcome::Unchanged),
        };
        if modifiers.has(Modifier::Private) || matches!(name, MemberName::Private(_)) {
            return Ok(RewriteOutcome::Deleted);
        }
        Ok(RewriteOutcome::Unchanged)
    }
}

/// Properties may not carry initializers; a literal initializer becomes the
/// property's general type instead. Without an initializer, boolean and
/// bigint literal types are widened.
pub struct PropertyInitializerInference;

impl RewriteRule for PropertyInitializerInference {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::PropertyDeclaration {
            modifiers,
            name,
            question,
            ty,
            initializer,
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };

        let inferred = match (initializer, ty) {
            (Some(init), _) => literal_keyword(init),
            (None, Some(ty)) => match literal_type_keyword(ty) {
                Some(keyword @ (Keyword::Boolean | Keyword::BigInt)) => Some(keyword),
                _ => None,
            },
            (None, None) => None,
        };
        let Some(keyword) = inferred else {
            return Ok(RewriteOutcome::Unchanged);
        };

        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::PropertyDeclaration {
                modifiers: modifiers.clone(),
                name: name.clone(),
                question: *question,
                ty: Some(cx.factory().keyword(keyword)),
                initializer: None,
            })
            .into_ref(),
        ))
    }
}

/// `x?: T` becomes `x: T | null` when `T` is a value type.
///
/// Optionality in the target needs an explicit nullable union. Reference
/// types already admit `null` and are left alone; `number`, `boolean` and a
/// bare `null` are the value types.
pub struct OptionalWidening;

impl OptionalWidening {
    fn is_reference(ty: &Node) -> bool {
        match &ty.data {
            NodeData::Keyword(Keyword::Number | Keyword::Boolean) => false,
            NodeData::Literal(Literal::Null) => false,
            NodeData::LiteralType { literal } => {
                !matches!(literal.data, NodeData::Literal(Literal::Null))
            }
            _ => true,
        }
    }
}

impl RewriteRule for OptionalWidening {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let mut data = node.data.clone();
        let (question, ty) = match &mut data {
            NodeData::Parameter { question, ty, .. }
            | NodeData::PropertyDeclaration { question, ty, .. }
            | NodeData::PropertySignature { question, ty, .. } => (question, ty),
            _ => return Ok(RewriteOutcome::Unchanged),
        };
        let Some(current) = ty.as_ref() else {
            return Ok(RewriteOutcome::Unchanged);
        };
        if !*question || Self::is_reference(current) {
            return Ok(RewriteOutcome::Unchanged);
        }

        let widened = cx.factory().nullable(current.clone());
        *ty = Some(widened);
        *question = false;
        Ok(RewriteOutcome::Replaced(node.with_data(data).into_ref()))
    }
}

/// Index signatures directly inside a class are deleted.
pub struct ClassIndexSignatureElision;

impl RewriteRule for ClassIndexSignatureElision {
    fn rewrite(&self, _node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        match cx.parent() {
            Some(parent) if parent.kind() == SyntaxKind::ClassDeclaration => {
                Ok(RewriteOutcome::Deleted)
            }
            _ => Ok(RewriteOutcome::Unchanged),
        }
    }
}

/// Destructured object parameters become `args<i>: Sentinel`, where `i`
/// is the parameter's position.
pub struct ObjectBindingParameters;

impl RewriteRule for ObjectBindingParameters {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let Some(params) = params_of(node) else {
            return Ok(RewriteOutcome::Unchanged);
        };
        let is_object_pattern = |p: &NodeRef| {
            matches!(
                &p.data,
                NodeData::Parameter {
                    name: BindingName::ObjectPattern(_),
                    ..
                }
            )
        };
        if !params.iter().any(is_object_pattern) {
            return Ok(RewriteOutcome::Unchanged);
        }

        let rewritten = params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                if !is_object_pattern(param) {
                    return param.clone();
                }
                param
                    .with_data(NodeData::Parameter {
                        modifiers: Modifiers::new(),
                        rest: false,
                        name: BindingName::ident(format!("args{index}")),
                        question: false,
                        ty: Some(cx.factory().sentinel()),
                        initializer: None,
                    })
                    .into_ref()
            })
            .collect();
        Ok(RewriteOutcome::Replaced(with_params(node, rewritten).into_ref()))
    }
}

#[cfg(test)]
mod tests {
    use typelower_syntax::build::*;
    use typelower_syntax::{
        BindingName, Keyword, MemberName, Modifier, Modifiers, Node, NodeData, NodeRef,
    };

    use crate::rules::test_util::rewrite;

    fn private_field(name: MemberName, modifiers: Modifiers) -> NodeRef {
        Node::new(NodeData::PropertyDeclaration {
            modifiers,
            name,
            question: false,
            ty: Some(keyword(Keyword::Number)),
            initializer: None,
        })
        .into_ref()
    }

    #[test]
    fn private_members_are_deleted() {
        let decl = class(
            "A",
            vec![
                private_field(MemberName::ident("a"), Modifiers::from([Modifier::Private])),
                private_field(MemberName::Private("b".to_owned()), Modifiers::new()),
                with_modifiers(method("m", vec![], None), [Modifier::Private]),
                property("c", Some(keyword(Keyword::String)), None),
            ],
        );
        assert_eq!(rewrite(&decl), "class A {\n    c: string;\n}");
    }

    #[test]
    fn property_initializers_become_types() {
        let decl = class(
            "A",
            vec![
                with_modifiers(property("n", None, Some(number("1"))), [Modifier::Readonly]),
                property("b", None, Some(bigint("1"))),
                property("t", Some(literal_type(boolean(true))), None),
                property("e", None, Some(ident("other"))),
            ],
        );
        assert_eq!(
            rewrite(&decl),
            "class A {\n    readonly n: number;\n    b: bigint;\n    t: boolean;\n    e = other;\n}"
        );
    }

    #[test]
    fn optional_value_types_become_nullable() {
        let decl = interface(
            "Opts",
            vec![
                Node::new(NodeData::PropertySignature {
                    modifiers: Modifiers::new(),
                    name: MemberName::ident("n"),
                    question: true,
                    ty: Some(keyword(Keyword::Number)),
                })
                .into_ref(),
                Node::new(NodeData::PropertySignature {
                    modifiers: Modifiers::new(),
                    name: MemberName::ident("s"),
                    question: true,
                    ty: Some(keyword(Keyword::String)),
                })
                .into_ref(),
            ],
        );
        assert_eq!(
            rewrite(&decl),
            "interface Opts {\n    n: number | null;\n    s?: string;\n}"
        );

        let f = function(
            "f",
            vec![
                optional_param("flag", keyword(Keyword::Boolean)),
                optional_param("cb", type_ref("Callback")),
            ],
            None,
        );
        assert_eq!(
            rewrite(&f),
            "function f(flag: boolean | null, cb?: Callback);"
        );

        let prop = class("C", vec![optional_property("count", keyword(Keyword::Number))]);
        assert_eq!(rewrite(&prop), "class C {\n    count: number | null;\n}");
    }

    #[test]
    fn class_index_signatures_are_deleted() {
        let index = Node::new(NodeData::IndexSignature {
            modifiers: Modifiers::new(),
            params: vec![param("key", keyword(Keyword::String))],
            ty: keyword(Keyword::Number),
        })
        .into_ref();
        let size = property("size", Some(keyword(Keyword::Number)), None);
        let decl = class("Bag", vec![index, size]);
        assert_eq!(rewrite(&decl), "class Bag {\n    size: number;\n}");
    }

    #[test]
    fn object_binding_parameters_are_renamed() {
        let pattern = Node::new(NodeData::Parameter {
            modifiers: Modifiers::new(),
            rest: false,
            name: BindingName::ObjectPattern(vec!["a".to_owned(), "b".to_owned()]),
            question: false,
            ty: Some(type_ref("Opts")),
            initializer: None,
        })
        .into_ref();
        let f = function(
            "f",
            vec![param("x", keyword(Keyword::Number)), pattern],
            Some(keyword(Keyword::Void)),
        );
        assert_eq!(rewrite(&f), "function f(x: number, args1: JSValue): void;");
    }
}
