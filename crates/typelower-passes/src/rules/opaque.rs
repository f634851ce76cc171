//! Rules that collapse unrepresentable types into the sentinel.
//!
//! Once a type becomes the sentinel, everything it described is gone.
//! These rules never try to translate part of a structure.

use typelower_syntax::rewrite::{RewriteOutcome, RewriteRule, RuleContext};
use typelower_syntax::{EntityName, Keyword, NodeData, NodeRef, TransformResult, TypeOperatorKind};

/// `any`, `unknown`, `object`, `symbol` and `undefined` become the sentinel.
pub struct KeywordToSentinel;

impl RewriteRule for KeywordToSentinel {
    fn rewrite(&self, _node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        Ok(RewriteOutcome::Replaced(cx.factory().sentinel()))
    }
}

/// Anonymous object types and intersections become the sentinel.
pub struct StructuralToSentinel;

impl RewriteRule for StructuralToSentinel {
    fn rewrite(&self, _node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        Ok(RewriteOutcome::Replaced(cx.factory().sentinel()))
    }
}

/// Mapped, conditional and constructor types become the sentinel.
pub struct UnrepresentableToSentinel;

impl RewriteRule for UnrepresentableToSentinel {
    fn rewrite(&self, _node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        Ok(RewriteOutcome::Replaced(cx.factory().sentinel()))
    }
}

/// `[A, B]` becomes `Sentinel[]`. Arity is dropped.
pub struct TupleToArray;

impl RewriteRule for TupleToArray {
    fn rewrite(&self, _node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let factory = cx.factory();
        Ok(RewriteOutcome::Replaced(factory.array(factory.sentinel())))
    }
}

/// `readonly T` becomes `T`; `keyof T` and `unique T` become the sentinel.
pub struct TypeOperatorReduction;

impl RewriteRule for TypeOperatorReduction {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::TypeOperator { operator, ty } = &node.data else {
            return Ok(RewriteOutcome::Unchanged);
        };
        Ok(RewriteOutcome::Replaced(match operator {
            TypeOperatorKind::Readonly => ty.clone(),
            TypeOperatorKind::KeyOf | TypeOperatorKind::Unique => cx.factory().sentinel(),
        }))
    }
}

/// Builtin references the target has no counterpart for.
const OPAQUE_BUILTINS: &[&str] = &[
    "Object",
    "Symbol",
    "Function",
    "ESObject",
    "AsyncFunction",
    "AsyncGenerator",
    "AsyncGeneratorFunction",
    "AsyncIterator",
    "Generator",
    "GeneratorFunction",
    "Iterator",
    "Proxy",
    "Reflect",
    "TypedArray",
    // utility types
    "Awaited",
    "Partial",
    "Required",
    "Readonly",
    "Record",
    "Pick",
    "Omit",
    "Exclude",
    "Extract",
    "NonNullable",
    "Parameters",
    "ConstructorParameters",
    "ReturnType",
    "InstanceType",
    "ThisParameterType",
    "OmitThisParameter",
    "ThisType",
];

/// Rewrites references to builtin types.
///
/// | Reference                                  | Result          |
/// |--------------------------------------------|-----------------|
/// | `Object`, `Function`, utility types, ...   | sentinel        |
/// | `Number`, `String`, `Boolean`, `BigInt`    | primitive type  |
/// | `EvalError`                                | `Error`         |
///
/// Only unqualified names are builtins.
pub struct BuiltinReference;

impl RewriteRule for BuiltinReference {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::TypeReference { name, .. } = &node.data else {
            return Ok(RewriteOutcome::Unchanged);
        };
        let Some(name) = name.as_simple() else {
            return Ok(RewriteOutcome::Unchanged);
        };
        let factory = cx.factory();

        let replacement = match name {
            "Number" => factory.keyword(Keyword::Number),
            "String" => factory.keyword(Keyword::String),
            "Boolean" => factory.keyword(Keyword::Boolean),
            "BigInt" => factory.keyword(Keyword::BigInt),
            "EvalError" => factory.type_reference(EntityName::simple("Error"), Vec::new()),
            name if OPAQUE_BUILTINS.contains(&name) => factory.sentinel(),
            _ => return Ok(RewriteOutcome::Unchanged),
        };
        Ok(RewriteOutcome::Replaced(replacement))
    }
}

#[cfg(test)]
mod tests {
    use typelower_syntax::build::*;
    use typelower_syntax::{Keyword, TypeOperatorKind};

    use crate::rules::test_util::rewrite;

    #[test]
    fn dynamic_keywords_become_the_sentinel() {
        let ty = union(vec![
            keyword(Keyword::Any),
            keyword(Keyword::Unknown),
            keyword(Keyword::Object),
            keyword(Keyword::Symbol),
            keyword(Keyword::Undefined),
            keyword(Keyword::Number),
        ]);
        assert_eq!(
            rewrite(&ty),
            "JSValue | JSValue | JSValue | JSValue | JSValue | number"
        );
    }

    #[test]
    fn structural_types_are_replaced_wholesale() {
        let ty = array(type_literal(vec![property_signature(
            "a",
            tuple(vec![keyword(Keyword::Number)]),
        )]));
        assert_eq!(rewrite(&ty), "JSValue[]");

        let ty = intersection(vec![type_ref("A"), type_ref("B")]);
        assert_eq!(rewrite(&ty), "JSValue");
    }

    #[test]
    fn tuples_lose_their_arity() {
        let ty = tuple(vec![keyword(Keyword::String), keyword(Keyword::Number)]);
        assert_eq!(rewrite(&ty), "JSValue[]");
    }

    #[test]
    fn mapped_conditional_and_keyof_become_the_sentinel() {
        let ty = union(vec![
            mapped("K", type_ref("Keys"), keyword(Keyword::String)),
            conditional(
                type_ref("T"),
                keyword(Keyword::String),
                keyword(Keyword::Number),
                keyword(Keyword::Boolean),
            ),
            type_operator(TypeOperatorKind::KeyOf, type_ref("T")),
            constructor_type(vec![], type_ref("T")),
        ]);
        assert_eq!(rewrite(&ty), "JSValue | JSValue | JSValue | JSValue");
    }

    #[test]
    fn readonly_operator_is_unwrapped() {
        let p = param(
            "xs",
            type_operator(TypeOperatorKind::Readonly, array(keyword(Keyword::String))),
        );
        assert_eq!(rewrite(&p), "xs: string[]");
    }

    #[test]
    fn builtin_references() {
        let ty = union(vec![
            type_ref_with("Partial", vec![type_ref("T")]),
            type_ref("Function"),
            type_ref("Number"),
            type_ref("BigInt"),
            type_ref("EvalError"),
            type_ref("ns.Object"),
            type_ref("Map"),
        ]);
        assert_eq!(
            rewrite(&ty),
            "JSValue | JSValue | number | bigint | Error | ns.Object | Map"
        );
    }
}
