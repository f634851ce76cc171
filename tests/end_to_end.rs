//! Whole-file scenarios through the default pipeline.

mod common;

use common::{lower, run_with};
use insta::assert_snapshot;
use typelower_syntax::build::*;
use typelower_syntax::{
    BindingKind, ImportSpecifier, Keyword, MemberName, Modifier, Modifiers, ModuleKeyword, Node,
    NodeData, SemanticType, Span, TableOracle, TypeOperatorKind, print,
};

#[test]
fn structural_alias_propagates_to_use_sites() {
    let file = source_file(vec![
        type_alias(
            "S",
            type_literal(vec![property_signature("a", keyword(Keyword::Number))]),
        ),
        function("f", vec![param("x", type_ref("S"))], Some(type_ref("S"))),
    ]);
    assert_snapshot!(lower(&file), @r"
    type S = JSValue;
    function f(x: JSValue): JSValue;
    ");
}

#[test]
fn restricted_imports_become_the_sentinel_everywhere() {
    let file = source_file(vec![
        interface(
            "Page",
            vec![
                property_signature("want", array(type_ref("Want"))),
                property_signature(
                    "handlers",
                    type_ref_with(
                        "Map",
                        vec![keyword(Keyword::String), type_ref("common.Context")],
                    ),
                ),
            ],
        ),
        import_named(vec![ImportSpecifier::named("Want")], "@kit.AbilityKit"),
        import_namespace("common", "@ohos.app.ability.common"),
        import_default("lodash", "lodash.js"),
        function(
            "open",
            vec![param("w", union(vec![type_ref("Want"), literal_type(null())]))],
            Some(keyword(Keyword::Void)),
        ),
    ]);
    let out = run_with(&file, &typelower_syntax::NoOracle);
    assert_snapshot!(print(&out.file), @r#"
    import lodash from "lodash";
    interface Page {
        want: JSValue[];
        handlers: Map<string, JSValue>;
    }
    function open(w: JSValue | null): void;
    "#);
    let restricted: Vec<&str> = out.aliases.restricted_names().collect();
    assert_eq!(restricted, ["Want", "common"]);
}

#[test]
fn ambient_module_is_normalized() {
    let counter = Node::new(NodeData::ClassDeclaration {
        modifiers: Modifiers::new(),
        name: Some("Counter".to_owned()),
        type_params: vec![],
        extends: None,
        implements: vec![],
        members: vec![
            with_modifiers(property("count", None, Some(number("0"))), [Modifier::Readonly]),
            with_modifiers(
                property("cache", Some(type_ref("Map")), None),
                [Modifier::Private],
            ),
            Node::new(NodeData::MethodDeclaration {
                modifiers: Modifiers::new(),
                name: MemberName::ident("step"),
                question: false,
                type_params: vec![],
                params: vec![optional_param("by", keyword(Keyword::Number))],
                ret: Some(this_type()),
            })
            .into_ref(),
        ],
    })
    .into_ref();
    let module = with_modifiers(
        module_declaration(
            ModuleKeyword::Module,
            "metrics",
            vec![
                counter,
                variable_statement(
                    BindingKind::Var,
                    vec![variable("enabled", None, Some(boolean(true)))],
                ),
                type_alias("Keys", type_operator(TypeOperatorKind::KeyOf, type_ref("Counter"))),
            ],
        ),
        [Modifier::Declare],
    );
    assert_snapshot!(lower(&source_file(vec![module])), @r"
    declare namespace metrics {
        export class Counter {
            readonly count: number;
            step(by: number | null): Counter;
        }
        export let enabled: boolean;
        export type Keys = JSValue;
    }
    ");
}

#[test]
fn duplicate_declarations_merge_after_reduction() {
    let file = source_file(vec![
        interface(
            "Options",
            vec![property_signature("mode", keyword(Keyword::Any))],
        ),
        function("configure", vec![param("o", type_ref("Options"))], None),
        interface(
            "Options",
            vec![
                property_signature("mode", keyword(Keyword::Unknown)),
                property_signature("level", literal_type(number("3"))),
            ],
        ),
    ]);
    // `any` and `unknown` both reduce to the sentinel, so `mode` is kept once.
    assert_snapshot!(lower(&file), @r"
    interface Options {
        mode: JSValue;
        level: number;
    }
    function configure(o: Options);
    ");
}

#[test]
fn unique_declarations_precede_merged_ones_in_source_order() {
    let file = source_file(vec![
        class("C", vec![]),
        interface("A", vec![property_signature("a", keyword(Keyword::Number))]),
        interface("B", vec![]),
        interface("A", vec![property_signature("b", keyword(Keyword::Any))]),
    ]);
    assert_snapshot!(lower(&file), @r"
    class C {}
    interface B {}
    interface A {
        a: number;
        b: JSValue;
    }
    ");
}

#[test]
fn oracle_answers_replace_indexed_access() {
    let file = source_file(vec![type_alias(
        "Mode",
        at(indexed_access(type_ref("Options"), literal_type(string("mode"))), 5, 22),
    )]);
    let oracle = TableOracle::new()
        .with_type(Span::new(5, 22), SemanticType(7))
        .with_materialized(SemanticType(7), tuple(vec![keyword(Keyword::String)]));
    assert_snapshot!(print(&run_with(&file, &oracle).file), @"type Mode = JSValue[];");
}
