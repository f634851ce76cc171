//! Declaration merging.
//!
//! # Overview
//!
//! The target allows one declaration per class or interface name, while
//! the source lets declarations with the same name merge. This pass folds
//! each group of same-named interfaces, and each group of same-named
//! classes, into one declaration:
//!
//! - modifiers, name and type parameters come from the first declaration
//! - members are appended in source order, skipping any member that is
//!   [signature-equal](crate::signature_equal) to one already kept
//! - heritage clauses are the union of every declaration's entries
//!
//! Statements of a file or namespace body are emitted as:
//!
//! | Bucket                       | Order                        |
//! |------------------------------|------------------------------|
//! | leading imports              | source order                 |
//! | unique-name declarations     | source order                 |
//! | merged declarations          | first occurrence of the name |
//! | everything else              | source order                 |
//!
//! Interfaces and classes share the unique and merged buckets. An
//! interface and a class with the same name never merge with each other.
//!
//! Namespace bodies are merged the same way, innermost first.

use std::collections::HashMap;

use tracing::debug;
use typelower_syntax::{NodeData, NodeRef, print};

use crate::signature::signature_equal;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Bucket {
    Interface,
    Class,
}

/// Same-named declarations of one bucket, in source order.
struct DeclarationGroup {
    declarations: Vec<NodeRef>,
}

fn bucket_key(stmt: &NodeRef) -> Option<(Bucket, &str)> {
    match &stmt.data {
        NodeData::InterfaceDeclaration { name, .. } => Some((Bucket::Interface, name)),
        NodeData::ClassDeclaration {
            name: Some(name), ..
        } => Some((Bucket::Class, name)),
        _ => None,
    }
}

/// Merge same-named declarations in a file and in every namespace body.
///
/// Subtrees without duplicates are returned pointer-identical.
pub fn merge_declarations(root: &NodeRef) -> NodeRef {
    match &root.data {
        NodeData::SourceFile { statements } => match merge_statements(statements) {
            Some(statements) => root.with_data(NodeData::SourceFile { statements }).into_ref(),
            None => root.clone(),
        },
        NodeData::ModuleBlock { statements } => match merge_statements(statements) {
            Some(statements) => root.with_data(NodeData::ModuleBlock { statements }).into_ref(),
            None => root.clone(),
        },
        NodeData::ModuleDeclaration {
            modifiers,
            keyword,
            name,
            body: Some(body),
        } => {
            let merged = merge_declarations(body);
            if NodeRef::ptr_eq(&merged, body) {
                return root.clone();
            }
            root.with_data(NodeData::ModuleDeclaration {
                modifiers: modifiers.clone(),
                keyword: *keyword,
                name: name.clone(),
                body: Some(merged),
            })
            .into_ref()
        }
        _ => root.clone(),
    }
}

/// Returns `None` when the statement list comes out unchanged.
fn merge_statements(statements: &[NodeRef]) -> Option<Vec<NodeRef>> {
    let nested: Vec<NodeRef> = statements.iter().map(merge_declarations).collect();

    let leading = nested
        .iter()
        .take_while(|s| {
            matches!(
                s.data,
                NodeData::ImportDeclaration { .. } | NodeData::ImportEqualsDeclaration { .. }
            )
        })
        .count();

    let mut groups: Vec<DeclarationGroup> = Vec::new();
    let mut index: HashMap<(Bucket, &str), usize> = HashMap::new();
    let mut others = Vec::new();
    for stmt in &nested[leading..] {
        let Some(key) = bucket_key(stmt) else {
            others.push(stmt.clone());
            continue;
        };
        match index.get(&key) {
            Some(&i) => groups[i].declarations.push(stmt.clone()),
            None => {
                index.insert(key, groups.len());
                groups.push(DeclarationGroup {
                    declarations: vec![stmt.clone()],
                });
            }
        }
    }

    let mut out: Vec<NodeRef> = nested[..leading].to_vec();
    out.extend(
        groups
            .iter()
            .filter(|g| g.declarations.len() == 1)
            .map(|g| g.declarations[0].clone()),
    );
    out.extend(
        groups
            .iter()
            .filter(|g| g.declarations.len() > 1)
            .map(|g| merge_group(&g.declarations)),
    );
    out.extend(others);

    let unchanged = out.len() == statements.len()
        && out
            .iter()
            .zip(statements)
            .all(|(a, b)| NodeRef::ptr_eq(a, b));
    (!unchanged).then_some(out)
}

/// Append every entry not already present by rendered text.
fn union_by_text(into: &mut Vec<NodeRef>, entries: &[NodeRef]) {
    for entry in entries {
        let text = print(entry);
        if !into.iter().any(|e| print(e) == text) {
            into.push(entry.clone());
        }
    }
}

fn merge_members(into: &mut Vec<NodeRef>, members: &[NodeRef]) {
    for member in members {
        if !into.iter().any(|kept| signature_equal(kept, member)) {
            into.push(member.clone());
        }
    }
}

fn merge_group(declarations: &[NodeRef]) -> NodeRef {
    let first = &declarations[0];
    let mut merged_members = Vec::new();
    let mut merged_heritage = Vec::new();
    let mut merged_base: Option<NodeRef> = None;

    for decl in declarations {
        match &decl.data {
            NodeData::InterfaceDeclaration {
                extends, members, ..
            } => {
                union_by_text(&mut merged_heritage, extends);
                merge_members(&mut merged_members, members);
            }
            NodeData::ClassDeclaration {
                extends,
                implements,
                members,
                ..
            } => {
                if merged_base.is_none() {
                    merged_base = extends.clone();
                }
                union_by_text(&mut merged_heritage, implements);
                merge_members(&mut merged_members, members);
            }
            _ => {}
        }
    }

    debug!(
        name = first.declared_name().unwrap_or_default(),
        declarations = declarations.len(),
        members = merged_members.len(),
        "merged declarations"
    );

    let data = match &first.data {
        NodeData::InterfaceDeclaration {
            modifiers,
            name,
            type_params,
            ..
        } => NodeData::InterfaceDeclaration {
            modifiers: modifiers.clone(),
            name: name.clone(),
            type_params: type_params.clone(),
            extends: merged_heritage,
            members: merged_members,
        },
        NodeData::ClassDeclaration {
            modifiers,
            name,
            type_params,
            ..
        } => NodeData::ClassDeclaration {
            modifiers: modifiers.clone(),
            name: name.clone(),
            type_params: type_params.clone(),
            extends: merged_base,
            implements: merged_heritage,
            members: merged_members,
        },
        other => other.clone(),
    };
    first.with_data(data).into_ref()
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use typelower_syntax::build::*;
    use typelower_syntax::{Keyword, Modifier, Node, NodeData, print};

    use super::*;

    fn iface(name: &str, members: &[&str]) -> NodeRef {
        interface(
            name,
            members
                .iter()
                .map(|m| property_signature(m, keyword(Keyword::Number)))
                .collect(),
        )
    }

    #[test]
    fn members_are_merged_in_first_seen_order() {
        let file = source_file(vec![
            iface("X", &["a", "b"]),
            iface("X", &["b", "c"]),
            iface("X", &["c", "d"]),
        ]);
        assert_snapshot!(print(&merge_declarations(&file)), @r"
        interface X {
            a: number;
            b: number;
            c: number;
            d: number;
        }
        ");
    }

    #[test]
    fn non_matching_members_are_kept_side_by_side() {
        let get = |params| method_signature("get", params, keyword(Keyword::String));
        let file = source_file(vec![
            interface("Y", vec![get(vec![])]),
            interface("Y", vec![get(vec![param("i", keyword(Keyword::Number))])]),
        ]);
        assert_snapshot!(print(&merge_declarations(&file)), @r"
        interface Y {
            get(): string;
            get(i: number): string;
        }
        ");
    }

    #[test]
    fn buckets_are_emitted_in_order() {
        let file = source_file(vec![
            import_namespace("fs", "fs"),
            function("f", vec![], None),
            class("C", vec![]),
            with_modifiers(iface("A", &["a"]), [Modifier::Export]),
            iface("B", &["b"]),
            iface("A", &["z"]),
            type_alias("T", keyword(Keyword::String)),
        ]);
        assert_snapshot!(print(&merge_declarations(&file)), @r#"
        import * as fs from "fs";
        class C {}
        interface B {
            b: number;
        }
        export interface A {
            a: number;
            z: number;
        }
        function f();
        type T = string;
        "#);
    }

    #[test]
    fn unique_classes_keep_their_place_among_interfaces() {
        let file = source_file(vec![
            class("C", vec![]),
            iface("A", &["a"]),
            iface("B", &[]),
            iface("A", &["b"]),
            class("D", vec![]),
            class("D", vec![property("d", Some(keyword(Keyword::String)), None)]),
        ]);
        assert_snapshot!(print(&merge_declarations(&file)), @r"
        class C {}
        interface B {}
        interface A {
            a: number;
            b: number;
        }
        class D {
            d: string;
        }
        ");
    }

    #[test]
    fn same_name_interface_and_class_stay_apart() {
        let file = source_file(vec![iface("P", &["x"]), class("P", vec![])]);
        assert!(NodeRef::ptr_eq(&merge_declarations(&file), &file));
    }

    #[test]
    fn class_heritage_is_unioned() {
        let class_with =
            |implements: Vec<NodeRef>, extends: Option<NodeRef>, members: Vec<NodeRef>| {
                Node::new(NodeData::ClassDeclaration {
                    modifiers: Default::default(),
                    name: Some("Widget".to_owned()),
                    type_params: vec![],
                    extends,
                    implements,
                    members,
                })
                .into_ref()
            };
        let file = source_file(vec![
            class_with(vec![type_ref("Drawable")], Some(type_ref("Base")), vec![]),
            class_with(
                vec![type_ref("Drawable"), type_ref("Sized")],
                None,
                vec![property("w", Some(keyword(Keyword::Number)), None)],
            ),
        ]);
        assert_snapshot!(print(&merge_declarations(&file)), @r"
        class Widget extends Base implements Drawable, Sized {
            w: number;
        }
        ");
    }

    #[test]
    fn namespace_bodies_are_merged() {
        let file = source_file(vec![namespace(
            "ui",
            vec![iface("Props", &["a"]), iface("Props", &["a", "b"])],
        )]);
        assert_snapshot!(print(&merge_declarations(&file)), @r"
        namespace ui {
            interface Props {
                a: number;
                b: number;
            }
        }
        ");
    }

    #[test]
    fn files_without_duplicates_are_shared() {
        let file = source_file(vec![iface("A", &["a"]), class("C", vec![])]);
        assert!(NodeRef::ptr_eq(&merge_declarations(&file), &file));
    }
}
