//! Declaration-file text printer.
//!
//! Renders trees in declaration-file syntax. Besides inspection and
//! snapshot tests, the rendered text of types, parameters and members is
//! what the declaration merger compares when deduplicating members.
//!
//! # Example output
//!
//! ```text
//! import * as fs from "fs";
//! export declare namespace geometry {
//!     export interface Point {
//!         x: number;
//!         y: number | null;
//!     }
//!     export function origin(): Point;
//! }
//! ```

use std::fmt;

use crate::kind::SyntaxKind;
use crate::node::{
    BindingName, ImportBindings, ImportClause, Literal, ModuleKeyword, ModuleName,
    ModuleReference, Modifiers, Node, NodeData, NodeRef, escape_string,
};

const INDENT: &str = "    ";

/// Render a node.
///
/// Files render one statement per line with a trailing newline. A single
/// statement renders without the final newline. Members, parameters,
/// types and expressions render inline.
pub fn print(node: &Node) -> String {
    let mut printer = Printer::default();
    match &node.data {
        NodeData::SourceFile { statements } | NodeData::ModuleBlock { statements } => {
            for stmt in statements {
                printer.statement(stmt);
            }
        }
        _ if is_statement(node.kind()) => {
            printer.statement(node);
            printer.out.pop();
        }
        _ => printer.inline(node),
    }
    printer.out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print(self))
    }
}

fn is_statement(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        ModuleDeclaration
            | ImportDeclaration
            | ImportEqualsDeclaration
            | VariableStatement
            | FunctionDeclaration
            | ClassDeclaration
            | InterfaceDeclaration
            | TypeAliasDeclaration
            | EnumDeclaration
    )
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn w(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn modifiers(&mut self, modifiers: &Modifiers) {
        for modifier in modifiers.iter() {
            self.w(modifier.as_str());
            self.w(" ");
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Print a statement on its own line(s), ending with a newline.
    fn statement(&mut self, node: &Node) {
        self.write_indent();
        match &node.data {
            NodeData::ModuleDeclaration {
                modifiers,
                keyword,
                name,
                body,
            } => {
                self.modifiers(modifiers);
                self.w(match keyword {
                    ModuleKeyword::Module => "module ",
                    ModuleKeyword::Namespace => "namespace ",
                });
                self.module_name(name);
                // `namespace A.B {}` nests declarations without blocks.
                let mut body = body.as_ref();
                while let Some(NodeData::ModuleDeclaration {
                    name: ModuleName::Identifier(inner),
                    body: inner_body,
                    ..
                }) = body.map(|b| &b.data)
                {
                    self.w(".");
                    self.w(inner);
                    body = inner_body.as_ref();
                }
                match body.map(|b| &b.data) {
                    Some(NodeData::ModuleBlock { statements }) => {
                        self.block(statements, |p, stmt| p.statement(stmt));
                    }
                    _ => self.w(";"),
                }
            }
            NodeData::ImportDeclaration {
                clause,
                specifier,
                attributes,
            } => {
                self.w("import ");
                if let Some(clause) = clause {
                    self.import_clause(clause);
                    self.w(" from ");
                }
                self.inline(specifier);
                if !attributes.is_empty() {
                    self.w(" assert { ");
                    let rendered: Vec<String> = attributes
                        .iter()
                        .map(|a| format!("{}: \"{}\"", a.key, escape_string(&a.value)))
                        .collect();
                    self.w(&rendered.join(", "));
                    self.w(" }");
                }
                self.w(";");
            }
            NodeData::ImportEqualsDeclaration {
                modifiers,
                type_only,
                name,
                reference,
            } => {
                self.modifiers(modifiers);
                self.w("import ");
                if *type_only {
                    self.w("type ");
                }
                self.w(name);
                self.w(" = ");
                match reference {
                    ModuleReference::Entity(entity) => self.w(&entity.to_string()),
                    ModuleReference::External(expr) => {
                        self.w("require(");
                        self.inline(expr);
                        self.w(")");
                    }
                }
                self.w(";");
            }
            NodeData::VariableStatement { modifiers, list } => {
                self.modifiers(modifiers);
                self.inline(list);
                self.w(";");
            }
            NodeData::FunctionDeclaration {
                modifiers,
                generator,
                name,
                type_params,
                params,
                ret,
            } => {
                self.modifiers(modifiers);
                self.w(if *generator { "function* " } else { "function " });
                if let Some(name) = name {
                    self.w(name);
                }
                self.signature(type_params, params, ret.as_ref(), ": ");
                self.w(";");
            }
            NodeData::ClassDeclaration {
                modifiers,
                name,
                type_params,
                extends,
                implements,
                members,
            } => {
                self.modifiers(modifiers);
                self.w("class");
                if let Some(name) = name {
                    self.w(" ");
                    self.w(name);
                }
                self.type_params(type_params);
                if let Some(base) = extends {
                    self.w(" extends ");
                    self.inline(base);
                }
                if !implements.is_empty() {
                    self.w(" implements ");
                    self.list(implements, ", ");
                }
                self.block(members, |p, member| p.member_line(member));
            }
            NodeData::InterfaceDeclaration {
                modifiers,
                name,
                type_params,
                extends,
                members,
            } => {
                self.modifiers(modifiers);
                self.w("interface ");
                self.w(name);
                self.type_params(type_params);
                if !extends.is_empty() {
                    self.w(" extends ");
                    self.list(extends, ", ");
                }
                self.block(members, |p, member| p.member_line(member));
            }
            NodeData::TypeAliasDeclaration {
                modifiers,
                name,
                type_params,
                ty,
            } => {
                self.modifiers(modifiers);
                self.w("type ");
                self.w(name);
                self.type_params(type_params);
                self.w(" = ");
                self.inline(ty);
                self.w(";");
            }
            NodeData::EnumDeclaration {
                modifiers,
                name,
                members,
            } => {
                self.modifiers(modifiers);
                self.w("enum ");
                self.w(name);
                self.block(members, |p, member| {
                    p.write_indent();
                    p.inline(member);
                    p.w(",\n");
                });
            }
            _ => self.inline(node),
        }
        self.w("\n");
    }

    fn block(&mut self, items: &[NodeRef], mut line: impl FnMut(&mut Self, &Node)) {
        if items.is_empty() {
            self.w(" {}");
            return;
        }
        self.w(" {\n");
        self.indent += 1;
        for item in items {
            line(self, item);
        }
        self.indent -= 1;
        self.write_indent();
        self.w("}");
    }

    fn member_line(&mut self, member: &Node) {
        self.write_indent();
        self.inline(member);
        self.w(";\n");
    }

    fn module_name(&mut self, name: &ModuleName) {
        match name {
            ModuleName::Identifier(name) => self.w(name),
            ModuleName::String(text) => self.string(text),
        }
    }

    fn import_clause(&mut self, clause: &ImportClause) {
        if clause.type_only {
            self.w("type ");
        }
        if let Some(default) = &clause.default {
            self.w(default);
            if clause.bindings.is_some() {
                self.w(", ");
            }
        }
        match &clause.bindings {
            Some(ImportBindings::Namespace(name)) => {
                self.w("* as ");
                self.w(name);
            }
            Some(ImportBindings::Named(specifiers)) => {
                let rendered: Vec<String> = specifiers
                    .iter()
                    .map(|s| {
                        let prefix = if s.type_only { "type " } else { "" };
                        match &s.property {
                            Some(property) => format!("{prefix}{property} as {}", s.name),
                            None => format!("{prefix}{}", s.name),
                        }
                    })
                    .collect();
                if rendered.is_empty() {
                    self.w("{}");
                } else {
                    self.w("{ ");
                    self.w(&rendered.join(", "));
                    self.w(" }");
                }
            }
            None => {}
        }
    }

    // =========================================================================
    // Inline forms
    // =========================================================================

    fn inline(&mut self, node: &Node) {
        match &node.data {
            NodeData::VariableDeclarationList {
                binding,
                declarations,
            } => {
                self.w(binding.as_str());
                self.w(" ");
                self.list(declarations, ", ");
            }
            NodeData::VariableDeclaration {
                name,
                ty,
                initializer,
            } => {
                self.binding_name(name);
                self.annotation(ty.as_ref());
                self.initializer(initializer.as_ref());
            }
            NodeData::EnumMember { name, initializer } => {
                self.w(&name.to_string());
                self.initializer(initializer.as_ref());
            }
            NodeData::PropertyDeclaration {
                modifiers,
                name,
                question,
                ty,
                initializer,
            } => {
                self.modifiers(modifiers);
                self.w(&name.to_string());
                self.question(*question);
                self.annotation(ty.as_ref());
                self.initializer(initializer.as_ref());
            }
            NodeData::MethodDeclaration {
                modifiers,
                name,
                question,
                type_params,
                params,
                ret,
            } => {
                self.modifiers(modifiers);
                self.w(&name.to_string());
                self.question(*question);
                self.signature(type_params, params, ret.as_ref(), ": ");
            }
            NodeData::Constructor { modifiers, params } => {
                self.modifiers(modifiers);
                self.w("constructor");
                self.signature(&[], params, None, ": ");
            }
            NodeData::PropertySignature {
                modifiers,
                name,
                question,
                ty,
            } => {
                self.modifiers(modifiers);
                self.w(&name.to_string());
                self.question(*question);
                self.annotation(ty.as_ref());
            }
            NodeData::MethodSignature {
                name,
                question,
                type_params,
                params,
                ret,
            } => {
                self.w(&name.to_string());
                self.question(*question);
                self.signature(type_params, params, ret.as_ref(), ": ");
            }
            NodeData::CallSignature {
                type_params,
                params,
                ret,
            } => self.signature(type_params, params, ret.as_ref(), ": "),
            NodeData::ConstructSignature {
                type_params,
                params,
                ret,
            } => {
                self.w("new ");
                self.signature(type_params, params, ret.as_ref(), ": ");
            }
            NodeData::IndexSignature {
                modifiers,
                params,
                ty,
            } => {
                self.modifiers(modifiers);
                self.w("[");
                self.list(params, ", ");
                self.w("]: ");
                self.inline(ty);
            }
            NodeData::Parameter {
                modifiers,
                rest,
                name,
                question,
                ty,
                initializer,
            } => {
                self.modifiers(modifiers);
                if *rest {
                    self.w("...");
                }
                self.binding_name(name);
                self.question(*question);
                self.annotation(ty.as_ref());
                self.initializer(initializer.as_ref());
            }
            NodeData::TypeParameter {
                name,
                constraint,
                default,
            } => {
                self.w(name);
                if let Some(constraint) = constraint {
                    self.w(" extends ");
                    self.inline(constraint);
                }
                if let Some(default) = default {
                    self.w(" = ");
                    self.inline(default);
                }
            }

            NodeData::Keyword(keyword) => self.w(keyword.as_str()),
            NodeData::TypeReference { name, type_args } => {
                self.w(&name.to_string());
                if !type_args.is_empty() {
                    self.w("<");
                    self.list(type_args, ", ");
                    self.w(">");
                }
            }
            NodeData::ArrayType { element } => {
                self.operand(element);
                self.w("[]");
            }
            NodeData::TupleType { elements } => {
                self.w("[");
                self.list(elements, ", ");
                self.w("]");
            }
            NodeData::UnionType { types } => self.operands(types, " | "),
            NodeData::IntersectionType { types } => self.operands(types, " & "),
            NodeData::LiteralType { literal } => self.inline(literal),
            NodeData::TypeLiteral { members } => {
                if members.is_empty() {
                    self.w("{}");
                } else {
                    self.w("{ ");
                    self.list(members, "; ");
                    self.w(" }");
                }
            }
            NodeData::FunctionType {
                type_params,
                params,
                ret,
            } => self.signature(type_params, params, Some(ret), " => "),
            NodeData::ConstructorType {
                type_params,
                params,
                ret,
            } => {
                self.w("new ");
                self.signature(type_params, params, Some(ret), " => ");
            }
            NodeData::TypeOperator { operator, ty } => {
                self.w(operator.as_str());
                self.w(" ");
                self.operand(ty);
            }
            NodeData::IndexedAccessType { object, index } => {
                self.operand(object);
                self.w("[");
                self.inline(index);
                self.w("]");
            }
            NodeData::MappedType {
                readonly,
                type_param,
                question,
                ty,
            } => {
                self.w("{ ");
                if *readonly {
                    self.w("readonly ");
                }
                self.w("[");
                match &type_param.data {
                    NodeData::TypeParameter {
                        name, constraint, ..
                    } => {
                        self.w(name);
                        if let Some(constraint) = constraint {
                            self.w(" in ");
                            self.inline(constraint);
                        }
                    }
                    _ => self.inline(type_param),
                }
                self.w("]");
                self.question(*question);
                self.annotation(ty.as_ref());
                self.w(" }");
            }
            NodeData::ConditionalType {
                check,
                extends,
                when_true,
                when_false,
            } => {
                self.operand(check);
                self.w(" extends ");
                self.operand(extends);
                self.w(" ? ");
                self.inline(when_true);
                self.w(" : ");
                self.inline(when_false);
            }
            NodeData::TypeQuery { name } => {
                self.w("typeof ");
                self.w(&name.to_string());
            }
            NodeData::ThisType => self.w("this"),
            NodeData::ParenthesizedType { ty } => {
                self.w("(");
                self.inline(ty);
                self.w(")");
            }

            NodeData::Literal(literal) => match literal {
                Literal::Numeric(text) => self.w(text),
                Literal::String(text) => self.string(text),
                Literal::BigInt(digits) => {
                    self.w(digits);
                    self.w("n");
                }
                Literal::True => self.w("true"),
                Literal::False => self.w("false"),
                Literal::Null => self.w("null"),
            },
            NodeData::Identifier(name) => self.w(name),
            NodeData::PrefixUnary { operator, operand } => {
                self.w(operator.as_str());
                self.inline(operand);
            }
            NodeData::Binary {
                left,
                operator,
                right,
            } => {
                self.inline(left);
                self.w(" ");
                self.w(operator.as_str());
                self.w(" ");
                self.inline(right);
            }

            NodeData::SourceFile { .. }
            | NodeData::ModuleBlock { .. }
            | NodeData::ModuleDeclaration { .. }
            | NodeData::ImportDeclaration { .. }
            | NodeData::ImportEqualsDeclaration { .. }
            | NodeData::VariableStatement { .. }
            | NodeData::FunctionDeclaration { .. }
            | NodeData::ClassDeclaration { .. }
            | NodeData::InterfaceDeclaration { .. }
            | NodeData::TypeAliasDeclaration { .. }
            | NodeData::EnumDeclaration { .. } => {
                let rendered = print(node);
                self.w(&rendered);
            }
        }
    }

    fn list(&mut self, nodes: &[NodeRef], separator: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.w(separator);
            }
            self.inline(node);
        }
    }

    /// Print a type in a position that binds tighter than `|`, `&` and `=>`.
    fn operand(&mut self, node: &Node) {
        let needs_parens = matches!(
            node.kind(),
            SyntaxKind::UnionType
                | SyntaxKind::IntersectionType
                | SyntaxKind::FunctionType
                | SyntaxKind::ConstructorType
                | SyntaxKind::ConditionalType
                | SyntaxKind::TypeOperator
        );
        if needs_parens {
            self.w("(");
            self.inline(node);
            self.w(")");
        } else {
            self.inline(node);
        }
    }

    fn operands(&mut self, nodes: &[NodeRef], separator: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.w(separator);
            }
            let wrap = matches!(
                node.kind(),
                SyntaxKind::FunctionType | SyntaxKind::ConstructorType | SyntaxKind::ConditionalType
            );
            if wrap {
                self.w("(");
                self.inline(node);
                self.w(")");
            } else {
                self.inline(node);
            }
        }
    }

    fn type_params(&mut self, type_params: &[NodeRef]) {
        if !type_params.is_empty() {
            self.w("<");
            self.list(type_params, ", ");
            self.w(">");
        }
    }

    fn signature(
        &mut self,
        type_params: &[NodeRef],
        params: &[NodeRef],
        ret: Option<&NodeRef>,
        arrow: &str,
    ) {
        self.type_params(type_params);
        self.w("(");
        self.list(params, ", ");
        self.w(")");
        if let Some(ret) = ret {
            self.w(arrow);
            self.inline(ret);
        }
    }

    fn binding_name(&mut self, name: &BindingName) {
        self.w(&name.to_string());
    }

    fn question(&mut self, question: bool) {
        if question {
            self.w("?");
        }
    }

    fn annotation(&mut self, ty: Option<&NodeRef>) {
        if let Some(ty) = ty {
            self.w(": ");
            self.inline(ty);
        }
    }

    fn initializer(&mut self, initializer: Option<&NodeRef>) {
        if let Some(initializer) = initializer {
            self.w(" = ");
            self.inline(initializer);
        }
    }

    fn string(&mut self, text: &str) {
        self.w("\"");
        self.w(&escape_string(text));
        self.w("\"");
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::factory::NodeFactory;
    use crate::node::{
        BindingKind, EntityName, ImportSpecifier, Keyword, MemberName, Modifier, TypeOperatorKind,
    };

    fn node(data: NodeData) -> NodeRef {
        Node::new(data).into_ref()
    }

    fn param(name: &str, ty: NodeRef, question: bool) -> NodeRef {
        node(NodeData::Parameter {
            modifiers: Modifiers::new(),
            rest: false,
            name: BindingName::ident(name),
            question,
            ty: Some(ty),
            initializer: None,
        })
    }

    #[test]
    fn prints_a_namespace_with_members() {
        let f = NodeFactory::default();
        let point = node(NodeData::InterfaceDeclaration {
            modifiers: Modifiers::from([Modifier::Export]),
            name: "Point".to_owned(),
            type_params: vec![],
            extends: vec![],
            members: vec![
                node(NodeData::PropertySignature {
                    modifiers: Modifiers::new(),
                    name: MemberName::ident("x"),
                    question: false,
                    ty: Some(f.keyword(Keyword::Number)),
                }),
                node(NodeData::PropertySignature {
                    modifiers: Modifiers::new(),
                    name: MemberName::ident("y"),
                    question: false,
                    ty: Some(f.nullable(f.keyword(Keyword::Number))),
                }),
            ],
        });
        let origin = node(NodeData::FunctionDeclaration {
            modifiers: Modifiers::from([Modifier::Export]),
            generator: false,
            name: Some("origin".to_owned()),
            type_params: vec![],
            params: vec![],
            ret: Some(f.type_reference(EntityName::simple("Point"), vec![])),
        });
        let file = Node::new(NodeData::SourceFile {
            statements: vec![
                node(NodeData::ImportDeclaration {
                    clause: Some(ImportClause {
                        type_only: false,
                        default: None,
                        bindings: Some(ImportBindings::Namespace("fs".to_owned())),
                    }),
                    specifier: f.literal(Literal::String("fs".to_owned())),
                    attributes: vec![],
                }),
                node(NodeData::ModuleDeclaration {
                    modifiers: Modifiers::from([Modifier::Export, Modifier::Declare]),
                    keyword: ModuleKeyword::Namespace,
                    name: ModuleName::Identifier("geometry".to_owned()),
                    body: Some(node(NodeData::ModuleBlock {
                        statements: vec![point, origin],
                    })),
                }),
            ],
        });

        assert_snapshot!(print(&file), @r#"
        import * as fs from "fs";
        export declare namespace geometry {
            export interface Point {
                x: number;
                y: number | null;
            }
            export function origin(): Point;
        }
        "#);
    }

    #[test]
    fn prints_type_forms_inline() {
        let f = NodeFactory::default();
        let callback = node(NodeData::FunctionType {
            type_params: vec![],
            params: vec![param("x", f.keyword(Keyword::String), true)],
            ret: f.keyword(Keyword::Void),
        });
        let ty = f.union(vec![
            f.array(f.union(vec![f.keyword(Keyword::Number), f.keyword(Keyword::String)])),
            callback,
            node(NodeData::TypeOperator {
                operator: TypeOperatorKind::KeyOf,
                ty: f.type_reference(EntityName::qualified(["a", "B"]), vec![]),
            }),
            node(NodeData::TypeLiteral {
                members: vec![node(NodeData::PropertySignature {
                    modifiers: Modifiers::new(),
                    name: MemberName::ident("a"),
                    question: false,
                    ty: Some(f.keyword(Keyword::Number)),
                })],
            }),
        ]);
        assert_snapshot!(
            print(&ty),
            @"(number | string)[] | ((x?: string) => void) | keyof a.B | { a: number }"
        );
    }

    #[test]
    fn prints_imports_and_bindings() {
        let f = NodeFactory::default();
        let import = Node::new(NodeData::ImportDeclaration {
            clause: Some(ImportClause {
                type_only: true,
                default: Some("D".to_owned()),
                bindings: Some(ImportBindings::Named(vec![
                    ImportSpecifier::named("a"),
                    ImportSpecifier::aliased("b", "c"),
                ])),
            }),
            specifier: f.literal(Literal::String("./m.js".to_owned())),
            attributes: vec![],
        });
        assert_snapshot!(print(&import), @r#"import type D, { a, b as c } from "./m.js";"#);

        let stmt = Node::new(NodeData::VariableStatement {
            modifiers: Modifiers::from([Modifier::Declare]),
            list: node(NodeData::VariableDeclarationList {
                binding: BindingKind::Const,
                declarations: vec![node(NodeData::VariableDeclaration {
                    name: BindingName::ident("big"),
                    ty: None,
                    initializer: Some(f.literal(Literal::BigInt("10".to_owned()))),
                })],
            }),
        });
        assert_snapshot!(print(&stmt), @"declare const big = 10n;");
    }

    #[test]
    fn empty_bodies_print_on_one_line() {
        let class = Node::new(NodeData::ClassDeclaration {
            modifiers: Modifiers::from([Modifier::Declare]),
            name: Some("A".to_owned()),
            type_params: vec![],
            extends: Some(NodeFactory::default().sentinel()),
            implements: vec![],
            members: vec![],
        });
        assert_eq!(print(&class), "declare class A extends JSValue {}");
    }
}
