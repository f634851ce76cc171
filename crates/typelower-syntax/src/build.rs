//! Shorthand constructors for building trees by hand.
//!
//! Front ends that lower their own AST, and tests, use these to assemble
//! declaration trees without spelling out every [`NodeData`] field. All
//! nodes are created without a span; use [`at`] to attach one.

use crate::location::Span;
use crate::node::{
    BindingKind, BindingName, EntityName, ImportBindings, ImportClause, ImportSpecifier, Keyword,
    Literal, MemberName, Modifier, Modifiers, ModuleKeyword, ModuleName, ModuleReference, Node,
    NodeData, NodeRef, TypeOperatorKind,
};

fn node(data: NodeData) -> NodeRef {
    Node::new(data).into_ref()
}

/// Attach a source span to a node.
pub fn at(node: NodeRef, start: usize, end: usize) -> NodeRef {
    Node {
        span: Some(Span::new(start, end)),
        data: node.data.clone(),
    }
    .into_ref()
}

/// Replace a node's modifiers.
pub fn with_modifiers<const N: usize>(node: NodeRef, modifiers: [Modifier; N]) -> NodeRef {
    node.with_modifiers(Modifiers::from(modifiers)).into_ref()
}

pub fn source_file(statements: Vec<NodeRef>) -> NodeRef {
    node(NodeData::SourceFile { statements })
}

// =============================================================================
// Types
// =============================================================================

pub fn keyword(keyword: Keyword) -> NodeRef {
    node(NodeData::Keyword(keyword))
}

/// A type reference; dotted names become qualified names.
pub fn type_ref(name: &str) -> NodeRef {
    type_ref_with(name, Vec::new())
}

pub fn type_ref_with(name: &str, type_args: Vec<NodeRef>) -> NodeRef {
    node(NodeData::TypeReference {
        name: EntityName::qualified(name.split('.')),
        type_args,
    })
}

pub fn array(element: NodeRef) -> NodeRef {
    node(NodeData::ArrayType { element })
}

pub fn tuple(elements: Vec<NodeRef>) -> NodeRef {
    node(NodeData::TupleType { elements })
}

pub fn union(types: Vec<NodeRef>) -> NodeRef {
    node(NodeData::UnionType { types })
}

pub fn intersection(types: Vec<NodeRef>) -> NodeRef {
    node(NodeData::IntersectionType { types })
}

/// A literal type wrapping a literal expression.
pub fn literal_type(literal: NodeRef) -> NodeRef {
    node(NodeData::LiteralType { literal })
}

pub fn type_literal(members: Vec<NodeRef>) -> NodeRef {
    node(NodeData::TypeLiteral { members })
}

pub fn function_type(params: Vec<NodeRef>, ret: NodeRef) -> NodeRef {
    node(NodeData::FunctionType {
        type_params: Vec::new(),
        params,
        ret,
    })
}

pub fn constructor_type(params: Vec<NodeRef>, ret: NodeRef) -> NodeRef {
    node(NodeData::ConstructorType {
        type_params: Vec::new(),
        params,
        ret,
    })
}

pub fn type_operator(operator: TypeOperatorKind, ty: NodeRef) -> NodeRef {
    node(NodeData::TypeOperator { operator, ty })
}

pub fn indexed_access(object: NodeRef, index: NodeRef) -> NodeRef {
    node(NodeData::IndexedAccessType { object, index })
}

/// `{ [key in constraint]: ty }`
pub fn mapped(key: &str, constraint: NodeRef, ty: NodeRef) -> NodeRef {
    node(NodeData::MappedType {
        readonly: false,
        type_param: type_param(key, Some(constraint), None),
        question: false,
        ty: Some(ty),
    })
}

pub fn conditional(
    check: NodeRef,
    extends: NodeRef,
    when_true: NodeRef,
    when_false: NodeRef,
) -> NodeRef {
    node(NodeData::ConditionalType {
        check,
        extends,
        when_true,
        when_false,
    })
}

pub fn type_query(name: &str) -> NodeRef {
    node(NodeData::TypeQuery {
        name: EntityName::qualified(name.split('.')),
    })
}

pub fn this_type() -> NodeRef {
    node(NodeData::ThisType)
}

pub fn parenthesized(ty: NodeRef) -> NodeRef {
    node(NodeData::ParenthesizedType { ty })
}

// =============================================================================
// Expressions
// =============================================================================

pub fn number(text: &str) -> NodeRef {
    node(NodeData::Literal(Literal::Numeric(text.to_owned())))
}

pub fn string(text: &str) -> NodeRef {
    node(NodeData::Literal(Literal::String(text.to_owned())))
}

pub fn bigint(digits: &str) -> NodeRef {
    node(NodeData::Literal(Literal::BigInt(digits.to_owned())))
}

pub fn boolean(value: bool) -> NodeRef {
    node(NodeData::Literal(if value { Literal::True } else { Literal::False }))
}

pub fn null() -> NodeRef {
    node(NodeData::Literal(Literal::Null))
}

pub fn ident(name: &str) -> NodeRef {
    node(NodeData::Identifier(name.to_owned()))
}

// =============================================================================
// Members
// =============================================================================

pub fn param(name: &str, ty: NodeRef) -> NodeRef {
    node(NodeData::Parameter {
        modifiers: Modifiers::new(),
        rest: false,
        name: BindingName::ident(name),
        question: false,
        ty: Some(ty),
        initializer: None,
    })
}

pub fn optional_param(name: &str, ty: NodeRef) -> NodeRef {
    node(NodeData::Parameter {
        modifiers: Modifiers::new(),
        rest: false,
        name: BindingName::ident(name),
        question: true,
        ty: Some(ty),
        initializer: None,
    })
}

pub fn type_param(name: &str, constraint: Option<NodeRef>, default: Option<NodeRef>) -> NodeRef {
    node(NodeData::TypeParameter {
        name: name.to_owned(),
        constraint,
        default,
    })
}

pub fn property_signature(name: &str, ty: NodeRef) -> NodeRef {
    node(NodeData::PropertySignature {
        modifiers: Modifiers::new(),
        name: MemberName::ident(name),
        question: false,
        ty: Some(ty),
    })
}

pub fn method_signature(name: &str, params: Vec<NodeRef>, ret: NodeRef) -> NodeRef {
    node(NodeData::MethodSignature {
        name: MemberName::ident(name),
        question: false,
        type_params: Vec::new(),
        params,
        ret: Some(ret),
    })
}

pub fn property(name: &str, ty: Option<NodeRef>, initializer: Option<NodeRef>) -> NodeRef {
    node(NodeData::PropertyDeclaration {
        modifiers: Modifiers::new(),
        name: MemberName::ident(name),
        question: false,
        ty,
        initializer,
    })
}

pub fn optional_property(name: &str, ty: NodeRef) -> NodeRef {
    node(NodeData::PropertyDeclaration {
        modifiers: Modifiers::new(),
        name: MemberName::ident(name),
        question: true,
        ty: Some(ty),
        initializer: None,
    })
}

pub fn method(name: &str, params: Vec<NodeRef>, ret: Option<NodeRef>) -> NodeRef {
    node(NodeData::MethodDeclaration {
        modifiers: Modifiers::new(),
        name: MemberName::ident(name),
        question: false,
        type_params: Vec::new(),
        params,
        ret,
    })
}

// =============================================================================
// Declarations
// =============================================================================

pub fn interface(name: &str, members: Vec<NodeRef>) -> NodeRef {
    node(NodeData::InterfaceDeclaration {
        modifiers: Modifiers::new(),
        name: name.to_owned(),
        type_params: Vec::new(),
        extends: Vec::new(),
        members,
    })
}

pub fn class(name: &str, members: Vec<NodeRef>) -> NodeRef {
    node(NodeData::ClassDeclaration {
        modifiers: Modifiers::new(),
        name: Some(name.to_owned()),
        type_params: Vec::new(),
        extends: None,
        implements: Vec::new(),
        members,
    })
}

pub fn type_alias(name: &str, ty: NodeRef) -> NodeRef {
    node(NodeData::TypeAliasDeclaration {
        modifiers: Modifiers::new(),
        name: name.to_owned(),
        type_params: Vec::new(),
        ty,
    })
}

pub fn function(name: &str, params: Vec<NodeRef>, ret: Option<NodeRef>) -> NodeRef {
    node(NodeData::FunctionDeclaration {
        modifiers: Modifiers::new(),
        generator: false,
        name: Some(name.to_owned()),
        type_params: Vec::new(),
        params,
        ret,
    })
}

pub fn variable(name: &str, ty: Option<NodeRef>, initializer: Option<NodeRef>) -> NodeRef {
    node(NodeData::VariableDeclaration {
        name: BindingName::ident(name),
        ty,
        initializer,
    })
}

pub fn variable_list(binding: BindingKind, declarations: Vec<NodeRef>) -> NodeRef {
    node(NodeData::VariableDeclarationList {
        binding,
        declarations,
    })
}

pub fn variable_statement(binding: BindingKind, declarations: Vec<NodeRef>) -> NodeRef {
    node(NodeData::VariableStatement {
        modifiers: Modifiers::new(),
        list: variable_list(binding, declarations),
    })
}

/// `namespace name { statements }`
pub fn namespace(name: &str, statements: Vec<NodeRef>) -> NodeRef {
    module_declaration(ModuleKeyword::Namespace, name, statements)
}

pub fn module_declaration(keyword: ModuleKeyword, name: &str, statements: Vec<NodeRef>) -> NodeRef {
    node(NodeData::ModuleDeclaration {
        modifiers: Modifiers::new(),
        keyword,
        name: ModuleName::Identifier(name.to_owned()),
        body: Some(node(NodeData::ModuleBlock { statements })),
    })
}

// =============================================================================
// Imports
// =============================================================================

fn import(clause: ImportClause, specifier: &str) -> NodeRef {
    node(NodeData::ImportDeclaration {
        clause: Some(clause),
        specifier: string(specifier),
        attributes: Vec::new(),
    })
}

/// `import { a, b } from "specifier"`
pub fn import_named(specifiers: Vec<ImportSpecifier>, specifier: &str) -> NodeRef {
    import(
        ImportClause {
            type_only: false,
            default: None,
            bindings: Some(ImportBindings::Named(specifiers)),
        },
        specifier,
    )
}

/// `import name from "specifier"`
pub fn import_default(name: &str, specifier: &str) -> NodeRef {
    import(
        ImportClause {
            type_only: false,
            default: Some(name.to_owned()),
            bindings: None,
        },
        specifier,
    )
}

/// `import * as name from "specifier"`
pub fn import_namespace(name: &str, specifier: &str) -> NodeRef {
    import(
        ImportClause {
            type_only: false,
            default: None,
            bindings: Some(ImportBindings::Namespace(name.to_owned())),
        },
        specifier,
    )
}

/// `import name = require("specifier")`
pub fn import_require(name: &str, specifier: &str) -> NodeRef {
    node(NodeData::ImportEqualsDeclaration {
        modifiers: Modifiers::new(),
        type_only: false,
        name: name.to_owned(),
        reference: ModuleReference::External(string(specifier)),
    })
}
