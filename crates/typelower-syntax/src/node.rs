//! Declaration tree nodes.
//!
//! The tree is immutable. Rewriting never mutates a node in place; it
//! builds new nodes that share every unchanged subtree through [`NodeRef`].

use std::fmt;
use std::sync::Arc;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::kind::SyntaxKind;
use crate::location::Span;

/// Shared handle to an immutable node.
pub type NodeRef = Arc<Node>;

/// A node in the declaration tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Source span, `None` for synthesized nodes.
    pub span: Option<Span>,
    pub data: NodeData,
}

impl Node {
    pub fn new(data: NodeData) -> Self {
        Self { span: None, data }
    }

    pub fn spanned(data: NodeData, span: Span) -> Self {
        Self {
            span: Some(span),
            data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind()
    }

    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }

    /// Build a node with new payload, keeping this node's span.
    pub fn with_data(&self, data: NodeData) -> Node {
        Node {
            span: self.span,
            data,
        }
    }

    /// Declared name of a named declaration, if it has a plain one.
    pub fn declared_name(&self) -> Option<&str> {
        match &self.data {
            NodeData::ClassDeclaration { name, .. }
            | NodeData::FunctionDeclaration { name, .. } => name.as_deref(),
            NodeData::InterfaceDeclaration { name, .. }
            | NodeData::TypeAliasDeclaration { name, .. }
            | NodeData::EnumDeclaration { name, .. } => Some(name),
            NodeData::ModuleDeclaration {
                name: ModuleName::Identifier(name),
                ..
            } => Some(name),
            _ => None,
        }
    }

    /// Modifier list of declarations and members that carry one.
    pub fn modifiers(&self) -> Option<&Modifiers> {
        match &self.data {
            NodeData::ModuleDeclaration { modifiers, .. }
            | NodeData::ImportEqualsDeclaration { modifiers, .. }
            | NodeData::VariableStatement { modifiers, .. }
            | NodeData::FunctionDeclaration { modifiers, .. }
            | NodeData::ClassDeclaration { modifiers, .. }
            | NodeData::InterfaceDeclaration { modifiers, .. }
            | NodeData::TypeAliasDeclaration { modifiers, .. }
            | NodeData::EnumDeclaration { modifiers, .. }
            | NodeData::PropertyDeclaration { modifiers, .. }
            | NodeData::MethodDeclaration { modifiers, .. }
            | NodeData::Constructor { modifiers, .. }
            | NodeData::PropertySignature { modifiers, .. }
            | NodeData::IndexSignature { modifiers, .. }
            | NodeData::Parameter { modifiers, .. } => Some(modifiers),
            _ => None,
        }
    }

    /// Copy of this node with its modifier list replaced. Nodes without
    /// modifiers are returned as is.
    pub fn with_modifiers(&self, modifiers: Modifiers) -> Node {
        let mut node = self.clone();
        if let Some(slot) = node.data.modifiers_mut() {
            *slot = modifiers;
        }
        node
    }

    /// Statements of a source file or namespace body.
    pub fn statements(&self) -> Option<&[NodeRef]> {
        match &self.data {
            NodeData::SourceFile { statements } | NodeData::ModuleBlock { statements } => {
                Some(statements)
            }
            _ => None,
        }
    }
}

/// Kind-specific payload of a [`Node`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeData {
    SourceFile {
        statements: Vec<NodeRef>,
    },
    /// `namespace A {}` or `declare module "a" {}`.
    ModuleDeclaration {
        modifiers: Modifiers,
        keyword: ModuleKeyword,
        name: ModuleName,
        /// A `ModuleBlock`, or a nested `ModuleDeclaration` for `namespace A.B {}`.
        body: Option<NodeRef>,
    },
    ModuleBlock {
        statements: Vec<NodeRef>,
    },
    ImportDeclaration {
        clause: Option<ImportClause>,
        /// Module specifier expression; well-formed input has a string literal here.
        specifier: NodeRef,
        attributes: Vec<ImportAttribute>,
    },
    /// `import x = require("m")` or `import x = A.B`.
    ImportEqualsDeclaration {
        modifiers: Modifiers,
        type_only: bool,
        name: String,
        reference: ModuleReference,
    },
    VariableStatement {
        modifiers: Modifiers,
        /// A `VariableDeclarationList`.
        list: NodeRef,
    },
    VariableDeclarationList {
        binding: BindingKind,
        declarations: Vec<NodeRef>,
    },
    VariableDeclaration {
        name: BindingName,
        ty: Option<NodeRef>,
        initializer: Option<NodeRef>,
    },
    FunctionDeclaration {
        modifiers: Modifiers,
        generator: bool,
        name: Option<String>,
        type_params: Vec<NodeRef>,
        params: Vec<NodeRef>,
        ret: Option<NodeRef>,
    },
    ClassDeclaration {
        modifiers: Modifiers,
        name: Option<String>,
        type_params: Vec<NodeRef>,
        extends: Option<NodeRef>,
        implements: Vec<NodeRef>,
        members: Vec<NodeRef>,
    },
    InterfaceDeclaration {
        modifiers: Modifiers,
        name: String,
        type_params: Vec<NodeRef>,
        extends: Vec<NodeRef>,
        members: Vec<NodeRef>,
    },
    TypeAliasDeclaration {
        modifiers: Modifiers,
        name: String,
        type_params: Vec<NodeRef>,
        ty: NodeRef,
    },
    EnumDeclaration {
        modifiers: Modifiers,
        name: String,
        members: Vec<NodeRef>,
    },
    EnumMember {
        name: MemberName,
        initializer: Option<NodeRef>,
    },
    PropertyDeclaration {
        modifiers: Modifiers,
        name: MemberName,
        question: bool,
        ty: Option<NodeRef>,
        initializer: Option<NodeRef>,
    },
    MethodDeclaration {
        modifiers: Modifiers,
        name: MemberName,
        question: bool,
        type_params: Vec<NodeRef>,
        params: Vec<NodeRef>,
        ret: Option<NodeRef>,
    },
    Constructor {
        modifiers: Modifiers,
        params: Vec<NodeRef>,
    },
    PropertySignature {
        modifiers: Modifiers,
        name: MemberName,
        question: bool,
        ty: Option<NodeRef>,
    },
    MethodSignature {
        name: MemberName,
        question: bool,
        type_params: Vec<NodeRef>,
        params: Vec<NodeRef>,
        ret: Option<NodeRef>,
    },
    CallSignature {
        type_params: Vec<NodeRef>,
        params: Vec<NodeRef>,
        ret: Option<NodeRef>,
    },
    ConstructSignature {
        type_params: Vec<NodeRef>,
        params: Vec<NodeRef>,
        ret: Option<NodeRef>,
    },
    IndexSignature {
        modifiers: Modifiers,
        params: Vec<NodeRef>,
        ty: NodeRef,
    },
    Parameter {
        modifiers: Modifiers,
        rest: bool,
        name: BindingName,
        question: bool,
        ty: Option<NodeRef>,
        initializer: Option<NodeRef>,
    },
    TypeParameter {
        name: String,
        constraint: Option<NodeRef>,
        default: Option<NodeRef>,
    },

    Keyword(Keyword),
    TypeReference {
        name: EntityName,
        type_args: Vec<NodeRef>,
    },
    ArrayType {
        element: NodeRef,
    },
    TupleType {
        elements: Vec<NodeRef>,
    },
    UnionType {
        types: Vec<NodeRef>,
    },
    IntersectionType {
        types: Vec<NodeRef>,
    },
    LiteralType {
        /// A literal expression, or a `PrefixUnaryExpression` for `-1`.
        literal: NodeRef,
    },
    TypeLiteral {
        members: Vec<NodeRef>,
    },
    FunctionType {
        type_params: Vec<NodeRef>,
        params: Vec<NodeRef>,
        ret: NodeRef,
    },
    ConstructorType {
        type_params: Vec<NodeRef>,
        params: Vec<NodeRef>,
        ret: NodeRef,
    },
    TypeOperator {
        operator: TypeOperatorKind,
        ty: NodeRef,
    },
    IndexedAccessType {
        object: NodeRef,
        index: NodeRef,
    },
    MappedType {
        readonly: bool,
        /// The `K in C` type parameter.
        type_param: NodeRef,
        question: bool,
        ty: Option<NodeRef>,
    },
    ConditionalType {
        check: NodeRef,
        extends: NodeRef,
        when_true: NodeRef,
        when_false: NodeRef,
    },
    TypeQuery {
        name: EntityName,
    },
    ThisType,
    ParenthesizedType {
        ty: NodeRef,
    },

    Literal(Literal),
    Identifier(String),
    PrefixUnary {
        operator: PrefixOperator,
        operand: NodeRef,
    },
    Binary {
        left: NodeRef,
        operator: BinaryOperator,
        right: NodeRef,
    },
}

impl NodeData {
    pub fn modifiers_mut(&mut self) -> Option<&mut Modifiers> {
        match self {
            NodeData::ModuleDeclaration { modifiers, .. }
            | NodeData::ImportEqualsDeclaration { modifiers, .. }
            | NodeData::VariableStatement { modifiers, .. }
            | NodeData::FunctionDeclaration { modifiers, .. }
            | NodeData::ClassDeclaration { modifiers, .. }
            | NodeData::InterfaceDeclaration { modifiers, .. }
            | NodeData::TypeAliasDeclaration { modifiers, .. }
            | NodeData::EnumDeclaration { modifiers, .. }
            | NodeData::PropertyDeclaration { modifiers, .. }
            | NodeData::MethodDeclaration { modifiers, .. }
            | NodeData::Constructor { modifiers, .. }
            | NodeData::PropertySignature { modifiers, .. }
            | NodeData::IndexSignature { modifiers, .. }
            | NodeData::Parameter { modifiers, .. } => Some(modifiers),
            _ => None,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeData::SourceFile { .. } => SyntaxKind::SourceFile,
            NodeData::ModuleDeclaration { .. } => SyntaxKind::ModuleDeclaration,
            NodeData::ModuleBlock { .. } => SyntaxKind::ModuleBlock,
            NodeData::ImportDeclaration { .. } => SyntaxKind::ImportDeclaration,
            NodeData::ImportEqualsDeclaration { .. } => SyntaxKind::ImportEqualsDeclaration,
            NodeData::VariableStatement { .. } => SyntaxKind::VariableStatement,
            NodeData::VariableDeclarationList { .. } => SyntaxKind::VariableDeclarationList,
            NodeData::VariableDeclaration { .. } => SyntaxKind::VariableDeclaration,
            NodeData::FunctionDeclaration { .. } => SyntaxKind::FunctionDeclaration,
            NodeData::ClassDeclaration { .. } => SyntaxKind::ClassDeclaration,
            NodeData::InterfaceDeclaration { .. } => SyntaxKind::InterfaceDeclaration,
            NodeData::TypeAliasDeclaration { .. } => SyntaxKind::TypeAliasDeclaration,
            NodeData::EnumDeclaration { .. } => SyntaxKind::EnumDeclaration,
            NodeData::EnumMember { .. } => SyntaxKind::EnumMember,
            NodeData::PropertyDeclaration { .. } => SyntaxKind::PropertyDeclaration,
            NodeData::MethodDeclaration { .. } => SyntaxKind::MethodDeclaration,
            NodeData::Constructor { .. } => SyntaxKind::Constructor,
            NodeData::PropertySignature { .. } => SyntaxKind::PropertySignature,
            NodeData::MethodSignature { .. } => SyntaxKind::MethodSignature,
            NodeData::CallSignature { .. } => SyntaxKind::CallSignature,
            NodeData::ConstructSignature { .. } => SyntaxKind::ConstructSignature,
            NodeData::IndexSignature { .. } => SyntaxKind::IndexSignature,
            NodeData::Parameter { .. } => SyntaxKind::Parameter,
            NodeData::TypeParameter { .. } => SyntaxKind::TypeParameter,
            NodeData::Keyword(keyword) => keyword.kind(),
            NodeData::TypeReference { .. } => SyntaxKind::TypeReference,
            NodeData::ArrayType { .. } => SyntaxKind::ArrayType,
            NodeData::TupleType { .. } => SyntaxKind::TupleType,
            NodeData::UnionType { .. } => SyntaxKind::UnionType,
            NodeData::IntersectionType { .. } => SyntaxKind::IntersectionType,
            NodeData::LiteralType { .. } => SyntaxKind::LiteralType,
            NodeData::TypeLiteral { .. } => SyntaxKind::TypeLiteral,
            NodeData::FunctionType { .. } => SyntaxKind::FunctionType,
            NodeData::ConstructorType { .. } => SyntaxKind::ConstructorType,
            NodeData::TypeOperator { .. } => SyntaxKind::TypeOperator,
            NodeData::IndexedAccessType { .. } => SyntaxKind::IndexedAccessType,
            NodeData::MappedType { .. } => SyntaxKind::MappedType,
            NodeData::ConditionalType { .. } => SyntaxKind::ConditionalType,
            NodeData::TypeQuery { .. } => SyntaxKind::TypeQuery,
            NodeData::ThisType => SyntaxKind::ThisType,
            NodeData::ParenthesizedType { .. } => SyntaxKind::ParenthesizedType,
            NodeData::Literal(literal) => literal.kind(),
            NodeData::Identifier(_) => SyntaxKind::Identifier,
            NodeData::PrefixUnary { .. } => SyntaxKind::PrefixUnaryExpression,
            NodeData::Binary { .. } => SyntaxKind::BinaryExpression,
        }
    }
}

// =============================================================================
// Keywords and literals
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Any,
    Unknown,
    Object,
    Symbol,
    Undefined,
    Number,
    String,
    Boolean,
    BigInt,
    Void,
    Never,
}

impl Keyword {
    pub fn kind(self) -> SyntaxKind {
        match self {
            Keyword::Any => SyntaxKind::AnyKeyword,
            Keyword::Unknown => SyntaxKind::UnknownKeyword,
            Keyword::Object => SyntaxKind::ObjectKeyword,
            Keyword::Symbol => SyntaxKind::SymbolKeyword,
            Keyword::Undefined => SyntaxKind::UndefinedKeyword,
            Keyword::Number => SyntaxKind::NumberKeyword,
            Keyword::String => SyntaxKind::StringKeyword,
            Keyword::Boolean => SyntaxKind::BooleanKeyword,
            Keyword::BigInt => SyntaxKind::BigIntKeyword,
            Keyword::Void => SyntaxKind::VoidKeyword,
            Keyword::Never => SyntaxKind::NeverKeyword,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Any => "any",
            Keyword::Unknown => "unknown",
            Keyword::Object => "object",
            Keyword::Symbol => "symbol",
            Keyword::Undefined => "undefined",
            Keyword::Number => "number",
            Keyword::String => "string",
            Keyword::Boolean => "boolean",
            Keyword::BigInt => "bigint",
            Keyword::Void => "void",
            Keyword::Never => "never",
        }
    }
}

/// Literal expression value. Numeric and bigint literals keep their source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    Numeric(String),
    String(String),
    /// Digits without the trailing `n`.
    BigInt(String),
    True,
    False,
    Null,
}

impl Literal {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Literal::Numeric(_) => SyntaxKind::NumericLiteral,
            Literal::String(_) => SyntaxKind::StringLiteral,
            Literal::BigInt(_) => SyntaxKind::BigIntLiteral,
            Literal::True => SyntaxKind::TrueKeyword,
            Literal::False => SyntaxKind::FalseKeyword,
            Literal::Null => SyntaxKind::NullKeyword,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixOperator {
    Minus,
    Plus,
    Not,
    BitNot,
}

impl PrefixOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            PrefixOperator::Minus => "-",
            PrefixOperator::Plus => "+",
            PrefixOperator::Not => "!",
            PrefixOperator::BitNot => "~",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Coalesce,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Coalesce => "??",
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::StrictEq => "===",
            BinaryOperator::StrictNotEq => "!==",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::GtEq => ">=",
        }
    }

    pub fn is_logical_or_comparison(self) -> bool {
        !matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Sub
                | BinaryOperator::Mul
                | BinaryOperator::Div
                | BinaryOperator::Coalesce
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeOperatorKind {
    KeyOf,
    Readonly,
    Unique,
}

impl TypeOperatorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeOperatorKind::KeyOf => "keyof",
            TypeOperatorKind::Readonly => "readonly",
            TypeOperatorKind::Unique => "unique",
        }
    }
}

// =============================================================================
// Names
// =============================================================================

/// A possibly qualified type name such as `a.b.C`. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EntityNameRepr")]
pub struct EntityName {
    segments: Vec<String>,
}

/// Wire shape of [`EntityName`], checked on the way in.
#[derive(Deserialize)]
struct EntityNameRepr {
    segments: Vec<String>,
}

/// A deserialized [`EntityName`] had no segments.
#[derive(Debug, Display)]
#[display("entity name has no segments")]
pub struct EmptyEntityName;

impl std::error::Error for EmptyEntityName {}

impl TryFrom<EntityNameRepr> for EntityName {
    type Error = EmptyEntityName;

    fn try_from(repr: EntityNameRepr) -> Result<Self, Self::Error> {
        if repr.segments.is_empty() {
            return Err(EmptyEntityName);
        }
        Ok(Self {
            segments: repr.segments,
        })
    }
}

impl EntityName {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Build a qualified name; an empty iterator yields an empty simple name.
    pub fn qualified<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Self::simple("");
        }
        Self { segments }
    }

    /// Leftmost identifier of the qualifier chain.
    pub fn root(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// The unqualified name, if this is one.
    pub fn as_simple(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Name of a class, interface, or type-literal member.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberName {
    Identifier(String),
    /// `#name`, stored without the `#`.
    Private(String),
    String(String),
    Numeric(String),
    /// `[expr]`, stored as source text of `expr`.
    Computed(String),
}

impl MemberName {
    pub fn ident(name: impl Into<String>) -> Self {
        MemberName::Identifier(name.into())
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberName::Identifier(name) | MemberName::Numeric(name) => f.write_str(name),
            MemberName::Private(name) => write!(f, "#{name}"),
            MemberName::String(text) => write!(f, "\"{}\"", escape_string(text)),
            MemberName::Computed(text) => write!(f, "[{text}]"),
        }
    }
}

/// Name bound by a variable declaration or parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingName {
    Identifier(String),
    ObjectPattern(Vec<String>),
    ArrayPattern(Vec<String>),
}

impl BindingName {
    pub fn ident(name: impl Into<String>) -> Self {
        BindingName::Identifier(name.into())
    }
}

impl fmt::Display for BindingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingName::Identifier(name) => f.write_str(name),
            BindingName::ObjectPattern(names) => write!(f, "{{ {} }}", names.join(", ")),
            BindingName::ArrayPattern(names) => write!(f, "[{}]", names.join(", ")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleName {
    Identifier(String),
    /// Ambient external module name, `declare module "m"`.
    String(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKeyword {
    Module,
    Namespace,
}

/// Mutability qualifier of a binding list. `Var` is the unqualified form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingKind {
    Var,
    Let,
    Const,
}

impl BindingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BindingKind::Var => "var",
            BindingKind::Let => "let",
            BindingKind::Const => "const",
        }
    }
}

// =============================================================================
// Imports
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportClause {
    pub type_only: bool,
    /// Default import binding, `import X from "m"`.
    pub default: Option<String>,
    pub bindings: Option<ImportBindings>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportBindings {
    /// `* as ns`
    Namespace(String),
    /// `{ a, b as c }`
    Named(Vec<ImportSpecifier>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub type_only: bool,
    /// Exported name when it differs from the local binding, `a` in `a as b`.
    pub property: Option<String>,
    /// Locally bound name.
    pub name: String,
}

impl ImportSpecifier {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            type_only: false,
            property: None,
            name: name.into(),
        }
    }

    pub fn aliased(property: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_only: false,
            property: Some(property.into()),
            name: name.into(),
        }
    }

    /// Name the binding has in the exporting module.
    pub fn imported_name(&self) -> &str {
        self.property.as_deref().unwrap_or(&self.name)
    }
}

/// `assert { key: "value" }` / `with { ... }` entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportAttribute {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleReference {
    /// `import x = A.B`
    Entity(EntityName),
    /// `import x = require(<expr>)`
    External(NodeRef),
}

// =============================================================================
// Modifiers
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Export,
    Declare,
    Default,
    Public,
    Private,
    Protected,
    Static,
    Readonly,
    Abstract,
    Async,
    Const,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Export => "export",
            Modifier::Declare => "declare",
            Modifier::Default => "default",
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
            Modifier::Static => "static",
            Modifier::Readonly => "readonly",
            Modifier::Abstract => "abstract",
            Modifier::Async => "async",
            Modifier::Const => "const",
        }
    }
}

/// Ordered modifier list. Most declarations carry at most a few modifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers(SmallVec<[Modifier; 4]>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    /// Copy of this list with `modifier` placed first, unless already present.
    pub fn with_leading(&self, modifier: Modifier) -> Self {
        if self.has(modifier) {
            return self.clone();
        }
        let mut list = SmallVec::with_capacity(self.0.len() + 1);
        list.push(modifier);
        list.extend(self.0.iter().copied());
        Self(list)
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(modifiers: [Modifier; N]) -> Self {
        modifiers.into_iter().collect()
    }
}

/// Escape a string for a double-quoted literal.
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
