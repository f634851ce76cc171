//! Syntax node kinds.
//!
//! Every [`Node`](crate::Node) reports exactly one kind. The rule catalog
//! dispatches on this tag.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    // Files and namespaces
    SourceFile,
    ModuleDeclaration,
    ModuleBlock,

    // Imports
    ImportDeclaration,
    ImportEqualsDeclaration,

    // Statements and declarations
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    EnumMember,

    // Members and signatures
    PropertyDeclaration,
    MethodDeclaration,
    Constructor,
    PropertySignature,
    MethodSignature,
    CallSignature,
    ConstructSignature,
    IndexSignature,
    Parameter,
    TypeParameter,

    // Keyword types
    AnyKeyword,
    UnknownKeyword,
    ObjectKeyword,
    SymbolKeyword,
    UndefinedKeyword,
    NumberKeyword,
    StringKeyword,
    BooleanKeyword,
    BigIntKeyword,
    VoidKeyword,
    NeverKeyword,

    // Composite types
    TypeReference,
    ArrayType,
    TupleType,
    UnionType,
    IntersectionType,
    LiteralType,
    TypeLiteral,
    FunctionType,
    ConstructorType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    ConditionalType,
    TypeQuery,
    ThisType,
    ParenthesizedType,

    // Expressions
    NumericLiteral,
    StringLiteral,
    BigIntLiteral,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    Identifier,
    PrefixUnaryExpression,
    BinaryExpression,
}

impl SyntaxKind {
    /// Kinds that may appear where a type is expected.
    pub fn is_type(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            AnyKeyword
                | UnknownKeyword
                | ObjectKeyword
                | SymbolKeyword
                | UndefinedKeyword
                | NumberKeyword
                | StringKeyword
                | BooleanKeyword
                | BigIntKeyword
                | VoidKeyword
                | NeverKeyword
                | TypeReference
                | ArrayType
                | TupleType
                | UnionType
                | IntersectionType
                | LiteralType
                | TypeLiteral
                | FunctionType
                | ConstructorType
                | TypeOperator
                | IndexedAccessType
                | MappedType
                | ConditionalType
                | TypeQuery
                | ThisType
                | ParenthesizedType
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
