//! The standard rule catalog.
//!
//! ## Registrations
//!
//! | Kind                                  | Rules, in order                                        |
//! |---------------------------------------|--------------------------------------------------------|
//! | `any`/`unknown`/`object`/`symbol`/`undefined` | keyword to sentinel                            |
//! | type literal, intersection            | structural to sentinel                                 |
//! | mapped, conditional, constructor type | unrepresentable to sentinel                            |
//! | tuple                                 | tuple to sentinel array                                |
//! | type operator                         | `readonly T` to `T`, others to sentinel                |
//! | type reference                        | builtins to sentinel, wrappers to primitives           |
//! | literal type                          | numeric literal to `number`                            |
//! | `this`                                | enclosing declaration name or sentinel                 |
//! | indexed access, type query            | oracle materialization, re-dispatched                  |
//! | variable declaration list             | mutability normalization, initializer narrowing        |
//! | property declaration                  | private elision, initializer inference, optional widening |
//! | method declaration                    | private elision, object-binding parameters             |
//! | parameter, property signature         | optional widening                                      |
//! | index signature                       | class index signature elision                          |
//! | type parameter                        | literal widening                                       |
//! | type alias                            | string literal alias widening                          |
//! | interface                             | signature interfaces to sentinel alias                 |
//! | function declaration                  | object-binding parameters, generator return            |
//! | module declaration / block            | `namespace` keyword, member export                     |
//! | import / import-equals                | specifier normalization and import shape fixes         |

mod bindings;
mod declarations;
mod imports;
mod literals;
mod members;
mod opaque;
mod resolve;

use typelower_syntax::rewrite::RuleCatalog;
use typelower_syntax::{Keyword, Literal, Node, NodeData, NodeRef, PrefixOperator, SyntaxKind};

pub use bindings::{NarrowBindingInitializers, NormalizeMutability};
pub use declarations::{
    GeneratorReturn, NamespaceKeyword, NamespaceMemberExport, SignatureInterfaceToAlias,
    ThisTypeResolution,
};
pub use imports::{
    DropImportAttributes, ModuleSpecifierNormalization, RequireToNamespaceImport,
    SplitDefaultImports, ValueImportClause,
};
pub use literals::{NumericLiteralType, StringLiteralAlias, TypeParameterLiteralWidening};
pub use members::{
    ClassIndexSignatureElision, ObjectBindingParameters, OptionalWidening,
    PrivateMemberElision, PropertyInitializerInference,
};
pub use opaque::{
    BuiltinReference, KeywordToSentinel, StructuralToSentinel, TupleToArray,
    TypeOperatorReduction, UnrepresentableToSentinel,
};
pub use resolve::OracleResolution;

pub(crate) use imports::module_specifier;

/// Kinds whose payload carries a parameter list.
const SIGNATURE_KINDS: &[SyntaxKind] = &[
    SyntaxKind::FunctionDeclaration,
    SyntaxKind::MethodDeclaration,
    SyntaxKind::MethodSignature,
    SyntaxKind::Constructor,
    SyntaxKind::CallSignature,
    SyntaxKind::ConstructSignature,
    SyntaxKind::FunctionType,
];

/// Build the catalog used by the standard pipeline.
pub fn standard_catalog() -> RuleCatalog {
    use SyntaxKind::*;

    RuleCatalog::new()
        // Types
        .with_rule_for(
            &[
                AnyKeyword,
                UnknownKeyword,
                ObjectKeyword,
                SymbolKeyword,
                UndefinedKeyword,
            ],
            KeywordToSentinel,
        )
        .with_rule_for(&[TypeLiteral, IntersectionType], StructuralToSentinel)
        .with_rule_for(
            &[MappedType, ConditionalType, ConstructorType],
            UnrepresentableToSentinel,
        )
        .with_rule(TupleType, TupleToArray)
        .with_rule(TypeOperator, TypeOperatorReduction)
        .with_rule(TypeReference, BuiltinReference)
        .with_rule(LiteralType, NumericLiteralType)
        .with_rule(ThisType, ThisTypeResolution)
        .with_rule_for(&[IndexedAccessType, TypeQuery], OracleResolution)
        // Bindings
        .with_rule(VariableDeclarationList, NormalizeMutability)
        .with_rule(VariableDeclarationList, NarrowBindingInitializers)
        // Members
        .with_rule_for(&[PropertyDeclaration, MethodDeclaration], PrivateMemberElision)
        .with_rule(PropertyDeclaration, PropertyInitializerInference)
        .with_rule_for(
            &[Parameter, PropertyDeclaration, PropertySignature],
            OptionalWidening,
        )
        .with_rule(IndexSignature, ClassIndexSignatureElision)
        .with_rule_for(SIGNATURE_KINDS, ObjectBindingParameters)
        .with_rule(TypeParameter, TypeParameterLiteralWidening)
        // Declarations
        .with_rule(TypeAliasDeclaration, StringLiteralAlias)
        .with_rule(InterfaceDeclaration, SignatureInterfaceToAlias)
        .with_rule(FunctionDeclaration, GeneratorReturn)
        .with_rule(ModuleDeclaration, NamespaceKeyword)
        .with_rule(ModuleBlock, NamespaceMemberExport)
        // Imports
        .with_rule(ImportDeclaration, ModuleSpecifierNormalization)
        .with_rule(ImportDeclaration, DropImportAttributes)
        .with_rule(ImportDeclaration, ValueImportClause)
        .with_rule(ImportDeclaration, SplitDefaultImports)
        .with_rule(ImportEqualsDeclaration, RequireToNamespaceImport)
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Keyword type a literal expression widens to, if any.
///
/// Negative numbers arrive as `-` applied to a numeric literal.
pub(crate) fn literal_keyword(expr: &Node) -> Option<Keyword> {
    match &expr.data {
        NodeData::Literal(Literal::Numeric(_)) => Some(Keyword::Number),
        NodeData::Literal(Literal::String(_)) => Some(Keyword::String),
        NodeData::Literal(Literal::BigInt(_)) => Some(Keyword::BigInt),
        NodeData::Literal(Literal::True | Literal::False) => Some(Keyword::Boolean),
        NodeData::PrefixUnary {
            operator: PrefixOperator::Minus | PrefixOperator::Plus,
            operand,
        } => match &operand.data {
            NodeData::Literal(Literal::Numeric(_)) => Some(Keyword::Number),
            NodeData::Literal(Literal::BigInt(_)) => Some(Keyword::BigInt),
            _ => None,
        },
        _ => None,
    }
}

/// Keyword type a literal type node widens to, if any.
pub(crate) fn literal_type_keyword(ty: &Node) -> Option<Keyword> {
    match &ty.data {
        NodeData::LiteralType { literal } => literal_keyword(literal),
        _ => None,
    }
}

/// Parameter list of a signature-bearing node.
pub(crate) fn params_of(node: &Node) -> Option<&[NodeRef]> {
    match &node.data {
        NodeData::FunctionDeclaration { params, .. }
        | NodeData::MethodDeclaration { params, .. }
        | NodeData::MethodSignature { params, .. }
        | NodeData::Constructor { params, .. }
        | NodeData::CallSignature { params, .. }
        | NodeData::ConstructSignature { params, .. }
        | NodeData::FunctionType { params, .. }
        | NodeData::ConstructorType { params, .. } => Some(params),
        _ => None,
    }
}

/// Copy of a signature-bearing node with a new parameter list.
pub(crate) fn with_params(node: &Node, new_params: Vec<NodeRef>) -> Node {
    let mut data = node.data.clone();
    match &mut data {
        NodeData::FunctionDeclaration { params, .. }
        | NodeData::MethodDeclaration { params, .. }
        | NodeData::MethodSignature { params, .. }
        | NodeData::Constructor { params, .. }
        | NodeData::CallSignature { params, .. }
        | NodeData::ConstructSignature { params, .. }
        | NodeData::FunctionType { params, .. }
        | NodeData::ConstructorType { params, .. } => *params = new_params,
        _ => {}
    }
    node.with_data(data)
}

/// Type parameters declared directly by a node.
pub(crate) fn type_params_of(node: &Node) -> &[NodeRef] {
    match &node.data {
        NodeData::FunctionDeclaration { type_params, .. }
        | NodeData::ClassDeclaration { type_params, .. }
        | NodeData::InterfaceDeclaration { type_params, .. }
        | NodeData::TypeAliasDeclaration { type_params, .. }
        | NodeData::MethodDeclaration { type_params, .. }
        | NodeData::MethodSignature { type_params, .. }
        | NodeData::CallSignature { type_params, .. }
        | NodeData::ConstructSignature { type_params, .. }
        | NodeData::FunctionType { type_params, .. }
        | NodeData::ConstructorType { type_params, .. } => type_params,
        _ => &[],
    }
}
