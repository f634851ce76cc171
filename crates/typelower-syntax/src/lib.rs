//! Declaration trees for typelower.
//!
//! This crate holds the immutable declaration tree that front ends hand to
//! the rewriter, the factory rules use to synthesize nodes, a printer for
//! declaration-file text, the type-resolution oracle interface, and the
//! rule-dispatched rewriting infrastructure.

// === Tree ===
mod children;
pub mod kind;
pub mod location;
pub mod node;

// === Services ===
pub mod build;
pub mod error;
pub mod factory;
pub mod oracle;
pub mod printer;

// === Rewriting ===
pub mod rewrite;

pub use children::ChildFn;
pub use error::{TransformError, TransformErrorKind, TransformResult};
pub use factory::NodeFactory;
pub use kind::SyntaxKind;
pub use location::Span;
pub use node::{
    BinaryOperator, BindingKind, BindingName, EmptyEntityName, EntityName, ImportAttribute,
    ImportBindings, ImportClause, ImportSpecifier, Keyword, Literal, MemberName, Modifier,
    Modifiers, ModuleKeyword, ModuleName, ModuleReference, Node, NodeData, NodeRef,
    PrefixOperator, TypeOperatorKind,
};
pub use oracle::{NoOracle, SemanticType, TableOracle, TypeOracle};
pub use printer::print;

// Re-export smallvec for front ends building modifier lists
pub use smallvec;
