//! Lowers declaration trees into a stricter target type system.
//!
//! A front end parses a declaration file into a
//! [`typelower_syntax::Node`] tree and binds a [`TypeOracle`] to it. This
//! crate runs the tree through the standard rule catalog and the file-level
//! passes and hands back a tree the target accepts, with every construct it
//! cannot express reduced to a single opaque sentinel type.
//!
//! ```
//! use typelower::{TransformConfig, transform_file};
//! use typelower_syntax::build::*;
//! use typelower_syntax::{Keyword, NoOracle, print};
//!
//! let file = source_file(vec![
//!     type_alias("S", type_literal(vec![property_signature("a", keyword(Keyword::Number))])),
//!     function("f", vec![param("x", type_ref("S"))], Some(type_ref("S"))),
//! ]);
//! let out = transform_file(&file, &NoOracle, &TransformConfig::default()).unwrap();
//! assert_eq!(print(&out.file), "type S = JSValue;\nfunction f(x: JSValue): JSValue;\n");
//! ```

pub mod config;
pub mod pipeline;

pub use config::TransformConfig;
pub use pipeline::{
    Pipeline, SourceUnit, Stage, TransformOutput, transform_batch, transform_file,
};
pub use typelower_passes::{AliasEntry, AliasTable};
pub use typelower_syntax::{TransformError, TransformErrorKind, TransformResult, TypeOracle};
