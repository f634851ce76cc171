//! Error types for tree transformation.
//!
//! Only inputs the rewriter cannot reduce safely are errors. Oracle misses
//! and other recoverable situations are logged and leave the node as is.

use derive_more::Display;

use crate::kind::SyntaxKind;

pub type TransformResult<T> = Result<T, TransformError>;

#[derive(Clone, Display, Debug, PartialEq)]
#[display("{kind}")]
pub struct TransformError {
    kind: Box<TransformErrorKind>,
}

impl<E> From<E> for TransformError
where
    TransformErrorKind: From<E>,
{
    fn from(error: E) -> Self {
        TransformError {
            kind: Box::new(TransformErrorKind::from(error)),
        }
    }
}

impl TransformError {
    pub fn unsupported_module_specifier(specifier: impl std::fmt::Display) -> Self {
        TransformErrorKind::UnsupportedModuleSpecifier {
            specifier: specifier.to_string(),
        }
        .into()
    }

    pub fn invalid_config(msg: impl std::fmt::Display) -> Self {
        TransformErrorKind::InvalidConfig(msg.to_string()).into()
    }

    pub fn not_a_source_file(kind: SyntaxKind) -> Self {
        TransformErrorKind::NotASourceFile(kind).into()
    }

    pub fn kind(&self) -> &TransformErrorKind {
        &self.kind
    }
}

#[derive(Clone, Display, Debug, PartialEq)]
pub enum TransformErrorKind {
    #[display("Unsupported module specifier: {specifier}")]
    UnsupportedModuleSpecifier { specifier: String },

    #[display("Invalid configuration: {_0}")]
    InvalidConfig(String),

    #[display("Expected a source file, found {_0}")]
    NotASourceFile(SyntaxKind),
}

impl std::error::Error for TransformError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = TransformError::unsupported_module_specifier("`./a` + b");
        assert_eq!(err.to_string(), "Unsupported module specifier: `./a` + b");
        assert!(matches!(
            err.kind(),
            TransformErrorKind::UnsupportedModuleSpecifier { .. }
        ));

        let err = TransformError::not_a_source_file(SyntaxKind::ModuleBlock);
        assert_eq!(err.to_string(), "Expected a source file, found ModuleBlock");
    }
}
