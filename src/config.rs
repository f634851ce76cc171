//! Transformation settings.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! restricted_prefixes = ["@kit.", "@ohos.", "@system."]
//! sentinel = "JSValue"
//! max_redispatch_depth = 8
//! merge_declarations = true
//! ```

use serde::{Deserialize, Serialize};
use typelower_syntax::{TransformError, TransformResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Module specifier prefixes whose imports are dropped.
    pub restricted_prefixes: Vec<String>,
    /// Name of the opaque dynamic-value type.
    pub sentinel: String,
    /// How deep oracle-materialized types are re-dispatched.
    pub max_redispatch_depth: usize,
    pub merge_declarations: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            restricted_prefixes: ["@kit.", "@ohos.", "@system."]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            sentinel: "JSValue".to_owned(),
            max_redispatch_depth: 8,
            merge_declarations: true,
        }
    }
}

impl TransformConfig {
    pub fn from_toml_str(text: &str) -> TransformResult<Self> {
        let config: Self = toml::from_str(text).map_err(TransformError::invalid_config)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> TransformResult<()> {
        if self.sentinel.is_empty() {
            return Err(TransformError::invalid_config("sentinel name is empty"));
        }
        if let Some(prefix) = self.restricted_prefixes.iter().find(|p| p.is_empty()) {
            return Err(TransformError::invalid_config(format!(
                "restricted prefix {prefix:?} would match every module"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use typelower_syntax::TransformErrorKind;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = TransformConfig::from_toml_str("").unwrap();
        assert_eq!(config, TransformConfig::default());
        assert_eq!(config.restricted_prefixes, ["@kit.", "@ohos.", "@system."]);
    }

    #[test]
    fn fields_override_defaults() {
        let config = TransformConfig::from_toml_str(
            r#"
            restricted_prefixes = ["@internal/"]
            sentinel = "Any"
            merge_declarations = false
            "#,
        )
        .unwrap();
        assert_eq!(config.restricted_prefixes, ["@internal/"]);
        assert_eq!(config.sentinel, "Any");
        assert_eq!(config.max_redispatch_depth, 8);
        assert!(!config.merge_declarations);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        for text in [
            "sentinel = 3",
            "unknown = true",
            r#"sentinel = """#,
            r#"restricted_prefixes = [""]"#,
        ] {
            let err = TransformConfig::from_toml_str(text).unwrap_err();
            assert!(
                matches!(err.kind(), TransformErrorKind::InvalidConfig(_)),
                "{text}: {err}"
            );
        }
    }
}
