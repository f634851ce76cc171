//! Import shape rules.
//!
//! These run per import declaration. Dropping restricted imports needs the
//! whole file and lives in [`crate::imports`].

use tracing::debug;
use typelower_syntax::rewrite::{RewriteOutcome, RewriteRule, RuleContext};
use typelower_syntax::{
    ImportBindings, ImportClause, Literal, Modifier, ModuleReference, NodeData, NodeRef,
    TransformError, TransformResult, print,
};

/// String value of a module specifier, or the hard failure for anything
/// that is not a plain string literal.
pub(crate) fn module_specifier(specifier: &NodeRef) -> TransformResult<&str> {
    match &specifier.data {
        NodeData::Literal(Literal::String(text)) => Ok(text),
        _ => Err(TransformError::unsupported_module_specifier(print(specifier))),
    }
}

/// Checks the specifier is a string literal and strips a `.js` suffix.
pub struct ModuleSpecifierNormalization;

impl RewriteRule for ModuleSpecifierNormalization {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::ImportDeclaration {
            clause,
            specifier,
            attributes,
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        let Some(stripped) = module_specifier(specifier)?.strip_suffix(".js") else {
            return Ok(RewriteOutcome::Unchanged);
        };
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::ImportDeclaration {
                clause: clause.clone(),
                specifier: cx.factory().literal(Literal::String(stripped.to_owned())),
                attributes: attributes.clone(),
            })
            .into_ref(),
        ))
    }
}

/// `assert { ... }` clauses are dropped.
pub struct DropImportAttributes;

impl RewriteRule for DropImportAttributes {
    fn rewrite(&self, node: &NodeRef, _cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::ImportDeclaration {
            clause,
            specifier,
            attributes,
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        if attributes.is_empty() {
            return Ok(RewriteOutcome::Unchanged);
        }
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::ImportDeclaration {
                clause: clause.clone(),
                specifier: specifier.clone(),
                attributes: Vec::new(),
            })
            .into_ref(),
        ))
    }
}

/// `import type` and `{ type x }` become value imports.
pub struct ValueImportClause;

impl RewriteRule for ValueImportClause {
    fn rewrite(&self, node: &NodeRef, _cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::ImportDeclaration {
            clause: Some(clause),
            specifier,
            attributes,
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        let typed_specifier = match &clause.bindings {
            Some(ImportBindings::Named(specifiers)) => specifiers.iter().any(|s| s.type_only),
            _ => false,
        };
        if !clause.type_only && !typed_specifier {
            return Ok(RewriteOutcome::Unchanged);
        }

        let mut clause = clause.clone();
        clause.type_only = false;
        if let Some(ImportBindings::Named(specifiers)) = &mut clause.bindings {
            for spec in specifiers.iter_mut() {
                spec.type_only = false;
            }
        }
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::ImportDeclaration {
                clause: Some(clause),
                specifier: specifier.clone(),
                attributes: attributes.clone(),
            })
            .into_ref(),
        ))
    }
}

/// `import { default as X, a } from "m"` becomes
/// `import { a } from "m"` followed by `import X from "m"`.
pub struct SplitDefaultImports;

impl RewriteRule for SplitDefaultImports {
    fn rewrite(&self, node: &NodeRef, _cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::ImportDeclaration {
            clause: Some(clause),
            specifier,
            attributes,
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        let Some(ImportBindings::Named(specifiers)) = &clause.bindings else {
            return Ok(RewriteOutcome::Unchanged);
        };
        let (defaults, named): (Vec<_>, Vec<_>) = specifiers
            .iter()
            .cloned()
            .partition(|s| s.property.as_deref() == Some("default"));
        if defaults.is_empty() {
            return Ok(RewriteOutcome::Unchanged);
        }

        let import = |clause: ImportClause| {
            node.with_data(NodeData::ImportDeclaration {
                clause: Some(clause),
                specifier: specifier.clone(),
                attributes: attributes.clone(),
            })
            .into_ref()
        };

        let mut out = Vec::with_capacity(defaults.len() + 1);
        if clause.default.is_some() || !named.is_empty() {
            out.push(import(ImportClause {
                type_only: clause.type_only,
                default: clause.default.clone(),
                bindings: (!named.is_empty()).then_some(ImportBindings::Named(named)),
            }));
        }
        out.extend(defaults.into_iter().map(|spec| {
            import(ImportClause {
                type_only: clause.type_only,
                default: Some(spec.name),
                bindings: None,
            })
        }));
        Ok(RewriteOutcome::Spliced(out))
    }
}

/// `import x = require("m")` becomes `import * as x from "m"`.
///
/// The new import is re-dispatched so the import rules see it. Exported
/// import-equals and entity aliases (`import x = A.B`) are left alone.
pub struct RequireToNamespaceImport;

impl RewriteRule for RequireToNamespaceImport {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::ImportEqualsDeclaration {
            modifiers,
            name,
            reference: ModuleReference::External(specifier),
            ..
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        module_specifier(specifier)?;
        if modifiers.has(Modifier::Export) {
            debug!(name = %name, "keeping exported import-equals declaration");
            return Ok(RewriteOutcome::Unchanged);
        }

        let import = node
            .with_data(NodeData::ImportDeclaration {
                clause: Some(ImportClause {
                    type_only: false,
                    default: None,
                    bindings: Some(ImportBindings::Namespace(name.clone())),
                }),
                specifier: specifier.clone(),
                attributes: Vec::new(),
            })
            .into_ref();
        Ok(RewriteOutcome::Replaced(cx.redispatch(import)?))
    }
}
