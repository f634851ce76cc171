//! Import reorganization.
//!
//! # Overview
//!
//! Imports from restricted module namespaces cannot be expressed in the
//! target. This pass drops them and records every name they bound in an
//! [`AliasTable`], which sentinel substitution later consults. Retained
//! imports are moved ahead of all other statements:
//!
//! ```text
//! [retained imports] ++ [other statements, in source order]
//! ```
//!
//! Only top-level statements are considered.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::{debug, warn};
use typelower_syntax::{
    ImportBindings, ModuleReference, Node, NodeData, NodeRef, TransformError, TransformResult,
};

use crate::rules::module_specifier;

/// One name bound by an import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasEntry {
    pub local_name: String,
    /// Name in the exporting module: `default` for default imports and `*`
    /// for namespace imports.
    pub original_name: String,
    pub is_restricted: bool,
}

/// Imported names of one file, keyed by local name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a binding. The first binding of a local name wins; a later
    /// one is logged and dropped.
    pub fn insert(&mut self, entry: AliasEntry) {
        match self.entries.entry(entry.local_name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(slot) => {
                let kept = slot.get();
                warn!(
                    name = %kept.local_name,
                    kept_restricted = kept.is_restricted,
                    dropped_restricted = entry.is_restricted,
                    "local name bound by more than one import"
                );
            }
        }
    }

    pub fn get(&self, local_name: &str) -> Option<&AliasEntry> {
        self.entries.get(local_name)
    }

    pub fn is_restricted(&self, local_name: &str) -> bool {
        self.get(local_name).is_some_and(|e| e.is_restricted)
    }

    /// Local names bound by restricted imports, in sorted order.
    pub fn restricted_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|e| e.is_restricted)
            .map(|e| e.local_name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Local and original names bound by an import-like statement, together
/// with its module specifier. `None` for statements that import nothing
/// from a module.
fn bound_names(stmt: &Node) -> TransformResult<Option<(&str, Vec<(String, String)>)>> {
    match &stmt.data {
        NodeData::ImportDeclaration {
            clause, specifier, ..
        } => {
            let module = module_specifier(specifier)?;
            let mut names = Vec::new();
            if let Some(clause) = clause {
                if let Some(default) = &clause.default {
                    names.push((default.clone(), "default".to_owned()));
                }
                match &clause.bindings {
                    Some(ImportBindings::Namespace(ns)) => names.push((ns.clone(), "*".to_owned())),
                    Some(ImportBindings::Named(specifiers)) => names.extend(
                        specifiers
                            .iter()
                            .map(|s| (s.name.clone(), s.imported_name().to_owned())),
                    ),
                    None => {}
                }
            }
            Ok(Some((module, names)))
        }
        NodeData::ImportEqualsDeclaration {
            name,
            reference: ModuleReference::External(specifier),
            ..
        } => {
            let module = module_specifier(specifier)?;
            Ok(Some((module, vec![(name.clone(), "*".to_owned())])))
        }
        _ => Ok(None),
    }
}

fn is_import(stmt: &Node) -> bool {
    matches!(
        stmt.data,
        NodeData::ImportDeclaration { .. } | NodeData::ImportEqualsDeclaration { .. }
    )
}

/// Drop restricted imports, record what they bound, and hoist the rest.
///
/// Returns the file unchanged (pointer-identical) when nothing moves.
pub fn reorganize_imports(
    file: &NodeRef,
    restricted_prefixes: &[String],
) -> TransformResult<(NodeRef, AliasTable)> {
    let NodeData::SourceFile { statements } = &file.data else {
        return Err(TransformError::not_a_source_file(file.kind()));
    };

    let mut aliases = AliasTable::new();
    let mut imports = Vec::new();
    let mut others = Vec::new();

    for stmt in statements {
        if !is_import(stmt) {
            others.push(stmt.clone());
            continue;
        }
        let Some((module, names)) = bound_names(stmt)? else {
            // `import x = A.B` binds a local entity, not a module.
            imports.push(stmt.clone());
            continue;
        };
        let is_restricted = restricted_prefixes
            .iter()
            .any(|prefix| module.starts_with(prefix.as_str()));
        if is_restricted {
            debug!(module, count = names.len(), "dropping restricted import");
        } else {
            imports.push(stmt.clone());
        }
        for (local_name, original_name) in names {
            aliases.insert(AliasEntry {
                local_name,
                original_name,
                is_restricted,
            });
        }
    }

    let reordered: Vec<NodeRef> = imports.into_iter().chain(others).collect();
    let unchanged = reordered.len() == statements.len()
        && reordered
            .iter()
            .zip(statements)
            .all(|(a, b)| NodeRef::ptr_eq(a, b));
    if unchanged {
        return Ok((file.clone(), aliases));
    }
    let file = file
        .with_data(NodeData::SourceFile {
            statements: reordered,
        })
        .into_ref();
    Ok((file, aliases))
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use typelower_syntax::build::*;
    use typelower_syntax::{ImportSpecifier, Keyword, NodeRef, TransformErrorKind, print};

    use super::*;

    fn prefixes() -> Vec<String> {
        vec!["@kit.".to_owned(), "@ohos.".to_owned()]
    }

    #[test]
    fn restricted_imports_are_dropped_and_recorded() {
        let file = source_file(vec![
            type_alias("A", keyword(Keyword::Number)),
            import_named(
                vec![
                    ImportSpecifier::named("Want"),
                    ImportSpecifier::aliased("Context", "Ctx"),
                ],
                "@kit.AbilityKit",
            ),
            import_default("hilog", "@ohos.hilog"),
            import_namespace("path", "path"),
            function("f", vec![], None),
        ]);
        let (out, aliases) = reorganize_imports(&file, &prefixes()).unwrap();

        assert_snapshot!(print(&out), @r#"
        import * as path from "path";
        type A = number;
        function f();
        "#);
        let restricted: Vec<&str> = aliases.restricted_names().collect();
        assert_eq!(restricted, ["Ctx", "Want", "hilog"]);
        assert_eq!(
            aliases.get("Ctx"),
            Some(&AliasEntry {
                local_name: "Ctx".to_owned(),
                original_name: "Context".to_owned(),
                is_restricted: true,
            })
        );
        assert_eq!(aliases.get("hilog").map(|e| e.original_name.as_str()), Some("default"));
        assert!(!aliases.is_restricted("path"));
        assert_eq!(aliases.len(), 4);
    }

    #[test]
    fn already_ordered_files_are_returned_as_is() {
        let file = source_file(vec![import_namespace("fs", "fs"), interface("I", vec![])]);
        let (out, aliases) = reorganize_imports(&file, &prefixes()).unwrap();
        assert!(NodeRef::ptr_eq(&out, &file));
        assert!(aliases.restricted_names().next().is_none());
    }

    #[test]
    fn require_imports_from_restricted_modules_are_dropped() {
        let file = source_file(vec![import_require("router", "@ohos.router")]);
        let (out, aliases) = reorganize_imports(&file, &prefixes()).unwrap();
        assert_eq!(print(&out), "");
        assert!(aliases.is_restricted("router"));
    }

    #[test]
    fn first_binding_of_a_name_wins() {
        let file = source_file(vec![
            import_default("Want", "@ohos.app.ability.Want"),
            import_default("Want", "./want"),
            import_named(vec![ImportSpecifier::named("Local")], "./local"),
            import_named(vec![ImportSpecifier::named("Local")], "@kit.AbilityKit"),
        ]);
        let (out, aliases) = reorganize_imports(&file, &prefixes()).unwrap();
        assert!(aliases.is_restricted("Want"));
        assert!(!aliases.is_restricted("Local"));
        assert_eq!(aliases.len(), 2);
        assert_snapshot!(print(&out), @r#"
        import Want from "./want";
        import { Local } from "./local";
        "#);
    }

    #[test]
    fn non_files_are_rejected() {
        let err = reorganize_imports(&interface("I", vec![]), &prefixes()).unwrap_err();
        assert!(matches!(err.kind(), TransformErrorKind::NotASourceFile(_)));
    }
}
