//! Per-file transformation pipeline.
//!
//! ## Pipeline Stages
//!
//! ```text
//! SourceFile (parsed by the front end)
//!     │
//!     ▼
//! rule walk ─► every node reduced by the standard catalog
//!     │
//!     ▼
//! reorganize_imports ─► restricted imports dropped, imports hoisted, AliasTable
//!     │
//!     ▼
//! merge_declarations ─► one class / interface per name (optional)
//!     │
//!     ▼
//! substitute_sentinels ─► restricted names and sentinel aliases replaced
//!     │
//!     ▼
//! TransformOutput ─► handed to the printer
//! ```
//!
//! Stages run strictly in order and never revisit a prior stage's output.
//! Each file gets its own context, alias table and merge groups, so files
//! in a batch cannot affect one another.

use derive_more::Display;
use tracing::{debug, debug_span, info_span, warn};
use typelower_passes::{
    AliasTable, merge_declarations, reorganize_imports, standard_catalog, substitute_sentinels,
};
use typelower_syntax::rewrite::{RuleCatalog, TransformContext, TreeWalker};
use typelower_syntax::{
    NodeData, NodeFactory, NodeRef, TransformError, TransformResult, TypeOracle,
};

use crate::config::TransformConfig;

/// Where a file is in the pipeline.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Parsed,
    RuleWalked,
    ImportsReorganized,
    DeclarationsMerged,
    SentinelSubstituted,
    Ready,
}

/// Result of transforming one file.
#[derive(Clone, Debug)]
pub struct TransformOutput {
    pub file: NodeRef,
    /// Names bound by the file's imports.
    pub aliases: AliasTable,
    /// Nodes changed by the rule walk.
    pub rule_changes: usize,
}

/// One file of a batch, with the oracle bound to it.
pub struct SourceUnit<'a> {
    pub name: &'a str,
    pub file: &'a NodeRef,
    pub oracle: &'a dyn TypeOracle,
}

/// A configured pipeline, reusable across files.
pub struct Pipeline {
    config: TransformConfig,
    catalog: RuleCatalog,
}

impl Pipeline {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            catalog: standard_catalog(),
        }
    }

    /// Replace the rule catalog used by the rule walk.
    pub fn with_catalog(mut self, catalog: RuleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transform one file; `name` only labels log output.
    pub fn transform_named(
        &self,
        name: &str,
        file: &NodeRef,
        oracle: &dyn TypeOracle,
    ) -> TransformResult<TransformOutput> {
        let _span = info_span!("transform_file", file = name).entered();

        let NodeData::SourceFile { statements } = &file.data else {
            return Err(TransformError::not_a_source_file(file.kind()));
        };
        debug!(stage = %Stage::Parsed, statements = statements.len());

        let cx = TransformContext::new(oracle, NodeFactory::new(self.config.sentinel.as_str()))
            .with_max_redispatch_depth(self.config.max_redispatch_depth);

        let (file, rule_changes) = debug_span!("stage", stage = %Stage::RuleWalked).in_scope(
            || -> TransformResult<_> {
                let mut walker = TreeWalker::new(&cx, &self.catalog);
                let file = walker.walk(file)?;
                debug!(changes = walker.changes(), "rule walk finished");
                Ok((file, walker.changes()))
            },
        )?;

        let (file, aliases) = debug_span!("stage", stage = %Stage::ImportsReorganized)
            .in_scope(|| reorganize_imports(&file, &self.config.restricted_prefixes))?;

        let file = if self.config.merge_declarations {
            debug_span!("stage", stage = %Stage::DeclarationsMerged)
                .in_scope(|| merge_declarations(&file))
        } else {
            file
        };

        let file = debug_span!("stage", stage = %Stage::SentinelSubstituted)
            .in_scope(|| substitute_sentinels(&cx, &file, &aliases))?;

        debug!(stage = %Stage::Ready, rule_changes);
        Ok(TransformOutput {
            file,
            aliases,
            rule_changes,
        })
    }

    pub fn transform_file(
        &self,
        file: &NodeRef,
        oracle: &dyn TypeOracle,
    ) -> TransformResult<TransformOutput> {
        self.transform_named("<input>", file, oracle)
    }

    /// Transform each unit independently. Results are in input order; a
    /// failing file does not stop the others.
    pub fn transform_batch<'a>(
        &self,
        units: impl IntoIterator<Item = SourceUnit<'a>>,
    ) -> Vec<TransformResult<TransformOutput>> {
        units
            .into_iter()
            .map(|unit| {
                let result = self.transform_named(unit.name, unit.file, unit.oracle);
                if let Err(err) = &result {
                    warn!(file = unit.name, %err, "file transformation failed");
                }
                result
            })
            .collect()
    }
}

/// Transform one file with the standard catalog.
pub fn transform_file(
    file: &NodeRef,
    oracle: &dyn TypeOracle,
    config: &TransformConfig,
) -> TransformResult<TransformOutput> {
    Pipeline::new(config.clone()).transform_file(file, oracle)
}

/// Transform a batch of files with the standard catalog.
pub fn transform_batch<'a>(
    units: impl IntoIterator<Item = SourceUnit<'a>>,
    config: &TransformConfig,
) -> Vec<TransformResult<TransformOutput>> {
    Pipeline::new(config.clone()).transform_batch(units)
}
