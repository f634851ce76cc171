//! Declaration-level rules.

use typelower_syntax::rewrite::{RewriteOutcome, RewriteRule, RuleContext};
use typelower_syntax::{
    EntityName, Modifier, ModuleKeyword, ModuleName, NodeData, NodeRef, SyntaxKind,
    TransformResult,
};

use super::type_params_of;

/// Interfaces with call, construct or index signatures become an alias of
/// the sentinel, keeping modifiers, name and type parameters.
pub struct SignatureInterfaceToAlias;

impl RewriteRule for SignatureInterfaceToAlias {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::InterfaceDeclaration {
            modifiers,
            name,
            type_params,
            members,
            ..
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        let has_signature = members.iter().any(|m| {
            matches!(
                m.kind(),
                SyntaxKind::CallSignature
                    | SyntaxKind::ConstructSignature
                    | SyntaxKind::IndexSignature
            )
        });
        if !has_signature {
            return Ok(RewriteOutcome::Unchanged);
        }
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::TypeAliasDeclaration {
                modifiers: modifiers.clone(),
                name: name.clone(),
                type_params: type_params.clone(),
                ty: cx.factory().sentinel(),
            })
            .into_ref(),
        ))
    }
}

/// Resolves `this` in a method signature to the enclosing class or
/// interface, looking through enclosing types and the parameter.
/// Anything else becomes the sentinel.
pub struct ThisTypeResolution;

impl RewriteRule for ThisTypeResolution {
    fn rewrite(&self, _node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let factory = cx.factory();
        let mut chain = cx
            .ancestors()
            .skip_while(|a| a.kind().is_type() || a.kind() == SyntaxKind::Parameter);

        let in_method = chain.next().is_some_and(|a| {
            matches!(
                a.kind(),
                SyntaxKind::MethodDeclaration | SyntaxKind::MethodSignature
            )
        });
        let owner = if in_method { chain.next() } else { None };

        let name = owner.and_then(|owner| match &owner.data {
            NodeData::ClassDeclaration { name, .. } => name.as_deref(),
            NodeData::InterfaceDeclaration { name, .. } => Some(name.as_str()),
            _ => None,
        });
        let Some(name) = name else {
            return Ok(RewriteOutcome::Replaced(factory.sentinel()));
        };

        // Generic owners are referenced with their own parameters.
        let type_args = owner
            .map(|owner| type_params_of(owner))
            .unwrap_or_default()
            .iter()
            .filter_map(|tp| match &tp.data {
                NodeData::TypeParameter { name, .. } => {
                    Some(factory.type_reference(EntityName::simple(name.as_str()), Vec::new()))
                }
                _ => None,
            })
            .collect();
        Ok(RewriteOutcome::Replaced(
            factory.type_reference(EntityName::simple(name), type_args),
        ))
    }
}

/// Generator functions lose the `*` and return the sentinel.
pub struct GeneratorReturn;

impl RewriteRule for GeneratorReturn {
    fn rewrite(&self, node: &NodeRef, cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::FunctionDeclaration {
            modifiers,
            generator: true,
            name,
            type_params,
            params,
            ..
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::FunctionDeclaration {
                modifiers: modifiers.clone(),
                generator: false,
                name: name.clone(),
                type_params: type_params.clone(),
                params: params.clone(),
                ret: Some(cx.factory().sentinel()),
            })
            .into_ref(),
        ))
    }
}

/// `module X {}` becomes `namespace X {}`. String-named ambient modules
/// keep the `module` keyword.
pub struct NamespaceKeyword;

impl RewriteRule for NamespaceKeyword {
    fn rewrite(&self, node: &NodeRef, _cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::ModuleDeclaration {
            modifiers,
            keyword: ModuleKeyword::Module,
            name: name @ ModuleName::Identifier(_),
            body,
        } = &node.data
        else {
            return Ok(RewriteOutcome::Unchanged);
        };
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::ModuleDeclaration {
                modifiers: modifiers.clone(),
                keyword: ModuleKeyword::Namespace,
                name: name.clone(),
                body: body.clone(),
            })
            .into_ref(),
        ))
    }
}

/// Statements in a namespace body gain `export`.
pub struct NamespaceMemberExport;

impl NamespaceMemberExport {
    fn is_exportable(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::VariableStatement
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::ClassDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::TypeAliasDeclaration
                | SyntaxKind::EnumDeclaration
                | SyntaxKind::ModuleDeclaration
        )
    }
}

impl RewriteRule for NamespaceMemberExport {
    fn rewrite(&self, node: &NodeRef, _cx: &RuleContext<'_>) -> TransformResult<RewriteOutcome> {
        let NodeData::ModuleBlock { statements } = &node.data else {
            return Ok(RewriteOutcome::Unchanged);
        };

        let mut changed = false;
        let exported = statements
            .iter()
            .map(|stmt| match stmt.modifiers() {
                Some(modifiers)
                    if Self::is_exportable(stmt.kind()) && !modifiers.has(Modifier::Export) =>
                {
                    changed = true;
                    stmt.with_modifiers(modifiers.with_leading(Modifier::Export))
                        .into_ref()
                }
                _ => stmt.clone(),
            })
            .collect();

        if !changed {
            return Ok(RewriteOutcome::Unchanged);
        }
        Ok(RewriteOutcome::Replaced(
            node.with_data(NodeData::ModuleBlock {
                statements: exported,
            })
            .into_ref(),
        ))
    }
}
