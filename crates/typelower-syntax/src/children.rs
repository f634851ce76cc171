//! Structural rebuilding of a node's child slots.

use std::sync::Arc;

use tracing::warn;

use crate::node::{ModuleReference, Node, NodeData, NodeRef};
use crate::rewrite::RewriteOutcome;

/// Callback applied to each child by [`Node::try_map_children`].
pub type ChildFn<'a, E> = dyn FnMut(&NodeRef) -> Result<RewriteOutcome, E> + 'a;

impl Node {
    /// Rebuild this node from the outcomes `f` produces for each child.
    ///
    /// Returns `Ok(None)` when every child came back unchanged, so callers
    /// keep sharing the original node. Deletion and splicing take effect in
    /// list slots. In a single-node slot a deletion clears an optional
    /// child; anything else that cannot fit the slot is ignored.
    pub fn try_map_children<E>(&self, f: &mut ChildFn<'_, E>) -> Result<Option<Node>, E> {
        let mut m = Mapper { f, changed: false };
        let data = match &self.data {
            NodeData::SourceFile { statements } => NodeData::SourceFile {
                statements: m.list(statements)?,
            },
            NodeData::ModuleDeclaration {
                modifiers,
                keyword,
                name,
                body,
            } => NodeData::ModuleDeclaration {
                modifiers: modifiers.clone(),
                keyword: *keyword,
                name: name.clone(),
                body: m.opt(body)?,
            },
            NodeData::ModuleBlock { statements } => NodeData::ModuleBlock {
                statements: m.list(statements)?,
            },
            NodeData::ImportDeclaration {
                clause,
                specifier,
                attributes,
            } => NodeData::ImportDeclaration {
                clause: clause.clone(),
                specifier: m.one(specifier)?,
                attributes: attributes.clone(),
            },
            NodeData::ImportEqualsDeclaration {
                modifiers,
                type_only,
                name,
                reference,
            } => NodeData::ImportEqualsDeclaration {
                modifiers: modifiers.clone(),
                type_only: *type_only,
                name: name.clone(),
                reference: match reference {
                    ModuleReference::External(expr) => ModuleReference::External(m.one(expr)?),
                    ModuleReference::Entity(_) => return Ok(None),
                },
            },
            NodeData::VariableStatement { modifiers, list } => NodeData::VariableStatement {
                modifiers: modifiers.clone(),
                list: m.one(list)?,
            },
            NodeData::VariableDeclarationList {
                binding,
                declarations,
            } => NodeData::VariableDeclarationList {
                binding: *binding,
                declarations: m.list(declarations)?,
            },
            NodeData::VariableDeclaration {
                name,
                ty,
                initializer,
            } => NodeData::VariableDeclaration {
                name: name.clone(),
                ty: m.opt(ty)?,
                initializer: m.opt(initializer)?,
            },
            NodeData::FunctionDeclaration {
                modifiers,
                generator,
                name,
                type_params,
                params,
                ret,
            } => NodeData::FunctionDeclaration {
                modifiers: modifiers.clone(),
                generator: *generator,
                name: name.clone(),
                type_params: m.list(type_params)?,
                params: m.list(params)?,
                ret: m.opt(ret)?,
            },
            NodeData::ClassDeclaration {
                modifiers,
                name,
                type_params,
                extends,
                implements,
                members,
            } => NodeData::ClassDeclaration {
                modifiers: modifiers.clone(),
                name: name.clone(),
                type_params: m.list(type_params)?,
                extends: m.opt(extends)?,
                implements: m.list(implements)?,
                members: m.list(members)?,
            },
            NodeData::InterfaceDeclaration {
                modifiers,
                name,
                type_params,
                extends,
                members,
            } => NodeData::InterfaceDeclaration {
                modifiers: modifiers.clone(),
                name: name.clone(),
                type_params: m.list(type_params)?,
                extends: m.list(extends)?,
                members: m.list(members)?,
            },
            NodeData::TypeAliasDeclaration {
                modifiers,
                name,
                type_params,
                ty,
            } => NodeData::TypeAliasDeclaration {
                modifiers: modifiers.clone(),
                name: name.clone(),
                type_params: m.list(type_params)?,
                ty: m.one(ty)?,
            },
            NodeData::EnumDeclaration {
                modifiers,
                name,
                members,
            } => NodeData::EnumDeclaration {
                modifiers: modifiers.clone(),
                name: name.clone(),
                members: m.list(members)?,
            },
            NodeData::EnumMember { name, initializer } => NodeData::EnumMember {
                name: name.clone(),
                initializer: m.opt(initializer)?,
            },
            NodeData::PropertyDeclaration {
                modifiers,
                name,
                question,
                ty,
                initializer,
            } => NodeData::PropertyDeclaration {
                modifiers: modifiers.clone(),
                name: name.clone(),
                question: *question,
                ty: m.opt(ty)?,
                initializer: m.opt(initializer)?,
            },
            NodeData::MethodDeclaration {
                modifiers,
                name,
                question,
                type_params,
                params,
                ret,
            } => NodeData::MethodDeclaration {
                modifiers: modifiers.clone(),
                name: name.clone(),
                question: *question,
                type_params: m.list(type_params)?,
                params: m.list(params)?,
                ret: m.opt(ret)?,
            },
            NodeData::Constructor { modifiers, params } => NodeData::Constructor {
                modifiers: modifiers.clone(),
                params: m.list(params)?,
            },
            NodeData::PropertySignature {
                modifiers,
                name,
                question,
                ty,
            } => NodeData::PropertySignature {
                modifiers: modifiers.clone(),
                name: name.clone(),
                question: *question,
                ty: m.opt(ty)?,
            },
            NodeData::MethodSignature {
                name,
                question,
                type_params,
                params,
                ret,
            } => NodeData::MethodSignature {
                name: name.clone(),
                question: *question,
                type_params: m.list(type_params)?,
                params: m.list(params)?,
                ret: m.opt(ret)?,
            },
            NodeData::CallSignature {
                type_params,
                params,
                ret,
            } => NodeData::CallSignature {
                type_params: m.list(type_params)?,
                params: m.list(params)?,
                ret: m.opt(ret)?,
            },
            NodeData::ConstructSignature {
                type_params,
                params,
                ret,
            } => NodeData::ConstructSignature {
                type_params: m.list(type_params)?,
                params: m.list(params)?,
                ret: m.opt(ret)?,
            },
            NodeData::IndexSignature {
                modifiers,
                params,
                ty,
            } => NodeData::IndexSignature {
                modifiers: modifiers.clone(),
                params: m.list(params)?,
                ty: m.one(ty)?,
            },
            NodeData::Parameter {
                modifiers,
                rest,
                name,
                question,
                ty,
                initializer,
            } => NodeData::Parameter {
                modifiers: modifiers.clone(),
                rest: *rest,
                name: name.clone(),
                question: *question,
                ty: m.opt(ty)?,
                initializer: m.opt(initializer)?,
            },
            NodeData::TypeParameter {
                name,
                constraint,
                default,
            } => NodeData::TypeParameter {
                name: name.clone(),
                constraint: m.opt(constraint)?,
                default: m.opt(default)?,
            },
            NodeData::TypeReference { name, type_args } => NodeData::TypeReference {
                name: name.clone(),
                type_args: m.list(type_args)?,
            },
            NodeData::ArrayType { element } => NodeData::ArrayType {
                element: m.one(element)?,
            },
            NodeData::TupleType { elements } => NodeData::TupleType {
                elements: m.list(elements)?,
            },
            NodeData::UnionType { types } => NodeData::UnionType {
                types: m.list(types)?,
            },
            NodeData::IntersectionType { types } => NodeData::IntersectionType {
                types: m.list(types)?,
            },
            NodeData::LiteralType { literal } => NodeData::LiteralType {
                literal: m.one(literal)?,
            },
            NodeData::TypeLiteral { members } => NodeData::TypeLiteral {
                members: m.list(members)?,
            },
            NodeData::FunctionType {
                type_params,
                params,
                ret,
            } => NodeData::FunctionType {
                type_params: m.list(type_params)?,
                params: m.list(params)?,
                ret: m.one(ret)?,
            },
            NodeData::ConstructorType {
                type_params,
                params,
                ret,
            } => NodeData::ConstructorType {
                type_params: m.list(type_params)?,
                params: m.list(params)?,
                ret: m.one(ret)?,
            },
            NodeData::TypeOperator { operator, ty } => NodeData::TypeOperator {
                operator: *operator,
                ty: m.one(ty)?,
            },
            NodeData::IndexedAccessType { object, index } => NodeData::IndexedAccessType {
                object: m.one(object)?,
                index: m.one(index)?,
            },
            NodeData::MappedType {
                readonly,
                type_param,
                question,
                ty,
            } => NodeData::MappedType {
                readonly: *readonly,
                type_param: m.one(type_param)?,
                question: *question,
                ty: m.opt(ty)?,
            },
            NodeData::ConditionalType {
                check,
                extends,
                when_true,
                when_false,
            } => NodeData::ConditionalType {
                check: m.one(check)?,
                extends: m.one(extends)?,
                when_true: m.one(when_true)?,
                when_false: m.one(when_false)?,
            },
            NodeData::ParenthesizedType { ty } => NodeData::ParenthesizedType { ty: m.one(ty)? },
            NodeData::PrefixUnary { operator, operand } => NodeData::PrefixUnary {
                operator: *operator,
                operand: m.one(operand)?,
            },
            NodeData::Binary {
                left,
                operator,
                right,
            } => NodeData::Binary {
                left: m.one(left)?,
                operator: *operator,
                right: m.one(right)?,
            },
            NodeData::Keyword(_)
            | NodeData::TypeQuery { .. }
            | NodeData::ThisType
            | NodeData::Literal(_)
            | NodeData::Identifier(_) => return Ok(None),
        };
        Ok(m.changed.then(|| self.with_data(data)))
    }
}

struct Mapper<'f, 'a, E> {
    f: &'f mut ChildFn<'a, E>,
    changed: bool,
}

impl<E> Mapper<'_, '_, E> {
    fn replaced(&mut self, old: &NodeRef, new: NodeRef) -> NodeRef {
        if !Arc::ptr_eq(old, &new) {
            self.changed = true;
        }
        new
    }

    fn one(&mut self, child: &NodeRef) -> Result<NodeRef, E> {
        match (self.f)(child)? {
            RewriteOutcome::Unchanged => Ok(child.clone()),
            RewriteOutcome::Replaced(new) => Ok(self.replaced(child, new)),
            RewriteOutcome::Spliced(mut nodes) if nodes.len() == 1 => {
                let new = nodes.remove(0);
                Ok(self.replaced(child, new))
            }
            RewriteOutcome::Deleted | RewriteOutcome::Spliced(_) => {
                warn!(kind = %child.kind(), "cannot delete or splice a required child, keeping it");
                Ok(child.clone())
            }
        }
    }

    fn opt(&mut self, child: &Option<NodeRef>) -> Result<Option<NodeRef>, E> {
        let Some(child) = child else {
            return Ok(None);
        };
        match (self.f)(child)? {
            RewriteOutcome::Unchanged => Ok(Some(child.clone())),
            RewriteOutcome::Replaced(new) => Ok(Some(self.replaced(child, new))),
            RewriteOutcome::Spliced(mut nodes) if nodes.len() == 1 => {
                let new = nodes.remove(0);
                Ok(Some(self.replaced(child, new)))
            }
            RewriteOutcome::Deleted => {
                self.changed = true;
                Ok(None)
            }
            RewriteOutcome::Spliced(nodes) if nodes.is_empty() => {
                self.changed = true;
                Ok(None)
            }
            RewriteOutcome::Spliced(_) => {
                warn!(kind = %child.kind(), "cannot splice into a single-node slot, keeping it");
                Ok(Some(child.clone()))
            }
        }
    }

    fn list(&mut self, children: &[NodeRef]) -> Result<Vec<NodeRef>, E> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            match (self.f)(child)? {
                RewriteOutcome::Unchanged => out.push(child.clone()),
                RewriteOutcome::Replaced(new) => {
                    let new = self.replaced(child, new);
                    out.push(new);
                }
                RewriteOutcome::Deleted => self.changed = true,
                RewriteOutcome::Spliced(nodes) => {
                    self.changed = true;
                    out.extend(nodes);
                }
            }
        }
        Ok(out)
    }
}
