//! Signature equality between class and interface members.
//!
//! Two members are the same when their rendered signatures agree. The
//! comparison is textual: it never looks through aliases or compares
//! structurally, so it can report two equivalent members as different but
//! never the reverse.
//!
//! | Compared                | Methods | Properties |
//! |-------------------------|---------|------------|
//! | name                    | yes     | yes        |
//! | type parameter names    | yes     |            |
//! | parameter name and type | yes     |            |
//! | optional / default / rest | yes   |            |
//! | return / value type     | yes     | yes        |
//!
//! Members of any other kind are equal when they render identically.

use typelower_syntax::{BindingName, MemberName, Node, NodeData, NodeRef, print};

/// How a member takes part in signature comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberCategory {
    Method,
    Property,
    /// Constructors and call, construct or index signatures.
    Other,
}

impl MemberCategory {
    pub fn of(member: &Node) -> Self {
        match &member.data {
            NodeData::MethodDeclaration { .. } | NodeData::MethodSignature { .. } => Self::Method,
            NodeData::PropertyDeclaration { .. } | NodeData::PropertySignature { .. } => {
                Self::Property
            }
            _ => Self::Other,
        }
    }
}

/// Rendered parts of a member that decide signature equality.
#[derive(Debug, PartialEq, Eq)]
struct Signature<'a> {
    name: &'a MemberName,
    type_params: Vec<&'a str>,
    params: Vec<ParamSignature>,
    ty: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
struct ParamSignature {
    name: String,
    ty: Option<String>,
    question: bool,
    rest: bool,
    has_default: bool,
}

fn rendered(ty: Option<&NodeRef>) -> Option<String> {
    ty.map(|ty| print(ty))
}

fn param_signature(param: &Node) -> ParamSignature {
    match &param.data {
        NodeData::Parameter {
            rest,
            name,
            question,
            ty,
            initializer,
            ..
        } => ParamSignature {
            name: match name {
                BindingName::Identifier(name) => name.clone(),
                pattern => pattern.to_string(),
            },
            ty: rendered(ty.as_ref()),
            question: *question,
            rest: *rest,
            has_default: initializer.is_some(),
        },
        _ => ParamSignature {
            name: print(param),
            ty: None,
            question: false,
            rest: false,
            has_default: false,
        },
    }
}

fn type_param_names(type_params: &[NodeRef]) -> Vec<&str> {
    type_params
        .iter()
        .filter_map(|tp| match &tp.data {
            NodeData::TypeParameter { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect()
}

fn signature(member: &Node) -> Option<Signature<'_>> {
    match &member.data {
        NodeData::MethodDeclaration {
            name,
            type_params,
            params,
            ret,
            ..
        }
        | NodeData::MethodSignature {
            name,
            type_params,
            params,
            ret,
            ..
        } => Some(Signature {
            name,
            type_params: type_param_names(type_params),
            params: params.iter().map(|p| param_signature(p)).collect(),
            ty: rendered(ret.as_ref()),
        }),
        NodeData::PropertyDeclaration { name, ty, .. }
        | NodeData::PropertySignature { name, ty, .. } => Some(Signature {
            name,
            type_params: Vec::new(),
            params: Vec::new(),
            ty: rendered(ty.as_ref()),
        }),
        _ => None,
    }
}

/// Whether two members have the same signature.
pub fn signature_equal(a: &Node, b: &Node) -> bool {
    let category = MemberCategory::of(a);
    if category != MemberCategory::of(b) {
        return false;
    }
    match category {
        MemberCategory::Other => print(a) == print(b),
        MemberCategory::Method | MemberCategory::Property => signature(a) == signature(b),
    }
}
