//! Tree-construction helpers for rules.

use crate::node::{EntityName, Keyword, Literal, Node, NodeData, NodeRef};

/// Builds synthesized nodes. Synthesized nodes carry no span.
#[derive(Clone, Debug)]
pub struct NodeFactory {
    sentinel: String,
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new("JSValue")
    }
}

impl NodeFactory {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    /// Name of the opaque dynamic-value type.
    pub fn sentinel_name(&self) -> &str {
        &self.sentinel
    }

    /// A reference to the opaque dynamic-value type.
    pub fn sentinel(&self) -> NodeRef {
        self.type_reference(EntityName::simple(self.sentinel.as_str()), Vec::new())
    }

    pub fn is_sentinel(&self, node: &Node) -> bool {
        match &node.data {
            NodeData::TypeReference { name, type_args } => {
                type_args.is_empty() && name.as_simple() == Some(self.sentinel.as_str())
            }
            _ => false,
        }
    }

    pub fn keyword(&self, keyword: Keyword) -> NodeRef {
        Node::new(NodeData::Keyword(keyword)).into_ref()
    }

    pub fn type_reference(&self, name: EntityName, type_args: Vec<NodeRef>) -> NodeRef {
        Node::new(NodeData::TypeReference { name, type_args }).into_ref()
    }

    pub fn array(&self, element: NodeRef) -> NodeRef {
        Node::new(NodeData::ArrayType { element }).into_ref()
    }

    pub fn union(&self, types: Vec<NodeRef>) -> NodeRef {
        Node::new(NodeData::UnionType { types }).into_ref()
    }

    pub fn literal(&self, literal: Literal) -> NodeRef {
        Node::new(NodeData::Literal(literal)).into_ref()
    }

    pub fn literal_type(&self, literal: Literal) -> NodeRef {
        Node::new(NodeData::LiteralType {
            literal: self.literal(literal),
        })
        .into_ref()
    }

    /// The `null` literal type.
    pub fn null_type(&self) -> NodeRef {
        self.literal_type(Literal::Null)
    }

    /// `T | null`.
    pub fn nullable(&self, ty: NodeRef) -> NodeRef {
        self.union(vec![ty, self.null_type()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_detection_uses_configured_name() {
        let factory = NodeFactory::new("Opaque");
        assert!(factory.is_sentinel(&factory.sentinel()));
        assert!(!NodeFactory::default().is_sentinel(&factory.sentinel()));
        assert!(!factory.is_sentinel(&factory.keyword(Keyword::Any)));
    }
}
