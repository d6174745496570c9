//! Tree nodes and leaf values.

use crate::Pos;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A leaf payload.
///
/// Leaves are either null or a string. Typing of numbers and booleans is
/// left to decoders, which parse the string representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Null,
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Null => None,
        }
    }
}

/// A node of the untyped configuration tree.
///
/// The variant is fixed at construction. Children are owned exclusively by
/// their parent, so a tree is always a plain hierarchy rooted at one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TreeNode {
    /// A scalar leaf.
    Primitive { value: Value, pos: Pos },

    /// An ordered sequence. Duplicates are kept.
    Array { elements: Vec<TreeNode>, pos: Pos },

    /// A mapping with unique keys in insertion order.
    ///
    /// `raw_value` is the node's own scalar representation, used when a
    /// map-like node has to be read as a scalar.
    Map {
        fields: IndexMap<String, TreeNode>,
        pos: Pos,
        raw_value: Value,
    },
}

impl TreeNode {
    pub fn primitive(value: Value, pos: Pos) -> Self {
        TreeNode::Primitive { value, pos }
    }

    pub fn string(text: impl Into<String>, pos: Pos) -> Self {
        TreeNode::Primitive {
            value: Value::String(text.into()),
            pos,
        }
    }

    pub fn null(pos: Pos) -> Self {
        TreeNode::Primitive {
            value: Value::Null,
            pos,
        }
    }

    pub fn array(elements: Vec<TreeNode>, pos: Pos) -> Self {
        TreeNode::Array { elements, pos }
    }

    /// Create a map node whose raw value is null.
    ///
    /// Later duplicates of a key replace the earlier value but keep the
    /// key's first position.
    pub fn map(fields: impl IntoIterator<Item = (String, TreeNode)>, pos: Pos) -> Self {
        Self::map_with_raw(fields, pos, Value::Null)
    }

    pub fn map_with_raw(
        fields: impl IntoIterator<Item = (String, TreeNode)>,
        pos: Pos,
        raw_value: Value,
    ) -> Self {
        TreeNode::Map {
            fields: fields.into_iter().collect(),
            pos,
            raw_value,
        }
    }

    /// Source position of this node.
    pub fn pos(&self) -> &Pos {
        match self {
            TreeNode::Primitive { pos, .. }
            | TreeNode::Array { pos, .. }
            | TreeNode::Map { pos, .. } => pos,
        }
    }

    /// The scalar view of this node: the leaf value of a primitive, or the
    /// raw value of a map. Arrays have none.
    pub fn value(&self) -> Option<&Value> {
        match self {
            TreeNode::Primitive { value, .. } => Some(value),
            TreeNode::Map { raw_value, .. } => Some(raw_value),
            TreeNode::Array { .. } => None,
        }
    }

    /// Check if this is a primitive holding a null leaf.
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            TreeNode::Primitive {
                value: Value::Null,
                ..
            }
        )
    }

    /// The text of a primitive string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeNode::Primitive { value, .. } => value.as_str(),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TreeNode::Primitive { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TreeNode::Array { .. })
    }

    pub fn is_map(&self) -> bool {
        matches!(self, TreeNode::Map { .. })
    }

    pub fn elements(&self) -> Option<&[TreeNode]> {
        match self {
            TreeNode::Array { elements, .. } => Some(elements),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&IndexMap<String, TreeNode>> {
        match self {
            TreeNode::Map { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Get a field of a map node by key.
    pub fn get(&self, key: &str) -> Option<&TreeNode> {
        self.fields().and_then(|fields| fields.get(key))
    }

    /// Get an element of an array node by index.
    pub fn get_index(&self, index: usize) -> Option<&TreeNode> {
        self.elements().and_then(|elements| elements.get(index))
    }

    /// Number of children (array length or field count).
    pub fn len(&self) -> usize {
        match self {
            TreeNode::Primitive { .. } => 0,
            TreeNode::Array { elements, .. } => elements.len(),
            TreeNode::Map { fields, .. } => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short description of the node's shape, for messages.
    pub fn describe(&self) -> &'static str {
        match self {
            TreeNode::Primitive {
                value: Value::Null, ..
            } => "null",
            TreeNode::Primitive { .. } => "string",
            TreeNode::Array { .. } => "array",
            TreeNode::Map { .. } => "map",
        }
    }
}
