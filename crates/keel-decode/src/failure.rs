//! Decode failures.

use crate::{NonEmptyList, TypeDescriptor};
use keel_tree::{Pos, TreeNode};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Why a node could not be decoded.
///
/// Every variant except [`ConfigFailure::NoDecoder`] carries the offending
/// node, and with it the source position.
#[derive(Debug, Clone)]
pub enum ConfigFailure {
    /// The node had the wrong shape or value for the requested type
    DecodeError { node: TreeNode, ty: TypeDescriptor },

    /// The node's shape cannot represent the requested collection kind
    UnsupportedCollectionType { node: TreeNode, kind: &'static str },

    /// One or more children of a composite node failed
    CollectionElementErrors {
        node: TreeNode,
        errors: NonEmptyList<ConfigFailure>,
    },

    /// A conversion routine failed; its error is kept opaquely
    ThrowableFailure {
        node: TreeNode,
        cause: Arc<dyn Error + Send + Sync>,
    },

    /// No registered decoder supports the requested type
    NoDecoder { ty: TypeDescriptor },
}

impl ConfigFailure {
    pub fn decode_error(node: &TreeNode, ty: &TypeDescriptor) -> Self {
        ConfigFailure::DecodeError {
            node: node.clone(),
            ty: ty.clone(),
        }
    }

    pub fn unsupported_collection(node: &TreeNode, kind: &'static str) -> Self {
        ConfigFailure::UnsupportedCollectionType {
            node: node.clone(),
            kind,
        }
    }

    pub fn element_errors(node: &TreeNode, errors: NonEmptyList<ConfigFailure>) -> Self {
        ConfigFailure::CollectionElementErrors {
            node: node.clone(),
            errors,
        }
    }

    pub fn thrown(node: &TreeNode, cause: impl Error + Send + Sync + 'static) -> Self {
        ConfigFailure::ThrowableFailure {
            node: node.clone(),
            cause: Arc::new(cause),
        }
    }

    /// Position of the offending node, if there is one.
    pub fn pos(&self) -> Option<&Pos> {
        self.node().map(TreeNode::pos)
    }

    pub fn node(&self) -> Option<&TreeNode> {
        match self {
            ConfigFailure::DecodeError { node, .. }
            | ConfigFailure::UnsupportedCollectionType { node, .. }
            | ConfigFailure::CollectionElementErrors { node, .. }
            | ConfigFailure::ThrowableFailure { node, .. } => Some(node),
            ConfigFailure::NoDecoder { .. } => None,
        }
    }

    /// Machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigFailure::DecodeError { .. } => "decode-error",
            ConfigFailure::UnsupportedCollectionType { .. } => "unsupported-collection-type",
            ConfigFailure::CollectionElementErrors { .. } => "collection-element-errors",
            ConfigFailure::ThrowableFailure { .. } => "throwable-failure",
            ConfigFailure::NoDecoder { .. } => "no-decoder",
        }
    }

    /// Child failures of a composite failure.
    pub fn children(&self) -> Option<&NonEmptyList<ConfigFailure>> {
        match self {
            ConfigFailure::CollectionElementErrors { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Number of leaf failures under this one (itself, if it is a leaf).
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            Some(errors) => errors.iter().map(ConfigFailure::leaf_count).sum(),
            None => 1,
        }
    }
}

impl fmt::Display for ConfigFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFailure::DecodeError { node, ty } => match node.as_str() {
                Some(text) => write!(f, "Could not decode {:?} as {} at {}", text, ty, node.pos()),
                None => write!(f, "Expected {} but got {} at {}", ty, node.describe(), node.pos()),
            },
            ConfigFailure::UnsupportedCollectionType { node, kind } => {
                write!(f, "Cannot decode {} as a {} at {}", node.describe(), kind, node.pos())
            }
            ConfigFailure::CollectionElementErrors { node, errors } => {
                let noun = if errors.len() == 1 { "error" } else { "errors" };
                write!(f, "{} {} in {} at {}", errors.len(), noun, node.describe(), node.pos())
            }
            ConfigFailure::ThrowableFailure { node, cause } => match node.as_str() {
                Some(text) => write!(f, "Could not decode {:?} at {}: {}", text, node.pos(), cause),
                None => write!(f, "Conversion failed at {}: {}", node.pos(), cause),
            },
            ConfigFailure::NoDecoder { ty } => {
                write!(f, "No decoder registered for type {}", ty)
            }
        }
    }
}

impl Error for ConfigFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigFailure::ThrowableFailure { cause, .. } => Some(&**cause),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IntWidth;

    fn at(line: usize, col: usize) -> Pos {
        Pos::new(line, col, "app.yaml")
    }

    #[test]
    fn test_decode_error_message() {
        let failure = ConfigFailure::decode_error(
            &TreeNode::string("abc", at(2, 7)),
            &TypeDescriptor::Bool,
        );
        assert_eq!(failure.to_string(), r#"Could not decode "abc" as bool at app.yaml:2:7"#);

        let failure = ConfigFailure::decode_error(
            &TreeNode::null(at(3, 1)),
            &TypeDescriptor::Int(IntWidth::Bits64),
        );
        assert_eq!(failure.to_string(), "Expected i64 but got null at app.yaml:3:1");
    }

    #[test]
    fn test_thrown_keeps_source() {
        let cause = "x".parse::<i64>().unwrap_err();
        let failure = ConfigFailure::thrown(&TreeNode::string("x", at(1, 1)), cause);
        assert_eq!(failure.kind(), "throwable-failure");
        assert!(failure.source().is_some());
        assert!(failure.to_string().starts_with(r#"Could not decode "x" at app.yaml:1:1: "#));
    }

    #[test]
    fn test_no_decoder_has_no_position() {
        let failure = ConfigFailure::NoDecoder {
            ty: TypeDescriptor::named("Widget"),
        };
        assert!(failure.pos().is_none());
        assert_eq!(failure.to_string(), "No decoder registered for type Widget");
    }

    #[test]
    fn test_leaf_count() {
        let leaf = |line| ConfigFailure::decode_error(&TreeNode::null(at(line, 1)), &TypeDescriptor::String);
        let inner = ConfigFailure::element_errors(
            &TreeNode::array(Vec::new(), at(2, 1)),
            NonEmptyList::of(leaf(3), [leaf(4)]),
        );
        let outer = ConfigFailure::element_errors(
            &TreeNode::map(Vec::new(), at(1, 1)),
            NonEmptyList::of(inner, [leaf(5)]),
        );
        assert_eq!(outer.leaf_count(), 3);
        assert_eq!(outer.children().unwrap().len(), 2);
    }
}
