//! Nullable values.

use crate::{ConfigFailure, ConfigResult, Decoded, Decoder, DecoderRegistry, TypeDescriptor, invalid};
use keel_tree::TreeNode;

/// Decodes `option<T>`: a null leaf is [`Decoded::Null`], anything else is
/// decoded as `T`.
pub struct OptionalDecoder;

impl Decoder for OptionalDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::Optional(_))
    }

    fn decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let TypeDescriptor::Optional(inner) = ty else {
            return invalid(ConfigFailure::decode_error(node, ty));
        };
        if node.is_null() {
            Ok(Decoded::Null)
        } else {
            registry.decode(node, inner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_tree::Pos;

    #[test]
    fn test_null_is_none() {
        let registry = DecoderRegistry::default();
        let ty = TypeDescriptor::optional(TypeDescriptor::String);
        assert_eq!(
            registry.decode(&TreeNode::null(Pos::default()), &ty).unwrap(),
            Decoded::Null
        );
    }

    #[test]
    fn test_present_value_is_decoded() {
        let registry = DecoderRegistry::default();
        let ty = TypeDescriptor::optional(TypeDescriptor::list(TypeDescriptor::String));
        assert_eq!(
            registry.decode(&TreeNode::string("a,b", Pos::default()), &ty).unwrap(),
            Decoded::List(vec![Decoded::String("a".into()), Decoded::String("b".into())])
        );
    }

    #[test]
    fn test_non_optional_type_is_a_decode_error() {
        let registry = DecoderRegistry::default();
        let node = TreeNode::string("x", Pos::default());
        let errors = OptionalDecoder
            .decode(&node, &TypeDescriptor::String, &registry)
            .unwrap_err();
        assert!(matches!(errors.head(), ConfigFailure::DecodeError { ty: TypeDescriptor::String, .. }));
    }

    #[test]
    fn test_inner_failure_propagates() {
        let registry = DecoderRegistry::default();
        let ty = TypeDescriptor::optional(TypeDescriptor::Bool);
        let errors = registry
            .decode(&TreeNode::string("perhaps", Pos::default()), &ty)
            .unwrap_err();
        assert!(matches!(errors.head(), ConfigFailure::DecodeError { ty: TypeDescriptor::Bool, .. }));
    }
}
