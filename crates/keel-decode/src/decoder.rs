//! The decoder capability.

use crate::{ConfigFailure, ConfigResult, Decoded, DecoderRegistry, TypeDescriptor, invalid};
use keel_tree::TreeNode;

/// Something that can turn a tree node into a value of some type.
///
/// Decoders are identified by what they [`supports`](Decoder::supports),
/// not by name. Several may overlap; the registry picks the first one
/// registered. Decoders must be stateless, so one registry can serve
/// concurrent decodes.
pub trait Decoder: Send + Sync {
    /// Whether this decoder can produce the given type.
    fn supports(&self, ty: &TypeDescriptor) -> bool;

    /// Decode `node` as `ty`, recursing through `registry` for nested types.
    fn decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded>;
}

/// A decoder that never accepts null.
///
/// Every implementor is a [`Decoder`] that fails with a `DecodeError` on a
/// null leaf before [`safe_decode`](NonNullableDecoder::safe_decode) runs.
pub trait NonNullableDecoder: Send + Sync {
    fn supports(&self, ty: &TypeDescriptor) -> bool;

    /// Decode a node already known not to be a null leaf.
    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded>;
}

impl<D: NonNullableDecoder> Decoder for D {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        NonNullableDecoder::supports(self, ty)
    }

    fn decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        if node.is_null() {
            invalid(ConfigFailure::decode_error(node, ty))
        } else {
            self.safe_decode(node, ty, registry)
        }
    }
}
