//! Decoder registry and dispatch.

use crate::decoders::default_decoders;
use crate::{ConfigFailure, ConfigResult, Decoded, Decoder, FromDecoded, TypeDescriptor, invalid};
use keel_tree::TreeNode;

/// An ordered, immutable collection of decoders with first-match dispatch.
///
/// Registration order is part of the contract: when several decoders
/// support a type, the one registered first wins, so specific decoders go
/// before generic ones.
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn Decoder>>,
}

impl DecoderRegistry {
    pub fn new(decoders: Vec<Box<dyn Decoder>>) -> Self {
        Self { decoders }
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Find the first decoder supporting `ty`.
    ///
    /// Fails with [`ConfigFailure::NoDecoder`] when none does.
    pub fn decoder(&self, ty: &TypeDescriptor) -> ConfigResult<&dyn Decoder> {
        match self.decoders.iter().position(|d| d.supports(ty)) {
            Some(index) => {
                tracing::trace!(ty = %ty, index, "Resolved decoder");
                Ok(self.decoders[index].as_ref())
            }
            None => {
                tracing::debug!(ty = %ty, "No decoder registered");
                invalid(ConfigFailure::NoDecoder { ty: ty.clone() })
            }
        }
    }

    /// Decode `node` as `ty` with the first matching decoder.
    pub fn decode(&self, node: &TreeNode, ty: &TypeDescriptor) -> ConfigResult<Decoded> {
        self.decoder(ty)?.decode(node, ty, self)
    }

    /// Decode `node` straight into a Rust type.
    pub fn decode_into<T: FromDecoded>(&self, node: &TreeNode) -> ConfigResult<T> {
        let ty = T::descriptor();
        let decoded = self.decode(node, &ty)?;
        match T::from_decoded(decoded) {
            Some(value) => Ok(value),
            None => invalid(ConfigFailure::decode_error(node, &ty)),
        }
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl Default for DecoderRegistry {
    /// The built-in decoders only.
    fn default() -> Self {
        DecoderRegistry::builder().with_defaults().build()
    }
}

/// Builds a [`DecoderRegistry`] in registration order.
///
/// ```rust
/// use keel_decode::{DecoderRegistry, RecordDecoder, TypeDescriptor};
///
/// let registry = DecoderRegistry::builder()
///     .register(RecordDecoder::new("Server").field("host", TypeDescriptor::String))
///     .with_defaults()
///     .build();
/// assert!(registry.decoder(&TypeDescriptor::named("Server")).is_ok());
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    decoders: Vec<Box<dyn Decoder>>,
}

impl RegistryBuilder {
    /// Append a decoder after those already registered.
    pub fn register(mut self, decoder: impl Decoder + 'static) -> Self {
        self.decoders.push(Box::new(decoder));
        self
    }

    /// Append the built-in decoders.
    pub fn with_defaults(mut self) -> Self {
        self.decoders.extend(default_decoders());
        self
    }

    pub fn build(self) -> DecoderRegistry {
        tracing::debug!(decoders = self.decoders.len(), "Built decoder registry");
        DecoderRegistry::new(self.decoders)
    }
}
