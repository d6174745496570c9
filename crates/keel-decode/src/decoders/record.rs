//! Composite records declared at runtime.

use crate::{
    ConfigFailure, ConfigResult, Decoded, DecoderRegistry, NonNullableDecoder, TypeDescriptor,
    invalid, sequence,
};
use keel_tree::TreeNode;

/// Decodes a map node into a named record with declared fields.
///
/// Every declared field is decoded independently and all failures are
/// reported together. A field absent from the map is decoded as a null leaf
/// at the map's position, so `option<..>` fields become [`Decoded::Null`]
/// while required ones fail. Keys that are not declared are ignored.
///
/// ```rust
/// use keel_decode::{Decoded, DecoderRegistry, RecordDecoder, TypeDescriptor};
///
/// let registry = DecoderRegistry::builder()
///     .register(RecordDecoder::new("Server").field("host", TypeDescriptor::String))
///     .with_defaults()
///     .build();
///
/// let tree = keel_yaml::parse("host: db.internal").unwrap();
/// let server = registry.decode(&tree, &TypeDescriptor::named("Server")).unwrap();
/// assert_eq!(server.field("host"), Some(&Decoded::String("db.internal".into())));
/// ```
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    name: String,
    fields: Vec<(String, TypeDescriptor)>,
}

impl RecordDecoder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a field. Fields are decoded in declaration order.
    pub fn field(mut self, key: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push((key.into(), ty));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl NonNullableDecoder for RecordDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::Named(name) if *name == self.name)
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let TreeNode::Map { fields, pos, .. } = node else {
            return invalid(ConfigFailure::decode_error(node, ty));
        };

        let results = self.fields.iter().map(|(key, field_ty)| {
            let decoded = match fields.get(key) {
                Some(child) => registry.decode(child, field_ty),
                None => registry.decode(&TreeNode::null(pos.clone()), field_ty),
            };
            decoded.map(|value| (key.clone(), value))
        });

        sequence(results)
            .map(|fields| Decoded::Record {
                name: self.name.clone(),
                fields: fields.into_iter().collect(),
            })
            .map_err(|errors| ConfigFailure::element_errors(node, errors).into())
    }
}
