//! List, set and map decoders.
//!
//! List and set accept an array node, or a single string leaf which is read
//! as a comma-separated list of tokens. Every element is decoded on its own
//! and all element failures are reported together, wrapped in one
//! `CollectionElementErrors` on the collection node.

use crate::{
    ConfigFailure, ConfigResult, Decoded, Decoder, DecoderRegistry, NonNullableDecoder,
    TypeDescriptor, invalid, sequence, zip,
};
use keel_tree::{TreeNode, Value};

/// Decode the elements of an array node, or the comma-separated tokens of a
/// string leaf. Tokens are trimmed and positioned at the leaf.
fn decode_elements(
    node: &TreeNode,
    kind: &'static str,
    elem_ty: &TypeDescriptor,
    decoder: &dyn Decoder,
    registry: &DecoderRegistry,
) -> ConfigResult<Vec<Decoded>> {
    match node {
        TreeNode::Array { elements, .. } => collect(
            node,
            elements
                .iter()
                .map(|element| decoder.decode(element, elem_ty, registry)),
        ),
        TreeNode::Primitive {
            value: Value::String(text),
            pos,
        } => {
            let tokens: Vec<TreeNode> = text
                .split(',')
                .map(|token| TreeNode::string(token.trim(), pos.clone()))
                .collect();
            collect(
                node,
                tokens
                    .iter()
                    .map(|token| decoder.decode(token, elem_ty, registry)),
            )
        }
        _ => invalid(ConfigFailure::unsupported_collection(node, kind)),
    }
}

fn collect<T>(
    node: &TreeNode,
    results: impl Iterator<Item = ConfigResult<T>>,
) -> ConfigResult<Vec<T>> {
    sequence(results).map_err(|errors| ConfigFailure::element_errors(node, errors).into())
}

/// Decodes `list<T>`, preserving source order.
pub struct ListDecoder;

impl NonNullableDecoder for ListDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::List(_))
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let TypeDescriptor::List(elem_ty) = ty else {
            return invalid(ConfigFailure::decode_error(node, ty));
        };
        let decoder = registry.decoder(elem_ty)?;
        decode_elements(node, ty.kind_name(), elem_ty, decoder, registry).map(Decoded::List)
    }
}

/// Decodes `set<T>`. Repeated values collapse silently.
pub struct SetDecoder;

impl NonNullableDecoder for SetDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::Set(_))
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let TypeDescriptor::Set(elem_ty) = ty else {
            return invalid(ConfigFailure::decode_error(node, ty));
        };
        let decoder = registry.decoder(elem_ty)?;
        decode_elements(node, ty.kind_name(), elem_ty, decoder, registry).map(Decoded::set_of)
    }
}

/// Decodes `map<K, V>` from a map node, preserving field order.
///
/// Keys are decoded as string leaves positioned at their value.
pub struct MapDecoder;

impl NonNullableDecoder for MapDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::Map(_, _))
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let TypeDescriptor::Map(key_ty, value_ty) = ty else {
            return invalid(ConfigFailure::decode_error(node, ty));
        };
        let (key_decoder, value_decoder) =
            zip(registry.decoder(key_ty), registry.decoder(value_ty))?;

        let TreeNode::Map { fields, .. } = node else {
            return invalid(ConfigFailure::unsupported_collection(node, ty.kind_name()));
        };

        let entries = fields.iter().map(|(key, value)| {
            let key_node = TreeNode::string(key.as_str(), value.pos().clone());
            zip(
                key_decoder.decode(&key_node, key_ty, registry),
                value_decoder.decode(value, value_ty, registry),
            )
        });
        collect(node, entries).map(Decoded::Map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IntWidth;
    use keel_tree::Pos;

    fn at(line: usize) -> Pos {
        Pos::new(line, 1, "c.yaml")
    }

    fn strings(items: &[&str]) -> Vec<Decoded> {
        items.iter().map(|s| Decoded::String(s.to_string())).collect()
    }

    #[test]
    fn test_list_from_comma_string() {
        let registry = DecoderRegistry::default();
        let decoded = registry
            .decode(
                &TreeNode::string("a,b,c", at(1)),
                &TypeDescriptor::list(TypeDescriptor::String),
            )
            .unwrap();
        assert_eq!(decoded, Decoded::List(strings(&["a", "b", "c"])));
    }

    #[test]
    fn test_set_from_comma_string_collapses_duplicates() {
        let registry = DecoderRegistry::default();
        let decoded = registry
            .decode(
                &TreeNode::string("a, b, b", at(1)),
                &TypeDescriptor::set(TypeDescriptor::String),
            )
            .unwrap();
        let Decoded::Set(items) = decoded else {
            panic!("expected a set");
        };
        assert_eq!(items.len(), 2);
        assert!(items.contains(&Decoded::String("a".into())));
        assert!(items.contains(&Decoded::String("b".into())));
    }

    #[test]
    fn test_tokens_inherit_leaf_position() {
        let registry = DecoderRegistry::default();
        let errors = registry
            .decode(
                &TreeNode::string("1, x", at(4)),
                &TypeDescriptor::list(TypeDescriptor::Int(IntWidth::Bits64)),
            )
            .unwrap_err();
        let inner = errors.head().children().unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner.head().pos(), Some(&at(4)));
        assert_eq!(inner.head().node().and_then(TreeNode::as_str), Some("x"));
    }

    #[test]
    fn test_map_node_is_not_a_list() {
        let registry = DecoderRegistry::default();
        let node = TreeNode::map([("a".to_string(), TreeNode::string("1", at(2)))], at(1));
        let errors = registry
            .decode(&node, &TypeDescriptor::list(TypeDescriptor::String))
            .unwrap_err();
        assert!(matches!(
            errors.head(),
            ConfigFailure::UnsupportedCollectionType { kind: "List", .. }
        ));
    }

    #[test]
    fn test_map_node_is_not_a_set() {
        let registry = DecoderRegistry::default();
        let node = TreeNode::map([("a".to_string(), TreeNode::string("1", at(2)))], at(1));
        let errors = registry
            .decode(&node, &TypeDescriptor::set(TypeDescriptor::String))
            .unwrap_err();
        assert!(matches!(
            errors.head(),
            ConfigFailure::UnsupportedCollectionType { kind: "Set", .. }
        ));
    }

    #[test]
    fn test_set_reports_each_bad_element() {
        let registry = DecoderRegistry::default();
        let node = TreeNode::array(
            vec![
                TreeNode::string("10.0.0.1", at(2)),
                TreeNode::string("gateway", at(3)),
                TreeNode::string("10.0.0.1", at(4)),
                TreeNode::string("10.0.0.300", at(5)),
            ],
            at(1),
        );
        let errors = registry
            .decode(&node, &TypeDescriptor::set(TypeDescriptor::IpAddr))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        let children = errors.head().children().unwrap();
        assert_eq!(children.len(), 2);
        let lines: Vec<usize> = children.iter().filter_map(|f| f.pos()).map(|p| p.line).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn test_missing_element_decoder_short_circuits() {
        let registry = DecoderRegistry::default();
        let node = TreeNode::array(vec![TreeNode::string("x", at(2))], at(1));
        let errors = registry
            .decode(&node, &TypeDescriptor::list(TypeDescriptor::named("Widget")))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors.head(), ConfigFailure::NoDecoder { .. }));
    }

    #[test]
    fn test_map_decodes_keys_and_values() {
        let registry = DecoderRegistry::default();
        let node = TreeNode::map(
            [
                ("8080".to_string(), TreeNode::string("http", at(2))),
                ("8443".to_string(), TreeNode::string("https", at(3))),
            ],
            at(1),
        );
        let ty = TypeDescriptor::map(TypeDescriptor::UInt(IntWidth::Bits16), TypeDescriptor::String);
        assert_eq!(
            registry.decode(&node, &ty).unwrap(),
            Decoded::Map(vec![
                (Decoded::UInt(8080), Decoded::String("http".into())),
                (Decoded::UInt(8443), Decoded::String("https".into())),
            ])
        );
    }

    #[test]
    fn test_map_accumulates_key_and_value_failures() {
        let registry = DecoderRegistry::default();
        let node = TreeNode::map(
            [
                ("port".to_string(), TreeNode::string("yes", at(2))),
                ("80".to_string(), TreeNode::string("maybe", at(3))),
                ("81".to_string(), TreeNode::string("true", at(4))),
            ],
            at(1),
        );
        let ty = TypeDescriptor::map(TypeDescriptor::UInt(IntWidth::Bits16), TypeDescriptor::Bool);
        let errors = registry.decode(&node, &ty).unwrap_err();
        assert_eq!(errors.len(), 1);
        // bad key on line 2, bad value on line 3
        assert_eq!(errors.head().children().unwrap().len(), 2);
    }

    #[test]
    fn test_map_rejects_arrays() {
        let registry = DecoderRegistry::default();
        let ty = TypeDescriptor::map(TypeDescriptor::String, TypeDescriptor::String);
        let errors = registry
            .decode(&TreeNode::array(Vec::new(), at(1)), &ty)
            .unwrap_err();
        assert!(matches!(
            errors.head(),
            ConfigFailure::UnsupportedCollectionType { kind: "Map", .. }
        ));
    }
}
