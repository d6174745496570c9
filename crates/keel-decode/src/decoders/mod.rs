//! Built-in decoders.

mod collections;
mod duration;
mod optional;
mod record;
mod scalar;

pub use collections::{ListDecoder, MapDecoder, SetDecoder};
pub use duration::{DurationDecoder, DurationParseError, parse_duration};
pub use optional::OptionalDecoder;
pub use record::RecordDecoder;
pub use scalar::{
    BoolDecoder, FloatDecoder, IntDecoder, IpAddrDecoder, PathDecoder, SocketAddrDecoder,
    StringDecoder, UIntDecoder,
};

use crate::{ConfigFailure, ConfigResult, Decoder, TypeDescriptor, invalid};
use keel_tree::TreeNode;

/// The built-in decoders in registration order.
///
/// The optional decoder comes first so that nullability is settled before
/// any non-nullable decoder sees the node.
pub fn default_decoders() -> Vec<Box<dyn Decoder>> {
    vec![
        Box::new(OptionalDecoder),
        Box::new(StringDecoder),
        Box::new(BoolDecoder),
        Box::new(IntDecoder),
        Box::new(UIntDecoder),
        Box::new(FloatDecoder),
        Box::new(PathDecoder),
        Box::new(IpAddrDecoder),
        Box::new(SocketAddrDecoder),
        Box::new(DurationDecoder),
        Box::new(ListDecoder),
        Box::new(SetDecoder),
        Box::new(MapDecoder),
    ]
}

/// The text of a string leaf, or a `DecodeError` for any other node.
pub(crate) fn leaf_text<'n>(node: &'n TreeNode, ty: &TypeDescriptor) -> ConfigResult<&'n str> {
    match node.as_str() {
        Some(text) => Ok(text),
        None => invalid(ConfigFailure::decode_error(node, ty)),
    }
}
