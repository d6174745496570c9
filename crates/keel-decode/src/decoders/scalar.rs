//! Decoders for single string leaves.

use super::leaf_text;
use crate::{
    ConfigFailure, ConfigResult, Decoded, DecoderRegistry, IntWidth, NonNullableDecoder,
    TypeDescriptor, invalid,
};
use keel_tree::TreeNode;
use std::net::{IpAddr, SocketAddr};
use std::num::TryFromIntError;
use std::path::PathBuf;

pub struct StringDecoder;

impl NonNullableDecoder for StringDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::String)
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        _registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        leaf_text(node, ty).map(|text| Decoded::String(text.to_string()))
    }
}

pub struct BoolDecoder;

impl NonNullableDecoder for BoolDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::Bool)
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        _registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let text = leaf_text(node, ty)?;
        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Decoded::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(Decoded::Bool(false)),
            _ => invalid(ConfigFailure::decode_error(node, ty)),
        }
    }
}

pub struct IntDecoder;

impl NonNullableDecoder for IntDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::Int(_))
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        _registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let text = leaf_text(node, ty)?;
        let value: i64 = text
            .trim()
            .parse()
            .map_err(|err| ConfigFailure::thrown(node, err))?;
        if let TypeDescriptor::Int(width) = ty {
            fits_signed(*width, value).map_err(|err| ConfigFailure::thrown(node, err))?;
        }
        Ok(Decoded::Int(value))
    }
}

pub struct UIntDecoder;

impl NonNullableDecoder for UIntDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::UInt(_))
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        _registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let text = leaf_text(node, ty)?;
        let value: u64 = text
            .trim()
            .parse()
            .map_err(|err| ConfigFailure::thrown(node, err))?;
        if let TypeDescriptor::UInt(width) = ty {
            fits_unsigned(*width, value).map_err(|err| ConfigFailure::thrown(node, err))?;
        }
        Ok(Decoded::UInt(value))
    }
}

fn fits_signed(width: IntWidth, value: i64) -> Result<(), TryFromIntError> {
    match width {
        IntWidth::Bits8 => i8::try_from(value).map(drop),
        IntWidth::Bits16 => i16::try_from(value).map(drop),
        IntWidth::Bits32 => i32::try_from(value).map(drop),
        IntWidth::Bits64 => Ok(()),
        IntWidth::Size => isize::try_from(value).map(drop),
    }
}

fn fits_unsigned(width: IntWidth, value: u64) -> Result<(), TryFromIntError> {
    match width {
        IntWidth::Bits8 => u8::try_from(value).map(drop),
        IntWidth::Bits16 => u16::try_from(value).map(drop),
        IntWidth::Bits32 => u32::try_from(value).map(drop),
        IntWidth::Bits64 => Ok(()),
        IntWidth::Size => usize::try_from(value).map(drop),
    }
}

pub struct FloatDecoder;

impl NonNullableDecoder for FloatDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::Float)
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        _registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let text = leaf_text(node, ty)?;
        text.trim()
            .parse()
            .map(Decoded::Float)
            .map_err(|err| ConfigFailure::thrown(node, err).into())
    }
}

pub struct PathDecoder;

impl NonNullableDecoder for PathDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::Path)
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        _registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        leaf_text(node, ty).map(|text| Decoded::Path(PathBuf::from(text)))
    }
}

pub struct IpAddrDecoder;

impl NonNullableDecoder for IpAddrDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::IpAddr)
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        _registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let text = leaf_text(node, ty)?;
        text.trim()
            .parse::<IpAddr>()
            .map(Decoded::IpAddr)
            .map_err(|err| ConfigFailure::thrown(node, err).into())
    }
}

pub struct SocketAddrDecoder;

impl NonNullableDecoder for SocketAddrDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::SocketAddr)
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        _registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let text = leaf_text(node, ty)?;
        text.trim()
            .parse::<SocketAddr>()
            .map(Decoded::SocketAddr)
            .map_err(|err| ConfigFailure::thrown(node, err).into())
    }
}
