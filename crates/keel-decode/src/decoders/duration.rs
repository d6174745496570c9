//! Durations: a bare integer is milliseconds, or an integer with a unit.

use super::leaf_text;
use crate::{ConfigFailure, ConfigResult, Decoded, DecoderRegistry, NonNullableDecoder, TypeDescriptor};
use keel_tree::TreeNode;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("duration is empty")]
    Empty,

    #[error("invalid duration amount in '{0}'")]
    InvalidAmount(String),

    #[error("unknown duration unit '{0}' (expected ns, us, ms, s, m, h or d)")]
    UnknownUnit(String),

    #[error("duration '{0}' is too large")]
    Overflow(String),
}

/// Parse `123`, `123ms`, `30s`, `5 m`, ...
///
/// # Errors
///
/// Returns a [`DurationParseError`] for empty input, a missing or
/// non-numeric amount, an unknown unit, or an amount that overflows.
pub fn parse_duration(text: &str) -> Result<Duration, DurationParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let (amount, unit) = text.split_at(split);
    let amount: u64 = amount
        .parse()
        .map_err(|_| DurationParseError::InvalidAmount(text.to_string()))?;

    let seconds = |factor: u64| {
        amount
            .checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or_else(|| DurationParseError::Overflow(text.to_string()))
    };

    match unit.trim() {
        "" | "ms" => Ok(Duration::from_millis(amount)),
        "ns" => Ok(Duration::from_nanos(amount)),
        "us" => Ok(Duration::from_micros(amount)),
        "s" => seconds(1),
        "m" => seconds(60),
        "h" => seconds(60 * 60),
        "d" => seconds(24 * 60 * 60),
        other => Err(DurationParseError::UnknownUnit(other.to_string())),
    }
}

pub struct DurationDecoder;

impl NonNullableDecoder for DurationDecoder {
    fn supports(&self, ty: &TypeDescriptor) -> bool {
        matches!(ty, TypeDescriptor::Duration)
    }

    fn safe_decode(
        &self,
        node: &TreeNode,
        ty: &TypeDescriptor,
        _registry: &DecoderRegistry,
    ) -> ConfigResult<Decoded> {
        let text = leaf_text(node, ty)?;
        parse_duration(text)
            .map(Decoded::Duration)
            .map_err(|err| ConfigFailure::thrown(node, err).into())
    }
}
