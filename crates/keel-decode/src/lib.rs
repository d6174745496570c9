//! # keel-decode
//!
//! Type-directed decoding of [`TreeNode`] trees.
//!
//! A [`TypeDescriptor`] names the type wanted. A [`DecoderRegistry`] holds an
//! ordered list of [`Decoder`]s and dispatches to the first one that supports
//! the descriptor. Decoders recurse through the registry for element, key and
//! field types.
//!
//! Failures accumulate instead of stopping at the first bad value: a decode
//! result is either a value or a [`NonEmptyList`] of [`ConfigFailure`]s, and
//! a collection with several bad elements reports all of them, each with the
//! position of the offending node.
//!
//! ## Example
//!
//! ```rust
//! use keel_decode::{DecoderRegistry, render_failures};
//! use std::collections::BTreeSet;
//! use std::time::Duration;
//!
//! let registry = DecoderRegistry::default();
//!
//! let tree = keel_yaml::parse("a, b, b").unwrap();
//! let tags: BTreeSet<String> = registry.decode_into(&tree).unwrap();
//! assert_eq!(tags.len(), 2);
//!
//! let tree = keel_yaml::parse("[1s, 250ms, soon]").unwrap();
//! let errors = registry.decode_into::<Vec<Duration>>(&tree).unwrap_err();
//! assert!(render_failures(&errors).contains("soon"));
//! ```

mod decoded;
mod decoder;
pub mod decoders;
mod descriptor;
mod failure;
mod nel;
mod registry;
mod report;
mod result;
mod typed;

pub use decoded::Decoded;
pub use decoder::{Decoder, NonNullableDecoder};
pub use decoders::{DurationParseError, RecordDecoder, parse_duration};
pub use descriptor::{DescriptorParseError, IntWidth, MAX_DESCRIPTOR_DEPTH, TypeDescriptor};
pub use failure::ConfigFailure;
pub use keel_tree::{Pos, TreeNode, Value};
pub use nel::NonEmptyList;
pub use registry::{DecoderRegistry, RegistryBuilder};
pub use report::{FailureSummary, render_failures, summarize};
pub use result::{ConfigResult, invalid, sequence, zip};
pub use typed::{FromDecoded, RecordFields};
