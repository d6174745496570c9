//! # keel-yaml
//!
//! Builds [`TreeNode`] trees from a stream of structural events.
//!
//! The builder is a recursive-descent consumer over a one-event-lookahead
//! cursor ([`TokenStream`]). It knows nothing about YAML syntax: any scanner
//! that can produce [`Event`]s works. The [`scanner`] module adapts the
//! `yaml-rust2` event parser, which is what [`parse`] and [`parse_file`] use.
//!
//! A malformed event stream is a structural fault and aborts the build with
//! a [`BuildError`]. No partial tree is returned.
//!
//! ## Example
//!
//! ```rust
//! use keel_yaml::parse;
//!
//! let tree = parse("servers: [alpha, beta]\nproxy: null").unwrap();
//! assert_eq!(tree.get("servers").unwrap().len(), 2);
//! assert!(tree.get("proxy").unwrap().is_null());
//! ```

mod builder;
mod error;
mod event;
pub mod scanner;
mod stream;

pub use builder::{BuildOptions, DEFAULT_MAX_DEPTH, build_tree};
pub use error::{BuildError, Result};
pub use event::{Event, EventKind, ScalarStyle};
pub use keel_tree::{Pos, TreeNode, Value};
pub use scanner::{parse, parse_file, parse_with_options};
pub use stream::TokenStream;
