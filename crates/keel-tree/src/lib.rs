//! # keel-tree
//!
//! The untyped intermediate representation of parsed configuration data.
//!
//! A document is parsed once into a [`TreeNode`] tree. Every node carries the
//! [`Pos`] it was read from so that decoders can point at the exact line and
//! column of a bad value. Leaves are deliberately string-or-null: numeric and
//! boolean interpretation is left to the decoders that know the target type.
//!
//! ## Example
//!
//! ```rust
//! use keel_tree::{Pos, TreeNode, Value};
//!
//! let pos = Pos::new(1, 1, "app.yaml");
//! let node = TreeNode::map(
//!     [("port".to_string(), TreeNode::string("8080", pos.clone()))],
//!     pos,
//! );
//!
//! let port = node.get("port").unwrap();
//! assert_eq!(port.value(), Some(&Value::String("8080".into())));
//! ```

mod node;
mod pos;

pub use node::{TreeNode, Value};
pub use pos::Pos;
