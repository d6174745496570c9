//! Values produced by decoders.

use indexmap::IndexMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// A decoded, typed value.
///
/// Each variant corresponds to a [`TypeDescriptor`](crate::TypeDescriptor)
/// kind. Use [`FromDecoded`](crate::FromDecoded) to move it into a concrete
/// Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Null,
    String(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Path(PathBuf),
    IpAddr(IpAddr),
    SocketAddr(SocketAddr),
    Duration(Duration),
    List(Vec<Decoded>),
    /// Distinct elements, in first-seen order.
    Set(Vec<Decoded>),
    /// Entries in source order.
    Map(Vec<(Decoded, Decoded)>),
    Record {
        name: String,
        fields: IndexMap<String, Decoded>,
    },
}

impl Decoded {
    /// Build a set, silently dropping repeated values.
    ///
    /// Values are compared pairwise with `PartialEq` (floats are not
    /// hashable), so this is quadratic in the number of distinct values.
    pub fn set_of(values: Vec<Decoded>) -> Self {
        let mut distinct: Vec<Decoded> = Vec::with_capacity(values.len());
        for value in values {
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }
        Decoded::Set(distinct)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Decoded::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Decoded::String(s) => Some(s),
            _ => None,
        }
    }

    /// Field of a record by name.
    pub fn field(&self, name: &str) -> Option<&Decoded> {
        match self {
            Decoded::Record { fields, .. } => fields.get(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_of_drops_duplicates() {
        let set = Decoded::set_of(vec![
            Decoded::String("a".into()),
            Decoded::String("b".into()),
            Decoded::String("a".into()),
        ]);
        match set {
            Decoded::Set(items) => assert_eq!(items.len(), 2),
            other => panic!("expected set, got {other:?}"),
        }
    }

    #[test]
    fn test_record_field() {
        let record = Decoded::Record {
            name: "Server".into(),
            fields: [("host".to_string(), Decoded::String("db".into()))]
                .into_iter()
                .collect(),
        };
        assert_eq!(record.field("host").and_then(Decoded::as_str), Some("db"));
        assert!(record.field("port").is_none());
    }
}
