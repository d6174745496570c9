//! Source positions for tree nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a node was read from.
///
/// Attached once when the tree is built and never recomputed. Positions are
/// only used to make failure messages point at the right place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    /// Line number (1-based)
    pub line: usize,

    /// Column number (1-based, in characters not bytes)
    pub col: usize,

    /// Name of the originating source, usually a file name
    pub source: String,
}

impl Pos {
    pub fn new(line: usize, col: usize, source: impl Into<String>) -> Self {
        Self {
            line,
            col,
            source: source.into(),
        }
    }
}

impl Default for Pos {
    fn default() -> Self {
        Self {
            line: 1,
            col: 1,
            source: String::new(),
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source.is_empty() {
            write!(f, "{}:{}", self.line, self.col)
        } else {
            write!(f, "{}:{}:{}", self.source, self.line, self.col)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_creation() {
        let pos = Pos::new(2, 5, "test.yaml");
        assert_eq!(pos.line, 2);
        assert_eq!(pos.col, 5);
        assert_eq!(pos.source, "test.yaml");
    }

    #[test]
    fn test_default() {
        let pos = Pos::default();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.col, 1);
        assert!(pos.source.is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Pos::new(3, 7, "app.yaml").to_string(), "app.yaml:3:7");
        assert_eq!(Pos::new(3, 7, "").to_string(), "3:7");
    }

    #[test]
    fn test_serde_roundtrip() {
        let pos = Pos::new(4, 2, "a.yaml");
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"line":4,"col":2,"source":"a.yaml"}"#);
        let back: Pos = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }
}
