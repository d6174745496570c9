//! Structural parse faults.

use keel_tree::Pos;
use thiserror::Error;

/// Result type alias for keel-yaml operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// A fault in the event stream itself.
///
/// These are not decode failures: they mean the input could not be turned
/// into a tree at all, and the build is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An event appeared where the grammar requires something else
    #[error("expected {expected} but found {found} at {pos}")]
    UnexpectedEvent {
        expected: &'static str,
        found: &'static str,
        pos: Pos,
    },

    /// The stream ended in the middle of a production
    #[error("unexpected end of event stream after {pos}")]
    UnexpectedEnd { pos: Pos },

    /// Nesting went deeper than the configured limit
    #[error("nesting deeper than {limit} levels at {pos}")]
    DepthLimitExceeded { limit: usize, pos: Pos },

    /// Anchors and aliases are not supported
    #[error("aliases are not supported (at {pos})")]
    UnsupportedAlias { pos: Pos },

    /// The scanner rejected the document text
    #[error("syntax error: {message}")]
    Scan { message: String, pos: Pos },
}

impl BuildError {
    /// Position of the offending event.
    pub fn pos(&self) -> &Pos {
        match self {
            BuildError::UnexpectedEvent { pos, .. }
            | BuildError::UnexpectedEnd { pos }
            | BuildError::DepthLimitExceeded { pos, .. }
            | BuildError::UnsupportedAlias { pos }
            | BuildError::Scan { pos, .. } => pos,
        }
    }
}
