//! The structural event model consumed by the tree builder.

use keel_tree::Pos;
use std::fmt;

/// How a scalar was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    /// Unquoted.
    Plain,
    /// Any other style: single or double quoted, literal or folded block.
    Quoted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    MappingStart,
    MappingEnd,
    SequenceStart,
    SequenceEnd,
    Scalar { value: String, style: ScalarStyle },
}

impl EventKind {
    /// Name used in fault messages.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::StreamStart => "stream-start",
            EventKind::StreamEnd => "stream-end",
            EventKind::DocumentStart => "document-start",
            EventKind::DocumentEnd => "document-end",
            EventKind::MappingStart => "mapping-start",
            EventKind::MappingEnd => "mapping-end",
            EventKind::SequenceStart => "sequence-start",
            EventKind::SequenceEnd => "sequence-end",
            EventKind::Scalar { .. } => "scalar",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structural event with the position it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub pos: Pos,
}

impl Event {
    pub fn new(kind: EventKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    pub fn plain(value: impl Into<String>, pos: Pos) -> Self {
        Self::new(
            EventKind::Scalar {
                value: value.into(),
                style: ScalarStyle::Plain,
            },
            pos,
        )
    }

    pub fn quoted(value: impl Into<String>, pos: Pos) -> Self {
        Self::new(
            EventKind::Scalar {
                value: value.into(),
                style: ScalarStyle::Quoted,
            },
            pos,
        )
    }
}
