//! Recursive-descent tree builder.
//!
//! Three mutually recursive productions (value, mapping, sequence) are
//! driven by the tag of the *current* event only; nothing is ever pushed
//! back. When a production returns, the cursor sits on its terminating
//! event: the scalar itself, `mapping-end` or `sequence-end`.

use crate::{BuildError, Event, EventKind, Result, ScalarStyle, TokenStream};
use indexmap::IndexMap;
use keel_tree::{Pos, TreeNode, Value};

/// Default bound on mapping/sequence nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for building a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Name stamped into every node position, usually the file name
    pub source_name: String,

    /// Deepest mapping/sequence nesting accepted before the build aborts
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            source_name: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BuildOptions {
    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Build a tree from a complete event stream.
///
/// The stream must open with `stream-start` and `document-start`; the
/// first content event after them is the root. Only the first document
/// is read.
///
/// # Errors
///
/// Returns a [`BuildError`] if the stream is structurally malformed or
/// nests deeper than `options.max_depth`.
pub fn build_tree<I>(events: I, options: &BuildOptions) -> Result<TreeNode>
where
    I: IntoIterator<Item = Event>,
{
    let mut stream = TokenStream::new(events);

    expect(stream.next()?, "stream-start", |kind| {
        matches!(kind, EventKind::StreamStart)
    })?;
    expect(stream.next()?, "document-start", |kind| {
        matches!(kind, EventKind::DocumentStart)
    })?;
    stream.next()?;

    let root = build_value(&mut stream, options, 0)?;
    tracing::debug!(
        source = %options.source_name,
        kind = root.describe(),
        children = root.len(),
        "Built configuration tree"
    );
    Ok(root)
}

fn expect<'e>(
    event: &'e Event,
    expected: &'static str,
    pred: impl Fn(&EventKind) -> bool,
) -> Result<&'e Event> {
    if pred(&event.kind) {
        Ok(event)
    } else {
        Err(unexpected(expected, event))
    }
}

fn unexpected(expected: &'static str, event: &Event) -> BuildError {
    BuildError::UnexpectedEvent {
        expected,
        found: event.kind.name(),
        pos: event.pos.clone(),
    }
}

fn check_depth(depth: usize, options: &BuildOptions, pos: &Pos) -> Result<()> {
    if depth >= options.max_depth {
        Err(BuildError::DepthLimitExceeded {
            limit: options.max_depth,
            pos: pos.clone(),
        })
    } else {
        Ok(())
    }
}

fn build_value<I>(
    stream: &mut TokenStream<I>,
    options: &BuildOptions,
    depth: usize,
) -> Result<TreeNode>
where
    I: Iterator<Item = Event>,
{
    let event = stream.current()?;
    match &event.kind {
        EventKind::MappingStart => build_mapping(stream, options, depth),
        EventKind::SequenceStart => build_sequence(stream, options, depth),
        EventKind::Scalar { value, style } => Ok(scalar_node(value, *style, event.pos.clone())),
        _ => Err(unexpected("a value", event)),
    }
}

/// Only a plain `null` is null. A quoted `"null"` stays a string.
fn scalar_node(text: &str, style: ScalarStyle, pos: Pos) -> TreeNode {
    if text == "null" && style == ScalarStyle::Plain {
        TreeNode::primitive(Value::Null, pos)
    } else {
        TreeNode::primitive(Value::String(text.to_string()), pos)
    }
}

fn build_mapping<I>(
    stream: &mut TokenStream<I>,
    options: &BuildOptions,
    depth: usize,
) -> Result<TreeNode>
where
    I: Iterator<Item = Event>,
{
    let pos = expect(stream.current()?, "mapping-start", |kind| {
        matches!(kind, EventKind::MappingStart)
    })?
    .pos
    .clone();
    check_depth(depth, options, &pos)?;

    let mut fields = IndexMap::new();
    loop {
        let event = stream.next()?;
        let key = match &event.kind {
            EventKind::MappingEnd => break,
            EventKind::Scalar { value, .. } => value.clone(),
            _ => return Err(unexpected("a scalar mapping key", event)),
        };
        tracing::trace!(key = %key, "Mapping field");

        stream.next()?;
        let value = build_value(stream, options, depth + 1)?;
        fields.insert(key, value);
    }

    Ok(TreeNode::Map {
        fields,
        pos,
        raw_value: Value::Null,
    })
}

fn build_sequence<I>(
    stream: &mut TokenStream<I>,
    options: &BuildOptions,
    depth: usize,
) -> Result<TreeNode>
where
    I: Iterator<Item = Event>,
{
    let pos = expect(stream.current()?, "sequence-start", |kind| {
        matches!(kind, EventKind::SequenceStart)
    })?
    .pos
    .clone();
    check_depth(depth, options, &pos)?;

    let mut elements = Vec::new();
    while !matches!(stream.next()?.kind, EventKind::SequenceEnd) {
        elements.push(build_value(stream, options, depth + 1)?);
    }
    tracing::trace!(len = elements.len(), "Sequence complete");

    Ok(TreeNode::Array { elements, pos })
}
