//! Human and machine renderings of accumulated failures.

use crate::{ConfigFailure, NonEmptyList};
use keel_tree::Pos;
use serde::Serialize;
use std::fmt::Write;

/// Render failures as an indented tree, one `✖` line per failure.
///
/// Children of a `CollectionElementErrors` are nested two spaces deeper
/// than their parent.
pub fn render_failures(failures: &NonEmptyList<ConfigFailure>) -> String {
    let mut out = String::new();
    for failure in failures.iter() {
        render_into(&mut out, failure, 0);
    }
    out
}

fn render_into(out: &mut String, failure: &ConfigFailure, depth: usize) {
    let _ = writeln!(out, "{:indent$}✖ {}", "", failure, indent = depth * 2);
    if let Some(children) = failure.children() {
        for child in children.iter() {
            render_into(out, child, depth + 1);
        }
    }
}

/// Serializable view of a [`ConfigFailure`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureSummary {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<Pos>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FailureSummary>,
}

impl ConfigFailure {
    pub fn summary(&self) -> FailureSummary {
        FailureSummary {
            kind: self.kind(),
            message: self.to_string(),
            pos: self.pos().cloned(),
            children: self
                .children()
                .map(|errors| errors.iter().map(ConfigFailure::summary).collect())
                .unwrap_or_default(),
        }
    }
}

/// Summaries of every top-level failure.
pub fn summarize(failures: &NonEmptyList<ConfigFailure>) -> Vec<FailureSummary> {
    failures.iter().map(ConfigFailure::summary).collect()
}
