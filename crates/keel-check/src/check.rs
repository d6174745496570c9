//! Load, parse and decode one file.

use anyhow::{Context, Result};
use keel_decode::{ConfigFailure, DecoderRegistry, NonEmptyList, TreeNode, TypeDescriptor};
use keel_yaml::BuildOptions;
use std::fs;
use std::path::PathBuf;

pub struct CheckOptions {
    pub input: PathBuf,
    pub ty: String,
    pub max_depth: usize,
}

#[derive(Debug)]
pub enum Outcome {
    Valid,
    Invalid(NonEmptyList<ConfigFailure>),
}

/// Read and parse the input file into a tree.
pub fn load(options: &CheckOptions) -> Result<TreeNode> {
    let content = fs::read_to_string(&options.input)
        .with_context(|| format!("Failed to read input file: {}", options.input.display()))?;
    parse_source(&content, &options.input.display().to_string(), options.max_depth)
}

/// Check the input file against the requested type.
///
/// Structural faults (unreadable file, malformed YAML, bad descriptor) are
/// errors; decode failures are an [`Outcome::Invalid`].
pub fn run(options: &CheckOptions) -> Result<Outcome> {
    let ty: TypeDescriptor = options
        .ty
        .parse()
        .with_context(|| format!("Invalid type descriptor: {}", options.ty))?;
    let tree = load(options)?;
    Ok(check_tree(&tree, &ty))
}

fn parse_source(content: &str, source_name: &str, max_depth: usize) -> Result<TreeNode> {
    let options = BuildOptions::default()
        .with_source_name(source_name)
        .with_max_depth(max_depth);
    keel_yaml::parse_with_options(content, &options)
        .with_context(|| format!("Failed to parse YAML: {}", source_name))
}

fn check_tree(tree: &TreeNode, ty: &TypeDescriptor) -> Outcome {
    let registry = DecoderRegistry::default();
    match registry.decode(tree, ty) {
        Ok(_) => {
            tracing::debug!(ty = %ty, "Document decoded");
            Outcome::Valid
        }
        Err(failures) => {
            tracing::debug!(ty = %ty, failures = failures.len(), "Document failed to decode");
            Outcome::Invalid(failures)
        }
    }
}
