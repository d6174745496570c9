//! `yaml-rust2` front end.
//!
//! Collects the events of a YAML document from `yaml-rust2`'s event parser
//! and feeds them to [`build_tree`].

use crate::{BuildError, BuildOptions, Event, EventKind, Result, ScalarStyle, build_tree};
use keel_tree::{Pos, TreeNode};
use yaml_rust2::parser::{Event as YamlEvent, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};

/// Parse YAML from a string into a tree.
///
/// Only the first document is read.
///
/// # Example
///
/// ```rust
/// use keel_yaml::parse;
///
/// let tree = parse("title: My Service").unwrap();
/// assert!(tree.is_map());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid or the event stream is malformed.
pub fn parse(content: &str) -> Result<TreeNode> {
    parse_with_options(content, &BuildOptions::default())
}

/// Parse YAML from a string, naming the source in every node position.
///
/// # Example
///
/// ```rust
/// use keel_yaml::parse_file;
///
/// let tree = parse_file("title: My Service", "service.yaml").unwrap();
/// assert_eq!(tree.pos().source, "service.yaml");
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid or the event stream is malformed.
pub fn parse_file(content: &str, filename: &str) -> Result<TreeNode> {
    parse_with_options(content, &BuildOptions::default().with_source_name(filename))
}

/// Parse YAML from a string with explicit build options.
///
/// # Errors
///
/// Returns an error if the YAML is invalid, the event stream is malformed,
/// or the document nests deeper than `options.max_depth`.
pub fn parse_with_options(content: &str, options: &BuildOptions) -> Result<TreeNode> {
    let events = scan(content, &options.source_name)?;
    build_tree(events, options)
}

/// Scan a YAML document into keel events.
///
/// # Errors
///
/// Returns [`BuildError::Scan`] for YAML syntax errors and
/// [`BuildError::UnsupportedAlias`] if the document uses aliases.
pub fn scan(content: &str, source_name: &str) -> Result<Vec<Event>> {
    let mut parser = Parser::new_from_str(content);
    let mut collector = EventCollector::new(source_name);

    parser
        .load(&mut collector, false) // false = single document only
        .map_err(|err| scan_error(&err, source_name))?;

    collector.finish()
}

fn scan_error(err: &ScanError, source_name: &str) -> BuildError {
    BuildError::Scan {
        message: err.to_string(),
        pos: marker_pos(err.marker(), source_name),
    }
}

fn marker_pos(marker: &Marker, source_name: &str) -> Pos {
    // yaml-rust2 lines are already 1-based, columns are 0-based
    Pos::new(marker.line(), marker.col() + 1, source_name)
}

/// Receiver that records events in order.
struct EventCollector {
    source_name: String,
    events: Vec<Event>,
    fault: Option<BuildError>,
    /// Index of a `mapping-start` still waiting for its first key
    open_mapping: Option<usize>,
}

impl EventCollector {
    fn new(source_name: &str) -> Self {
        Self {
            source_name: source_name.to_string(),
            events: Vec::new(),
            fault: None,
            open_mapping: None,
        }
    }

    fn finish(self) -> Result<Vec<Event>> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(self.events),
        }
    }

    fn push(&mut self, kind: EventKind, marker: &Marker) {
        let pos = marker_pos(marker, &self.source_name);
        if let Some(index) = self.open_mapping.take() {
            self.anchor_mapping(index, &pos);
        }
        if matches!(kind, EventKind::MappingStart) {
            self.open_mapping = Some(self.events.len());
        }
        self.events.push(Event::new(kind, pos));
    }

    /// yaml-rust2 marks a block mapping at the first key's `:`. Move the
    /// mapping to its first key when that key comes earlier in the text.
    /// Flow mappings are marked at `{`, before the key, and stay put.
    fn anchor_mapping(&mut self, index: usize, first_key: &Pos) {
        let mapping = &mut self.events[index].pos;
        if (first_key.line, first_key.col) < (mapping.line, mapping.col) {
            *mapping = first_key.clone();
        }
    }
}

impl MarkedEventReceiver for EventCollector {
    fn on_event(&mut self, ev: YamlEvent, marker: Marker) {
        if self.fault.is_some() {
            return;
        }

        match ev {
            YamlEvent::Nothing => {}
            YamlEvent::StreamStart => self.push(EventKind::StreamStart, &marker),
            YamlEvent::StreamEnd => self.push(EventKind::StreamEnd, &marker),
            YamlEvent::DocumentStart => self.push(EventKind::DocumentStart, &marker),
            YamlEvent::DocumentEnd => self.push(EventKind::DocumentEnd, &marker),
            YamlEvent::MappingStart(_anchor_id, _tag) => {
                self.push(EventKind::MappingStart, &marker);
            }
            YamlEvent::MappingEnd => self.push(EventKind::MappingEnd, &marker),
            YamlEvent::SequenceStart(_anchor_id, _tag) => {
                self.push(EventKind::SequenceStart, &marker);
            }
            YamlEvent::SequenceEnd => self.push(EventKind::SequenceEnd, &marker),
            YamlEvent::Scalar(value, style, _anchor_id, _tag) => {
                let style = match style {
                    TScalarStyle::Plain => ScalarStyle::Plain,
                    _ => ScalarStyle::Quoted,
                };
                self.push(EventKind::Scalar { value, style }, &marker);
            }
            YamlEvent::Alias(_anchor_id) => {
                self.fault = Some(BuildError::UnsupportedAlias {
                    pos: marker_pos(&marker, &self.source_name),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_tree::Value;

    #[test]
    fn test_parse_scalar() {
        let tree = parse("hello").unwrap();
        assert!(tree.is_primitive());
        assert_eq!(tree.as_str(), Some("hello"));
    }

    #[test]
    fn test_numbers_stay_strings() {
        let tree = parse("42").unwrap();
        assert_eq!(tree.as_str(), Some("42"));
    }

    #[test]
    fn test_parse_array() {
        let tree = parse("[1, 2, 3]").unwrap();
        assert!(tree.is_array());
        let items: Vec<&str> = tree
            .elements()
            .unwrap()
            .iter()
            .filter_map(TreeNode::as_str)
            .collect();
        assert_eq!(items, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_hash() {
        let tree = parse("title: My Service\nowner: Platform Team").unwrap();
        assert!(tree.is_map());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get("title").unwrap().as_str(), Some("My Service"));
        assert_eq!(tree.get("owner").unwrap().as_str(), Some("Platform Team"));
    }

    #[test]
    fn test_nested_structure() {
        let tree = parse(
            r#"
service:
  name: api
  replicas:
    - east
    - west
"#,
        )
        .unwrap();

        let service = tree.get("service").unwrap();
        assert!(service.is_map());
        let replicas = service.get("replicas").unwrap();
        assert!(replicas.is_array());
        assert_eq!(replicas.len(), 2);
    }

    #[test]
    fn test_null_styles() {
        let tree = parse("a: null\nb: \"null\"\nc: 'null'\nd: ~").unwrap();
        assert_eq!(tree.get("a").unwrap().value(), Some(&Value::Null));
        assert_eq!(tree.get("b").unwrap().as_str(), Some("null"));
        assert_eq!(tree.get("c").unwrap().as_str(), Some("null"));
        assert_eq!(tree.get("d").unwrap().as_str(), Some("~"));
    }

    #[test]
    fn test_positions_follow_lines() {
        let tree = parse_file("first: 1\nsecond: 2\n", "ports.yaml").unwrap();
        let first = tree.get("first").unwrap().pos();
        let second = tree.get("second").unwrap().pos();
        assert_eq!(second.line, first.line + 1);
        assert!(first.col > 1);
        assert_eq!(first.source, "ports.yaml");
    }

    #[test]
    fn test_block_mapping_starts_at_first_key() {
        let tree = parse_file("host: a\nport: 1\n", "p.yaml").unwrap();
        assert_eq!(tree.pos(), &Pos::new(1, 1, "p.yaml"));

        let tree = parse_file("- name: api\n  port: 1\n", "p.yaml").unwrap();
        let item = &tree.elements().unwrap()[0];
        assert_eq!(item.pos(), &Pos::new(1, 3, "p.yaml"));

        let tree = parse_file("outer:\n  inner: 1\n", "p.yaml").unwrap();
        assert_eq!(tree.get("outer").unwrap().pos(), &Pos::new(2, 3, "p.yaml"));
    }

    #[test]
    fn test_flow_mapping_starts_at_brace() {
        let tree = parse_file("x: {a: 1}\n", "p.yaml").unwrap();
        assert_eq!(tree.get("x").unwrap().pos(), &Pos::new(1, 4, "p.yaml"));
    }

    #[test]
    fn test_alias_is_rejected() {
        let err = parse("base: &b 1\ncopy: *b").unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedAlias { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse("key: [unclosed").unwrap_err();
        assert!(matches!(err, BuildError::Scan { .. }));
    }

    #[test]
    fn test_empty_document_is_fatal() {
        assert!(parse("").is_err());
    }
}
