//! Decoding trees parsed from YAML text.

use keel_decode::{
    ConfigFailure, Decoded, DecoderRegistry, FromDecoded, IntWidth, RecordDecoder,
    TypeDescriptor, render_failures,
};
use std::collections::{BTreeMap, HashSet};
use std::net::IpAddr;
use std::time::Duration;

fn tree(yaml: &str) -> keel_decode::TreeNode {
    keel_yaml::parse_file(yaml, "app.yaml").unwrap()
}

#[test]
fn test_one_child_failure_per_bad_element() {
    let registry = DecoderRegistry::default();
    let node = tree("[1, two, 3, four, five, 6]");
    let errors = registry
        .decode(&node, &TypeDescriptor::list(TypeDescriptor::Int(IntWidth::Bits32)))
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    let ConfigFailure::CollectionElementErrors { errors: children, .. } = errors.head() else {
        panic!("expected element errors");
    };
    assert_eq!(children.len(), 3);
    let values: Vec<&str> = children
        .iter()
        .filter_map(|f| f.node().and_then(|n| n.as_str()))
        .collect();
    assert_eq!(values, vec!["two", "four", "five"]);
}

#[test]
fn test_comma_string_as_set_and_list() {
    let registry = DecoderRegistry::default();

    let set: HashSet<String> = registry.decode_into(&tree("a, b, b")).unwrap();
    assert_eq!(set.len(), 2);

    let list: Vec<String> = registry.decode_into(&tree("a,b,c")).unwrap();
    assert_eq!(list, vec!["a", "b", "c"]);
}

#[test]
fn test_empty_string_is_one_empty_token() {
    let registry = DecoderRegistry::default();
    let list: Vec<String> = registry.decode_into(&tree("''")).unwrap();
    assert_eq!(list, vec![String::new()]);
}

#[test]
fn test_plain_and_quoted_null() {
    let registry = DecoderRegistry::default();
    let node = tree("a: null\nb: \"null\"");
    let ty = TypeDescriptor::map(
        TypeDescriptor::String,
        TypeDescriptor::optional(TypeDescriptor::String),
    );
    assert_eq!(
        registry.decode(&node, &ty).unwrap(),
        Decoded::Map(vec![
            (Decoded::String("a".into()), Decoded::Null),
            (Decoded::String("b".into()), Decoded::String("null".into())),
        ])
    );
}

#[test]
fn test_unsupported_types_never_panic() {
    let registry = DecoderRegistry::default();
    let node = tree("{a: [1, 2], b: null}");
    for ty in [
        "Widget",
        "list<Widget>",
        "map<string, Widget>",
        "set<list<Widget>>",
        "option<Widget>",
        "list<u8>",
        "bool",
    ] {
        let ty: TypeDescriptor = ty.parse().unwrap();
        assert!(registry.decode(&node, &ty).is_err(), "{ty} should fail");
    }
}

#[test]
fn test_nested_generic_types() {
    let registry = DecoderRegistry::default();
    let node = tree(
        "
primary: [10.0.0.1, 10.0.0.2]
backup: 192.168.1.1, 192.168.1.2
",
    );
    let pools: BTreeMap<String, Vec<IpAddr>> = registry.decode_into(&node).unwrap();
    assert_eq!(pools["primary"].len(), 2);
    assert_eq!(pools["backup"][1], "192.168.1.2".parse::<IpAddr>().unwrap());
}

#[derive(Debug, PartialEq)]
struct Service {
    name: String,
    port: u16,
    timeout: Duration,
    replicas: Option<u32>,
}

impl FromDecoded for Service {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::named("Service")
    }

    fn from_decoded(value: Decoded) -> Option<Self> {
        let mut fields = value.into_record("Service")?;
        Some(Service {
            name: fields.take("name")?,
            port: fields.take("port")?,
            timeout: fields.take("timeout")?,
            replicas: fields.take("replicas")?,
        })
    }
}

fn service_registry() -> DecoderRegistry {
    DecoderRegistry::builder()
        .register(
            RecordDecoder::new("Service")
                .field("name", TypeDescriptor::String)
                .field("port", TypeDescriptor::UInt(IntWidth::Bits16))
                .field("timeout", TypeDescriptor::Duration)
                .field("replicas", TypeDescriptor::optional(TypeDescriptor::UInt(IntWidth::Bits32))),
        )
        .with_defaults()
        .build()
}

#[test]
fn test_typed_records() {
    let registry = service_registry();
    let node = tree(
        "
- name: api
  port: 8080
  timeout: 5s
  replicas: 3
- name: worker
  port: 9000
  timeout: 1500
",
    );
    let services: Vec<Service> = registry.decode_into(&node).unwrap();
    assert_eq!(
        services,
        vec![
            Service {
                name: "api".into(),
                port: 8080,
                timeout: Duration::from_secs(5),
                replicas: Some(3),
            },
            Service {
                name: "worker".into(),
                port: 9000,
                timeout: Duration::from_millis(1500),
                replicas: None,
            },
        ]
    );
}

#[test]
fn test_rendered_failures() {
    let registry = service_registry();
    let node = tree(
        "
- name: api
  port: 80800
  timeout: soon
- name: worker
  port: 9000
  timeout: 1s
  replicas: many
",
    );
    let errors = registry.decode_into::<Vec<Service>>(&node).unwrap_err();
    assert_eq!(errors.head().leaf_count(), 3);
    insta::assert_snapshot!(render_failures(&errors), @r#"
    ✖ 2 errors in array at app.yaml:2:1
      ✖ 2 errors in map at app.yaml:2:3
        ✖ Could not decode "80800" at app.yaml:3:9: out of range integral type conversion attempted
        ✖ Could not decode "soon" at app.yaml:4:12: invalid duration amount in 'soon'
      ✖ 1 error in map at app.yaml:5:3
        ✖ Could not decode "many" at app.yaml:8:13: invalid digit found in string
    "#);
}
