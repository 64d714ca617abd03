//! Generated modules under `tests/fixtures/` compiled into this test crate
//! and run. `test_fixtures_match_generator_output` keeps them in step with
//! what `generate` emits for `tests/fixtures/nodes.yaml`.

use attrgen::design::load_design;
use attrgen::generator::generate;
use attrgen::runtime::ValidationErrors;
use attrgen::GeneratorConfig;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;

mod with_serde {
    #![allow(dead_code)]
    include!("fixtures/nodes_serde.rs");
}

mod without_serde {
    #![allow(dead_code)]
    include!("fixtures/nodes_plain.rs");
}

const NODES: &str = "tests/fixtures/nodes.yaml";

fn normalized(source: &str) -> String {
    source.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn paths(errors: &ValidationErrors) -> Vec<&str> {
    errors.iter().map(|e| e.path()).collect()
}

#[test]
fn test_fixtures_match_generator_output() {
    let design = load_design(Path::new(NODES)).unwrap();
    design.validate().unwrap();

    let module = generate(&design, &GeneratorConfig::default()).unwrap();
    assert_eq!(
        normalized(&module.source),
        normalized(include_str!("fixtures/nodes_serde.rs"))
    );

    let config = GeneratorConfig {
        derive_serde: false,
        ..GeneratorConfig::default()
    };
    let module = generate(&design, &config).unwrap();
    assert_eq!(
        normalized(&module.source),
        normalized(include_str!("fixtures/nodes_plain.rs"))
    );
}

#[test]
fn test_private_validate_reports_every_violation() {
    use with_serde::*;

    let node = NodePrivate {
        name: Some(String::new()),
        meta: Some(Box::new(TagPrivate {
            weight: Some(-1),
            ..Default::default()
        })),
        next: Some(Box::new(NodePrivate::default())),
        slots: Some(HashMap::from([(
            "a".to_string(),
            NodeSlotsValuePrivate {
                size: Some(11),
                note: None,
            },
        )])),
    };
    let err = node.validate().unwrap_err();
    assert_eq!(
        paths(&err),
        vec!["Node.name", "Tag", "Tag.weight", "Node", "Node.slots[*].size"]
    );
}

#[test]
fn test_public_validate_checks_held_values() {
    use with_serde::*;

    let node = Node {
        meta: Box::new(Tag {
            label: "x".to_string(),
            weight: -2,
        }),
        ..Default::default()
    };
    let err = node.validate().unwrap_err();
    assert_eq!(paths(&err), vec!["Node", "Node.name", "Tag.weight"]);
}

#[test]
fn test_finalize_then_publicize() {
    use with_serde::*;

    let mut node = NodePrivate {
        name: Some("root".to_string()),
        next: Some(Box::new(NodePrivate {
            name: Some("leaf".to_string()),
            ..Default::default()
        })),
        slots: Some(HashMap::from([(
            "a".to_string(),
            NodeSlotsValuePrivate {
                size: Some(3),
                note: None,
            },
        )])),
        ..Default::default()
    };
    node.finalize();
    assert_eq!(
        node.meta,
        Some(Box::new(TagPrivate {
            label: Some("root".to_string()),
            weight: Some(1),
        }))
    );
    assert_eq!(node.next.as_ref().unwrap().meta.as_ref().unwrap().weight, Some(1));
    assert_eq!(node.slots.as_ref().unwrap()["a"].note.as_deref(), Some("empty"));
    node.validate().unwrap();

    let public = node.publicize();
    public.validate().unwrap();
    assert_eq!(public.name, "root");
    assert_eq!(
        *public.meta,
        Tag {
            label: "root".to_string(),
            weight: 1,
        }
    );
    let leaf = public.next.as_deref().unwrap();
    assert_eq!(leaf.name, "leaf");
    assert!(leaf.next.is_none());
    assert_eq!(
        public.slots.as_ref().unwrap()["a"],
        NodeSlotsValue {
            size: Some(3),
            note: "empty".to_string(),
        }
    );
}

#[test]
fn test_copy_node_copies_recursively() {
    use with_serde::*;

    let mut private = NodePrivate {
        name: Some("root".to_string()),
        next: Some(Box::new(NodePrivate {
            name: Some("leaf".to_string()),
            meta: Some(Box::new(TagPrivate {
                label: Some("inner".to_string()),
                weight: Some(7),
            })),
            ..Default::default()
        })),
        slots: Some(HashMap::from([(
            "a".to_string(),
            NodeSlotsValuePrivate {
                size: None,
                note: Some("kept".to_string()),
            },
        )])),
        ..Default::default()
    };
    private.finalize();
    let node = private.publicize();

    let copy = copy_node(&node);
    assert_eq!(copy, node);
    assert_eq!(copy.next.as_ref().unwrap().meta.label, "inner");
}

#[test]
fn test_decode_finalize_and_encode() {
    use with_serde::*;

    let mut private: NodePrivate = serde_json::from_value(json!({
        "name": "root",
        "slots": { "a": { "size": 2 } },
        "next": { "name": "leaf", "meta": { "label": "inner", "weight": 5 } }
    }))
    .unwrap();
    private.finalize();
    private.validate().unwrap();

    let node = private.publicize();
    assert_eq!(node.next.as_ref().unwrap().meta.weight, 5);
    let encoded = serde_json::to_value(&node).unwrap();
    assert_eq!(encoded["meta"], json!({ "label": "root", "weight": 1 }));
    assert_eq!(encoded["slots"]["a"], json!({ "size": 2, "note": "empty" }));
    assert!(encoded["next"].get("next").is_none());
}

#[test]
fn test_module_without_serde_runs() {
    use without_serde::*;

    let mut private = NodePrivate {
        name: Some("root".to_string()),
        slots: Some(HashMap::from([(
            "a".to_string(),
            NodeSlotsValuePrivate {
                size: Some(12),
                note: None,
            },
        )])),
        ..Default::default()
    };
    private.finalize();
    assert_eq!(paths(&private.validate().unwrap_err()), vec!["Node.slots[*].size"]);

    private.slots = Some(HashMap::new());
    private.validate().unwrap();
    let node = private.publicize();
    assert_eq!(node.meta.label, "root");
    assert_eq!(copy_node(&node), node);
}
