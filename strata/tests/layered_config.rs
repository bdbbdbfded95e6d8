//! Integration tests for layered configuration loaded from files.
//!
//! These tests exercise loading, layering and lookups together, the way a
//! directory walker drives them.

mod common;

use common::TreeFixture;
use serde_json::json;
use strata::config::{ConfigMerger, LayeredConfig};
use strata::{Error, PathNotFoundReason};

#[test]
fn test_base_plus_directory_layers() {
    let tree = TreeFixture::new()
        .file(
            "base.json",
            r#"{"excludes": ["*.log"], "build": {"jobs": 2, "targets": {"debug": true}}}"#,
        )
        .file(
            "app/summarize.json",
            r#"{"excludes": ["!keep.log"], "build": {"targets": {"release": true}}}"#,
        )
        .file("app/lib/summarize.json", r#"{"build": {"jobs": 8}}"#);

    let mut config = LayeredConfig::from_file(&tree.path("base.json")).unwrap();
    let app = config.push_layer(&tree.path("app/summarize.json"), None).unwrap();
    let lib = config
        .push_layer(&tree.path("app/lib/summarize.json"), Some("lib"))
        .unwrap();
    assert!(app.is_some());
    assert!(lib.is_some());

    assert_eq!(
        config.effective(),
        json!({
            "excludes": ["*.log", "!keep.log"],
            "build": {"jobs": 8, "targets": {"debug": true, "release": true}}
        })
    );
    assert_eq!(config.require("build.jobs").unwrap(), json!(8));

    config.pop_layer().unwrap();
    assert_eq!(config.require("build.jobs").unwrap(), json!(2));
    config.pop_layer().unwrap();
    assert_eq!(config.excludes().unwrap(), vec!["*.log"]);
    assert!(matches!(config.pop_layer(), Err(Error::EmptyLayerStack)));
}

#[test]
fn test_missing_and_empty_sources_create_no_layers() {
    let tree = TreeFixture::new().file("empty/summarize.json", "{}");
    let mut config = LayeredConfig::default();

    assert!(config
        .push_layer(&tree.path("missing/summarize.json"), None)
        .unwrap()
        .is_none());
    assert!(config
        .push_layer(&tree.path("empty/summarize.json"), None)
        .unwrap()
        .is_none());
    assert!(config.list_layers().is_empty());
}

#[test]
fn test_yaml_and_json_layers_mix() {
    let tree = TreeFixture::new()
        .file("a.json", r#"{"tags": ["json"]}"#)
        .file("b.yaml", "tags:\n  - yaml\nextra:\n  nested: 1\n");

    let mut config = LayeredConfig::default();
    config.push_layer(&tree.path("a.json"), None).unwrap();
    config.push_layer(&tree.path("b.yaml"), None).unwrap();

    assert_eq!(config.require("tags").unwrap(), json!(["json", "yaml"]));
    assert_eq!(config.require("extra.nested").unwrap(), json!(1));

    let names: Vec<String> = config.list_layers().into_iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["a.json", "b.yaml"]);
}

#[test]
fn test_require_depth_from_file_data() {
    let tree = TreeFixture::new().file("c.json", r#"{"a": {"b": {}}}"#);
    let config = LayeredConfig::from_file(&tree.path("c.json")).unwrap();

    match config.require("a.b.c") {
        Err(Error::PathNotFound { depth, reason, .. }) => {
            assert_eq!(depth, 2);
            assert_eq!(reason, PathNotFoundReason::MissingKey("c".to_string()));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(config.get("a.b.c", json!("fallback")).unwrap(), json!("fallback"));
    assert!(config.has("a.b").unwrap());
}

#[test]
fn test_remove_middle_layer_by_id() {
    let tree = TreeFixture::new()
        .file("1.json", r#"{"order": [1]}"#)
        .file("2.json", r#"{"order": [2]}"#)
        .file("3.json", r#"{"order": [3]}"#);

    let mut config = LayeredConfig::default();
    let ids: Vec<_> = ["1.json", "2.json", "3.json"]
        .iter()
        .map(|name| config.push_layer(&tree.path(name), None).unwrap().unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    config.remove_layer(ids[1]).unwrap();
    assert_eq!(config.require("order").unwrap(), json!([1, 3]));
    assert!(matches!(
        config.remove_layer(ids[1]),
        Err(Error::LayerNotFound { .. })
    ));

    config.clear_layers();
    assert_eq!(config.effective(), json!({}));
}

#[test]
fn test_invalid_root_leaves_stack_untouched() {
    let tree = TreeFixture::new()
        .file("ok.json", r#"{"a": 1}"#)
        .file("bad.json", r#"[1, 2]"#);

    let mut config = LayeredConfig::default();
    config.push_layer(&tree.path("ok.json"), None).unwrap();
    let err = config.push_layer(&tree.path("bad.json"), None).unwrap_err();

    assert!(matches!(err, Error::InvalidConfigRoot { found: "array", .. }));
    assert_eq!(config.layer_count(), 1);
}

#[test]
fn test_nested_merge_branches_interact() {
    let base = json!({
        "list": [1],
        "obj": {"inner": [1], "scalar": "a", "swap": {"x": 1}},
        "flip": [1]
    });
    let overlay = json!({
        "list": [2],
        "obj": {"inner": [2], "scalar": "b", "swap": "flat"},
        "flip": {"now": "object"}
    });

    assert_eq!(
        ConfigMerger::merge(&base, &overlay),
        json!({
            "list": [1, 2],
            "obj": {"inner": [1, 2], "scalar": "b", "swap": "flat"},
            "flip": {"now": "object"}
        })
    );
}
