// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn read_only_rejects_set() {
    let mut env = Environment::new();
    env.define("SCI_BUILD_UUID", "id", true, "initial environment", Some(json!("abc")), true).unwrap();
    assert_eq!(env.set("SCI_BUILD_UUID", json!("other")), Err(EnvError::ReadOnly("SCI_BUILD_UUID".into())));
}

#[test]
fn writable_name_is_settable() {
    let mut env = Environment::new();
    env.define("SCI_BUILD_ID", "id", false, "initial environment", Some(json!("")), true).unwrap();
    env.set("SCI_BUILD_ID", json!("release-1")).unwrap();
    assert_eq!(env.get("SCI_BUILD_ID"), Some(&json!("release-1")));
}

#[test]
fn final_define_rejects_redefinition() {
    let mut env = Environment::new();
    env.define("FOO", "", false, "", None, true).unwrap();
    assert_eq!(env.define("FOO", "", false, "", None, true), Err(EnvError::Redefined("FOO".into())));
}

#[test]
fn serialize_round_trips() {
    let mut env = Environment::new();
    env.define("SCI_BUILD_UUID", "id", true, "initial environment", Some(json!("abc")), true).unwrap();
    env.define("FOO", "", false, "", Some(json!(1)), true).unwrap();
    let wire = env.serialize();
    let back = Environment::deserialize(&wire).unwrap();
    assert_eq!(env, back);
}

#[test]
fn merge_skips_read_only_and_copies_metadata() {
    let mut parent = Environment::new();
    parent.define("SCI_BUILD_UUID", "id", true, "initial environment", Some(json!("keep-me")), true).unwrap();
    parent.define("FOO", "", false, "", Some(json!("old")), true).unwrap();

    let mut child = Environment::new();
    child.define("SCI_BUILD_UUID", "id", true, "initial environment", Some(json!("should-not-apply")), true).unwrap();
    child.define("FOO", "desc", false, "child", Some(json!("new")), true).unwrap();

    parent.merge(&child);

    assert_eq!(parent.get("SCI_BUILD_UUID"), Some(&json!("keep-me")));
    assert_eq!(parent.get("FOO"), Some(&json!("new")));
    assert_eq!(parent.config_of("FOO").unwrap().source, "child");
}

#[test]
fn iteration_is_name_sorted() {
    let mut env = Environment::new();
    env.define("b", "", false, "", Some(json!(1)), true).unwrap();
    env.define("a", "", false, "", Some(json!(2)), true).unwrap();
    let names: Vec<&str> = env.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["a", "b"]);
}

fn arbitrary_value() -> impl Strategy<Value = Value> {
    prop_oneof![any::<bool>().prop_map(Value::Bool), any::<i32>().prop_map(|n| json!(n)), "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),]
}

proptest! {
    #[test]
    fn environment_round_trips_through_serialize_deserialize(
        entries in prop::collection::vec(
            ("[a-zA-Z_][a-zA-Z0-9_]{0,10}", "[a-zA-Z0-9 ]{0,20}", any::<bool>(), "[a-zA-Z0-9_]{0,10}", arbitrary_value()),
            0..10,
        )
    ) {
        let mut env = Environment::new();
        let mut seen = std::collections::HashSet::new();
        for (name, description, read_only, source, value) in entries {
            if !seen.insert(name.clone()) {
                continue;
            }
            env.define(name, description, read_only, source, Some(value), true).unwrap();
        }

        let wire = env.serialize();
        let back = Environment::deserialize(&wire).unwrap();
        prop_assert_eq!(env, back);
    }
}