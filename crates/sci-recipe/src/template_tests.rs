// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::json;

fn env_with(name: &str, value: Value) -> Environment {
    let mut env = Environment::new();
    env.define(name, "", false, "test", Some(value), true).unwrap();
    env
}

#[test]
fn substitutes_from_environment() {
    let env = env_with("NAME", json!("world"));
    let overrides = serde_json::Map::new();
    assert_eq!(interpolate("hello {{NAME}}", &overrides, &env).unwrap(), "hello world");
}

#[test]
fn overrides_win_over_environment() {
    let env = env_with("NAME", json!("env-value"));
    let mut overrides = serde_json::Map::new();
    overrides.insert("NAME".into(), json!("override-value"));
    assert_eq!(interpolate("{{NAME}}", &overrides, &env).unwrap(), "override-value");
}

#[test]
fn nested_reference_resolves_through_a_second_pass() {
    let mut env = Environment::new();
    env.define("OUTER", "", false, "", Some(json!("{{INNER}}")), true).unwrap();
    env.define("INNER", "", false, "", Some(json!("leaf")), true).unwrap();
    let overrides = serde_json::Map::new();
    assert_eq!(interpolate("{{OUTER}}", &overrides, &env).unwrap(), "leaf");
}

#[test]
fn missing_name_is_an_error() {
    let env = Environment::new();
    let overrides = serde_json::Map::new();
    let err = interpolate("{{MISSING}}", &overrides, &env).unwrap_err();
    assert!(matches!(err, RecipeError::UnresolvedTemplate(name) if name == "MISSING"));
}

proptest! {
    #[test]
    fn templates_with_no_placeholders_are_unchanged(s in "[a-zA-Z0-9 _.-]{0,40}") {
        let env = Environment::new();
        let overrides = serde_json::Map::new();
        prop_assert_eq!(interpolate(&s, &overrides, &env).unwrap(), s);
    }
}