// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `{{NAME}}` placeholder substitution, grounded on `oj_runbook::template`'s
//! regex-based interpolation and on `sci.build.Build._format`'s fixed-point
//! loop.

use crate::error::RecipeError;
use regex::Regex;
use sci_core::Environment;
use serde_json::Value;
use std::sync::LazyLock;

static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("valid regex"));

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolve `name` against the per-call overrides first, then the
/// environment (`Build.var`'s `kwargs.get(_key)` then `self.env.get(_key)`).
fn resolve(name: &str, overrides: &serde_json::Map<String, Value>, env: &Environment) -> Option<String> {
    overrides.get(name).map(value_to_string).or_else(|| env.get(name).map(value_to_string))
}

/// Substitute every `{{NAME}}` in `template` to a fixed point: each pass
/// resolves the first remaining placeholder and replaces every occurrence
/// of that name, which lets a resolved value itself contain further
/// placeholders (nested references) without an explicit recursion limit.
pub fn interpolate(
    template: &str,
    overrides: &serde_json::Map<String, Value>,
    env: &Environment,
) -> Result<String, RecipeError> {
    let mut out = template.to_string();
    loop {
        let Some(caps) = VAR_PATTERN.captures(&out) else { break };
        let name = caps.get(1).expect("group 1 always present").as_str().to_string();
        let Some(value) = resolve(&name, overrides, env) else {
            return Err(RecipeError::UnresolvedTemplate(name));
        };
        let needle = format!("{{{{{name}}}}}", );
        out = out.replace(&needle, &value);
    }
    Ok(out)
}

/// Map `interpolate` over a list of templates element-wise (`Build.format`'s
/// list branch).
pub fn interpolate_list(
    templates: &[String],
    overrides: &serde_json::Map<String, Value>,
    env: &Environment,
) -> Result<Vec<String>, RecipeError> {
    templates.iter().map(|t| interpolate(t, overrides, env)).collect()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
