// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered parameter mapping carried from job server to recipe engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-key metadata: whether the value is read-only, where it came from,
/// and a human-readable description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamConfig {
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    #[error("environment variable {0:?} has already been defined")]
    Redefined(String),
    #[error("environment variable {0:?} is read only")]
    ReadOnly(String),
}

/// Ordered mapping from parameter name to value, with parallel per-key
/// metadata (`config`). Iteration is name-sorted so printed output is
/// deterministic, matching `Environment.print_values`'s `sorted(self)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    values: BTreeMap<String, Value>,
    config: BTreeMap<String, ParamConfig>,
}

/// Wire representation: `{"c": config, "v": values}`.
#[derive(Debug, Serialize, Deserialize)]
struct EnvironmentWire {
    c: BTreeMap<String, ParamConfig>,
    v: BTreeMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for `name`, optionally setting an initial value.
    /// When `final` is true and `name` is already defined, fails.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        read_only: bool,
        source: impl Into<String>,
        value: Option<Value>,
        r#final: bool,
    ) -> Result<(), EnvError> {
        let name = name.into();
        if r#final && self.config.contains_key(&name) {
            return Err(EnvError::Redefined(name));
        }
        if let Some(v) = value {
            self.values.insert(name.clone(), v);
        }
        self.config
            .insert(name, ParamConfig { read_only, description: description.into(), source: source.into() });
        Ok(())
    }

    /// Set a value, honoring the `read_only` flag recorded via `define`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<(), EnvError> {
        let name = name.into();
        if self.config.get(&name).map(|c| c.read_only).unwrap_or(false) {
            return Err(EnvError::ReadOnly(name));
        }
        self.values.insert(name, value.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn config_of(&self, name: &str) -> Option<&ParamConfig> {
        self.config.get(name)
    }

    /// Name-sorted iteration, matching `print_values`'s `sorted(self)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every non-read-only value from `other`. When `other` carries
    /// metadata (always true here, `Environment` always has a `config`),
    /// also copy that key's config entry.
    ///
    /// The original Python `merge` only copied `other`'s config for the
    /// *last* key of the loop (a stray `k` leaked out of the `for`), which
    /// reads as a bug rather than an intended partial-copy. This copies
    /// metadata for every merged key, which is the contract the docstring
    /// promises.
    pub fn merge(&mut self, other: &Environment) {
        for (k, v) in other.values.iter() {
            if self.config.get(k).map(|c| c.read_only).unwrap_or(false) {
                continue;
            }
            self.values.insert(k.clone(), v.clone());
            if let Some(cfg) = other.config.get(k) {
                self.config.insert(k.clone(), cfg.clone());
            }
        }
    }

    pub fn serialize(&self) -> Value {
        serde_json::to_value(EnvironmentWire { c: self.config.clone(), v: self.values.clone() })
            .unwrap_or(Value::Null)
    }

    pub fn deserialize(value: &Value) -> Result<Self, serde_json::Error> {
        let wire: EnvironmentWire = serde_json::from_value(value.clone())?;
        Ok(Self { values: wire.v, config: wire.c })
    }
}

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;
