// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative recipe registration, replacing the original's dynamic
//! `execfile`-based recipe loading (see the design notes around recipe
//! loading). A [`Recipe`] registers named defaults, steps, and a main
//! entry point into a [`RecipeBuilder`]; a [`RecipeRegistry`] resolves a
//! recipe by name at bootstrap time.

use crate::error::RecipeError;
use crate::Engine;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type StepFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, RecipeError>> + Send + 'a>>;

/// Body of a step or main entry point: takes the running engine plus the
/// call's positional/keyword arguments, returns the step's result.
pub type StepBody = Arc<dyn for<'a> Fn(&'a mut Engine, Vec<Value>, Map<String, Value>) -> StepFuture<'a> + Send + Sync>;

/// Body of a default resolver, invoked with no arguments when the named
/// parameter is absent from the environment at job start.
pub type DefaultBody = Arc<dyn Fn() -> Value + Send + Sync>;

#[derive(Clone)]
pub struct StepDef {
    pub name: String,
    pub body: StepBody,
    pub is_async: bool,
}

/// Everything one [`Recipe`] registered: defaults in insertion order, steps
/// keyed by name, and an optional main entry point.
#[derive(Clone, Default)]
pub struct CompiledRecipe {
    pub defaults: Vec<(String, DefaultBody)>,
    pub steps: Vec<StepDef>,
    pub main: Option<StepBody>,
}

impl CompiledRecipe {
    pub fn step(&self, name: &str) -> Option<&StepDef> {
        self.steps.iter().find(|s| s.name == name)
    }
}

/// Accumulates one recipe's registrations. Handed to `Recipe::register`.
#[derive(Default)]
pub struct RecipeBuilder {
    compiled: CompiledRecipe,
}

impl RecipeBuilder {
    pub fn default_value(&mut self, name: impl Into<String>, resolver: DefaultBody) -> &mut Self {
        self.compiled.defaults.push((name.into(), resolver));
        self
    }

    pub fn step(&mut self, name: impl Into<String>, body: StepBody) -> &mut Self {
        self.compiled.steps.push(StepDef { name: name.into(), body, is_async: false });
        self
    }

    pub fn async_step(&mut self, name: impl Into<String>, body: StepBody) -> &mut Self {
        self.compiled.steps.push(StepDef { name: name.into(), body, is_async: true });
        self
    }

    pub fn main(&mut self, body: StepBody) -> &mut Self {
        self.compiled.main = Some(body);
        self
    }

    pub(crate) fn build(self) -> CompiledRecipe {
        self.compiled
    }
}

/// Compiled-in recipe, linked into the `sci-runner` binary. Recipes are
/// Rust code, not interpreted text — dynamic recipe loading is out of scope.
pub trait Recipe: Send + Sync {
    fn register(&self, builder: &mut RecipeBuilder);
}

/// Looks up a [`Recipe`] by name and compiles it into a [`CompiledRecipe`].
/// Populated once at process start in `sci-runner`'s `main`.
#[derive(Default)]
pub struct RecipeRegistry {
    recipes: HashMap<String, Arc<dyn Recipe>>,
}

impl RecipeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, recipe: Arc<dyn Recipe>) -> &mut Self {
        self.recipes.insert(name.into(), recipe);
        self
    }

    pub fn compile(&self, name: &str) -> Result<CompiledRecipe, RecipeError> {
        let recipe = self.recipes.get(name).ok_or_else(|| RecipeError::UnknownRecipe(name.to_string()))?;
        let mut builder = RecipeBuilder::default();
        recipe.register(&mut builder);
        Ok(builder.build())
    }
}
