// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled-in demo recipes, populated once at process start (§3.1, §9
//! "Open question resolved"). Real recipe authors would add their own
//! `Recipe` impls and `register` calls here.

mod hello;
mod matrix;

use sci_recipe::RecipeRegistry;
use std::sync::Arc;

pub fn registry() -> RecipeRegistry {
    let mut registry = RecipeRegistry::new();
    registry.register("hello", Arc::new(hello::HelloRecipe));
    registry.register("matrix", Arc::new(matrix::MatrixRecipe));
    registry
}
