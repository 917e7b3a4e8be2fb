// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trivial recipe: main sets a description and returns `"ok"`.

use sci_recipe::{Recipe, RecipeBuilder};
use serde_json::Value;
use std::sync::Arc;

pub struct HelloRecipe;

impl Recipe for HelloRecipe {
    fn register(&self, builder: &mut RecipeBuilder) {
        builder.main(Arc::new(|engine, _args, _kwargs| {
            Box::pin(async move {
                engine.set_description("hello").await?;
                Ok(Value::String("ok".to_string()))
            })
        }));
    }
}
