// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Matrix fan-out recipe: main dispatches one async `build` step per
//! `(product, variant)` pair and joins all of them, in dispatch order.

use sci_recipe::{Recipe, RecipeBuilder, RecipeError, StepCall};
use serde_json::{Map, Value};
use std::sync::Arc;

pub struct MatrixRecipe;

impl Recipe for MatrixRecipe {
    fn register(&self, builder: &mut RecipeBuilder) {
        builder.default_value("PRODUCTS", Arc::new(|| serde_json::json!(["a", "b"])));
        builder.default_value("VARIANTS", Arc::new(|| serde_json::json!(["x", "y"])));

        builder.main(Arc::new(|engine, _args, _kwargs| {
            Box::pin(async move {
                let products = string_list(engine.env.get("PRODUCTS"))?;
                let variants = string_list(engine.env.get("VARIANTS"))?;

                let mut handles = Vec::new();
                for product in &products {
                    for variant in &variants {
                        let mut kwargs = Map::new();
                        kwargs.insert("product".to_string(), Value::String(product.clone()));
                        kwargs.insert("variant".to_string(), Value::String(variant.clone()));
                        match engine.call_step("build", Vec::new(), kwargs).await? {
                            StepCall::Handle(handle) => handles.push(handle),
                            StepCall::Value(v) => {
                                return Err(engine.error(format!("expected build to fan out, got {v}")).await)
                            }
                        }
                    }
                }

                let mut results = Vec::with_capacity(handles.len());
                for handle in handles {
                    results.push(engine.await_async(handle).await?);
                }
                Ok(Value::Array(results))
            })
        }));

        builder.async_step(
            "build",
            Arc::new(|_engine, _args, kwargs| {
                Box::pin(async move {
                    let product = kwargs.get("product").and_then(Value::as_str).unwrap_or_default();
                    let variant = kwargs.get("variant").and_then(Value::as_str).unwrap_or_default();
                    Ok(Value::String(format!("{product}-{variant}")))
                })
            }),
        );
    }
}

fn string_list(value: Option<&Value>) -> Result<Vec<String>, RecipeError> {
    let array = value
        .and_then(Value::as_array)
        .ok_or_else(|| RecipeError::JobError("expected a list value".to_string()))?;
    array
        .iter()
        .map(|v| v.as_str().map(str::to_string).ok_or_else(|| RecipeError::JobError("expected a string entry".to_string())))
        .collect()
}
