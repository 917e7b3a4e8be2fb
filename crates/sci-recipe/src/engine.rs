// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The recipe engine, grounded on `sci.build.Build`/`Step`/`AsyncJob`: loads
//! a compiled recipe, resolves defaults, runs an entry point, dispatches
//! async steps to other agents, and joins their results.
//!
//! Banners and environment dumps are written with `println!` rather than
//! `tracing`: they are part of the session's `output.log`, which the agent
//! uploads to the storage service as the build's log artifact, not
//! operational telemetry.

use crate::async_job::{AsyncHandle, AsyncJob, AsyncJobState};
use crate::error::RecipeError;
use crate::registry::CompiledRecipe;
use crate::template;
use sci_core::{BuildId, Clock, Environment, Session, SystemClock};
use sci_http::HttpClient;
use sci_storage::Artifacts;
use sci_wire::{DispatchDescriptor, DispatchResponse, Event, RunInfo, SessionResult};
use serde_json::{Map, Value};

pub enum StepCall {
    Value(Value),
    Handle(AsyncHandle),
}

impl StepCall {
    /// Resolve to a value, awaiting the engine if this was a fan-out handle.
    pub async fn resolve(self, engine: &mut Engine) -> Result<Value, RecipeError> {
        match self {
            StepCall::Value(v) => Ok(v),
            StepCall::Handle(h) => engine.await_async(h).await,
        }
    }
}

pub struct Engine<C: Clock = SystemClock> {
    pub env: Environment,
    pub session: Session,
    pub artifacts: Artifacts,
    pub build_uuid: BuildId,
    job_server: String,
    http: HttpClient,
    recipe: CompiledRecipe,
    async_jobs: Vec<AsyncJob>,
    current_step: Option<String>,
    entry_point_name: Option<String>,
    description: String,
    build_id_label: String,
    start_epoch_ms: u64,
    clock: C,
}

impl<C: Clock> Engine<C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        env: Environment,
        session: Session,
        artifacts: Artifacts,
        build_uuid: BuildId,
        job_server: impl Into<String>,
        http: HttpClient,
        recipe: CompiledRecipe,
        entry_point_name: Option<String>,
        clock: C,
    ) -> Self {
        let start_epoch_ms = clock.epoch_ms();
        Self {
            env,
            session,
            artifacts,
            build_uuid,
            job_server: job_server.into(),
            http,
            recipe,
            async_jobs: Vec::new(),
            current_step: None,
            entry_point_name,
            description: String::new(),
            build_id_label: String::new(),
            start_epoch_ms,
            clock,
        }
    }

    pub fn current_step(&self) -> Option<&str> {
        self.current_step.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run the build: resolve defaults (main entry point only), emit
    /// `job-begun`/`job-done`, and invoke the entry point.
    pub async fn start(&mut self, args: Vec<Value>, kwargs: Map<String, Value>) -> Result<Value, RecipeError> {
        let is_main = self.entry_point_name.is_none();

        if is_main {
            let defaults = self.recipe.defaults.clone();
            for (name, resolver) in defaults {
                if !self.env.contains(&name) {
                    self.env.set(&name, resolver())?;
                }
            }
            self.slog(Event::JobBegun).await?;
        }

        self.print_banner("Preparing Job", '=');
        self.print_values();

        self.print_banner("Starting Job", '=');
        let ret = match &self.entry_point_name {
            None => {
                let main = self.recipe.main.clone().ok_or(RecipeError::EntryPointMissing(None))?;
                let step = crate::registry::StepDef { name: "main".to_string(), body: main, is_async: false };
                self.run_step_locally(step, args, kwargs).await?
            }
            Some(name) => {
                let step = self.recipe.step(name).cloned().ok_or_else(|| RecipeError::EntryPointMissing(Some(name.clone())))?;
                self.run_step_locally(step, args, kwargs).await?
            }
        };
        self.print_banner("Job Finished", '=');

        if is_main {
            self.slog(Event::JobDone).await?;
        }
        Ok(ret)
    }

    /// Call a named step. Dispatches to another agent when the step is
    /// tagged async and isn't the current session's own entry point;
    /// otherwise runs it in-process.
    pub async fn call_step(&mut self, name: &str, args: Vec<Value>, kwargs: Map<String, Value>) -> Result<StepCall, RecipeError> {
        let step = self.recipe.step(name).cloned().ok_or_else(|| RecipeError::EntryPointMissing(Some(name.to_string())))?;
        let is_entrypoint = self.entry_point_name.as_deref() == Some(name);

        if step.is_async && !is_entrypoint {
            let handle = self.dispatch_async(&step.name, args, kwargs).await?;
            Ok(StepCall::Handle(handle))
        } else {
            let value = self.run_step_locally(step, args, kwargs).await?;
            Ok(StepCall::Value(value))
        }
    }

    async fn run_step_locally(
        &mut self,
        step: crate::registry::StepDef,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
    ) -> Result<Value, RecipeError> {
        self.slog(Event::StepBegun { name: step.name.clone(), args: args.clone(), kwargs: kwargs.clone() }).await?;
        let start = self.clock.epoch_ms();
        self.current_step = Some(step.name.clone());
        self.print_banner(&format!("Step: '{}'", step.name), '-');

        let ret = (step.body)(self, args, kwargs).await?;

        if self.has_running_asyncs() {
            let elapsed = self.clock.epoch_ms().saturating_sub(start);
            self.slog(Event::StepJoinBegun { name: step.name.clone(), time_ms: elapsed }).await?;
            self.join_asyncs().await?;
            let elapsed = self.clock.epoch_ms().saturating_sub(start);
            self.slog(Event::StepJoinDone { name: step.name.clone(), time_ms: elapsed }).await?;
        }

        let elapsed = self.clock.epoch_ms().saturating_sub(start);
        self.slog(Event::StepDone { name: step.name.clone(), time_ms: elapsed }).await?;
        Ok(ret)
    }

    async fn dispatch_async(&mut self, step_name: &str, args: Vec<Value>, kwargs: Map<String, Value>) -> Result<AsyncHandle, RecipeError> {
        let run_info = RunInfo {
            step_fun: Some(step_name.to_string()),
            step_name: step_name.to_string(),
            args,
            kwargs,
            env: Some(self.env.serialize()),
        };
        let descriptor = DispatchDescriptor {
            build_id: self.build_uuid,
            job_server: self.job_server.clone(),
            labels: Vec::new(),
            parent: Some(self.session.id),
            run_info,
        };
        let ts_start = self.clock.epoch_ms();
        let body = self.http.call_json("/agent/dispatch", Some(&descriptor)).await?;
        let resp: DispatchResponse = serde_json::from_value(body)?;

        let mut job = AsyncJob::prepared(ts_start);
        job.state = AsyncJobState::Running;
        job.session_id = Some(resp.session_id);
        self.async_jobs.push(job);
        Ok(AsyncHandle(self.async_jobs.len() - 1))
    }

    /// Block until the fan-out job behind `handle` completes, polling
    /// `/agent/result/<session_id>`.
    pub async fn await_async(&mut self, handle: AsyncHandle) -> Result<Value, RecipeError> {
        let job = &self.async_jobs[handle.0];
        if job.state == AsyncJobState::Done {
            return Ok(job.output.clone().unwrap_or(Value::Null));
        }

        let session_id = job.session_id.expect("running job always carries a session id");
        let ts_start = job.ts_start_ms;
        let body = self.http.call_json::<()>(&format!("/agent/result/{session_id}"), None).await?;
        let result: SessionResult = serde_json::from_value(body)?;

        let elapsed = self.clock.epoch_ms().saturating_sub(ts_start);
        self.slog(Event::AsyncJoined { session_no: session_id.suffix().to_string(), time_ms: elapsed }).await?;

        let job = &mut self.async_jobs[handle.0];
        job.state = AsyncJobState::Done;
        job.output = result.output.clone();
        Ok(result.output.unwrap_or(Value::Null))
    }

    fn has_running_asyncs(&self) -> bool {
        self.async_jobs.iter().any(|j| j.state == AsyncJobState::Running)
    }

    /// Await every still-running fan-out job and clear the list, returning
    /// each child's output in dispatch order.
    pub async fn join_asyncs(&mut self) -> Result<Vec<Value>, RecipeError> {
        let running: Vec<usize> =
            self.async_jobs.iter().enumerate().filter(|(_, j)| j.state == AsyncJobState::Running).map(|(i, _)| i).collect();
        for idx in running {
            self.await_async(AsyncHandle(idx)).await?;
        }
        let results = self.async_jobs.iter().map(|j| j.output.clone().unwrap_or(Value::Null)).collect();
        self.async_jobs.clear();
        Ok(results)
    }

    pub async fn set_description(&mut self, description: &str) -> Result<(), RecipeError> {
        let formatted = self.format(description)?;
        self.description = formatted.clone();
        self.slog(Event::SetDescription { description: formatted }).await
    }

    pub async fn set_build_id(&mut self, build_id: &str) -> Result<(), RecipeError> {
        let formatted = self.format(build_id)?;
        self.env.set("SCI_BUILD_ID", Value::String(formatted.clone()))?;
        self.build_id_label = formatted.clone();
        self.slog(Event::SetBuildId { build_id: formatted }).await
    }

    pub fn format(&self, tmpl: &str) -> Result<String, RecipeError> {
        template::interpolate(tmpl, &Map::new(), &self.env)
    }

    pub fn format_list(&self, tmpls: &[String]) -> Result<Vec<String>, RecipeError> {
        template::interpolate_list(tmpls, &Map::new(), &self.env)
    }

    /// Run `cmd` under a shell in the session's workspace.
    pub async fn run(&mut self, cmd: &str) -> Result<(), RecipeError> {
        let formatted = self.format(cmd)?;
        if let Err(RecipeError::CommandFailed { code, command }) = crate::shell::run(&self.session.workspace, &formatted).await {
            return Err(self.error(format!("External command returned result code {code}: {command}")).await);
        }
        Ok(())
    }

    /// Emit a `job-error` event and return the error to propagate.
    pub async fn error(&mut self, what: impl Into<String>) -> RecipeError {
        let what = what.into();
        let _ = self.slog(Event::JobError { what: what.clone() }).await;
        RecipeError::JobError(what)
    }

    pub async fn slog(&self, event: Event) -> Result<(), RecipeError> {
        let body = serde_json::to_string(&event)?;
        self.http.post_raw_json(&format!("/slog/{}", self.session.id), body).await?;
        Ok(())
    }

    fn print_values(&self) {
        println!("Environment:");
        for (name, value) in self.env.iter() {
            let rendered = match value {
                Value::String(s) => format!("'{s}'"),
                other => other.to_string(),
            };
            println!(" {name}: {rendered}");
        }
    }

    fn print_banner(&self, text: &str, dash: char) {
        let elapsed_secs = self.clock.epoch_ms().saturating_sub(self.start_epoch_ms) / 1000;
        let prefix = format!("[+{}]", format_elapsed(elapsed_secs));
        let reserved = text.len() + 4 + prefix.len();
        let total_dashes = 80usize.saturating_sub(reserved);
        let dash_left = total_dashes / 2;
        let dash_right = total_dashes - dash_left;
        println!(
            "{prefix}{}[ {text} ]{}",
            dash.to_string().repeat(dash_left),
            dash.to_string().repeat(dash_right)
        );
    }
}

fn format_elapsed(secs: u64) -> String {
    if secs > 59 {
        format!("{}m{}", secs / 60, secs % 60)
    } else {
        format!("{secs}")
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
