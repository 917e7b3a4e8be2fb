// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared agent state: single-slot dispatch queue with a busy sentinel,
//! grounded on `sci.agent.web`'s global `config` plus its `Queue`/`Condition`
//! pair. The async equivalent here is a `tokio::sync::Mutex` slot plus a
//! `tokio::sync::Notify`, appropriate since the executor is a tokio task
//! rather than an OS thread (§5).

use crate::config::AgentConfig;
use sci_core::{Clock, SessionId, SystemClock};
use sci_http::HttpClient;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, Notify};

/// Global agent state, shared by the HTTP router, status task, and
/// executor task via `Arc`. No free-floating statics (§5).
pub struct Agent<C: Clock = SystemClock> {
    pub config: AgentConfig,
    pub job_server: HttpClient,
    slot: Mutex<Option<SessionId>>,
    notify: Notify,
    busy: AtomicBool,
    registered: AtomicBool,
    last_status_ms: std::sync::atomic::AtomicU64,
    pub clock: C,
}

impl<C: Clock> Agent<C> {
    pub fn new(config: AgentConfig, job_server: HttpClient, clock: C) -> Self {
        Self {
            config,
            job_server,
            slot: Mutex::new(None),
            notify: Notify::new(),
            busy: AtomicBool::new(false),
            registered: AtomicBool::new(false),
            last_status_ms: std::sync::atomic::AtomicU64::new(0),
            clock,
        }
    }

    /// Try to occupy the single slot. Fails if the agent is already busy
    /// with a pending or running job.
    pub async fn try_dispatch(&self, session_id: SessionId) -> Result<(), Busy> {
        if self.busy.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
            return Err(Busy);
        }
        *self.slot.lock().await = Some(session_id);
        self.notify.notify_one();
        Ok(())
    }

    /// Block until a dispatch item is available, then take it.
    pub async fn wait_for_dispatch(&self) -> SessionId {
        loop {
            if let Some(item) = self.slot.lock().await.take() {
                return item;
            }
            self.notify.notified().await;
        }
    }

    /// Release the busy sentinel after a job finishes and its final
    /// `send_available` has been issued.
    pub fn clear_busy(&self) {
        self.busy.store(false, Ordering::SeqCst);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn set_registered(&self, value: bool) {
        self.registered.store(value, Ordering::SeqCst);
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }

    /// Record that a status message (register/ping/available/busy) was
    /// just sent, resetting the heartbeat TTL clock.
    pub fn mark_status_sent(&self) {
        self.last_status_ms.store(self.clock.epoch_ms(), Ordering::SeqCst);
    }

    /// Seconds since the last outbound status message.
    pub fn seconds_since_status(&self) -> u64 {
        let last = self.last_status_ms.load(Ordering::SeqCst);
        self.clock.epoch_ms().saturating_sub(last) / 1000
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Busy;

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
