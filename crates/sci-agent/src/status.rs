// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status/heartbeat task, grounded on `sci.agent.web`'s status thread:
//! register with the job server, then heartbeat every `EXPIRY_TTL` once
//! registered. A heartbeat failure drops back to the register loop.

use crate::agent::Agent;
use sci_core::Clock;
use sci_wire::RegisterRequest;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Heartbeat TTL: send a ping if no status message went out in this long.
pub const EXPIRY_TTL_SECS: u64 = 60;
const REGISTER_RETRY: Duration = Duration::from_secs(5);

pub fn labels() -> Vec<String> {
    vec![format!("os:{}", std::env::consts::OS), format!("arch:{}", std::env::consts::ARCH)]
}

/// Run the status loop forever: register, then heartbeat on an interval.
pub async fn run<C: Clock + 'static>(agent: Arc<Agent<C>>) {
    loop {
        if !agent.is_registered() {
            match register(&agent).await {
                Ok(()) => info!("agent registered"),
                Err(e) => {
                    warn!(error = %e, "registration failed, retrying");
                    tokio::time::sleep(REGISTER_RETRY).await;
                    continue;
                }
            }
        }

        if agent.seconds_since_status() >= EXPIRY_TTL_SECS {
            if let Err(e) = ping(&agent).await {
                warn!(error = %e, "heartbeat failed, re-registering");
                agent.set_registered(false);
                continue;
            }
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn register<C: Clock>(agent: &Agent<C>) -> Result<(), sci_http::TransportError> {
    let req = RegisterRequest {
        id: agent.config.node_id.as_str().to_string(),
        nick: agent.config.nickname.clone(),
        port: agent.config.port,
        labels: labels(),
    };
    agent.job_server.call_json("/agent/register", Some(&req)).await?;
    agent.set_registered(true);
    agent.mark_status_sent();
    Ok(())
}

async fn ping<C: Clock>(agent: &Agent<C>) -> Result<(), sci_http::TransportError> {
    agent.job_server.call_empty(&format!("/agent/ping/{}", agent.config.node_id), reqwest::Method::POST).await?;
    agent.mark_status_sent();
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
