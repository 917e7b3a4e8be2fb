// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sci-wire: JSON wire types shared between the agent, the recipe engine,
//! and the (external) job server / storage service.

pub mod dispatch;
pub mod event;

pub use dispatch::{
    AgentDispatchRequest, AvailableRequest, BusyRequest, DispatchDescriptor, DispatchResponse, RegisterRequest,
    RunInfo, SessionInfo, SessionResult, StoragePutResponse,
};
pub use event::Event;
