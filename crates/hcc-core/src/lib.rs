// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hcc-core: shared types for the Hadoop cluster coordinator.
//!
//! Holds the data model shared by every other crate in the workspace —
//! instance/cluster state, the instance and operation entities, the role
//! enum, and process configuration — so that `hcc-agent`, `hcc-coordinator`
//! and `hcc-cli` all agree on one definition of each.

pub mod cluster_state;
pub mod config;
pub mod instance;
pub mod instance_state;
pub mod operation;
pub mod role;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cluster_state::ClusterState;
pub use config::Config;
pub use instance::Instance;
pub use instance_state::InstanceState;
pub use operation::{Operation, OperationId};
pub use role::Role;
