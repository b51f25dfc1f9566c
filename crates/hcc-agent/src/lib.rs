// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hcc-agent: the coordinator's two collaborator-facing boundaries —
//! `InstanceAPI` (the opaque IaaS compute interface) and `AgentClient`
//! (the HTTPS client that talks to in-VM snitches) — plus `VmFactory`,
//! which composes the two into "create this role's VM."

pub mod gcloud;
pub mod instance_api;
pub mod snitch_client;
pub mod vm_factory;

pub use gcloud::GcloudInstanceApi;
pub use instance_api::{
    DiskAttachment, DiskMode, IaasStatus, InsertRequest, InsertResponse, InstanceApi,
    InstanceApiError, InstanceInfo, NetworkConfig,
};
pub use snitch_client::{AgentClient, AgentClientError};
pub use vm_factory::{SnitchAssets, VmFactory};

#[cfg(any(test, feature = "test-support"))]
pub use instance_api::fake::FakeInstanceApi;
