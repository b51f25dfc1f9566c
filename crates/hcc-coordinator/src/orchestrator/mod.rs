// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! The state-machine driver (spec.md §4.6): `launch`, `add_slaves`,
//! `launch_nn`, `launch_jt`, `launch_slave1/2`, `monitor_instance`,
//! `start_slave`, `transfer`, `submit_job`, `clean_hdfs`, `teardown`.
//!
//! Split across submodules by protocol (one `impl Orchestrator` block per
//! file), wired together here: `Orchestrator` owns the two worker pools,
//! both registries, the `AgentClient`, the `VmFactory`, the `Config`, and
//! the `SubprocessRunner`.

mod launch;
mod masters;
mod slaves;
pub mod subprocess;
mod teardown;
mod telemetry;
mod work;

use std::sync::Arc;

use hcc_agent::{AgentClient, VmFactory};
use hcc_core::Config;
use thiserror::Error;

use crate::pool::WorkerPool;
use crate::registry::{InstanceRegistry, OperationRegistry};
use subprocess::SubprocessRunner;
pub use telemetry::HadoopTelemetry;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("remote call failed: {0}")]
    RemoteCall(#[from] hcc_agent::AgentClientError),
    #[error("IaaS call failed: {0}")]
    InstanceApi(#[from] hcc_agent::InstanceApiError),
}

pub struct Orchestrator {
    pub(crate) config: Config,
    pub(crate) instances: Arc<InstanceRegistry>,
    pub(crate) operations: Arc<OperationRegistry>,
    pub(crate) agent: Arc<AgentClient>,
    pub(crate) vm_factory: Arc<VmFactory>,
    pub(crate) subprocess: Arc<dyn SubprocessRunner>,
    pub(crate) spawn_pool: WorkerPool,
    pub(crate) ops_pool: WorkerPool,
    pub telemetry: HadoopTelemetry,
}

impl Orchestrator {
    pub fn new(
        config: Config,
        agent: Arc<AgentClient>,
        vm_factory: Arc<VmFactory>,
        subprocess: Arc<dyn SubprocessRunner>,
    ) -> Arc<Self> {
        let instances = Arc::new(InstanceRegistry::new(config.needed_slaves));
        let operations = Arc::new(OperationRegistry::new());
        let spawn_pool = WorkerPool::new(config.pool_size, "spawn");
        let ops_pool = WorkerPool::new(config.ops_pool_size(), "ops");
        Arc::new(Self {
            config,
            instances,
            operations,
            agent,
            vm_factory,
            subprocess,
            spawn_pool,
            ops_pool,
            telemetry: HadoopTelemetry::new(),
        })
    }

    pub fn instances(&self) -> &Arc<InstanceRegistry> {
        &self.instances
    }

    pub fn operations(&self) -> &Arc<OperationRegistry> {
        &self.operations
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::*;
    use hcc_agent::FakeInstanceApi;
    use hcc_agent::{SnitchAssets, VmFactory};
    use subprocess::fake::FakeSubprocessRunner;

    pub fn fake_assets() -> SnitchAssets {
        SnitchAssets {
            startup_script: "#!/bin/sh\necho start".to_string(),
            bootstrap_sh: "#!/bin/sh\necho bootstrap".to_string(),
            namenode_snitch: "namenode snitch".to_string(),
            jobtracker_snitch: "jobtracker snitch".to_string(),
            slave_snitch: "slave snitch".to_string(),
        }
    }

    /// Build an `Orchestrator` wired entirely to fakes, for coordinator
    /// integration tests driving the state machine end to end.
    pub fn test_orchestrator(config: Config) -> (Arc<Orchestrator>, Arc<FakeInstanceApi>, Arc<FakeSubprocessRunner>) {
        let api = FakeInstanceApi::new();
        let agent = Arc::new(AgentClient::new(api.clone(), config.port, config.ip_via_api));
        let vm_factory = Arc::new(VmFactory::new(api.clone(), config.clone(), fake_assets()));
        let subprocess = FakeSubprocessRunner::new();
        let orchestrator = Orchestrator::new(config, agent, vm_factory, subprocess.clone());
        (orchestrator, api, subprocess)
    }
}
