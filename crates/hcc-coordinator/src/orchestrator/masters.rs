// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Master bring-up and the shared `monitor_instance` / `get_status`
//! probes (spec.md §4.6.2, §4.6.4).

use hcc_agent::IaasStatus;
use hcc_core::config::{JOBTRACKER_NAME, NAMENODE_NAME};
use hcc_core::{ClusterState, InstanceState, Role};

use super::Orchestrator;

impl Orchestrator {
    /// `launch_nn`: spawn the NameNode VM; on failure, cluster BROKEN.
    /// Monitor until SNITCH_READY; the NameNode's own startup script
    /// brings up HDFS as part of its boot, so success here is attested
    /// directly as HADOOP_READY (never inferred by probing).
    pub(super) async fn launch_nn(self: std::sync::Arc<Self>) {
        match self.vm_factory.spawn(NAMENODE_NAME, Role::NameNode).await {
            Ok(true) => {}
            _ => {
                self.instances.set_cluster_state(ClusterState::Broken);
                return;
            }
        }

        if !self.monitor_instance(NAMENODE_NAME, InstanceState::SnitchReady).await {
            self.instances.set_cluster_state(ClusterState::Broken);
            return;
        }

        self.instances.set_instance_state(NAMENODE_NAME, InstanceState::HadoopReady);
    }

    /// `launch_jt`: same shape as `launch_nn`, then waits for the
    /// NameNode to be HADOOP_READY before starting the JobTracker daemon
    /// and forking the detached `HadoopMonitor`.
    pub(super) async fn launch_jt(self: std::sync::Arc<Self>) {
        match self.vm_factory.spawn(JOBTRACKER_NAME, Role::JobTracker).await {
            Ok(true) => {}
            _ => {
                self.instances.set_cluster_state(ClusterState::Broken);
                return;
            }
        }

        if !self.monitor_instance(JOBTRACKER_NAME, InstanceState::SnitchReady).await {
            self.instances.set_cluster_state(ClusterState::Broken);
            return;
        }

        self.instances.wait_until(NAMENODE_NAME, InstanceState::HadoopReady).await;

        if let Err(err) = self.agent.checked_post(JOBTRACKER_NAME, "/start", Default::default()).await {
            tracing::error!(error = %err, "jobtracker failed to start");
            self.instances.set_cluster_state(ClusterState::Broken);
            return;
        }
        self.instances.set_instance_state(JOBTRACKER_NAME, InstanceState::HadoopReady);

        self.subprocess.bg_exec(
            vec![
                "java".to_string(),
                "-cp".to_string(),
                "hadoop-tools.jar".to_string(),
                "com.google.HadoopMonitor".to_string(),
            ],
            "/home/hadoop/monitor_log".to_string(),
        );
    }

    /// Blockingly poll an instance until it reaches `wait_for_state`,
    /// updating the registry on every observation. Returns `false` (and
    /// records the failure) the moment the probe reports BROKEN.
    pub(crate) async fn monitor_instance(&self, name: &str, wait_for_state: InstanceState) -> bool {
        debug_assert_ne!(wait_for_state, InstanceState::HadoopReady, "get_status never reports this");
        loop {
            let (status, err) = self.get_status(name).await;
            self.instances.set_instance_state(name, status);
            if status == InstanceState::Broken {
                self.instances.record_failure(name, err.as_deref().unwrap_or("unknown failure"));
                return false;
            }
            if status >= wait_for_state {
                return true;
            }
            tokio::time::sleep(self.config.poll_delay).await;
        }
    }

    /// Composite probe (spec.md §4.6.4): `InstanceAPI.Get` first (a
    /// STAGING box just times out if poked directly), then the snitch's
    /// own `/status` once the IaaS reports RUNNING.
    pub(crate) async fn get_status(&self, name: &str) -> (InstanceState, Option<String>) {
        let info = match self.vm_factory.api().get(name).await {
            Ok(Some(info)) => info,
            Ok(None) => return (InstanceState::NonExistent, None),
            Err(err) => return (InstanceState::Broken, Some(err.to_string())),
        };

        match info.status {
            IaasStatus::Running => match self.agent.status(name).await {
                Some(reply) if reply.is_ready() => (InstanceState::SnitchReady, None),
                Some(reply) if reply.is_starting() => (InstanceState::Running, None),
                Some(reply) => {
                    let msg = format!("snitch reported {}", reply.state);
                    (InstanceState::Broken, Some(msg))
                }
                // Agent unreachable: retry next tick rather than fail.
                None => (InstanceState::Running, None),
            },
            IaasStatus::Provisioning => (InstanceState::Provisioning, None),
            IaasStatus::Staging => (InstanceState::Staging, None),
            other => (InstanceState::Broken, Some(format!("instance is {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::test_support::test_orchestrator;
    use hcc_core::Config;

    #[tokio::test]
    async fn launch_nn_goes_broken_when_insert_fails() {
        let (orchestrator, api, _sub) = test_orchestrator(Config::for_test());
        api.fail_insert(NAMENODE_NAME, "quota exceeded");
        orchestrator.instances.ensure_instance(NAMENODE_NAME, Role::NameNode);
        orchestrator.clone().launch_nn().await;
        assert_eq!(orchestrator.instances().cluster_state(), ClusterState::Broken);
    }

    #[tokio::test]
    async fn get_status_reports_non_existent_for_an_unknown_instance() {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        let (state, err) = orchestrator.get_status("ghost").await;
        assert_eq!(state, InstanceState::NonExistent);
        assert!(err.is_none());
    }

    #[tokio::test]
    async fn get_status_maps_provisioning_directly() {
        let (orchestrator, api, _sub) = test_orchestrator(Config::for_test());
        api.insert(hcc_agent::InsertRequest {
            name: "hadoop-slave-000".to_string(),
            zone: "z".to_string(),
            machine_type: "m".to_string(),
            image: "i".to_string(),
            service_account_scopes: vec![],
            disks: vec![],
            network: hcc_agent::NetworkConfig { external_ip: false },
            metadata: Default::default(),
        })
        .await
        .unwrap();
        let (state, _) = orchestrator.get_status("hadoop-slave-000").await;
        assert_eq!(state, InstanceState::Provisioning);
    }

    #[tokio::test]
    async fn get_status_maps_an_unrecognized_running_state_to_broken() {
        let (orchestrator, api, _sub) = test_orchestrator(Config::for_test());
        api.insert(hcc_agent::InsertRequest {
            name: "hadoop-slave-000".to_string(),
            zone: "z".to_string(),
            machine_type: "m".to_string(),
            image: "i".to_string(),
            service_account_scopes: vec![],
            disks: vec![],
            network: hcc_agent::NetworkConfig { external_ip: false },
            metadata: Default::default(),
        })
        .await
        .unwrap();
        api.set_status("hadoop-slave-000", IaasStatus::Terminated);
        let (state, err) = orchestrator.get_status("hadoop-slave-000").await;
        assert_eq!(state, InstanceState::Broken);
        assert!(err.unwrap().contains("TERMINATED"));
    }
}
