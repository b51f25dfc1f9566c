// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Two-phase slave bring-up (spec.md §4.6.3).

use hcc_core::{ClusterState, InstanceState, Role};

use super::Orchestrator;

impl Orchestrator {
    /// `add_slaves(k)`: requires `cluster_state >= LAUNCHING`. Allocates
    /// `k` names, marks each NON_EXISTENT, and enqueues phase 1 for each
    /// on the spawn pool.
    pub fn add_slaves(self: &std::sync::Arc<Self>, num_slaves: u32) -> bool {
        if self.instances.cluster_state() < ClusterState::Launching {
            return false;
        }
        let names = self.instances.allocate_slave_names(num_slaves as usize);
        for name in names {
            self.instances.ensure_instance(&name, Role::Slave);
            self.instances.set_instance_state(&name, InstanceState::NonExistent);
            let orchestrator = self.clone();
            self.spawn_pool.submit(async move {
                orchestrator.launch_slave1(name).await;
            });
        }
        true
    }

    /// Phase 1: create the instance, then hand off to the ops pool. On
    /// `Insert` failure the slave is silently dropped — no BROKEN
    /// propagation for slaves (spec.md §4.6.3).
    pub(super) async fn launch_slave1(self: std::sync::Arc<Self>, name: String) {
        match self.vm_factory.spawn(&name, Role::Slave).await {
            Ok(true) => {}
            _ => return,
        }
        // Mark PROVISIONING even if the IaaS is still earlier: prevents
        // the instance from appearing unstarted while it waits in the
        // (slower) ops pool queue.
        self.instances.set_instance_state(&name, InstanceState::Provisioning);
        let orchestrator = self.clone();
        self.ops_pool.submit(async move {
            orchestrator.launch_slave2(name).await;
        });
    }

    /// Phase 2, one non-blocking probe cycle: monitor, then start if
    /// masters are up, otherwise re-enqueue self. No single worker is
    /// ever pinned to one slow slave (spec.md §4.6.3).
    pub(super) async fn launch_slave2(self: std::sync::Arc<Self>, name: String) {
        let current = self.instances.get(&name).map(|i| i.state);
        if current != Some(InstanceState::SnitchReady) {
            let (status, err) = self.get_status(&name).await;
            self.instances.set_instance_state(&name, status);
            if status == InstanceState::Broken {
                self.instances.record_failure(&name, err.as_deref().unwrap_or("unknown failure"));
                return;
            }
        }

        if self.instances.get(&name).map(|i| i.state) == Some(InstanceState::SnitchReady)
            && self.instances.masters_up()
        {
            self.start_slave(&name).await;
            return;
        }

        let orchestrator = self.clone();
        self.ops_pool.submit(async move {
            orchestrator.launch_slave2(name).await;
        });
    }

    /// Preconditions on `masters_up()`. Atomically advances the slave to
    /// HADOOP_READY and increments `live_slaves` (I5); crossing
    /// `needed_slaves` promotes the cluster to READY (I1).
    pub(super) async fn start_slave(&self, name: &str) {
        debug_assert!(self.instances.masters_up());
        if let Err(err) = self.agent.checked_post(name, "/start", Default::default()).await {
            tracing::error!(name, error = %err, "slave failed to start");
            self.instances.record_failure(name, &err.to_string());
            return;
        }
        self.instances.promote_slave_to_hadoop_ready(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::test_support::test_orchestrator;
    use hcc_agent::IaasStatus;
    use hcc_core::Config;

    #[tokio::test]
    async fn add_slaves_before_launching_returns_false() {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        assert!(!orchestrator.add_slaves(2));
    }

    #[tokio::test]
    async fn add_slaves_allocates_and_spawns_each_name() {
        let (orchestrator, api, _sub) = test_orchestrator(Config::for_test());
        orchestrator.instances().set_cluster_state(ClusterState::Launching);
        assert!(orchestrator.add_slaves(2));
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let calls = api.insert_calls();
        let mut names: Vec<_> = calls.iter().map(|c| c.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["hadoop-slave-000".to_string(), "hadoop-slave-001".to_string()]);
    }

    // Scenario 1/4 happy path: slave progresses all the way to HADOOP_READY
    // once masters are up.
    #[tokio::test]
    async fn a_slave_reaches_hadoop_ready_once_masters_are_up_and_it_is_snitch_ready() {
        let (orchestrator, api, _sub) = test_orchestrator(Config::for_test());
        orchestrator.instances().set_cluster_state(ClusterState::Launching);
        orchestrator.instances().ensure_instance("hadoop-namenode", Role::NameNode);
        orchestrator.instances().ensure_instance("hadoop-jobtracker", Role::JobTracker);
        orchestrator.instances().set_instance_state("hadoop-namenode", InstanceState::HadoopReady);
        orchestrator.instances().set_instance_state("hadoop-jobtracker", InstanceState::HadoopReady);

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
        api.set_status("hadoop-slave-000", IaasStatus::Running);
        orchestrator.instances().ensure_instance("hadoop-slave-000", Role::Slave);

        // No real snitch server here, so get_status sees "agent
        // unreachable" and stays at RUNNING; drive SNITCH_READY directly
        // to exercise start_slave's own preconditions/side effects.
        orchestrator.instances().set_instance_state("hadoop-slave-000", InstanceState::SnitchReady);
        orchestrator.clone().launch_slave2("hadoop-slave-000".to_string()).await;

        assert_eq!(
            orchestrator.instances().get("hadoop-slave-000").unwrap().state,
            InstanceState::HadoopReady
        );
        assert_eq!(orchestrator.instances().live_slaves(), 1);
    }

    #[tokio::test]
    async fn launch_slave1_drops_the_slave_silently_on_insert_failure() {
        let (orchestrator, api, _sub) = test_orchestrator(Config::for_test());
        api.fail_insert("hadoop-slave-000", "quota");
        orchestrator.instances().ensure_instance("hadoop-slave-000", Role::Slave);
        orchestrator.clone().launch_slave1("hadoop-slave-000".to_string()).await;
        // Still NON_EXISTENT: never promoted, never marked BROKEN either.
        assert_eq!(
            orchestrator.instances().get("hadoop-slave-000").unwrap().state,
            InstanceState::NonExistent
        );
    }
}
