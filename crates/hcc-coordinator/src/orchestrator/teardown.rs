// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Teardown (spec.md §4.6.6). Unconditional: even an already-BROKEN
//! cluster is driven through DOOMED -> DOWN (Open Question Q3, preserved).

use hcc_core::ClusterState;

use super::Orchestrator;

impl Orchestrator {
    pub fn teardown(self: &std::sync::Arc<Self>) {
        self.instances.set_cluster_state(ClusterState::Doomed);
        for name in self.instances.instance_names() {
            let orchestrator = self.clone();
            self.ops_pool.submit(async move {
                orchestrator.nix(&name).await;
            });
        }
    }

    /// Delete the instance (blocking on the IaaS's own confirmation), then
    /// remove it from the registry; an emptied registry while DOOMED
    /// transitions the cluster to DOWN (handled by `InstanceRegistry::remove`).
    pub(super) async fn nix(&self, name: &str) {
        if let Err(err) = self.vm_factory.api().delete(name, true).await {
            tracing::warn!(name, error = %err, "failed to delete instance");
        }
        self.instances.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::test_support::test_orchestrator;
    use hcc_core::{Config, Role};

    #[tokio::test]
    async fn teardown_deletes_every_instance_and_returns_to_down() {
        let (orchestrator, api, _sub) = test_orchestrator(Config::for_test());
        for name in ["hadoop-namenode", "hadoop-jobtracker", "hadoop-slave-000"] {
            api.insert(hcc_agent::InsertRequest {
                name: name.to_string(),
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
            orchestrator.instances().ensure_instance(name, Role::Slave);
        }

        orchestrator.teardown();
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        assert_eq!(orchestrator.instances().cluster_state(), ClusterState::Down);
        assert!(orchestrator.instances().instance_names().is_empty());
        assert_eq!(api.deleted_names().len(), 3);
    }

    // Q3: tearing down an already-BROKEN cluster still reaches DOWN.
    #[tokio::test]
    async fn teardown_from_broken_still_reaches_down() {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        orchestrator.instances().set_cluster_state(ClusterState::Broken);
        orchestrator.instances().ensure_instance("hadoop-namenode", Role::NameNode);
        orchestrator.teardown();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(orchestrator.instances().cluster_state(), ClusterState::Down);
    }
}
