// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Cluster launch protocol (spec.md §4.6.1).

use hcc_core::config::{HADOOP_DOWNLOAD_URL, JOBTRACKER_NAME, NAMENODE_NAME};
use hcc_core::{InstanceState, Role};

use super::Orchestrator;

impl Orchestrator {
    /// `launch(n)`: I4 — a second call while `cluster_state != DOWN`
    /// returns `false` without side effect. On success, transitions to
    /// DOWNLOADING and enqueues `launch_sequence(n)` on the ops pool.
    pub fn launch(self: &std::sync::Arc<Self>, num_slaves: u32) -> bool {
        if !self.instances.try_begin_launch() {
            return false;
        }
        let orchestrator = self.clone();
        self.ops_pool.submit(async move {
            orchestrator.launch_sequence(num_slaves).await;
        });
        true
    }

    /// Mirror the Hadoop binary and conf tree into the cluster's bucket,
    /// then hand off to the masters/slaves. Steps 1-3 are unguarded
    /// (spec.md §4.6.1 / Open Question Q1): failures are logged but don't
    /// set the cluster BROKEN — a downstream snitch failure catches a
    /// missing artifact at step-5 monitoring instead.
    pub(super) async fn launch_sequence(self: std::sync::Arc<Self>, num_slaves: u32) {
        let urls = self.config.bucket_urls();

        if !self.subprocess.call(&["wget", HADOOP_DOWNLOAD_URL]).await {
            tracing::warn!("failed to fetch the Hadoop tarball from upstream");
        }
        let local_tarball = format!("hadoop-{}.tar.gz", hcc_core::config::HADOOP_VERSION);
        if !self.subprocess.call(&["gsutil", "cp", &local_tarball, &urls.hadoop_tarball]).await {
            tracing::warn!("failed to stage the Hadoop tarball to the bucket");
        }

        if !self.subprocess.call_shell("tar czf hadoop-conf.tgz hadoop/conf/*").await {
            tracing::warn!("failed to tar the Hadoop conf tree");
        }
        if !self.subprocess.call(&["gsutil", "cp", "hadoop-conf.tgz", &urls.hadoop_conf]).await {
            tracing::warn!("failed to stage the Hadoop conf tarball to the bucket");
        }
        let _ = self.subprocess.call(&["rm", "-f", "hadoop-conf.tgz"]).await;

        if !self.subprocess.call(&["gsutil", "cp", "hadoop-tools.jar", &urls.tools_jar]).await {
            tracing::warn!("failed to stage hadoop-tools.jar to the bucket");
        }

        self.instances.set_cluster_state(hcc_core::ClusterState::Launching);
        self.instances.ensure_instance(NAMENODE_NAME, Role::NameNode);
        self.instances.ensure_instance(JOBTRACKER_NAME, Role::JobTracker);
        self.instances.set_instance_state(NAMENODE_NAME, InstanceState::NonExistent);
        self.instances.set_instance_state(JOBTRACKER_NAME, InstanceState::NonExistent);

        let nn_orchestrator = self.clone();
        self.spawn_pool.submit(async move {
            nn_orchestrator.launch_nn().await;
        });
        let jt_orchestrator = self.clone();
        self.spawn_pool.submit(async move {
            jt_orchestrator.launch_jt().await;
        });

        self.add_slaves(num_slaves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::test_support::test_orchestrator;
    use hcc_core::{ClusterState, Config};

    #[tokio::test]
    async fn launch_transitions_to_downloading_immediately() {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        assert!(orchestrator.launch(3));
        assert_eq!(orchestrator.instances().cluster_state(), ClusterState::Downloading);
    }

    // I4 / P3: two concurrent launches, exactly one returns true.
    #[tokio::test]
    async fn a_second_concurrent_launch_returns_false() {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        assert!(orchestrator.launch(3));
        assert!(!orchestrator.launch(3));
    }

    #[tokio::test]
    async fn unguarded_staging_failures_do_not_block_progress_to_launching() {
        let (orchestrator, _api, sub) = test_orchestrator(Config::for_test());
        sub.fail_on("gsutil");
        orchestrator.launch(1);
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert_eq!(orchestrator.instances().cluster_state(), ClusterState::Launching);
    }
}
