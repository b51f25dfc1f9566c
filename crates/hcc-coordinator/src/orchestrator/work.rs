// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Work routing: transfers, job submission, HDFS cleanup (spec.md
//! §4.6.5).

use hcc_core::{ClusterState, Operation};
use hcc_wire::FormMap;

use super::{Orchestrator, OrchestratorError};

impl Orchestrator {
    /// Requires READY. Allocates an operation, posts `/transfer` to the
    /// NameNode, and returns the op record immediately — the NameNode
    /// snitch later pushes state updates to `/instance/op_status`.
    pub async fn transfer(&self, src: &str, dst: &str) -> Option<Operation> {
        if self.instances.cluster_state() != ClusterState::Ready {
            return None;
        }
        let op = self.operations.new_op(src.to_string(), dst.to_string());

        let mut data = FormMap::new();
        data.insert("src".to_string(), src.to_string());
        data.insert("dst".to_string(), dst.to_string());
        data.insert("operation".to_string(), op.operation.to_string());
        if let Err(err) = self
            .agent
            .checked_post(hcc_core::config::NAMENODE_NAME, "/transfer", data)
            .await
        {
            tracing::error!(error = %err, "namenode rejected transfer request");
        }

        self.operations.get(op.operation)
    }

    /// Requires READY. Fire-and-forget at this layer: the job's fate is
    /// only visible through `HadoopMonitor` telemetry.
    pub async fn submit_job(&self, jar: &str, args: &[String]) -> Result<bool, OrchestratorError> {
        if self.instances.cluster_state() != ClusterState::Ready {
            return Ok(false);
        }
        let mut data = FormMap::new();
        data.insert("jar".to_string(), jar.to_string());
        data.insert("args".to_string(), serde_json::to_string(args).unwrap_or_else(|_| "[]".to_string()));
        self.agent.checked_post(hcc_core::config::JOBTRACKER_NAME, "/job/start", data).await?;
        Ok(true)
    }

    /// Always returns success at the coordinator: the remote subprocess
    /// result is not echoed back (spec.md §4.6.5).
    pub async fn clean_hdfs(&self, path: &str) -> bool {
        let mut data = FormMap::new();
        data.insert("path".to_string(), path.to_string());
        if let Err(err) = self.agent.checked_post(hcc_core::config::NAMENODE_NAME, "/clean", data).await {
            tracing::warn!(error = %err, "namenode /clean call failed");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::test_support::test_orchestrator;
    use hcc_core::Config;

    #[tokio::test]
    async fn transfer_requires_ready_cluster() {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        assert!(orchestrator.transfer("/hdfs/x", "gs://b/x").await.is_none());
    }

    #[tokio::test]
    async fn transfer_while_ready_allocates_an_operation() {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        orchestrator.instances().set_cluster_state(ClusterState::Ready);
        let op = orchestrator.transfer("/hdfs/x", "gs://b/x").await.unwrap();
        assert_eq!(op.operation.to_string(), "xfer_0");
        assert_eq!(op.state, "Requested");
    }

    #[tokio::test]
    async fn submit_job_fails_fast_when_not_ready() {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        assert!(!orchestrator.submit_job("gs://b/tools.jar", &["teragen".to_string()]).await.unwrap());
    }

    #[tokio::test]
    async fn clean_hdfs_always_reports_success() {
        let (orchestrator, _api, _sub) = test_orchestrator(Config::for_test());
        assert!(orchestrator.clean_hdfs("/job_input").await);
    }
}
