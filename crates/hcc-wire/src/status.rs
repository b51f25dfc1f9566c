// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Reply shape for `POST /status/cluster` and `POST /status/op/<name>`.
//!
//! Mirrors `hadoop_cluster.py:status` and `util.py:MultiDict`: instances are
//! grouped by state name (worst-state-first when rendered by a CLI), and
//! `summary` is a human string like `"3 HADOOP_READY, 1 PROVISIONING"`.

use std::collections::BTreeMap;

use hcc_core::{ClusterState, Instance, InstanceState, Operation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSummary {
    pub name: String,
    pub role: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl From<&Instance> for InstanceSummary {
    fn from(i: &Instance) -> Self {
        Self {
            name: i.name.clone(),
            role: i.role.to_string(),
            state: i.state.to_string(),
            last_error: i.last_error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSummary {
    pub operation: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst: Option<String>,
}

impl From<&Operation> for OperationSummary {
    fn from(op: &Operation) -> Self {
        Self {
            operation: op.operation.to_string(),
            state: op.state.clone(),
            src: op.src.clone(),
            dst: op.dst.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterStatusResponse {
    pub state: String,
    /// Human summary, e.g. `"3 HADOOP_READY, 1 PROVISIONING"`.
    pub summary: String,
    /// Instance names grouped by state name.
    pub instances: BTreeMap<String, Vec<String>>,
    pub errors: Vec<String>,
    /// Seconds since the last `/hadoop/status_update` push.
    pub hadoop_staleness: u64,
    /// Opaque telemetry blob from `HadoopMonitor`, passed through verbatim.
    pub hadoop_data: serde_json::Value,
    pub operations: BTreeMap<String, OperationSummary>,
}

impl ClusterStatusResponse {
    pub fn build(
        cluster_state: ClusterState,
        instances: &[Instance],
        errors: Vec<String>,
        hadoop_staleness: u64,
        hadoop_data: serde_json::Value,
        operations: &[Operation],
    ) -> Self {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for state in InstanceState::display_order() {
            let mut names: Vec<String> = instances
                .iter()
                .filter(|i| i.state == *state)
                .map(|i| i.name.clone())
                .collect();
            if !names.is_empty() {
                names.sort();
                grouped.insert(state.to_string(), names);
            }
        }

        let summary = InstanceState::display_order()
            .iter()
            .filter_map(|state| grouped.get(&state.to_string()).map(|names| format!("{} {}", names.len(), state)))
            .collect::<Vec<_>>()
            .join(", ");

        let operations = operations
            .iter()
            .map(|op| (op.operation.to_string(), OperationSummary::from(op)))
            .collect();

        Self {
            state: cluster_state.to_string(),
            summary,
            instances: grouped,
            errors,
            hadoop_staleness,
            hadoop_data,
            operations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcc_core::{Operation, OperationId, Role};

    #[test]
    fn groups_instances_by_state_and_summarizes() {
        let mut nn = Instance::new("hadoop-namenode", Role::NameNode);
        nn.state = InstanceState::HadoopReady;
        let mut jt = Instance::new("hadoop-jobtracker", Role::JobTracker);
        jt.state = InstanceState::HadoopReady;
        let mut slave = Instance::new("hadoop-slave-000", Role::Slave);
        slave.state = InstanceState::Provisioning;

        let resp = ClusterStatusResponse::build(
            ClusterState::Launching,
            &[nn, jt, slave],
            vec![],
            3,
            serde_json::json!({}),
            &[],
        );

        assert_eq!(resp.instances.get("HADOOP_READY").unwrap().len(), 2);
        assert_eq!(resp.instances.get("PROVISIONING").unwrap(), &vec!["hadoop-slave-000".to_string()]);
        assert_eq!(resp.summary, "2 HADOOP_READY, 1 PROVISIONING");
    }

    #[test]
    fn operations_are_keyed_by_operation_id() {
        let op = Operation::requested(OperationId::new(0), "/a".to_string(), "/b".to_string());
        let resp = ClusterStatusResponse::build(ClusterState::Ready, &[], vec![], 0, serde_json::json!({}), &[op]);
        assert_eq!(resp.operations.get("xfer_0").unwrap().state, "Requested");
    }
}
