// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! The role an `Instance` plays in the cluster.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    NameNode,
    JobTracker,
    Slave,
    Coordinator,
}

impl Role {
    /// Object-storage scope this role's VM service account needs.
    /// Only the NameNode handles HDFS<->bucket transfers, so only it gets
    /// read-write; everyone else is read-only.
    pub fn is_rw_storage(&self) -> bool {
        matches!(self, Role::NameNode)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::NameNode => "namenode",
            Role::JobTracker => "jobtracker",
            Role::Slave => "slave",
            Role::Coordinator => "coordinator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
