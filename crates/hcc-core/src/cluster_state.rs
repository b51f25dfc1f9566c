// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Cluster-wide lifecycle state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClusterState {
    /// No instances are around.
    Down,
    /// In the process of being destroyed; becomes DOWN when the registry empties.
    Doomed,
    /// Terminal: a master failed spawn or failed to reach SNITCH_READY.
    Broken,
    /// Staging the Hadoop tarball, conf, and tools jar to the bucket.
    Downloading,
    /// Instances exist, but the cluster isn't ready for jobs yet.
    Launching,
    /// Both masters are HADOOP_READY and live_slaves >= NeededSlaves.
    Ready,
}

impl ClusterState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterState::Down => "DOWN",
            ClusterState::Doomed => "DOOMED",
            ClusterState::Broken => "BROKEN",
            ClusterState::Downloading => "DOWNLOADING",
            ClusterState::Launching => "LAUNCHING",
            ClusterState::Ready => "READY",
        }
    }
}

impl std::fmt::Display for ClusterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launching_compares_below_ready() {
        // add_slaves() gates on `cluster_state >= Launching`.
        assert!(ClusterState::Launching < ClusterState::Ready);
        assert!(ClusterState::Downloading < ClusterState::Launching);
    }

    #[test]
    fn display_round_trips_names() {
        assert_eq!(ClusterState::Ready.to_string(), "READY");
        assert_eq!(ClusterState::Downloading.to_string(), "DOWNLOADING");
    }
}
