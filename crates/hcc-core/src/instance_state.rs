// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Per-instance lifecycle state.
//!
//! Declaration order is the comparison key: `monitor_instance` and
//! `get_status` rely on `>=` over this ordering as a readiness predicate,
//! and the ordering is *not* a successor relation — transitions can skip
//! ahead (RUNNING -> SNITCH_READY) or move backward (RUNNING -> BROKEN).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InstanceState {
    /// Snitch reported a problem, or the IaaS reported a terminal failure.
    Broken,
    /// Delete in flight.
    Doomed,
    /// No `InstanceAPI.Get` probe has resolved this instance yet.
    NonExistent,
    Provisioning,
    Staging,
    Running,
    /// The in-VM agent answered `/status` with `READY`.
    SnitchReady,
    /// Coordinator-attested: the role-appropriate Hadoop daemon was
    /// started by the coordinator's own action, never inferred by probing.
    HadoopReady,
}

impl InstanceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceState::Broken => "BROKEN",
            InstanceState::Doomed => "DOOMED",
            InstanceState::NonExistent => "NON_EXISTENT",
            InstanceState::Provisioning => "PROVISIONING",
            InstanceState::Staging => "STAGING",
            InstanceState::Running => "RUNNING",
            InstanceState::SnitchReady => "SNITCH_READY",
            InstanceState::HadoopReady => "HADOOP_READY",
        }
    }

    /// Worst-state-first ordering, used by `/status/cluster` to group
    /// instances the way an operator wants to read them: broken things up
    /// top, healthy things at the bottom.
    pub fn display_order() -> &'static [InstanceState] {
        &[
            InstanceState::HadoopReady,
            InstanceState::SnitchReady,
            InstanceState::Running,
            InstanceState::Staging,
            InstanceState::Provisioning,
            InstanceState::NonExistent,
            InstanceState::Doomed,
            InstanceState::Broken,
        ]
    }
}

impl std::fmt::Display for InstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_spec_numeric_key() {
        assert!(InstanceState::Broken < InstanceState::Doomed);
        assert!(InstanceState::Doomed < InstanceState::NonExistent);
        assert!(InstanceState::NonExistent < InstanceState::Provisioning);
        assert!(InstanceState::Provisioning < InstanceState::Staging);
        assert!(InstanceState::Staging < InstanceState::Running);
        assert!(InstanceState::Running < InstanceState::SnitchReady);
        assert!(InstanceState::SnitchReady < InstanceState::HadoopReady);
    }

    #[test]
    fn running_can_skip_straight_to_snitch_ready() {
        // Not a successor relation: RUNNING -> SNITCH_READY skips nothing
        // in code, it's just two comparable values.
        assert!(InstanceState::Running < InstanceState::SnitchReady);
    }

    #[test]
    fn display_matches_original_state_strings() {
        assert_eq!(InstanceState::HadoopReady.to_string(), "HADOOP_READY");
        assert_eq!(InstanceState::NonExistent.to_string(), "NON_EXISTENT");
    }
}
