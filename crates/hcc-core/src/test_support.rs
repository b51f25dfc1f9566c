// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Instance, InstanceState, Role};

/// Proptest strategies for core state machine types.
#[cfg(feature = "proptest")]
pub mod strategies {
    use crate::{ClusterState, InstanceState, Role};
    use proptest::prelude::*;

    pub fn arb_instance_state() -> impl Strategy<Value = InstanceState> {
        prop_oneof![
            Just(InstanceState::Broken),
            Just(InstanceState::Doomed),
            Just(InstanceState::NonExistent),
            Just(InstanceState::Provisioning),
            Just(InstanceState::Staging),
            Just(InstanceState::Running),
            Just(InstanceState::SnitchReady),
            Just(InstanceState::HadoopReady),
        ]
    }

    pub fn arb_cluster_state() -> impl Strategy<Value = ClusterState> {
        prop_oneof![
            Just(ClusterState::Down),
            Just(ClusterState::Doomed),
            Just(ClusterState::Broken),
            Just(ClusterState::Downloading),
            Just(ClusterState::Launching),
            Just(ClusterState::Ready),
        ]
    }

    pub fn arb_role() -> impl Strategy<Value = Role> {
        prop_oneof![
            Just(Role::NameNode),
            Just(Role::JobTracker),
            Just(Role::Slave),
            Just(Role::Coordinator),
        ]
    }

    /// A slave name matching the `hadoop-slave-<NNN>` allocation scheme.
    pub fn arb_slave_name() -> impl Strategy<Value = String> {
        (0u32..1000).prop_map(|n| format!("hadoop-slave-{n:03}"))
    }
}

pub fn namenode() -> Instance {
    Instance::new("hadoop-namenode", Role::NameNode)
}

pub fn jobtracker() -> Instance {
    Instance::new("hadoop-jobtracker", Role::JobTracker)
}

pub fn slave(name: impl Into<String>) -> Instance {
    Instance::new(name, Role::Slave)
}

pub fn instance_in_state(name: impl Into<String>, role: Role, state: InstanceState) -> Instance {
    let mut instance = Instance::new(name, role);
    instance.state = state;
    instance
}
