// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `InstanceRegistry` (spec.md §4.2): a single mutex + condition variable
//! guarding `cluster_state`, the per-instance state map, `live_slaves`, and
//! `first_free_slave`. The condvar is a `tokio::sync::Notify` standing in
//! for the source's `threading.Condition` (Design Note "Condvar-based
//! master gate").

use std::collections::HashMap;

use hcc_core::config::{JOBTRACKER_NAME, NAMENODE_NAME, SLAVE_PREFIX};
use hcc_core::{ClusterState, Instance, InstanceState, Role};
use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::info;

struct RegistryState {
    cluster_state: ClusterState,
    instances: HashMap<String, Instance>,
    live_slaves: usize,
    first_free_slave: u32,
    /// Cluster-level error log surfaced by `/status/cluster` (spec.md
    /// §4.6.4 / §7): snitch-reported failures that aren't necessarily
    /// fatal to the instance they came from.
    errors: Vec<String>,
}

/// A point-in-time read of everything `/status/cluster` needs.
pub struct RegistrySnapshot {
    pub cluster_state: ClusterState,
    pub instances: Vec<Instance>,
    pub errors: Vec<String>,
}

pub struct InstanceRegistry {
    state: Mutex<RegistryState>,
    notify: Notify,
    needed_slaves: usize,
}

impl InstanceRegistry {
    pub fn new(needed_slaves: usize) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                cluster_state: ClusterState::Down,
                instances: HashMap::new(),
                live_slaves: 0,
                first_free_slave: 0,
                errors: Vec::new(),
            }),
            notify: Notify::new(),
            needed_slaves,
        }
    }

    /// I4: only one concurrent `launch` succeeds. Atomically checks
    /// `cluster_state == DOWN` and, if so, transitions to DOWNLOADING in
    /// the same critical section so two racing `launch` calls can't both
    /// observe DOWN.
    pub fn try_begin_launch(&self) -> bool {
        let began = {
            let mut state = self.state.lock();
            if state.cluster_state == ClusterState::Down {
                state.cluster_state = ClusterState::Downloading;
                true
            } else {
                false
            }
        };
        if began {
            info!(to = %ClusterState::Downloading, "cluster state transition");
            self.notify.notify_waiters();
        }
        began
    }

    /// I6: logs only when the new state differs from the old.
    pub fn set_cluster_state(&self, new: ClusterState) {
        let changed = {
            let mut state = self.state.lock();
            let old = state.cluster_state;
            if old == new {
                false
            } else {
                state.cluster_state = new;
                true
            }
        };
        if changed {
            info!(to = %new, "cluster state transition");
            self.notify.notify_waiters();
        }
    }

    pub fn cluster_state(&self) -> ClusterState {
        self.state.lock().cluster_state
    }

    /// Create the instance entry if it doesn't exist yet, in `NON_EXISTENT`
    /// — the precondition every spawn path relies on ("created by
    /// `update_state(name, NON_EXISTENT)` before any IaaS call").
    pub fn ensure_instance(&self, name: &str, role: Role) {
        let mut state = self.state.lock();
        state.instances.entry(name.to_string()).or_insert_with(|| Instance::new(name, role));
    }

    /// Does not enforce ordering (spec.md §4.2): transitions may go
    /// backward, e.g. RUNNING -> BROKEN.
    pub fn set_instance_state(&self, name: &str, new: InstanceState) {
        let changed = {
            let mut state = self.state.lock();
            match state.instances.get_mut(name) {
                Some(instance) => {
                    let old = instance.state;
                    if old == new {
                        false
                    } else {
                        instance.state = new;
                        true
                    }
                }
                None => false,
            }
        };
        if changed {
            info!(name, to = %new, "instance state transition");
            self.notify.notify_waiters();
        }
    }

    /// An instance reported a problem that isn't necessarily fatal
    /// (spec.md §7: "does not force the instance to BROKEN by itself").
    pub fn record_failure(&self, name: &str, reason: &str) {
        let msg = format!("{name}: {reason}");
        {
            let mut state = self.state.lock();
            if let Some(instance) = state.instances.get_mut(name) {
                instance.last_error = Some(reason.to_string());
            }
            state.errors.push(msg);
        }
        tracing::warn!(name, reason, "instance reported failure");
    }

    /// Block until `instance[name] >= state`. Satisfied instantly if
    /// already above.
    pub async fn wait_until(&self, name: &str, min_state: InstanceState) {
        loop {
            let notified = self.notify.notified();
            if self.at_least(name, min_state) {
                return;
            }
            notified.await;
        }
    }

    fn at_least(&self, name: &str, min_state: InstanceState) -> bool {
        self.state.lock().instances.get(name).is_some_and(|i| i.state >= min_state)
    }

    /// Snapshot read of both master states (spec.md §4.2).
    pub fn masters_up(&self) -> bool {
        let state = self.state.lock();
        let nn = state.instances.get(NAMENODE_NAME).map(|i| i.state) == Some(InstanceState::HadoopReady);
        let jt = state.instances.get(JOBTRACKER_NAME).map(|i| i.state) == Some(InstanceState::HadoopReady);
        nn && jt
    }

    /// Atomically returns `["hadoop-slave-NNN", ...]` and advances the
    /// counter (I3: linearizable, disjoint across concurrent callers).
    pub fn allocate_slave_names(&self, k: usize) -> Vec<String> {
        let mut state = self.state.lock();
        let start = state.first_free_slave;
        state.first_free_slave = start + k as u32;
        (start..start + k as u32).map(|n| format!("{SLAVE_PREFIX}{n:03}")).collect()
    }

    /// I5: incremented exactly once per slave, under the registry lock, at
    /// the SNITCH_READY -> HADOOP_READY transition. If this pushes
    /// `live_slaves` over `needed_slaves`, the cluster becomes READY.
    pub fn promote_slave_to_hadoop_ready(&self, name: &str) {
        let became_ready = {
            let mut state = self.state.lock();
            if let Some(instance) = state.instances.get_mut(name) {
                let old = instance.state;
                if old != InstanceState::HadoopReady {
                    instance.state = InstanceState::HadoopReady;
                    info!(name, to = %InstanceState::HadoopReady, "instance state transition");
                }
            }
            state.live_slaves += 1;
            let ready = state.live_slaves >= self.needed_slaves && state.cluster_state != ClusterState::Ready;
            if ready {
                state.cluster_state = ClusterState::Ready;
            }
            ready
        };
        self.notify.notify_waiters();
        if became_ready {
            info!(to = %ClusterState::Ready, "cluster state transition");
        }
    }

    pub fn live_slaves(&self) -> usize {
        self.state.lock().live_slaves
    }

    /// Deletes the entry; if the map empties and the cluster was DOOMED,
    /// transitions it to DOWN.
    pub fn remove(&self, name: &str) {
        let became_down = {
            let mut state = self.state.lock();
            state.instances.remove(name);
            if state.instances.is_empty() && state.cluster_state == ClusterState::Doomed {
                state.cluster_state = ClusterState::Down;
                true
            } else {
                false
            }
        };
        self.notify.notify_waiters();
        if became_down {
            info!(to = %ClusterState::Down, "cluster state transition");
        }
    }

    pub fn get(&self, name: &str) -> Option<Instance> {
        self.state.lock().instances.get(name).cloned()
    }

    pub fn instance_names(&self) -> Vec<String> {
        self.state.lock().instances.keys().cloned().collect()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let state = self.state.lock();
        RegistrySnapshot {
            cluster_state: state.cluster_state,
            instances: state.instances.values().cloned().collect(),
            errors: state.errors.clone(),
        }
    }
}

#[cfg(test)]
#[path = "instance_registry_tests.rs"]
mod tests;
