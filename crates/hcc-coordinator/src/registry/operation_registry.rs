// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `OperationRegistry` (spec.md §4.5): id -> `{state, params}` for
//! long-running in-cluster operations (currently only HDFS<->bucket
//! transfers). IDs are a plain monotonic counter and are never recycled or
//! garbage-collected within a coordinator lifetime.

use std::collections::HashMap;

use hcc_core::{Operation, OperationId};
use parking_lot::Mutex;
use tracing::info;

struct RegistryState {
    operations: HashMap<OperationId, Operation>,
    counter: u64,
}

pub struct OperationRegistry {
    state: Mutex<RegistryState>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self { state: Mutex::new(RegistryState { operations: HashMap::new(), counter: 0 }) }
    }

    /// `new_op()`: returns `xfer_<counter++>` with initial state
    /// `"Requested"` (spec.md §4.5).
    pub fn new_op(&self, src: String, dst: String) -> Operation {
        let mut state = self.state.lock();
        let id = OperationId::new(state.counter);
        state.counter += 1;
        let op = Operation::requested(id, src, dst);
        state.operations.insert(id, op.clone());
        info!(operation = %id, "operation requested");
        op
    }

    /// `set_state(id, s)`: updates and logs, even if the state string is
    /// unchanged (every snitch push is meaningful, unlike instance/cluster
    /// state transitions which only log on *change* — the source logs
    /// `op_status` unconditionally).
    pub fn set_state(&self, id: OperationId, new_state: impl Into<String>) {
        let new_state = new_state.into();
        let mut state = self.state.lock();
        if let Some(op) = state.operations.get_mut(&id) {
            op.state = new_state.clone();
        }
        info!(operation = %id, state = %new_state, "operation state update");
    }

    /// `get(id)`: returns the full record.
    pub fn get(&self, id: OperationId) -> Option<Operation> {
        self.state.lock().operations.get(&id).cloned()
    }

    pub fn all(&self) -> Vec<Operation> {
        self.state.lock().operations.values().cloned().collect()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_never_recycled() {
        let reg = OperationRegistry::new();
        let a = reg.new_op("/a".to_string(), "gs://b/a".to_string());
        let b = reg.new_op("/b".to_string(), "gs://b/b".to_string());
        assert_eq!(a.operation, OperationId::new(0));
        assert_eq!(b.operation, OperationId::new(1));
    }

    #[test]
    fn new_op_starts_requested() {
        let reg = OperationRegistry::new();
        let op = reg.new_op("/a".to_string(), "gs://b/a".to_string());
        assert_eq!(op.state, "Requested");
    }

    #[test]
    fn set_state_is_visible_through_get() {
        let reg = OperationRegistry::new();
        let op = reg.new_op("/a".to_string(), "gs://b/a".to_string());
        reg.set_state(op.operation, "Transferring");
        assert_eq!(reg.get(op.operation).unwrap().state, "Transferring");
    }

    // R2: once "Done", stays "Done" across arbitrary subsequent reads.
    #[test]
    fn done_state_is_stable_across_reads() {
        let reg = OperationRegistry::new();
        let op = reg.new_op("/a".to_string(), "gs://b/a".to_string());
        reg.set_state(op.operation, "Done");
        assert_eq!(reg.get(op.operation).unwrap().state, "Done");
        assert_eq!(reg.get(op.operation).unwrap().state, "Done");
    }

    #[test]
    fn get_on_unknown_id_is_none() {
        let reg = OperationRegistry::new();
        assert!(reg.get(OperationId::new(999)).is_none());
    }
}
