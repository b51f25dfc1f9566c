// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! The `Instance` entity tracked by the `InstanceRegistry`.

use crate::{InstanceState, Role};
use serde::{Deserialize, Serialize};

/// A single VM the coordinator knows about, keyed by `name` (its IaaS
/// instance name, e.g. `hadoop-namenode` or `hadoop-slave-003`).
///
/// Created by `InstanceRegistry::set_instance_state(name, NonExistent)`
/// before any IaaS call, and destroyed by `InstanceRegistry::remove(name)`
/// after a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub role: Role,
    pub state: InstanceState,
    /// Set by `instance_fail`; not necessarily BROKEN (snitches may report
    /// transient problems without being terminal).
    pub last_error: Option<String>,
}

impl Instance {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self { name: name.into(), role, state: InstanceState::NonExistent, last_error: None }
    }
}
