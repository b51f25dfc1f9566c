// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! The two registries the coordinator owns: cluster/instance state
//! (spec.md §4.2) and long-running operations (spec.md §4.5).

pub mod instance_registry;
pub mod operation_registry;

pub use instance_registry::{InstanceRegistry, RegistrySnapshot};
pub use operation_registry::OperationRegistry;
