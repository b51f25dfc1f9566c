// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `InstanceAPI`: the opaque IaaS compute interface (spec.md §1 scope note
//! (a)). Deliberately out of scope for this system's core logic — modeled
//! as a trait so the real backend (a compute API client) and a
//! `FakeInstanceApi` (for tests) are interchangeable, mirroring the
//! teacher's `AgentAdapter` trait shape.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Read-only or read-write attachment of a persistent disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiskMode {
    ReadOnly,
    ReadWrite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskAttachment {
    pub disk_name: String,
    pub mode: DiskMode,
}

/// Whether the VM gets a routable external IP in addition to its internal
/// one. Masters always get one; slaves only when `Config::external_ips`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub external_ip: bool,
}

/// Everything needed to create one VM. Built by [`crate::vm_factory::VmFactory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRequest {
    pub name: String,
    pub zone: String,
    pub machine_type: String,
    pub image: String,
    pub service_account_scopes: Vec<String>,
    pub disks: Vec<DiskAttachment>,
    pub network: NetworkConfig,
    /// Instance metadata key/value pairs: `gs_bucket`, the snitch tarball
    /// URL, and the inlined startup-script / bootstrap.sh / snitch.py
    /// content.
    pub metadata: BTreeMap<String, String>,
}

/// Raw reply from `Insert`. Success is "no `error` field" (spec.md §4.4),
/// not a separate status code — matches the original's `gcelib` response
/// shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsertResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InsertResponse {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self { error: Some(msg.into()) }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// The IaaS-reported lifecycle status of a VM, as returned by `Get`. Maps
/// onto `InstanceState` by `get_status` (spec.md §4.6.4), not used
/// directly as `InstanceState` itself since the IaaS vocabulary and the
/// coordinator's vocabulary only partially overlap (e.g. `TERMINATED` has
/// no coordinator equivalent and is just another BROKEN reason).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IaasStatus {
    Provisioning,
    Staging,
    Running,
    Stopping,
    Terminated,
}

impl IaasStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IaasStatus::Provisioning => "PROVISIONING",
            IaasStatus::Staging => "STAGING",
            IaasStatus::Running => "RUNNING",
            IaasStatus::Stopping => "STOPPING",
            IaasStatus::Terminated => "TERMINATED",
        }
    }
}

impl std::fmt::Display for IaasStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What `Get` returns for an existing instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub name: String,
    pub status: IaasStatus,
    /// `networkInterfaces[0].accessConfigs[0].natIP`, if the instance has
    /// an external IP configured.
    pub nat_ip: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InstanceApiError {
    #[error("IaaS call failed: {0}")]
    Backend(String),
}

/// `InstanceAPI`: `Insert`, `Delete`, `Get`, `List` — see spec.md §1 scope
/// note (a). `Get` on a name the IaaS has never heard of returns `Ok(None)`
/// (the original raises `ValueError`, caught by callers to mean
/// `NON_EXISTENT`).
#[async_trait]
pub trait InstanceApi: Send + Sync + 'static {
    async fn insert(&self, req: InsertRequest) -> Result<InsertResponse, InstanceApiError>;

    /// `blocking` mirrors the original's `blocking=True` kwarg: the call
    /// doesn't return until the IaaS confirms deletion.
    async fn delete(&self, name: &str, blocking: bool) -> Result<(), InstanceApiError>;

    async fn get(&self, name: &str) -> Result<Option<InstanceInfo>, InstanceApiError>;

    async fn list(&self) -> Result<Vec<InstanceInfo>, InstanceApiError>;
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// An in-memory `InstanceApi` for tests. Every instance starts
    /// `Provisioning`; tests drive lifecycle transitions with
    /// [`FakeInstanceApi::set_status`] / [`FakeInstanceApi::set_nat_ip`], or
    /// force `Insert` to fail for a name via [`FakeInstanceApi::fail_insert`].
    #[derive(Default)]
    pub struct FakeInstanceApi {
        instances: Mutex<HashMap<String, InstanceInfo>>,
        insert_failures: Mutex<HashMap<String, String>>,
        insert_calls: Mutex<Vec<InsertRequest>>,
        deleted: Mutex<Vec<String>>,
    }

    impl FakeInstanceApi {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn fail_insert(&self, name: &str, reason: impl Into<String>) {
            self.insert_failures.lock().insert(name.to_string(), reason.into());
        }

        pub fn set_status(&self, name: &str, status: IaasStatus) {
            if let Some(info) = self.instances.lock().get_mut(name) {
                info.status = status;
            }
        }

        pub fn set_nat_ip(&self, name: &str, ip: impl Into<String>) {
            if let Some(info) = self.instances.lock().get_mut(name) {
                info.nat_ip = Some(ip.into());
            }
        }

        pub fn insert_calls(&self) -> Vec<InsertRequest> {
            self.insert_calls.lock().clone()
        }

        pub fn deleted_names(&self) -> Vec<String> {
            self.deleted.lock().clone()
        }
    }

    #[async_trait]
    impl InstanceApi for FakeInstanceApi {
        async fn insert(&self, req: InsertRequest) -> Result<InsertResponse, InstanceApiError> {
            self.insert_calls.lock().push(req.clone());
            if let Some(reason) = self.insert_failures.lock().get(&req.name) {
                return Ok(InsertResponse::failed(reason.clone()));
            }
            self.instances.lock().insert(
                req.name.clone(),
                InstanceInfo { name: req.name, status: IaasStatus::Provisioning, nat_ip: None },
            );
            Ok(InsertResponse::ok())
        }

        async fn delete(&self, name: &str, _blocking: bool) -> Result<(), InstanceApiError> {
            self.instances.lock().remove(name);
            self.deleted.lock().push(name.to_string());
            Ok(())
        }

        async fn get(&self, name: &str) -> Result<Option<InstanceInfo>, InstanceApiError> {
            Ok(self.instances.lock().get(name).cloned())
        }

        async fn list(&self) -> Result<Vec<InstanceInfo>, InstanceApiError> {
            Ok(self.instances.lock().values().cloned().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeInstanceApi;
    use super::*;

    #[tokio::test]
    async fn insert_then_get_round_trips_through_the_fake() {
        let api = FakeInstanceApi::new();
        let req = InsertRequest {
            name: "hadoop-namenode".to_string(),
            zone: "us-central1-a".to_string(),
            machine_type: "n1-standard-4".to_string(),
            image: "debian-12".to_string(),
            service_account_scopes: vec![],
            disks: vec![],
            network: NetworkConfig { external_ip: true },
            metadata: BTreeMap::new(),
        };
        let resp = api.insert(req).await.unwrap();
        assert!(resp.is_success());
        let info = api.get("hadoop-namenode").await.unwrap().unwrap();
        assert_eq!(info.status, IaasStatus::Provisioning);
    }

    #[tokio::test]
    async fn get_on_unknown_name_returns_none() {
        let api = FakeInstanceApi::new();
        assert!(api.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fail_insert_surfaces_as_an_error_field_not_an_err() {
        let api = FakeInstanceApi::new();
        api.fail_insert("hadoop-namenode", "quota exceeded");
        let req = InsertRequest {
            name: "hadoop-namenode".to_string(),
            zone: "z".to_string(),
            machine_type: "m".to_string(),
            image: "i".to_string(),
            service_account_scopes: vec![],
            disks: vec![],
            network: NetworkConfig { external_ip: true },
            metadata: BTreeMap::new(),
        };
        let resp = api.insert(req).await.unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.error.as_deref(), Some("quota exceeded"));
    }
}
