// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Builds per-role VM creation requests (spec.md §4.4) and invokes
//! `InstanceAPI.Insert`.

use std::collections::BTreeMap;
use std::sync::Arc;

use hcc_core::{config, Config, Role};

use crate::instance_api::{
    DiskAttachment, DiskMode, InsertRequest, InstanceApi, InstanceApiError, NetworkConfig,
};

/// The local assets baked into every VM's instance metadata: the startup
/// script, the bootstrap script, and the three role-specific snitch
/// sources. Loaded once at coordinator startup from the files staged
/// alongside the coordinator binary (spec.md §4.4's metadata payload).
#[derive(Debug, Clone)]
pub struct SnitchAssets {
    pub startup_script: String,
    pub bootstrap_sh: String,
    pub namenode_snitch: String,
    pub jobtracker_snitch: String,
    pub slave_snitch: String,
}

impl SnitchAssets {
    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::NameNode => &self.namenode_snitch,
            Role::JobTracker => &self.jobtracker_snitch,
            Role::Slave | Role::Coordinator => &self.slave_snitch,
        }
    }
}

pub struct VmFactory {
    api: Arc<dyn InstanceApi>,
    config: Config,
    assets: SnitchAssets,
}

impl VmFactory {
    pub fn new(api: Arc<dyn InstanceApi>, config: Config, assets: SnitchAssets) -> Self {
        Self { api, config, assets }
    }

    /// The underlying `InstanceAPI` handle, for callers (e.g. the
    /// orchestrator's `get_status`/`monitor_instance` probes) that need
    /// `Get`/`Delete` rather than `Insert`.
    pub fn api(&self) -> &Arc<dyn InstanceApi> {
        &self.api
    }

    /// Disk attachment policy (spec.md §4.4): no configured disk means
    /// nothing attaches; a configured `rw_disk_instance` means only that
    /// instance mounts read-write and nobody else mounts anything
    /// (can't mount read-write anywhere else once it's mounted read-only,
    /// and vice versa); otherwise every instance mounts read-only.
    fn disks_for(&self, name: &str) -> Vec<DiskAttachment> {
        let Some(disk) = &self.config.disk else {
            return vec![];
        };
        match &self.config.rw_disk_instance {
            Some(rw_instance) if rw_instance == name => {
                vec![DiskAttachment { disk_name: disk.clone(), mode: DiskMode::ReadWrite }]
            }
            Some(_) => vec![],
            None => vec![DiskAttachment { disk_name: disk.clone(), mode: DiskMode::ReadOnly }],
        }
    }

    /// Masters and the coordinator always get an external IP; slaves only
    /// when `Config::external_ips` is set.
    fn network_for(&self, role: Role) -> NetworkConfig {
        let external_ip = match role {
            Role::NameNode | Role::JobTracker | Role::Coordinator => true,
            Role::Slave => self.config.external_ips,
        };
        NetworkConfig { external_ip }
    }

    /// Only the NameNode handles HDFS<->bucket transfers and needs
    /// read-write object storage; the coordinator needs compute access to
    /// drive `InstanceAPI` itself; everyone else gets read-only storage.
    fn scopes_for(&self, role: Role) -> Vec<String> {
        let mut scopes = vec![if role.is_rw_storage() {
            config::RW_STORAGE_SCOPE.to_string()
        } else {
            config::RO_STORAGE_SCOPE.to_string()
        }];
        if role == Role::Coordinator {
            scopes.push(config::COMPUTE_SCOPE.to_string());
        }
        scopes
    }

    fn metadata_for(&self, role: Role) -> BTreeMap<String, String> {
        let mut metadata = BTreeMap::new();
        metadata.insert("gs_bucket".to_string(), self.config.gs_bucket.clone());
        metadata.insert("snitch-tarball.tgz".to_string(), self.config.bucket_urls().snitch_tarball);
        metadata.insert("startup-script".to_string(), self.assets.startup_script.clone());
        metadata.insert("bootstrap.sh".to_string(), self.assets.bootstrap_sh.clone());
        metadata.insert("snitch.py".to_string(), self.assets.for_role(role).to_string());
        metadata
    }

    pub fn build_request(&self, name: &str, role: Role) -> InsertRequest {
        InsertRequest {
            name: name.to_string(),
            zone: self.config.zone.clone(),
            machine_type: self.config.machine_type.clone(),
            image: self.config.image.clone(),
            service_account_scopes: self.scopes_for(role),
            disks: self.disks_for(name),
            network: self.network_for(role),
            metadata: self.metadata_for(role),
        }
    }

    /// Create the instance. Returns `true` iff the IaaS reply contains no
    /// `error` field (spec.md §4.4).
    pub async fn spawn(&self, name: &str, role: Role) -> Result<bool, InstanceApiError> {
        let req = self.build_request(name, role);
        let resp = self.api.insert(req).await?;
        Ok(resp.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance_api::fake::FakeInstanceApi;

    fn assets() -> SnitchAssets {
        SnitchAssets {
            startup_script: "#!/bin/sh\necho start".to_string(),
            bootstrap_sh: "#!/bin/sh\necho bootstrap".to_string(),
            namenode_snitch: "namenode snitch source".to_string(),
            jobtracker_snitch: "jobtracker snitch source".to_string(),
            slave_snitch: "slave snitch source".to_string(),
        }
    }

    #[test]
    fn no_disk_configured_attaches_nothing() {
        let cfg = Config::for_test();
        let factory = VmFactory::new(FakeInstanceApi::new(), cfg, assets());
        assert!(factory.disks_for("hadoop-namenode").is_empty());
    }

    #[test]
    fn rw_disk_instance_gets_read_write_everyone_else_gets_nothing() {
        let mut cfg = Config::for_test();
        cfg.disk = Some("shared-disk".to_string());
        cfg.rw_disk_instance = Some("hadoop-namenode".to_string());
        let factory = VmFactory::new(FakeInstanceApi::new(), cfg, assets());

        let nn_disks = factory.disks_for("hadoop-namenode");
        assert_eq!(nn_disks.len(), 1);
        assert_eq!(nn_disks[0].mode, DiskMode::ReadWrite);

        assert!(factory.disks_for("hadoop-jobtracker").is_empty());
    }

    #[test]
    fn no_rw_disk_instance_means_everyone_mounts_read_only() {
        let mut cfg = Config::for_test();
        cfg.disk = Some("shared-disk".to_string());
        cfg.rw_disk_instance = None;
        let factory = VmFactory::new(FakeInstanceApi::new(), cfg, assets());

        let disks = factory.disks_for("hadoop-slave-000");
        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].mode, DiskMode::ReadOnly);
    }

    #[test]
    fn slaves_get_external_ip_only_when_configured() {
        let mut cfg = Config::for_test();
        cfg.external_ips = false;
        let factory = VmFactory::new(FakeInstanceApi::new(), cfg, assets());

        assert!(!factory.network_for(Role::Slave).external_ip);
        assert!(factory.network_for(Role::NameNode).external_ip);
        assert!(factory.network_for(Role::JobTracker).external_ip);
    }

    #[test]
    fn namenode_gets_read_write_storage_scope() {
        let cfg = Config::for_test();
        let factory = VmFactory::new(FakeInstanceApi::new(), cfg, assets());
        assert!(factory.scopes_for(Role::NameNode).contains(&config::RW_STORAGE_SCOPE.to_string()));
        assert!(factory.scopes_for(Role::Slave).contains(&config::RO_STORAGE_SCOPE.to_string()));
        assert!(!factory.scopes_for(Role::Slave).contains(&config::RW_STORAGE_SCOPE.to_string()));
    }

    #[test]
    fn coordinator_additionally_gets_compute_scope() {
        let cfg = Config::for_test();
        let factory = VmFactory::new(FakeInstanceApi::new(), cfg, assets());
        assert!(factory.scopes_for(Role::Coordinator).contains(&config::COMPUTE_SCOPE.to_string()));
    }

    #[tokio::test]
    async fn spawn_returns_false_when_insert_fails() {
        let cfg = Config::for_test();
        let api = FakeInstanceApi::new();
        api.fail_insert("hadoop-namenode", "quota exceeded");
        let factory = VmFactory::new(api, cfg, assets());
        assert!(!factory.spawn("hadoop-namenode", Role::NameNode).await.unwrap());
    }

    #[tokio::test]
    async fn spawn_inlines_the_role_specific_snitch_source() {
        let cfg = Config::for_test();
        let api = FakeInstanceApi::new();
        let factory = VmFactory::new(api.clone(), cfg, assets());
        factory.spawn("hadoop-jobtracker", Role::JobTracker).await.unwrap();
        let calls = api.insert_calls();
        assert_eq!(calls[0].metadata.get("snitch.py").unwrap(), "jobtracker snitch source");
    }
}
