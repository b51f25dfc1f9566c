// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Process-wide configuration, loaded once at startup and passed explicitly
//! through constructors — there is no global mutable config singleton.
//!
//! Mirrors the shape of the original `cfg.py`: the coordinator loads these
//! values from instance metadata when running inside the cluster; CLI tools
//! load them from local files/env. Both paths produce the same `Config`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const COORDINATOR_NAME: &str = "coordinator";
pub const NAMENODE_NAME: &str = "hadoop-namenode";
pub const JOBTRACKER_NAME: &str = "hadoop-jobtracker";
pub const SLAVE_PREFIX: &str = "hadoop-slave-";

pub const RW_STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";
pub const RO_STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_only";
pub const COMPUTE_SCOPE: &str = "https://www.googleapis.com/auth/compute";

/// Where a persistent disk, if configured, gets mounted inside each VM.
pub const EDISK_LOCATION: &str = "/mnt/hadoop";

pub const HADOOP_VERSION: &str = "1.1.1";

/// Upstream mirror `launch_sequence` fetches the Hadoop tarball from
/// before re-uploading it to the cluster's own bucket (`cfg.py:hadoop_url`
/// + `hadoop_fn`).
pub const HADOOP_DOWNLOAD_URL: &str =
    "https://archive.apache.org/dist/hadoop/core/hadoop-1.1.1/hadoop-1.1.1.tar.gz";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared secret required on every public REST call.
    pub secret: String,
    pub project_id: String,
    pub zone: String,
    pub machine_type: String,
    pub image: String,
    /// Persistent disk name, if any is attached.
    pub disk: Option<String>,
    /// If set, only this instance mounts `disk` read-write; all others get
    /// nothing. If unset and `disk` is set, every instance mounts it
    /// read-only (can't mount rw on more than one instance at a time).
    pub rw_disk_instance: Option<String>,
    pub gs_bucket: String,

    /// REST port for both the coordinator and the snitches.
    pub port: u16,
    /// Spawn-pool worker count; the ops pool runs `2 * pool_size`.
    pub pool_size: usize,
    pub poll_delay: Duration,
    pub download_attempts: u32,
    /// Minimum HADOOP_READY slaves for the cluster to become READY.
    pub needed_slaves: usize,
    /// When true, resolve snitch addresses via `InstanceAPI.Get(..).nat_ip`;
    /// when false, use the bare instance name (DNS resolves it). True only
    /// when the coordinator itself runs inside the cluster's network.
    pub ip_via_api: bool,
    /// Give slaves an external IP too (masters always get one).
    pub external_ips: bool,
}

impl Config {
    /// Build a `Config` from environment variables, falling back to the
    /// documented defaults from the original system for anything unset.
    /// Required fields with no sane default return an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env_var("HCC_SECRET")?;
        let project_id = env_var("HCC_PROJECT_ID")?;
        let zone = env_var("HCC_ZONE")?;
        let machine_type = env_var("HCC_MACHINE_TYPE")?;
        let image = env_var("HCC_IMAGE")?;
        let gs_bucket = env_var("HCC_GS_BUCKET")?;

        Ok(Self {
            secret,
            project_id,
            zone,
            machine_type,
            image,
            disk: env_opt("HCC_DISK"),
            rw_disk_instance: env_opt("HCC_RW_DISK_INSTANCE"),
            gs_bucket,
            port: env_parsed("HCC_PORT").unwrap_or(8888),
            pool_size: env_parsed("HCC_POOL_SIZE").unwrap_or(20),
            poll_delay: Duration::from_millis(
                env_parsed::<u64>("HCC_POLL_DELAY_MS").unwrap_or(2_000),
            ),
            download_attempts: env_parsed("HCC_DOWNLOAD_ATTEMPTS").unwrap_or(3),
            needed_slaves: env_parsed("HCC_NEEDED_SLAVES").unwrap_or(3),
            ip_via_api: env_parsed("HCC_IP_VIA_API").unwrap_or(true),
            external_ips: env_parsed("HCC_EXTERNAL_IPS").unwrap_or(true),
        })
    }

    /// Object-store URLs derived from `gs_bucket`, matching
    /// `cfg.py:set_bucket`.
    pub fn bucket_urls(&self) -> BucketUrls {
        let base = format!("gs://{}", self.gs_bucket);
        BucketUrls {
            hadoop_tarball: format!("{base}/hadoop-{HADOOP_VERSION}.tar.gz"),
            hadoop_conf: format!("{base}/hadoop_conf.tgz"),
            coordinator_tarball: format!("{base}/coordinator-tarball.tgz"),
            snitch_tarball: format!("{base}/snitch-tarball.tgz"),
            tools_jar: format!("{base}/hadoop-tools.jar"),
        }
    }

    pub fn ops_pool_size(&self) -> usize {
        self.pool_size * 2
    }
}

/// Object-storage locations derived from the configured bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketUrls {
    pub hadoop_tarball: String,
    pub hadoop_conf: String,
    pub coordinator_tarball: String,
    pub snitch_tarball: String,
    pub tools_jar: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

fn env_var(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(any(test, feature = "test-support"))]
impl Config {
    /// A config with plausible test values, for unit and integration tests
    /// that don't want to depend on environment variables.
    pub fn for_test() -> Self {
        Self {
            secret: "test-secret".to_string(),
            project_id: "test-project".to_string(),
            zone: "us-central1-a".to_string(),
            machine_type: "n1-standard-4".to_string(),
            image: "projects/debian-cloud/global/images/family/debian-12".to_string(),
            disk: None,
            rw_disk_instance: None,
            gs_bucket: "test-bucket".to_string(),
            port: 8888,
            pool_size: 4,
            poll_delay: Duration::from_millis(10),
            download_attempts: 3,
            needed_slaves: 3,
            ip_via_api: false,
            external_ips: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_urls_match_expected_shape() {
        let cfg = Config::for_test();
        let urls = cfg.bucket_urls();
        assert_eq!(urls.hadoop_conf, "gs://test-bucket/hadoop_conf.tgz");
        assert_eq!(urls.tools_jar, "gs://test-bucket/hadoop-tools.jar");
        assert!(urls.hadoop_tarball.starts_with("gs://test-bucket/hadoop-1.1.1"));
    }

    #[test]
    fn ops_pool_is_double_spawn_pool() {
        let cfg = Config::for_test();
        assert_eq!(cfg.ops_pool_size(), cfg.pool_size * 2);
    }
}
