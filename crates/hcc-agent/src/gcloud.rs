// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! A real `InstanceApi` backed by the `gcloud` CLI.
//!
//! spec.md §1 scope note (a) treats the IaaS client itself as an external
//! collaborator, the same way `launch_sequence` treats `wget`/`gsutil` as
//! subprocesses rather than linked-in clients (spec.md §4.6.1). This
//! follows the identical pattern for `Insert`/`Delete`/`Get`/`List`: shell
//! out to `gcloud compute instances ...` with `--format=json` and parse
//! the result, rather than linking a generated compute API client and its
//! OAuth machinery into the coordinator.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::instance_api::{
    IaasStatus, InsertRequest, InsertResponse, InstanceApi, InstanceApiError, InstanceInfo,
};

pub struct GcloudInstanceApi {
    project_id: String,
}

impl GcloudInstanceApi {
    pub fn new(project_id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { project_id: project_id.into() })
    }

    async fn run_json(&self, args: &[String]) -> Result<serde_json::Value, InstanceApiError> {
        let output = Command::new("gcloud")
            .args(args)
            .arg("--format=json")
            .arg("--quiet")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| InstanceApiError::Backend(format!("failed to spawn gcloud: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InstanceApiError::Backend(stderr.trim().to_string()));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .map_err(|err| InstanceApiError::Backend(format!("unparsable gcloud output: {err}")))
    }
}

#[derive(Debug, Deserialize)]
struct GcloudInstance {
    name: String,
    status: String,
    #[serde(rename = "networkInterfaces", default)]
    network_interfaces: Vec<GcloudNetworkInterface>,
}

#[derive(Debug, Deserialize)]
struct GcloudNetworkInterface {
    #[serde(rename = "accessConfigs", default)]
    access_configs: Vec<GcloudAccessConfig>,
}

#[derive(Debug, Deserialize)]
struct GcloudAccessConfig {
    #[serde(rename = "natIP")]
    nat_ip: Option<String>,
}

fn map_status(raw: &str) -> IaasStatus {
    match raw {
        "PROVISIONING" => IaasStatus::Provisioning,
        "STAGING" => IaasStatus::Staging,
        "RUNNING" => IaasStatus::Running,
        "STOPPING" | "SUSPENDING" | "SUSPENDED" => IaasStatus::Stopping,
        _ => IaasStatus::Terminated,
    }
}

impl From<GcloudInstance> for InstanceInfo {
    fn from(raw: GcloudInstance) -> Self {
        let nat_ip = raw
            .network_interfaces
            .into_iter()
            .flat_map(|nic| nic.access_configs)
            .find_map(|ac| ac.nat_ip);
        InstanceInfo { name: raw.name, status: map_status(&raw.status), nat_ip }
    }
}

/// Metadata values are staged to temp files rather than passed inline:
/// the startup script and snitch sources routinely exceed the shell's
/// practical argv length and would also collide with gcloud's
/// comma-separated `--metadata=k=v,...` syntax.
async fn write_metadata_file(key: &str, value: &str) -> Result<std::path::PathBuf, InstanceApiError> {
    let path = std::env::temp_dir().join(format!("hcc-metadata-{key}-{}", std::process::id()));
    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(|err| InstanceApiError::Backend(format!("failed to stage metadata {key}: {err}")))?;
    file.write_all(value.as_bytes())
        .await
        .map_err(|err| InstanceApiError::Backend(format!("failed to stage metadata {key}: {err}")))?;
    Ok(path)
}

#[async_trait]
impl InstanceApi for GcloudInstanceApi {
    async fn insert(&self, req: InsertRequest) -> Result<InsertResponse, InstanceApiError> {
        let mut staged = Vec::with_capacity(req.metadata.len());
        for (key, value) in &req.metadata {
            staged.push((key.clone(), write_metadata_file(key, value).await?));
        }
        let metadata_from_file = staged
            .iter()
            .map(|(k, path)| format!("{k}={}", path.display()))
            .collect::<Vec<_>>()
            .join(",");

        let mut args = vec![
            "compute".to_string(),
            "instances".to_string(),
            "create".to_string(),
            req.name.clone(),
            format!("--project={}", self.project_id),
            format!("--zone={}", req.zone),
            format!("--machine-type={}", req.machine_type),
            format!("--image={}", req.image),
        ];
        if !req.service_account_scopes.is_empty() {
            args.push(format!("--scopes={}", req.service_account_scopes.join(",")));
        }
        if !metadata_from_file.is_empty() {
            args.push(format!("--metadata-from-file={metadata_from_file}"));
        }
        if !req.network.external_ip {
            args.push("--no-address".to_string());
        }
        for disk in &req.disks {
            let mode = match disk.mode {
                crate::instance_api::DiskMode::ReadOnly => "ro",
                crate::instance_api::DiskMode::ReadWrite => "rw",
            };
            args.push(format!("--disk=name={},mode={mode}", disk.disk_name));
        }

        for (_, path) in &staged {
            let _ = tokio::fs::remove_file(path).await;
        }

        match self.run_json(&args).await {
            Ok(_) => Ok(InsertResponse::ok()),
            Err(err) => Ok(InsertResponse::failed(err.to_string())),
        }
    }

    async fn delete(&self, name: &str, blocking: bool) -> Result<(), InstanceApiError> {
        let mut args = vec![
            "compute".to_string(),
            "instances".to_string(),
            "delete".to_string(),
            name.to_string(),
            format!("--project={}", self.project_id),
        ];
        if !blocking {
            args.push("--async".to_string());
        }
        self.run_json(&args).await.map(|_| ())
    }

    async fn get(&self, name: &str) -> Result<Option<InstanceInfo>, InstanceApiError> {
        let args = vec![
            "compute".to_string(),
            "instances".to_string(),
            "describe".to_string(),
            name.to_string(),
            format!("--project={}", self.project_id),
        ];
        match self.run_json(&args).await {
            Ok(value) => {
                let raw: GcloudInstance = serde_json::from_value(value)
                    .map_err(|err| InstanceApiError::Backend(err.to_string()))?;
                Ok(Some(raw.into()))
            }
            Err(InstanceApiError::Backend(msg)) if msg.contains("was not found") => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn list(&self) -> Result<Vec<InstanceInfo>, InstanceApiError> {
        let args = vec![
            "compute".to_string(),
            "instances".to_string(),
            "list".to_string(),
            format!("--project={}", self.project_id),
        ];
        let value = self.run_json(&args).await?;
        let raw: Vec<GcloudInstance> =
            serde_json::from_value(value).map_err(|err| InstanceApiError::Backend(err.to_string()))?;
        Ok(raw.into_iter().map(InstanceInfo::from).collect())
    }
}
