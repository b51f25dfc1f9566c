// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! HTTPS JSON-POST client to in-VM agents ("snitches"), with name->IP
//! resolution caching and shared-secret-free transport (spec.md §4.3 —
//! the snitch contract doesn't require a secret; only the control plane
//! does).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use hcc_wire::{FormMap, SnitchStatusResponse};
use parking_lot::Mutex;

use crate::instance_api::{InstanceApi, InstanceApiError};

const SNITCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum AgentClientError {
    #[error("{name} does not exist according to the IaaS")]
    InstanceNotFound { name: String },
    #[error("{name} has no external IP to resolve")]
    NoNatIp { name: String },
    #[error("IaaS lookup failed while resolving {name}: {source}")]
    Resolve { name: String, #[source] source: InstanceApiError },
    #[error("{name}{path} failed: {reply:?}")]
    RemoteCallFailed { name: String, path: String, reply: Option<serde_json::Value> },
}

/// `POST(address, path, data) -> Option<JSON>` / `GET(address, path) ->
/// Option<JSON>` (spec.md §4.3). TLS peer verification is disabled
/// (self-signed snakeoil certs); any network, TLS, or JSON-parse error
/// collapses to `None` so callers can distinguish "no reply" from "a
/// well-formed reply that says something's wrong."
pub struct AgentClient {
    http: reqwest::Client,
    api: Arc<dyn InstanceApi>,
    port: u16,
    ip_via_api: bool,
    ip_cache: Mutex<HashMap<String, String>>,
}

impl AgentClient {
    pub fn new(api: Arc<dyn InstanceApi>, port: u16, ip_via_api: bool) -> Self {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(SNITCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http, api, port, ip_via_api, ip_cache: Mutex::new(HashMap::new()) }
    }

    /// Resolve `name` to the address snitch calls should target. Cached
    /// forever once resolved — stale entries are tolerated for the life of
    /// the process (spec.md §4.3).
    async fn resolve_address(&self, name: &str) -> Result<String, AgentClientError> {
        if !self.ip_via_api {
            return Ok(name.to_string());
        }
        if let Some(ip) = self.ip_cache.lock().get(name).cloned() {
            return Ok(ip);
        }
        let info = self
            .api
            .get(name)
            .await
            .map_err(|source| AgentClientError::Resolve { name: name.to_string(), source })?
            .ok_or_else(|| AgentClientError::InstanceNotFound { name: name.to_string() })?;
        let ip = info.nat_ip.ok_or_else(|| AgentClientError::NoNatIp { name: name.to_string() })?;
        self.ip_cache.lock().insert(name.to_string(), ip.clone());
        Ok(ip)
    }

    fn url(address: &str, port: u16, path: &str) -> String {
        format!("https://{address}:{port}{path}")
    }

    pub async fn get(&self, name: &str, path: &str) -> Option<serde_json::Value> {
        let address = self.resolve_address(name).await.ok()?;
        let url = Self::url(&address, self.port, path);
        let resp = self.http.get(url).send().await.ok()?;
        resp.json::<serde_json::Value>().await.ok()
    }

    pub async fn post(&self, name: &str, path: &str, data: FormMap) -> Option<serde_json::Value> {
        let address = self.resolve_address(name).await.ok()?;
        let url = Self::url(&address, self.port, path);
        let resp = self.http.post(url).form(&data).send().await.ok()?;
        resp.json::<serde_json::Value>().await.ok()
    }

    /// Assert `result["result"] == "ok"`, raising `RemoteCallFailed`
    /// otherwise (spec.md §4.3).
    pub async fn checked_post(
        &self,
        name: &str,
        path: &str,
        data: FormMap,
    ) -> Result<serde_json::Value, AgentClientError> {
        let reply = self.post(name, path, data).await;
        match reply {
            Some(value) if value.get("result").and_then(|r| r.as_str()) == Some("ok") => Ok(value),
            other => Err(AgentClientError::RemoteCallFailed {
                name: name.to_string(),
                path: path.to_string(),
                reply: other,
            }),
        }
    }

    /// `GET /status`, parsed into the snitch status shape. Returns `None`
    /// on any transport/parse failure, same as the raw `get`.
    pub async fn status(&self, name: &str) -> Option<SnitchStatusResponse> {
        let value = self.get(name, "/status").await?;
        serde_json::from_value(value).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance_api::fake::FakeInstanceApi;
    use crate::instance_api::IaasStatus;

    #[tokio::test]
    async fn ip_via_api_false_passes_the_bare_name_through() {
        let api = FakeInstanceApi::new();
        let client = AgentClient::new(api, 8888, false);
        assert_eq!(client.resolve_address("hadoop-namenode").await.unwrap(), "hadoop-namenode");
    }

    #[tokio::test]
    async fn ip_via_api_true_resolves_and_caches_the_nat_ip() {
        let api = FakeInstanceApi::new();
        api.insert(crate::instance_api::InsertRequest {
            name: "hadoop-namenode".to_string(),
            zone: "z".to_string(),
            machine_type: "m".to_string(),
            image: "i".to_string(),
            service_account_scopes: vec![],
            disks: vec![],
            network: crate::instance_api::NetworkConfig { external_ip: true },
            metadata: Default::default(),
        })
        .await
        .unwrap();
        api.set_status("hadoop-namenode", IaasStatus::Running);
        api.set_nat_ip("hadoop-namenode", "203.0.113.5");

        let client = AgentClient::new(api.clone(), 8888, true);
        assert_eq!(client.resolve_address("hadoop-namenode").await.unwrap(), "203.0.113.5");

        // Stale tolerance: changing the IP afterwards doesn't invalidate the cache.
        api.set_nat_ip("hadoop-namenode", "203.0.113.9");
        assert_eq!(client.resolve_address("hadoop-namenode").await.unwrap(), "203.0.113.5");
    }

    #[tokio::test]
    async fn resolve_address_fails_for_unknown_instance() {
        let api = FakeInstanceApi::new();
        let client = AgentClient::new(api, 8888, true);
        assert!(matches!(
            client.resolve_address("ghost").await,
            Err(AgentClientError::InstanceNotFound { .. })
        ));
    }
}
