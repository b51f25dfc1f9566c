// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! HTTPS client from the operator's workstation to the coordinator's REST
//! control plane (spec.md §6). Built the same way `hcc-agent::AgentClient`
//! talks to snitches — TLS peer verification disabled, since the whole
//! deployment runs on self-signed snakeoil certs — except every call here
//! carries the shared `secret` form field the public endpoints require.

use std::time::Duration;

use hcc_wire::{ClusterStatusResponse, FormMap, OperationSummary, ResultOk, TransferResponse};
use serde::Deserialize;

use crate::config::CliConfig;

const CLI_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("could not reach the coordinator at {url}: {source}")]
    Transport { url: String, #[source] source: reqwest::Error },
    #[error("coordinator reply at {url} was not valid JSON: {source}")]
    Decode { url: String, #[source] source: reqwest::Error },
    #[error("{path} was rejected: {reply:?}")]
    Rejected { path: String, reply: serde_json::Value },
    #[error("operation {0} was not found")]
    UnknownOperation(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Liveness {
    pub state: String,
}

pub struct CoordinatorClient {
    http: reqwest::Client,
    base: String,
    secret: String,
}

impl CoordinatorClient {
    pub fn new(cfg: &CliConfig) -> Self {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(CLI_TIMEOUT)
            .build()
            .unwrap_or_default();
        let base = format!("https://{}:{}", cfg.coordinator_host, cfg.port);
        Self { http, base, secret: cfg.secret.clone() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `GET /status`, unauthenticated liveness probe.
    pub async fn liveness(&self) -> Result<Liveness, ClientError> {
        let url = self.url("/status");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport { url: url.clone(), source })?;
        resp.json().await.map_err(|source| ClientError::Decode { url, source })
    }

    async fn post_form(&self, path: &str, mut fields: FormMap) -> Result<serde_json::Value, ClientError> {
        fields.insert("secret".to_string(), self.secret.clone());
        let url = self.url(path);
        let resp = self
            .http
            .post(&url)
            .form(&fields)
            .send()
            .await
            .map_err(|source| ClientError::Transport { url: url.clone(), source })?;
        resp.json().await.map_err(|source| ClientError::Decode { url, source })
    }

    async fn post_ok(&self, path: &str, fields: FormMap) -> Result<bool, ClientError> {
        let reply = self.post_form(path, fields).await?;
        let ok: ResultOk = serde_json::from_value(reply.clone())
            .map_err(|_| ClientError::Rejected { path: path.to_string(), reply })?;
        Ok(ok.result.is_ok())
    }

    pub async fn launch(&self, num_slaves: u32) -> Result<bool, ClientError> {
        self.post_ok("/hadoop/launch", hcc_wire::LaunchRequest { num_slaves }.to_form()).await
    }

    pub async fn add_slaves(&self, num_slaves: u32) -> Result<bool, ClientError> {
        self.post_ok("/hadoop/add_slaves", hcc_wire::AddSlavesRequest { num_slaves }.to_form()).await
    }

    pub async fn teardown(&self) -> Result<bool, ClientError> {
        self.post_ok("/hadoop/teardown", FormMap::new()).await
    }

    pub async fn transfer(&self, src: &str, dst: &str) -> Result<TransferResponse, ClientError> {
        let req = hcc_wire::TransferRequest { src: src.to_string(), dst: dst.to_string(), operation: None };
        let reply = self.post_form("/transfer", req.to_form()).await?;
        serde_json::from_value(reply.clone()).map_err(|_| ClientError::Rejected { path: "/transfer".to_string(), reply })
    }

    pub async fn clean_hdfs(&self, path: &str) -> Result<bool, ClientError> {
        self.post_ok("/job/clean", hcc_wire::CleanRequest { path: path.to_string() }.to_form()).await
    }

    pub async fn submit_job(&self, jar: &str, job_args: Vec<String>) -> Result<bool, ClientError> {
        self.post_ok("/job/submit", hcc_wire::SubmitJobRequest { jar: jar.to_string(), job_args }.to_form()).await
    }

    pub async fn status_cluster(&self) -> Result<ClusterStatusResponse, ClientError> {
        let reply = self.post_form("/status/cluster", FormMap::new()).await?;
        serde_json::from_value(reply.clone())
            .map_err(|_| ClientError::Rejected { path: "/status/cluster".to_string(), reply })
    }

    pub async fn status_op(&self, operation: &str) -> Result<OperationSummary, ClientError> {
        let path = format!("/status/op/{operation}");
        let reply = self.post_form(&path, FormMap::new()).await?;
        serde_json::from_value(reply).map_err(|_| ClientError::UnknownOperation(operation.to_string()))
    }
}
