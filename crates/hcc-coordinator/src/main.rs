// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc-coordinatord`: loads configuration from the environment, wires the
//! real collaborators (`GcloudInstanceApi`, `AgentClient`, `VmFactory`,
//! `RealSubprocessRunner`), and serves the control plane until killed.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use hcc_agent::{AgentClient, GcloudInstanceApi, SnitchAssets, VmFactory};
use hcc_coordinator::control_plane::{serve, AppState};
use hcc_coordinator::orchestrator::subprocess::RealSubprocessRunner;
use hcc_coordinator::Orchestrator;
use hcc_core::Config;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] hcc_core::config::ConfigError),
    #[error("failed to read snitch asset {path}: {source}")]
    Asset { path: PathBuf, #[source] source: std::io::Error },
    #[error("control plane error: {0}")]
    ControlPlane(#[from] hcc_coordinator::ControlPlaneError),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("HCC_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let assets = load_snitch_assets()?;

    let api = GcloudInstanceApi::new(config.project_id.clone());
    let agent = Arc::new(AgentClient::new(api.clone(), config.port, config.ip_via_api));
    let vm_factory = Arc::new(VmFactory::new(api, config.clone(), assets));
    let subprocess: Arc<dyn hcc_coordinator::orchestrator::subprocess::SubprocessRunner> =
        Arc::new(RealSubprocessRunner);

    let port = config.port;
    let secret: Arc<str> = Arc::from(config.secret.as_str());
    let orchestrator = Orchestrator::new(config, agent, vm_factory, subprocess);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    serve(addr, AppState { orchestrator, secret }).await?;
    Ok(())
}

/// The startup script, bootstrap shim, and three snitch sources are
/// staged alongside the coordinator binary at deploy time (spec.md
/// §4.4's metadata payload); paths are overridable per asset so a local
/// dev checkout can point at `hadoop/coordinator-assets/` directly.
fn load_snitch_assets() -> Result<SnitchAssets, StartupError> {
    let base = std::env::var("HCC_ASSETS_DIR").unwrap_or_else(|_| "/opt/hcc/assets".to_string());
    let read = |name: &str, env_key: &str| -> Result<String, StartupError> {
        let path = std::env::var(env_key)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(&base).join(name));
        std::fs::read_to_string(&path).map_err(|source| StartupError::Asset { path, source })
    };

    Ok(SnitchAssets {
        startup_script: read("startup_script.sh", "HCC_STARTUP_SCRIPT")?,
        bootstrap_sh: read("bootstrap.sh", "HCC_BOOTSTRAP_SH")?,
        namenode_snitch: read("namenode_snitch.py", "HCC_NAMENODE_SNITCH")?,
        jobtracker_snitch: read("jobtracker_snitch.py", "HCC_JOBTRACKER_SNITCH")?,
        slave_snitch: read("slave_snitch.py", "HCC_SLAVE_SNITCH")?,
    })
}
