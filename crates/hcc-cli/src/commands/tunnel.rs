// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc tunnel` — `tools/ui_links.py`: open SSH tunnels to the Hadoop web
//! UIs and print the local URLs. Ported to shell out through `gcloud
//! compute ssh` (rather than raw `ssh` against a resolved IP, as the
//! original did) since that's the same IaaS CLI `hcc-agent::gcloud`
//! already depends on for instance management.

use anyhow::Result;
use hcc_core::config::{JOBTRACKER_NAME, NAMENODE_NAME};

async fn next_free_port() -> Result<u16> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await?;
    Ok(listener.local_addr()?.port())
}

/// Launch a backgrounded `gcloud compute ssh -- -L` tunnel; returns the
/// local port it was bound to.
async fn setup_tunnel(project_id: &str, zone: &str, instance: &str, remote_port: u16) -> Result<u16> {
    let local_port = next_free_port().await?;
    let forward = format!("-L {local_port}:127.0.0.1:{remote_port}");
    let argv = [
        "gcloud",
        "compute",
        "ssh",
        instance,
        "--project",
        project_id,
        "--zone",
        zone,
        "--tunnel-through-iap",
        "--",
        "-f",
        "-N",
        &forward,
    ];
    println!("Executing: {}", argv.join(" "));
    let status = tokio::process::Command::new(argv[0]).args(&argv[1..]).status().await?;
    if !status.success() {
        anyhow::bail!("ssh tunnel to {instance} failed");
    }
    Ok(local_port)
}

pub async fn handle(project_id: &str, zone: &str) -> Result<()> {
    let jobtracker_port = setup_tunnel(project_id, zone, JOBTRACKER_NAME, 50030).await?;
    let namenode_port = setup_tunnel(project_id, zone, NAMENODE_NAME, 50070).await?;

    println!();
    println!(
        "ssh tunnels are running in the background to provide access to the Hadoop web \
         interface. You can close the tunnels by killing the ssh process responsible. \
         \"ps aux | grep ssh\" should list processes matching the commands indicated above."
    );
    println!();
    println!("*** JobTracker: http://localhost:{jobtracker_port}");
    println!("*** NameNode: http://localhost:{namenode_port}");
    Ok(())
}
