// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc teardown` — `tools/teardown.py`: interactive `y/n` confirmation,
//! then `POST /hadoop/teardown` and wait for the cluster to reach DOWN.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;

const POLL_DELAY: Duration = Duration::from_secs(2);

pub async fn handle(client: &CoordinatorClient, assume_yes: bool) -> Result<()> {
    if !assume_yes {
        print!("Really delete all your instances? [y/n] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if answer.trim() != "y" {
            println!("Never mind.");
            return Ok(());
        }
    }

    let ok = client.teardown().await?;
    if !ok {
        return Err(ExitError::failure("teardown was rejected by the coordinator").into());
    }

    loop {
        let status = client.status_cluster().await?;
        if status.state == "DOWN" {
            break;
        }
        println!("Tearing down ({} instance(s) left)...", status.instances.values().map(|v| v.len()).sum::<usize>());
        tokio::time::sleep(POLL_DELAY).await;
    }
    println!("All gone!");
    Ok(())
}
