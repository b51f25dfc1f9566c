// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc wait` — `tools/common.py:wait_for_hadoop`: block until the
//! coordinator reports READY (success) or BROKEN (failure).

use std::time::Duration;

use anyhow::Result;

use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::print_cluster_status;

const POLL_DELAY: Duration = Duration::from_secs(2);

pub async fn handle(client: &CoordinatorClient) -> Result<()> {
    println!("Waiting for Hadoop to be ready for jobs...");
    loop {
        let status = match client.status_cluster().await {
            Ok(status) => status,
            Err(_) => {
                println!("The coordinator is not running, or you sent the wrong secret.");
                tokio::time::sleep(POLL_DELAY).await;
                continue;
            }
        };
        println!("{}", "-".repeat(80));
        print_cluster_status(&status);

        if status.state == "READY" {
            break;
        }
        if status.state == "BROKEN" {
            return Err(ExitError::failure("cluster reached BROKEN").into());
        }
        tokio::time::sleep(POLL_DELAY).await;
    }
    println!();
    Ok(())
}
