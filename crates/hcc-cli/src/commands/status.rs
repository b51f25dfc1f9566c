// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc status` — `POST /status/cluster`, rendered with
//! `tools/common.py:pprint_status`'s layout.

use anyhow::Result;

use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::{format_or_json, print_cluster_status, OutputFormat};

pub async fn handle(client: &CoordinatorClient, format: OutputFormat) -> Result<()> {
    if client.liveness().await.is_err() {
        return Err(ExitError::failure("the coordinator is not running, or you sent the wrong secret").into());
    }
    let status = client.status_cluster().await?;
    format_or_json(format, &status, || print_cluster_status(&status))
}
