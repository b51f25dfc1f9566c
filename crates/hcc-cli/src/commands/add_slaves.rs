// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc add-slaves <num-slaves>` — `tools/add_slaves.py`.

use anyhow::Result;

use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::{format_or_json, OutputFormat};

pub async fn handle(client: &CoordinatorClient, num_slaves: u32, format: OutputFormat) -> Result<()> {
    println!("Adding {num_slaves} slaves...");
    let ok = client.add_slaves(num_slaves).await?;
    if !ok {
        return Err(ExitError::failure("add_slaves was rejected — is the cluster launched?").into());
    }
    format_or_json(format, &serde_json::json!({"added": true, "num_slaves": num_slaves}), || {
        println!("Requested.");
    })
}
