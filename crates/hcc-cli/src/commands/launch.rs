// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc launch <num-slaves>` — `POST /hadoop/launch`.

use anyhow::Result;

use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::{format_or_json, OutputFormat};

pub async fn handle(client: &CoordinatorClient, num_slaves: u32, format: OutputFormat) -> Result<()> {
    let ok = client.launch(num_slaves).await?;
    if !ok {
        return Err(ExitError::failure("launch was rejected — a launch may already be in progress").into());
    }
    format_or_json(format, &serde_json::json!({"launched": true, "num_slaves": num_slaves}), || {
        println!("Launch requested with {num_slaves} slaves.");
    })
}
