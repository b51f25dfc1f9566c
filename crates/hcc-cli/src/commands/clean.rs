// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc clean --force <hdfs-path>` — `tools/clean_hdfs.py`: the original
//! refuses to run without a literal `-f` flag so a bare invocation can't
//! accidentally delete cluster data; `--force`/`-f` here plays the same
//! role.

use anyhow::Result;

use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::{format_or_json, OutputFormat};

pub async fn handle(client: &CoordinatorClient, path: String, force: bool, format: OutputFormat) -> Result<()> {
    if !force {
        return Err(ExitError::failure(format!(
            "refusing to delete {path} from HDFS without --force (this deletes data from your cluster)"
        ))
        .into());
    }
    let ok = client.clean_hdfs(&path).await?;
    format_or_json(format, &serde_json::json!({"cleaned": ok, "path": path}), || {
        if ok {
            println!("Cleaned {path}.");
        } else {
            println!("Coordinator reported the clean as failed.");
        }
    })
}
