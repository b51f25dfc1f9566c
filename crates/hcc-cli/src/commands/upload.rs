// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc upload <path> [--hdfs-path]` — `tools/common.py:upload`: stage a
//! local-or-`gs://` file to GS if needed, hand it to the coordinator as a
//! transfer into HDFS, and block until it's done.

use anyhow::Result;

use super::transfer::{gsutil_rm, poll_operation, put_file, uuid_like};
use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::{format_or_json, OutputFormat};

fn default_hdfs_path(uri: &str) -> String {
    let base = std::path::Path::new(uri).file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
    format!("/job_input/{}/{}", uuid_like(), base)
}

pub async fn handle(
    client: &CoordinatorClient,
    gs_bucket: &str,
    uri: String,
    hdfs_path: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let hdfs_input = hdfs_path.unwrap_or_else(|| default_hdfs_path(&uri));
    println!("Uploading input...");
    let (src, is_gs) = put_file(gs_bucket, &uri).await?;

    let resp = client.transfer(&src, &hdfs_input).await?;
    if !resp.result.is_ok() {
        return Err(ExitError::failure("upload was rejected — is the cluster READY?").into());
    }
    poll_operation(client, &resp.operation).await?;

    if is_gs {
        gsutil_rm(&src).await;
    }

    format_or_json(format, &serde_json::json!({"hdfs_path": hdfs_input}), || {
        println!("Uploaded to {hdfs_input}.");
    })
}
