// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc submit <jar> [args...]` — `tools/common.py:start_job`: stage the
//! jar to GS if it's local, submit, then clean up the staged copy.

use anyhow::Result;

use super::transfer::{gsutil_rm, put_file};
use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::{format_or_json, OutputFormat};

pub async fn handle(
    client: &CoordinatorClient,
    gs_bucket: &str,
    jar: String,
    job_args: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    println!("Starting job...");
    let (jar_uri, is_gs) = put_file(gs_bucket, &jar).await?;

    let ok = client.submit_job(&jar_uri, job_args).await?;
    if is_gs {
        gsutil_rm(&jar_uri).await;
    }
    if !ok {
        return Err(ExitError::failure("job submission was rejected — is the cluster READY?").into());
    }

    format_or_json(format, &serde_json::json!({"submitted": true, "jar": jar_uri}), || {
        println!("Submitted!");
    })
}
