// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc transfer <src> <dst>` plus the shared helpers `upload`/`download`
//! build on: `put_file` (stage a local path to GS first) and
//! `poll_operation` (block on `/status/op/<id>` until `Done`).
//! Grounded on `tools/common.py`'s functions of the same name.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::{format_or_json, OutputFormat};

const POLL_DELAY: Duration = Duration::from_secs(2);

/// If `uri` already names a remote object (has a `scheme:` prefix, e.g.
/// `gs://...`), pass it through. Otherwise treat it as a local path and
/// stage it to a throwaway GS location first.
///
/// Returns `(uri_to_use, was_staged)`; callers clean up a staged file with
/// [`gsutil_rm`] once the transfer completes.
pub async fn put_file(gs_bucket: &str, uri: &str) -> Result<(String, bool)> {
    if uri.contains("://") {
        return Ok((uri.to_string(), false));
    }
    let base = std::path::Path::new(uri).file_name().context("local path has no file name")?;
    let dst = format!("gs://{gs_bucket}/tmp_hadoop/{}/{}", uuid_like(), base.to_string_lossy());
    gsutil_cp(uri, &dst).await?;
    Ok((dst, true))
}

pub async fn gsutil_cp(src: &str, dst: &str) -> Result<()> {
    let status = tokio::process::Command::new("gsutil").args(["cp", src, dst]).status().await?;
    if !status.success() {
        anyhow::bail!("gsutil cp {src} {dst} failed");
    }
    Ok(())
}

pub async fn gsutil_rm(uri: &str) {
    let _ = tokio::process::Command::new("gsutil").args(["rm", uri]).status().await;
}

/// A v1-style unique id for throwaway staging paths — doesn't need to be a
/// real UUID, just unique enough not to collide with concurrent uploads.
pub(crate) fn uuid_like() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!("{nanos:x}")
}

/// `tools/common.py:poll_operation`: block until `/status/op/<id>` reports
/// `Done`, printing each state transition as it's observed.
pub async fn poll_operation(client: &CoordinatorClient, operation: &str) -> Result<()> {
    println!("Polling...");
    loop {
        let op = client.status_op(operation).await?;
        println!("{}", op.state);
        if op.state == "Done" {
            break;
        }
        tokio::time::sleep(POLL_DELAY).await;
    }
    println!();
    Ok(())
}

pub async fn handle(client: &CoordinatorClient, src: String, dst: String, format: OutputFormat) -> Result<()> {
    let resp = client.transfer(&src, &dst).await?;
    if !resp.result.is_ok() {
        return Err(ExitError::failure("transfer was rejected — is the cluster READY?").into());
    }
    poll_operation(client, &resp.operation).await?;
    format_or_json(format, &resp, || {
        println!("Transfer {} -> {} complete ({}).", resp.src, resp.dst, resp.operation);
    })
}
