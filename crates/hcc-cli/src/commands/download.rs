// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc download <hdfs-src> <gs-dst>` — `tools/download_results.py`:
//! `gs_dst` must be an object path relative to the configured bucket, not
//! a full `gs://` URL, matching the original's validation.

use anyhow::Result;

use super::transfer::poll_operation;
use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::{format_or_json, OutputFormat};

/// `gs_dst` must be an object path (`/foo/bar`), not a full `gs://` URL —
/// the bucket is prefixed for the caller, same as `download_results.py`.
fn validate_gs_dst(gs_bucket: &str, gs_dst: &str) -> Result<String, ExitError> {
    if gs_dst.starts_with("gs://") || !gs_dst.starts_with('/') {
        return Err(ExitError::failure(format!(
            "gs_dst should be of the form /path/to/object. gs://{gs_bucket} will be prefixed for you."
        )));
    }
    Ok(format!("gs://{gs_bucket}{gs_dst}"))
}

pub async fn handle(
    client: &CoordinatorClient,
    gs_bucket: &str,
    hdfs_src: String,
    gs_dst: String,
    format: OutputFormat,
) -> Result<()> {
    let dst = validate_gs_dst(gs_bucket, &gs_dst)?;

    let resp = client.transfer(&hdfs_src, &dst).await?;
    if !resp.result.is_ok() {
        return Err(ExitError::failure("download was rejected — is the cluster READY?").into());
    }
    poll_operation(client, &resp.operation).await?;
    println!("gsutil ls {dst}");

    format_or_json(format, &serde_json::json!({"gs_dst": dst}), || {
        println!("Downloaded to {dst}.");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_full_gs_url() {
        assert!(validate_gs_dst("my-bucket", "gs://my-bucket/out").is_err());
    }

    #[test]
    fn rejects_a_relative_path() {
        assert!(validate_gs_dst("my-bucket", "out/results").is_err());
    }

    #[test]
    fn accepts_an_absolute_object_path() {
        let dst = validate_gs_dst("my-bucket", "/out/results").expect("valid path");
        assert_eq!(dst, "gs://my-bucket/out/results");
    }
}
