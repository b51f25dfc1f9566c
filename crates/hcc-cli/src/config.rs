// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Local CLI configuration: where the coordinator is, and the shared
//! secret to authenticate with it. Mirrors `tools/common.py:setup()`,
//! which reads `GS-bucket`/`project_id` from `cfg.py` and the secret from
//! a local `secret` file — here all of it loads from the environment plus
//! that same local file, matching `hcc-core::config`'s `HCC_*` layering.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub coordinator_host: String,
    pub port: u16,
    pub secret: String,
    pub gs_bucket: String,
    pub project_id: String,
    pub zone: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CliConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    #[error("no shared secret found at {0}; run `hcc gen-secret` first")]
    MissingSecret(PathBuf),
}

impl CliConfig {
    pub fn load() -> Result<Self, CliConfigError> {
        let coordinator_host = env_var("HCC_COORDINATOR_HOST")?;
        let gs_bucket = env_var("HCC_GS_BUCKET")?;
        let project_id = env_var("HCC_PROJECT_ID")?;
        let zone = env_var("HCC_ZONE")?;
        let port = env_parsed("HCC_PORT").unwrap_or(8888);
        let secret = load_secret()?;
        Ok(Self { coordinator_host, port, secret, gs_bucket, project_id, zone })
    }

    pub fn secret_path() -> PathBuf {
        std::env::var("HCC_SECRET_FILE").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("secret"))
    }
}

/// Read the shared secret from `$HCC_SECRET`, falling back to the local
/// `secret` file `tools/gen_passwd.py`/`hcc gen-secret` writes.
fn load_secret() -> Result<String, CliConfigError> {
    if let Ok(secret) = std::env::var("HCC_SECRET") {
        if !secret.is_empty() {
            return Ok(secret);
        }
    }
    let path = CliConfig::secret_path();
    std::fs::read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|_| CliConfigError::MissingSecret(path))
}

fn env_var(key: &'static str) -> Result<String, CliConfigError> {
    std::env::var(key).map_err(|_| CliConfigError::MissingEnv(key))
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn load_fails_without_required_env_vars() {
        for key in ["HCC_COORDINATOR_HOST", "HCC_GS_BUCKET", "HCC_PROJECT_ID", "HCC_ZONE", "HCC_SECRET"] {
            std::env::remove_var(key);
        }
        assert!(matches!(CliConfig::load(), Err(CliConfigError::MissingEnv("HCC_COORDINATOR_HOST"))));
    }

    #[test]
    #[serial]
    fn secret_env_var_takes_priority_over_the_local_file() {
        std::env::set_var("HCC_COORDINATOR_HOST", "coordinator");
        std::env::set_var("HCC_GS_BUCKET", "bucket");
        std::env::set_var("HCC_PROJECT_ID", "project");
        std::env::set_var("HCC_ZONE", "us-central1-a");
        std::env::set_var("HCC_SECRET", "from-env");

        let cfg = CliConfig::load().expect("env fully populated");
        assert_eq!(cfg.secret, "from-env");
        assert_eq!(cfg.port, 8888);

        for key in ["HCC_COORDINATOR_HOST", "HCC_GS_BUCKET", "HCC_PROJECT_ID", "HCC_ZONE", "HCC_SECRET"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn secret_falls_back_to_the_local_file_when_env_is_unset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("secret");
        std::fs::write(&path, "file-secret\n").expect("write secret file");

        std::env::remove_var("HCC_SECRET");
        std::env::set_var("HCC_SECRET_FILE", &path);
        std::env::set_var("HCC_COORDINATOR_HOST", "coordinator");
        std::env::set_var("HCC_GS_BUCKET", "bucket");
        std::env::set_var("HCC_PROJECT_ID", "project");
        std::env::set_var("HCC_ZONE", "us-central1-a");

        let cfg = CliConfig::load().expect("env + secret file populated");
        assert_eq!(cfg.secret, "file-secret");

        for key in ["HCC_COORDINATOR_HOST", "HCC_GS_BUCKET", "HCC_PROJECT_ID", "HCC_ZONE", "HCC_SECRET_FILE"] {
            std::env::remove_var(key);
        }
    }
}
