// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc gen-secret` — `tools/gen_passwd.py`: a 128-byte random secret,
//! base64-encoded, written to the local `secret` file every other tool
//! (and the coordinator's own deploy metadata) reads from.

use anyhow::Result;
use base64::Engine;
use rand::RngCore;

use crate::config::CliConfig;

const SECRET_BYTES: usize = 128;

pub fn handle() -> Result<()> {
    let mut bytes = vec![0u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);

    let path = CliConfig::secret_path();
    std::fs::write(&path, format!("{encoded}\n"))?;
    println!("Password generated.");
    Ok(())
}
