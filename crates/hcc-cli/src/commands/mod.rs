// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

pub mod add_slaves;
pub mod clean;
pub mod download;
pub mod gen_secret;
pub mod job;
pub mod launch;
pub mod status;
pub mod submit;
pub mod teardown;
pub mod transfer;
pub mod tunnel;
pub mod upload;
pub mod wait;
