// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Wire types for the coordinator's REST control plane and the snitch
//! contract, plus the form-encoding helper both sides use.
//!
//! Wire format: `application/x-www-form-urlencoded` bodies, with any
//! structured value (JSON arrays/objects) inlined as a JSON-encoded string
//! field rather than nested form keys. Dynamic JSON blobs pushed by
//! snitches (`latest_data`, op state strings) are kept as opaque
//! `serde_json::Value` — they are not schema-strict at this layer.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod form;
mod request;
mod response;
mod status;

pub use form::{form_decode, form_encode, get_field, get_json_field, FormError, FormMap};
pub use request::{
    encode_with_secret, with_secret, AddSlavesRequest, CleanRequest, JobStartRequest,
    LaunchRequest, OpStatusRequest, ReportFailRequest, StatusUpdateRequest, SubmitJobRequest,
    TransferRequest,
};
pub use response::{OkFailed, ResultOk, SnitchStatusResponse, TransferResponse};
pub use status::{ClusterStatusResponse, InstanceSummary, OperationSummary};

#[cfg(test)]
mod wire_tests;
