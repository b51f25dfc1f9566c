// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! End-to-end wire round-trips: encode a request the way a caller would,
//! decode it the way the control plane would.

use crate::form::{form_decode, form_encode};
use crate::request::{self, AddSlavesRequest, LaunchRequest, SubmitJobRequest, TransferRequest};
use crate::response::{OkFailed, ResultOk, TransferResponse};

#[test]
fn launch_request_survives_a_real_wire_round_trip() {
    let req = LaunchRequest { num_slaves: 3 };
    let wire = request::encode_with_secret(req.to_form(), "shh");
    let decoded = form_decode(&wire).unwrap();
    assert_eq!(decoded.get("secret").unwrap(), "shh");
    assert_eq!(LaunchRequest::from_form(&decoded).unwrap(), req);
}

#[test]
fn add_slaves_request_survives_a_real_wire_round_trip() {
    let req = AddSlavesRequest { num_slaves: 2 };
    let wire = form_encode(&req.to_form());
    let decoded = form_decode(&wire).unwrap();
    assert_eq!(AddSlavesRequest::from_form(&decoded).unwrap(), req);
}

#[test]
fn transfer_request_with_operation_round_trips() {
    let req = TransferRequest {
        src: "/hdfs/job_input/x".to_string(),
        dst: "gs://bucket/x".to_string(),
        operation: Some("xfer_4".to_string()),
    };
    let decoded = TransferRequest::from_form(&form_decode(&form_encode(&req.to_form())).unwrap()).unwrap();
    assert_eq!(decoded, req);
}

#[test]
fn submit_job_request_preserves_argv_order() {
    let req = SubmitJobRequest {
        jar: "gs://bucket/hadoop-tools.jar".to_string(),
        job_args: vec!["teragen".to_string(), "10000000".to_string(), "/job_input/terasort-in".to_string()],
    };
    let decoded = SubmitJobRequest::from_form(&form_decode(&form_encode(&req.to_form())).unwrap()).unwrap();
    assert_eq!(decoded, req);
}

#[test]
fn transfer_response_reports_ok_on_success() {
    let resp = TransferResponse {
        result: OkFailed::Ok,
        operation: "xfer_0".to_string(),
        src: "/hdfs/x".to_string(),
        dst: "gs://b/x".to_string(),
        state: "Requested".to_string(),
    };
    let json = serde_json::to_string(&resp).unwrap();
    assert!(json.contains(r#""result":"ok""#));
    assert!(json.contains(r#""operation":"xfer_0""#));
}

#[test]
fn result_ok_reports_failed_when_constructed_false() {
    assert_eq!(ResultOk::ok(false).result, OkFailed::Failed);
}
