// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Handlers for every endpoint in spec.md §6: one function per route,
//! each doing its own `authorize_public`/`authorize_internal` check before
//! touching the orchestrator.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hcc_wire::{
    AddSlavesRequest, CleanRequest, LaunchRequest, OpStatusRequest, OperationSummary,
    OkFailed, ReportFailRequest, ResultOk, StatusUpdateRequest, SubmitJobRequest,
    TransferRequest, TransferResponse,
};
use hcc_wire::FormMap;

use super::auth::{authorize_internal, authorize_public, Unauthorized};
use super::AppState;

type FormBody = axum::Form<FormMap>;

fn unauthorized() -> Response {
    StatusCode::UNAUTHORIZED.into_response()
}

fn bad_request(err: impl std::fmt::Display) -> Response {
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}

fn require_public(state: &AppState, form: &FormMap, path: &str, peer: SocketAddr) -> Result<(), Response> {
    authorize_public(&state.secret, form, path, peer).map_err(|Unauthorized| unauthorized())
}

fn require_internal(peer: SocketAddr, path: &str) -> Result<(), Response> {
    authorize_internal(peer, path).map_err(|Unauthorized| unauthorized())
}

/// `GET /status` — liveness probe, not auth-guarded: just confirms the
/// control plane itself is up and answering.
pub async fn liveness(State(_state): State<AppState>) -> Response {
    #[derive(serde::Serialize)]
    struct Liveness {
        state: &'static str,
    }
    Json(Liveness { state: "READY" }).into_response()
}

/// `POST /hadoop/launch`
pub async fn launch(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_public(&state, &form, "/hadoop/launch", peer) {
        return resp;
    }
    let req = match LaunchRequest::from_form(&form) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    let ok = state.orchestrator.launch(req.num_slaves);
    Json(ResultOk::ok(ok)).into_response()
}

/// `POST /hadoop/add_slaves`
pub async fn add_slaves(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_public(&state, &form, "/hadoop/add_slaves", peer) {
        return resp;
    }
    let req = match AddSlavesRequest::from_form(&form) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    let ok = state.orchestrator.add_slaves(req.num_slaves);
    Json(ResultOk::ok(ok)).into_response()
}

/// `POST /hadoop/teardown` — supplement noted in SPEC_FULL.md: spec.md's
/// endpoint table omits this despite specifying `Orchestrator::teardown`.
pub async fn teardown(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_public(&state, &form, "/hadoop/teardown", peer) {
        return resp;
    }
    state.orchestrator.teardown();
    Json(ResultOk::ok(true)).into_response()
}

/// `POST /transfer`
pub async fn transfer(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_public(&state, &form, "/transfer", peer) {
        return resp;
    }
    let req = match TransferRequest::from_form(&form) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    match state.orchestrator.transfer(&req.src, &req.dst).await {
        Some(op) => Json(TransferResponse {
            result: OkFailed::Ok,
            operation: op.operation.to_string(),
            src: op.src.unwrap_or(req.src),
            dst: op.dst.unwrap_or(req.dst),
            state: op.state,
        })
        .into_response(),
        None => Json(ResultOk::ok(false)).into_response(),
    }
}

/// `POST /job/clean`
pub async fn clean(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_public(&state, &form, "/job/clean", peer) {
        return resp;
    }
    let req = match CleanRequest::from_form(&form) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    let ok = state.orchestrator.clean_hdfs(&req.path).await;
    Json(ResultOk::ok(ok)).into_response()
}

/// `POST /job/submit`
pub async fn submit(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_public(&state, &form, "/job/submit", peer) {
        return resp;
    }
    let req = match SubmitJobRequest::from_form(&form) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    match state.orchestrator.submit_job(&req.jar, &req.job_args).await {
        Ok(ok) => Json(ResultOk::ok(ok)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "job submission failed");
            Json(ResultOk::ok(false)).into_response()
        }
    }
}

/// `POST /status/cluster`
pub async fn status_cluster(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_public(&state, &form, "/status/cluster", peer) {
        return resp;
    }
    let snapshot = state.orchestrator.instances().snapshot();
    let operations = state.orchestrator.operations().all();
    let (hadoop_data, hadoop_staleness) = state.orchestrator.telemetry.snapshot();
    let resp = hcc_wire::ClusterStatusResponse::build(
        snapshot.cluster_state,
        &snapshot.instances,
        snapshot.errors,
        hadoop_staleness,
        hadoop_data,
        &operations,
    );
    Json(resp).into_response()
}

/// `POST /status/op/<name>`
pub async fn status_op(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(name): Path<String>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_public(&state, &form, "/status/op", peer) {
        return resp;
    }
    let op = state
        .orchestrator
        .operations()
        .all()
        .into_iter()
        .find(|op| op.operation.to_string() == name);
    match op {
        Some(op) => Json(OperationSummary::from(&op)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Internal: `POST /hadoop/status_update`, pushed by `HadoopMonitor`.
pub async fn hadoop_status_update(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_internal(peer, "/hadoop/status_update") {
        return resp;
    }
    let req = match StatusUpdateRequest::from_form(&form) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    state.orchestrator.telemetry.record(req.data);
    Json(ResultOk::ok(true)).into_response()
}

/// Internal: `POST /instance/report_fail`, pushed by any snitch that
/// detects a non-fatal problem (spec.md §7).
pub async fn report_fail(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_internal(peer, "/instance/report_fail") {
        return resp;
    }
    let req = match ReportFailRequest::from_form(&form) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    state.orchestrator.instances().record_failure(&req.name, &req.msg);
    Json(ResultOk::ok(true)).into_response()
}

/// Internal: `POST /instance/op_status`, pushed by the NameNode snitch as
/// a transfer progresses.
pub async fn op_status(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    FormBody(form): FormBody,
) -> Response {
    if let Err(resp) = require_internal(peer, "/instance/op_status") {
        return resp;
    }
    let req = match OpStatusRequest::from_form(&form) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    let Ok(id) = req.operation.parse::<hcc_core::OperationId>() else {
        return bad_request("malformed operation id");
    };
    state.orchestrator.operations().set_state(id, req.state);
    Json(ResultOk::ok(true)).into_response()
}
