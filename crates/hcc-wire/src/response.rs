// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Reply bodies. Every reply is a single JSON line (spec.md §4.7: "JSON
//! lines terminated by `\n`").

use serde::{Deserialize, Serialize};

/// The `{"result": "ok"|"failed"}` shape every "do-something" public
/// endpoint replies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OkFailed {
    Ok,
    Failed,
}

impl OkFailed {
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            OkFailed::Ok
        } else {
            OkFailed::Failed
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, OkFailed::Ok)
    }
}

/// `{"result": "ok"|"failed"}` wrapper, the literal reply shape of
/// `reply_ok()` in the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultOk {
    pub result: OkFailed,
}

impl ResultOk {
    pub fn ok(ok: bool) -> Self {
        Self { result: OkFailed::from_bool(ok) }
    }
}

/// Reply to `POST /transfer`: `{result, operation, src, dst, state}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResponse {
    pub result: OkFailed,
    pub operation: String,
    pub src: String,
    pub dst: String,
    pub state: String,
}

/// Reply from a snitch's `GET /status`. `state` is free-form on the wire
/// ("STARTING", "READY", or anything else, which is interpreted as BROKEN
/// by `get_status`); kept as a plain string rather than an enum because
/// the coordinator must accept any unrecognized value as a failure signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnitchStatusResponse {
    pub state: String,
}

impl SnitchStatusResponse {
    pub const STARTING: &'static str = "STARTING";
    pub const READY: &'static str = "READY";

    pub fn is_ready(&self) -> bool {
        self.state == Self::READY
    }

    pub fn is_starting(&self) -> bool {
        self.state == Self::STARTING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_ok_serializes_to_lowercase() {
        let json = serde_json::to_string(&ResultOk::ok(true)).unwrap();
        assert_eq!(json, r#"{"result":"ok"}"#);
        let json = serde_json::to_string(&ResultOk::ok(false)).unwrap();
        assert_eq!(json, r#"{"result":"failed"}"#);
    }

    #[test]
    fn snitch_status_classifies_unknown_states_as_not_ready() {
        let status = SnitchStatusResponse { state: "FAILED".to_string() };
        assert!(!status.is_ready());
        assert!(!status.is_starting());
    }
}
