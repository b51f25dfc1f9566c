// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Request bodies for the public and internal control-plane endpoints
//! (spec.md §6) and the outbound snitch contract. Each type round-trips
//! through the form encoding in [`crate::form`].

use crate::form::{form_encode, get_field, get_json_field, FormMap, FormError};

/// `POST /hadoop/launch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub num_slaves: u32,
}

impl LaunchRequest {
    pub fn to_form(&self) -> FormMap {
        let mut m = FormMap::new();
        m.insert("num_slaves".to_string(), self.num_slaves.to_string());
        m
    }

    pub fn from_form(m: &FormMap) -> Result<Self, FormError> {
        let num_slaves = get_field(m, "num_slaves")?
            .parse()
            .map_err(|_| FormError::MalformedPair("num_slaves".to_string()))?;
        Ok(Self { num_slaves })
    }
}

/// `POST /hadoop/add_slaves`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSlavesRequest {
    pub num_slaves: u32,
}

impl AddSlavesRequest {
    pub fn to_form(&self) -> FormMap {
        let mut m = FormMap::new();
        m.insert("num_slaves".to_string(), self.num_slaves.to_string());
        m
    }

    pub fn from_form(m: &FormMap) -> Result<Self, FormError> {
        let num_slaves = get_field(m, "num_slaves")?
            .parse()
            .map_err(|_| FormError::MalformedPair("num_slaves".to_string()))?;
        Ok(Self { num_slaves })
    }
}

/// `POST /transfer`, both the public request and the outbound call the
/// coordinator makes to the NameNode's `/transfer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub src: String,
    pub dst: String,
    /// Present only on the outbound coordinator -> NameNode call; absent on
    /// the inbound public request (the coordinator assigns it).
    pub operation: Option<String>,
}

impl TransferRequest {
    pub fn to_form(&self) -> FormMap {
        let mut m = FormMap::new();
        m.insert("src".to_string(), self.src.clone());
        m.insert("dst".to_string(), self.dst.clone());
        if let Some(op) = &self.operation {
            m.insert("operation".to_string(), op.clone());
        }
        m
    }

    pub fn from_form(m: &FormMap) -> Result<Self, FormError> {
        Ok(Self {
            src: get_field(m, "src")?.to_string(),
            dst: get_field(m, "dst")?.to_string(),
            operation: m.get("operation").cloned(),
        })
    }
}

/// `POST /job/clean`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRequest {
    pub path: String,
}

impl CleanRequest {
    pub fn to_form(&self) -> FormMap {
        let mut m = FormMap::new();
        m.insert("path".to_string(), self.path.clone());
        m
    }

    pub fn from_form(m: &FormMap) -> Result<Self, FormError> {
        Ok(Self { path: get_field(m, "path")?.to_string() })
    }
}

/// `POST /job/submit`. `job_args` travels as a JSON array encoded as a
/// string field, matching `json.dumps(job_args)` in the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitJobRequest {
    pub jar: String,
    pub job_args: Vec<String>,
}

impl SubmitJobRequest {
    pub fn to_form(&self) -> FormMap {
        let mut m = FormMap::new();
        m.insert("jar".to_string(), self.jar.clone());
        m.insert(
            "job_args".to_string(),
            serde_json::to_string(&self.job_args).unwrap_or_else(|_| "[]".to_string()),
        );
        m
    }

    pub fn from_form(m: &FormMap) -> Result<Self, FormError> {
        Ok(Self { jar: get_field(m, "jar")?.to_string(), job_args: get_json_field(m, "job_args")? })
    }
}

/// Outbound coordinator -> JobTracker `/job/start` call. `args` is the same
/// argv list, still JSON-encoded, but under the name the snitch expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStartRequest {
    pub jar: String,
    pub args: Vec<String>,
}

impl JobStartRequest {
    pub fn to_form(&self) -> FormMap {
        let mut m = FormMap::new();
        m.insert("jar".to_string(), self.jar.clone());
        m.insert("args".to_string(), serde_json::to_string(&self.args).unwrap_or_else(|_| "[]".to_string()));
        m
    }
}

/// Internal: `POST /hadoop/status_update`, pushed by `HadoopMonitor`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdateRequest {
    pub data: serde_json::Value,
}

impl StatusUpdateRequest {
    pub fn to_form(&self) -> FormMap {
        let mut m = FormMap::new();
        m.insert("data".to_string(), self.data.to_string());
        m
    }

    pub fn from_form(m: &FormMap) -> Result<Self, FormError> {
        Ok(Self { data: get_json_field(m, "data")? })
    }
}

/// Internal: `POST /instance/report_fail`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFailRequest {
    pub name: String,
    pub msg: String,
}

impl ReportFailRequest {
    pub fn to_form(&self) -> FormMap {
        let mut m = FormMap::new();
        m.insert("name".to_string(), self.name.clone());
        m.insert("msg".to_string(), self.msg.clone());
        m
    }

    pub fn from_form(m: &FormMap) -> Result<Self, FormError> {
        Ok(Self { name: get_field(m, "name")?.to_string(), msg: get_field(m, "msg")?.to_string() })
    }
}

/// Internal: `POST /instance/op_status`, pushed by the NameNode snitch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpStatusRequest {
    pub operation: String,
    pub state: String,
}

impl OpStatusRequest {
    pub fn to_form(&self) -> FormMap {
        let mut m = FormMap::new();
        m.insert("operation".to_string(), self.operation.clone());
        m.insert("state".to_string(), self.state.clone());
        m
    }

    pub fn from_form(m: &FormMap) -> Result<Self, FormError> {
        Ok(Self {
            operation: get_field(m, "operation")?.to_string(),
            state: get_field(m, "state")?.to_string(),
        })
    }
}

/// Every public request carries `secret` as a form field; this wraps an
/// already-built form map with it, mirroring `tools/common.py:send_coordinator`
/// setting `data['secret'] = cfg.secret` before every outbound call.
pub fn with_secret(mut fields: FormMap, secret: &str) -> FormMap {
    fields.insert("secret".to_string(), secret.to_string());
    fields
}

pub fn encode_with_secret(fields: FormMap, secret: &str) -> String {
    form_encode(&with_secret(fields, secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_request_round_trips() {
        let req = LaunchRequest { num_slaves: 3 };
        let decoded = LaunchRequest::from_form(&req.to_form()).unwrap();
        assert_eq!(req, decoded);
    }

    #[test]
    fn submit_job_request_round_trips_job_args() {
        let req = SubmitJobRequest { jar: "gs://b/tools.jar".to_string(), job_args: vec!["teragen".to_string(), "1000".to_string()] };
        let decoded = SubmitJobRequest::from_form(&req.to_form()).unwrap();
        assert_eq!(req, decoded);
    }

    #[test]
    fn transfer_request_operation_is_optional() {
        let req = TransferRequest { src: "/hdfs/x".to_string(), dst: "gs://b/x".to_string(), operation: None };
        let form = req.to_form();
        assert!(!form.contains_key("operation"));
        let decoded = TransferRequest::from_form(&form).unwrap();
        assert_eq!(decoded.operation, None);
    }

    #[test]
    fn with_secret_injects_the_shared_secret() {
        let form = with_secret(LaunchRequest { num_slaves: 1 }.to_form(), "s3cr3t");
        assert_eq!(form.get("secret").unwrap(), "s3cr3t");
    }
}
