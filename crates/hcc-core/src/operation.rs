// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Long-running in-cluster operations (currently only HDFS<->bucket
//! transfers), identified by a monotonic `xfer_<N>` id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation id of the form `xfer_<N>`. Unlike the random, prefixed IDs
/// used elsewhere in systems of this shape, operation ids are a plain
/// monotonic counter — the source of truth is `OperationRegistry`'s
/// counter, not randomness, so `OperationId` is a thin newtype over `u64`
/// rather than a generated-id type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(pub u64);

impl OperationId {
    pub fn new(n: u64) -> Self {
        Self(n)
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xfer_{}", self.0)
    }
}

impl std::str::FromStr for OperationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s.strip_prefix("xfer_").unwrap_or(s);
        n.parse().map(OperationId)
    }
}

/// An in-flight or completed long-running operation.
///
/// `state` is a free-form string pushed by the NameNode snitch; the
/// terminal value is the literal `"Done"`. Operations are never
/// garbage-collected within a coordinator's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub operation: OperationId,
    pub state: String,
    pub src: Option<String>,
    pub dst: Option<String>,
}

impl Operation {
    pub fn requested(operation: OperationId, src: String, dst: String) -> Self {
        Self { operation, state: "Requested".to_string(), src: Some(src), dst: Some(dst) }
    }

    pub fn is_done(&self) -> bool {
        self.state == "Done"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_xfer_format() {
        assert_eq!(OperationId::new(0).to_string(), "xfer_0");
        assert_eq!(OperationId::new(41).to_string(), "xfer_41");
    }

    #[test]
    fn from_str_round_trips() {
        let id: OperationId = "xfer_7".parse().unwrap();
        assert_eq!(id, OperationId::new(7));
    }

    #[test]
    fn done_state_is_terminal() {
        let mut op = Operation::requested(OperationId::new(0), "/a".into(), "/b".into());
        assert!(!op.is_done());
        op.state = "Done".to_string();
        assert!(op.is_done());
    }
}
