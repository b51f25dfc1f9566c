// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Exit codes for the operator CLI (spec.md §6: "0 success; 1 usage
//! error, missing secret, coordinator BROKEN").
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, so `main()` is the single place deciding how the process
//! actually terminates.

use std::fmt;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// A usage error, missing secret, or coordinator-reported BROKEN
    /// state — the one non-zero code this CLI ever exits with.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(FAILURE, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_uses_the_documented_usage_error_code() {
        let err = ExitError::failure("bad usage");
        assert_eq!(err.code, FAILURE);
        assert_eq!(err.to_string(), "bad usage");
    }

    #[test]
    fn downcasts_cleanly_through_anyhow() {
        let wrapped: anyhow::Error = ExitError::new(3, "custom").into();
        let exit_err = wrapped.downcast::<ExitError>().expect("downcasts back to ExitError");
        assert_eq!(exit_err.code, 3);
    }
}
