// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `latest_data` / `last_update`: the opaque telemetry blob pushed by
//! `HadoopMonitor` to `/hadoop/status_update`, and the staleness it
//! implies for `/status/cluster` (spec.md §6, §9 Design Note "Dynamic JSON
//! blobs from snitches").

use std::time::Instant;

use parking_lot::Mutex;

struct State {
    latest_data: serde_json::Value,
    last_update: Option<Instant>,
}

pub struct HadoopTelemetry {
    state: Mutex<State>,
}

impl HadoopTelemetry {
    pub fn new() -> Self {
        Self { state: Mutex::new(State { latest_data: serde_json::json!({}), last_update: None }) }
    }

    pub fn record(&self, data: serde_json::Value) {
        let mut state = self.state.lock();
        state.latest_data = data;
        state.last_update = Some(Instant::now());
    }

    /// `(latest_data, staleness_secs)`. Staleness is `0` before any push
    /// has ever arrived, matching `cluster.last_update` starting at `0`.
    pub fn snapshot(&self) -> (serde_json::Value, u64) {
        let state = self.state.lock();
        let staleness = state.last_update.map(|t| t.elapsed().as_secs()).unwrap_or(0);
        (state.latest_data.clone(), staleness)
    }
}

impl Default for HadoopTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_telemetry_has_zero_staleness_and_empty_data() {
        let telemetry = HadoopTelemetry::new();
        let (data, staleness) = telemetry.snapshot();
        assert_eq!(data, serde_json::json!({}));
        assert_eq!(staleness, 0);
    }

    #[test]
    fn recording_replaces_the_data_and_resets_staleness() {
        let telemetry = HadoopTelemetry::new();
        telemetry.record(serde_json::json!({"jobs_running": 2}));
        let (data, staleness) = telemetry.snapshot();
        assert_eq!(data, serde_json::json!({"jobs_running": 2}));
        assert_eq!(staleness, 0);
    }
}
