// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Shared text/JSON rendering helpers, matching the teacher's split
//! between `OutputFormat` and format-branching print helpers.

use clap::ValueEnum;
use hcc_core::InstanceState;
use hcc_wire::ClusterStatusResponse;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format-branch helper for single-value commands: JSON when requested,
/// otherwise run `text_fn`.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => text_fn(),
    }
    Ok(())
}

/// `tools/common.py:pprint_status`: hadoop telemetry block, operations
/// block, errors (if any), then instances grouped worst-state-first,
/// columnized, and finally the one-line summary + cluster state.
pub fn print_cluster_status(status: &ClusterStatusResponse) {
    println!("=== Hadoop data ({} seconds old) ===", status.hadoop_staleness);
    println!("{}", serde_json::to_string_pretty(&status.hadoop_data).unwrap_or_default());
    println!();

    println!("=== Upload/download operations ===");
    for (id, op) in &status.operations {
        println!("{id}: {} ({:?} -> {:?})", op.state, op.src, op.dst);
    }
    println!();

    if !status.errors.is_empty() {
        println!("=== Instance errors ===");
        for msg in &status.errors {
            println!("{msg}");
        }
        println!();
    }

    for state in InstanceState::display_order() {
        let key = state.to_string();
        let Some(names) = status.instances.get(&key) else { continue };
        println!("=== {key} ===");
        println!("{}", columnize(names));
        println!();
    }

    println!("Summary: {}", status.summary);
    println!("Cluster state: {}", status.state);
}

/// `tools/common.py:columnize`: left-to-right, top-to-bottom, wrapped at
/// 80 columns, every entry padded to the widest entry's width.
pub fn columnize(raw_entries: &[String]) -> String {
    if raw_entries.is_empty() {
        return String::new();
    }
    let width = raw_entries.iter().map(|s| s.len()).max().unwrap_or(0);
    let padded: Vec<String> = raw_entries.iter().map(|s| format!("{:<width$}", s, width = width)).collect();

    let mut lines = Vec::new();
    let mut line = String::new();
    for entry in &padded {
        let candidate = if line.is_empty() { entry.clone() } else { format!("{line}  {entry}") };
        if candidate.len() > 80 && !line.is_empty() {
            lines.push(line.trim_end().to_string());
            line = entry.clone();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columnize_pads_entries_to_the_widest_width() {
        let entries = vec!["a".to_string(), "bb".to_string(), "ccc".to_string()];
        let out = columnize(&entries);
        assert_eq!(out, "a    bb   ccc");
    }

    #[test]
    fn columnize_wraps_at_eighty_columns() {
        let entries: Vec<String> = (0..20).map(|i| format!("hadoop-slave-{i:03}")).collect();
        let out = columnize(&entries);
        assert!(out.lines().all(|line| line.len() <= 80));
        assert!(out.lines().count() > 1);
    }

    #[test]
    fn columnize_of_empty_list_is_empty() {
        assert_eq!(columnize(&[]), "");
    }
}
