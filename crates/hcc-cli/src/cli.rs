// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! Command-line surface: one `hcc` binary, one subcommand per operator
//! tool from `tools/*.py` plus the control-plane verbs spec.md §6 names
//! directly.

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "hcc", about = "Operator CLI for the Hadoop cluster coordinator", version)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch a fresh cluster with the given number of slaves.
    Launch { num_slaves: u32 },
    /// Add slaves to an already-launched cluster.
    AddSlaves { num_slaves: u32 },
    /// Transfer a file directly between two already-resolved locations.
    Transfer { src: String, dst: String },
    /// Upload a local (or `gs://`) file into HDFS.
    Upload {
        path: String,
        /// Destination path in HDFS; defaults to a generated `/job_input/<id>/<name>`.
        #[arg(long)]
        hdfs_path: Option<String>,
    },
    /// Export a file from HDFS to Google Cloud Storage.
    Download { hdfs_src: String, gs_dst: String },
    /// Submit a MapReduce job jar with arguments.
    Submit { jar: String, job_args: Vec<String> },
    /// Standard Hadoop benchmark jobs.
    Job {
        #[command(subcommand)]
        job: JobCommand,
    },
    /// Delete data from HDFS.
    Clean {
        /// Required: confirms you mean to delete cluster data.
        #[arg(short = 'f', long)]
        force: bool,
        path: String,
    },
    /// Print the cluster's current status.
    Status,
    /// Delete every instance in the cluster.
    Teardown {
        /// Skip the interactive confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Generate a fresh shared secret and write it to the local `secret` file.
    GenSecret,
    /// Block until the cluster is READY (or fail if it reaches BROKEN).
    Wait,
    /// Open SSH tunnels to the JobTracker and NameNode web UIs.
    Tunnel,
}

#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// TeraSort benchmark: 1 = teragen, 2 = terasort, 3 = teravalidate.
    Terasort { phase: u8 },
}
