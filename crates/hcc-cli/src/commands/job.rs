// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `hcc job terasort {1,2,3}` — `tools/job_terasort.py`: phase 1
//! generates data, phase 2 sorts it, phase 3 validates the sort.

use anyhow::Result;
use hcc_core::config::HADOOP_VERSION;

use crate::client::CoordinatorClient;
use crate::exit_code::ExitError;
use crate::output::OutputFormat;

const NUM_TASKS: u32 = 100;

pub async fn handle_terasort(
    client: &CoordinatorClient,
    gs_bucket: &str,
    phase: u8,
    format: OutputFormat,
) -> Result<()> {
    let jar_name = format!("hadoop-examples-{HADOOP_VERSION}.jar");
    if !std::path::Path::new(&jar_name).exists() {
        let tarball = format!("hadoop-{HADOOP_VERSION}.tar.gz");
        println!(
            "You need {jar_name}, which contains the Terasort MapReduce job, in your current directory."
        );
        println!("Please run the following commands to get it, then re-run this script.");
        println!();
        println!("wget https://archive.apache.org/dist/hadoop/core/hadoop-{HADOOP_VERSION}/{tarball}");
        println!("tar xzf {tarball}");
        println!("cp hadoop-{HADOOP_VERSION}/{jar_name} .");
        return Err(ExitError::failure(format!("{jar_name} not found")).into());
    }

    let job_args: Vec<String> = match phase {
        1 => {
            let gigabytes: u64 = 1000;
            let hundred_bytes = gigabytes * 10_000_000;
            vec![
                "teragen".to_string(),
                format!("-Dmapred.map.tasks={NUM_TASKS}"),
                hundred_bytes.to_string(),
                "/job_input/terasort".to_string(),
            ]
        }
        2 => vec![
            "terasort".to_string(),
            format!("-Dmapred.reduce.tasks={NUM_TASKS}"),
            "/job_input/terasort".to_string(),
            "/job_output/terasort".to_string(),
        ],
        3 => vec!["teravalidate".to_string(), "/job_output/terasort".to_string(), "/job_output/teravalidate".to_string()],
        other => return Err(ExitError::failure(format!("unknown terasort phase {other}; use 1, 2, or 3")).into()),
    };

    super::submit::handle(client, gs_bucket, jar_name, job_args, format).await
}
