// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `hcc`: the operator CLI. Parses arguments, loads local configuration
//! (coordinator address + shared secret), and dispatches to one
//! `commands::*::handle` per subcommand. Every command returns
//! `anyhow::Result<()>`; `ExitError` is the one error variant `main`
//! downcasts for a specific process exit code, matching the teacher's
//! split between library-crate `thiserror` and CLI-crate `anyhow`.

mod cli;
mod client;
mod commands;
mod config;
mod exit_code;
mod output;

use clap::Parser;

use cli::{Cli, Command, JobCommand};
use client::CoordinatorClient;
use config::CliConfig;
use exit_code::ExitError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => std::process::exit(exit_code::SUCCESS),
        Err(err) => match err.downcast::<ExitError>() {
            Ok(exit_err) => {
                if !exit_err.message.is_empty() {
                    eprintln!("{exit_err}");
                }
                std::process::exit(exit_err.code);
            }
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(exit_code::FAILURE);
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;

    // `gen-secret` doesn't need a coordinator or an existing secret yet.
    if matches!(cli.command, Command::GenSecret) {
        return commands::gen_secret::handle();
    }

    let config = CliConfig::load().map_err(|err| ExitError::failure(err.to_string()))?;
    let client = CoordinatorClient::new(&config);

    match cli.command {
        Command::GenSecret => unreachable!("handled above"),
        Command::Launch { num_slaves } => commands::launch::handle(&client, num_slaves, format).await,
        Command::AddSlaves { num_slaves } => commands::add_slaves::handle(&client, num_slaves, format).await,
        Command::Transfer { src, dst } => commands::transfer::handle(&client, src, dst, format).await,
        Command::Upload { path, hdfs_path } => {
            commands::upload::handle(&client, &config.gs_bucket, path, hdfs_path, format).await
        }
        Command::Download { hdfs_src, gs_dst } => {
            commands::download::handle(&client, &config.gs_bucket, hdfs_src, gs_dst, format).await
        }
        Command::Submit { jar, job_args } => {
            commands::submit::handle(&client, &config.gs_bucket, jar, job_args, format).await
        }
        Command::Job { job: JobCommand::Terasort { phase } } => {
            commands::job::handle_terasort(&client, &config.gs_bucket, phase, format).await
        }
        Command::Clean { force, path } => commands::clean::handle(&client, path, force, format).await,
        Command::Status => commands::status::handle(&client, format).await,
        Command::Teardown { yes } => commands::teardown::handle(&client, yes).await,
        Command::Wait => commands::wait::handle(&client).await,
        Command::Tunnel => commands::tunnel::handle(&config.project_id, &config.zone).await,
    }
}
