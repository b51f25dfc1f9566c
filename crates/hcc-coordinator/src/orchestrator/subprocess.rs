// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! The object-storage CLI and Hadoop binaries, invoked as subprocesses
//! (spec.md §1 scope note (b)): deliberately out of scope as a *backend*,
//! modeled here as a trait so `launch_sequence`'s staging calls and
//! `launch_jt`'s detached `HadoopMonitor` fork are both testable without
//! actually shelling out.

use async_trait::async_trait;

/// One subprocess invocation's outcome: `true` iff it exited zero,
/// mirroring `subprocess.call(...) == 0` in the original.
#[async_trait]
pub trait SubprocessRunner: Send + Sync + 'static {
    /// Run `argv` to completion and report success.
    async fn call(&self, argv: &[&str]) -> bool;

    /// Run a shell command string to completion (used for the `tar czf
    /// ... | gsutil cp` style pipeline) and report success.
    async fn call_shell(&self, command: &str) -> bool;

    /// Fork a long-running process fully detached, with stdout/stderr
    /// redirected to `log_path` — used for the Java `HadoopMonitor`
    /// (spec.md §4.6.2) and submitted MapReduce jobs. Fire-and-forget: the
    /// caller never learns whether it eventually exits zero.
    fn bg_exec(&self, argv: Vec<String>, log_path: String);
}

/// Shells out via `tokio::process::Command`.
pub struct RealSubprocessRunner;

#[async_trait]
impl SubprocessRunner for RealSubprocessRunner {
    async fn call(&self, argv: &[&str]) -> bool {
        let Some((program, args)) = argv.split_first() else {
            return true;
        };
        match tokio::process::Command::new(program).args(args).status().await {
            Ok(status) => status.success(),
            Err(err) => {
                tracing::warn!(program, error = %err, "failed to spawn subprocess");
                false
            }
        }
    }

    async fn call_shell(&self, command: &str) -> bool {
        match tokio::process::Command::new("sh").arg("-c").arg(command).status().await {
            Ok(status) => status.success(),
            Err(err) => {
                tracing::warn!(command, error = %err, "failed to spawn shell command");
                false
            }
        }
    }

    fn bg_exec(&self, argv: Vec<String>, log_path: String) {
        tokio::spawn(async move {
            let Some((program, args)) = argv.split_first() else { return };
            let log = match tokio::fs::File::create(&log_path).await {
                Ok(f) => f.into_std().await,
                Err(err) => {
                    tracing::warn!(log_path, error = %err, "could not open monitor log");
                    return;
                }
            };
            let log_err = match log.try_clone() {
                Ok(f) => f,
                Err(_) => return,
            };
            let result = tokio::process::Command::new(program)
                .args(args)
                .stdout(log)
                .stderr(log_err)
                .status()
                .await;
            if let Err(err) = result {
                tracing::warn!(program, error = %err, "detached process failed to start");
            }
        });
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;

    /// Records every call made against it; `call`/`call_shell` always
    /// succeed unless a failing argv/command prefix is registered with
    /// [`FakeSubprocessRunner::fail_on`].
    #[derive(Default)]
    pub struct FakeSubprocessRunner {
        calls: Mutex<Vec<String>>,
        bg_execs: Mutex<Vec<(Vec<String>, String)>>,
        failing: Mutex<Vec<String>>,
    }

    impl FakeSubprocessRunner {
        pub fn new() -> std::sync::Arc<Self> {
            std::sync::Arc::new(Self::default())
        }

        pub fn fail_on(&self, needle: impl Into<String>) {
            self.failing.lock().push(needle.into());
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }

        pub fn bg_execs(&self) -> Vec<(Vec<String>, String)> {
            self.bg_execs.lock().clone()
        }

        fn succeeds(&self, cmd: &str) -> bool {
            !self.failing.lock().iter().any(|needle| cmd.contains(needle.as_str()))
        }
    }

    #[async_trait]
    impl SubprocessRunner for FakeSubprocessRunner {
        async fn call(&self, argv: &[&str]) -> bool {
            let joined = argv.join(" ");
            self.calls.lock().push(joined.clone());
            self.succeeds(&joined)
        }

        async fn call_shell(&self, command: &str) -> bool {
            self.calls.lock().push(command.to_string());
            self.succeeds(command)
        }

        fn bg_exec(&self, argv: Vec<String>, log_path: String) {
            self.bg_execs.lock().push((argv, log_path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeSubprocessRunner;
    use super::*;

    #[tokio::test]
    async fn fake_runner_records_calls_and_defaults_to_success() {
        let runner = FakeSubprocessRunner::new();
        assert!(runner.call(&["wget", "http://example/hadoop.tar.gz"]).await);
        assert_eq!(runner.calls(), vec!["wget http://example/hadoop.tar.gz"]);
    }

    #[tokio::test]
    async fn fake_runner_can_be_told_to_fail_a_specific_command() {
        let runner = FakeSubprocessRunner::new();
        runner.fail_on("gsutil");
        assert!(!runner.call(&["gsutil", "cp", "a", "b"]).await);
        assert!(runner.call(&["wget", "a"]).await);
    }
}
