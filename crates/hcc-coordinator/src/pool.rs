// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 The Hadoop Cluster Coordinator Authors

//! `WorkerPool` (spec.md §4.1): a fixed-size executor over an unbounded
//! FIFO queue of boxed async closures. Two instances live on
//! [`crate::orchestrator::Orchestrator`]: the *spawn pool* (size `N`) for
//! IaaS-quota-sensitive `Insert` calls, and the *ops pool* (size `2N`) for
//! monitoring/deletion/slave-phase-2 polling.
//!
//! Implementation note (SPEC_FULL.md §4.1): the source's native OS-thread
//! pool is modeled here as a fixed set of long-lived Tokio tasks draining
//! an unbounded `tokio::sync::mpsc` channel of boxed futures — the async
//! analogue that keeps "non-blocking submission, no back-pressure, tasks
//! report via side effects" while using the runtime the rest of the crate
//! already runs on.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

type BoxedTask = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A bounded-worker-count executor. Submission never blocks; there is no
/// back-pressure beyond the channel's natural unboundedness (spec.md
/// §4.1). Workers are daemon-like: they run for the lifetime of the
/// `WorkerPool` and are aborted when it is dropped.
pub struct WorkerPool {
    sender: mpsc::UnboundedSender<BoxedTask>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` worker tasks, all draining the same queue.
    pub fn new(size: usize, name: &'static str) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel::<BoxedTask>();
        let receiver = std::sync::Arc::new(tokio::sync::Mutex::new(receiver));
        let mut workers = Vec::with_capacity(size);
        for worker_id in 0..size {
            let receiver = receiver.clone();
            workers.push(tokio::spawn(async move {
                loop {
                    let task = {
                        let mut receiver = receiver.lock().await;
                        receiver.recv().await
                    };
                    let Some(task) = task else {
                        // Sender side gone: the pool is being torn down.
                        break;
                    };
                    // A panicking task cannot take down this worker loop:
                    // `tokio::spawn`'s own unwind boundary catches it.
                    let pool = name;
                    if let Err(panic) = tokio::spawn(task).await {
                        tracing::error!(pool, worker_id, ?panic, "task panicked");
                    }
                }
            }));
        }
        Self { sender, workers }
    }

    /// Enqueue a task. Never blocks; tasks report via side effects
    /// (registry writes, outbound REST) rather than a result channel
    /// (spec.md §4.1).
    pub fn submit<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // The only way `send` fails is if every worker task has exited,
        // which only happens after `shutdown`; dropping the task here
        // mirrors a pool that's already gone away.
        let _ = self.sender.send(Box::pin(fut));
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for worker in &self.workers {
            worker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn submitted_tasks_all_run() {
        let pool = WorkerPool::new(4, "test-pool");
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..50 {
            let counter = counter.clone();
            pool.submit(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 50);
    }

    #[tokio::test]
    async fn a_panicking_task_does_not_stop_the_pool() {
        let pool = WorkerPool::new(2, "test-pool");
        let counter = Arc::new(AtomicUsize::new(0));

        pool.submit(async {
            panic!("boom");
        });

        let counter2 = counter.clone();
        pool.submit(async move {
            counter2.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
