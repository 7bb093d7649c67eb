// src/exec/executor_loop.rs

//! Main executor loop that picks up scheduled tasks.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::dag::ScheduledTask;
use crate::engine::RuntimeEvent;
use crate::exec::step_runner::run_step;
use crate::steps::StepContext;

/// Spawn the background executor loop.
///
/// The returned `mpsc::Sender<ScheduledTask>` is what the runtime (via
/// `RealExecutorBackend`) uses to hand over ready tasks. Each scheduled task
/// runs in its own Tokio task; the scheduler never dispatches the same task
/// name twice within a run, so no per-name bookkeeping is needed here.
pub fn spawn_executor(
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    ctx: Arc<StepContext>,
) -> mpsc::Sender<ScheduledTask> {
    let (tx, mut rx) = mpsc::channel::<ScheduledTask>(32);

    tokio::spawn(async move {
        info!("executor loop started");

        while let Some(task) = rx.recv().await {
            let ctx = Arc::clone(&ctx);
            let rt_tx = runtime_tx.clone();
            tokio::spawn(async move {
                run_step(task, ctx, rt_tx).await;
            });
        }

        info!("executor loop finished (channel closed)");
    });

    tx
}
