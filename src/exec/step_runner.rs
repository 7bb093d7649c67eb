// src/exec/step_runner.rs

//! Individual step runner.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::dag::ScheduledTask;
use crate::engine::{RuntimeEvent, TaskOutcome};
use crate::errors::PipelineError;
use crate::steps::{self, StepContext};

/// Run a single step and report a `TaskCompleted` event with its outcome.
///
/// A failing step never takes the runtime down; the error is logged here and
/// surfaces through the scheduler as a failed task.
pub async fn run_step(
    task: ScheduledTask,
    ctx: Arc<StepContext>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    info!(task = %task.name, run_id = task.run_id, "starting task");

    let outcome = match steps::run(task.step, &ctx, &runtime_tx).await {
        Ok(()) => {
            info!(task = %task.name, run_id = task.run_id, "task finished");
            TaskOutcome::Success
        }
        Err(err) => {
            error!(task = %task.name, run_id = task.run_id, error = %err, "task failed");
            TaskOutcome::Failed(exit_code(&err))
        }
    };

    if runtime_tx
        .send(RuntimeEvent::TaskCompleted {
            task: task.name.clone(),
            outcome,
        })
        .await
        .is_err()
    {
        debug!(task = %task.name, "runtime channel closed before completion could be reported");
    }
}

/// Exit code a failed step contributes to the run.
///
/// Tool failures keep the underlying tool's exit code; everything else (IO
/// errors, spawn failures) maps to -1, mirroring a killed process.
fn exit_code(err: &PipelineError) -> i32 {
    match err {
        PipelineError::Tool { code, .. } => *code,
        _ => -1,
    }
}
