// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use tracing::{debug, error, info};

use crate::dag::registry;
use crate::dag::{RunState, ScheduledTask, Scheduler};
use crate::engine::queue::TriggerQueue;
use crate::engine::{RuntimeOptions, TaskName, TaskOutcome, TriggerReason};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Send these tasks to the executor.
    DispatchTasks(Vec<ScheduledTask>),
    /// Request that the process exits.
    RequestExit,
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
    /// When the loop is asked to stop because something failed, this carries
    /// the message that becomes the process's own error.
    pub failure: Option<String>,
}

impl CoreStep {
    fn running(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
            failure: None,
        }
    }
}

/// Handle a task trigger event.
///
/// - If the scheduler is idle, a new run starts, seeded with this trigger
///   plus anything that was already queued.
/// - If a run is active:
///   - a trigger for a task already participating in this run is queued and
///     replayed when the run finishes (results are memoized per run);
///   - a trigger for a task *not* in the current run merges into it, so
///     unrelated asset tasks share the run and execute concurrently.
pub fn handle_task_trigger(
    scheduler: &mut Scheduler,
    queue: &mut TriggerQueue,
    task: TaskName,
    reason: TriggerReason,
) -> CoreStep {
    debug!(task = %task, ?reason, "handling trigger");
    let mut commands = Vec::new();

    if scheduler.is_idle() {
        let mut targets = queue.drain_pending();
        if !targets.contains(&task) {
            targets.push(task);
        }

        match scheduler.start_run(&targets) {
            Ok(step) => push_dispatch(&mut commands, step.newly_running),
            Err(err) => error!(?targets, error = %err, "could not start run"),
        }
        return CoreStep::running(commands);
    }

    if scheduler.in_current_run(&task) {
        queue.record_trigger(&task);
    } else {
        match scheduler.merge_targets(&[task.clone()]) {
            Ok(step) => push_dispatch(&mut commands, step.newly_running),
            Err(err) => error!(task = %task, error = %err, "could not merge trigger into run"),
        }
    }

    CoreStep::running(commands)
}

/// Handle a task completion event.
pub fn handle_task_completion(
    scheduler: &mut Scheduler,
    queue: &mut TriggerQueue,
    options: &RuntimeOptions,
    task: TaskName,
    outcome: TaskOutcome,
) -> CoreStep {
    let step = scheduler.handle_completion(&task, outcome);
    let mut commands = Vec::new();
    push_dispatch(&mut commands, step.newly_running);

    if step.run_finished {
        if step.run_failed && website_was_abandoned(scheduler) {
            // The run that was supposed to start the preview server failed
            // before the server ever came up. Nothing left to supervise.
            error!("website build failed; preview server was never started");
            commands.push(CoreCommand::RequestExit);
            return CoreStep {
                commands,
                keep_running: false,
                failure: Some("website build failed".to_string()),
            };
        }

        // Replay triggers that were queued while this run was active.
        commands.extend(maybe_start_queued_run(scheduler, queue));
    }

    if options.exit_when_idle && scheduler.is_idle() && queue.is_empty() {
        commands.push(CoreCommand::RequestExit);
        let failure = step
            .run_failed
            .then(|| "one or more tasks failed".to_string());
        return CoreStep {
            commands,
            keep_running: false,
            failure,
        };
    }

    CoreStep::running(commands)
}

/// Handle the preview server exiting.
///
/// The server is the reason website mode stays alive; once it is gone the
/// runtime stops, forwarding the server's exit status as its own.
pub fn handle_server_exited(outcome: TaskOutcome) -> CoreStep {
    let failure = match outcome {
        TaskOutcome::Success => {
            info!("preview server exited");
            None
        }
        TaskOutcome::Failed(code) => {
            error!(exit_code = code, "preview server failed");
            Some(format!("preview server exited with code {code}"))
        }
    };

    CoreStep {
        commands: vec![CoreCommand::RequestExit],
        keep_running: false,
        failure,
    }
}

/// If the scheduler is idle and there are queued triggers, start a new run.
fn maybe_start_queued_run(
    scheduler: &mut Scheduler,
    queue: &mut TriggerQueue,
) -> Vec<CoreCommand> {
    let mut commands = Vec::new();

    if !scheduler.is_idle() {
        return commands;
    }

    let triggers = queue.drain_pending();
    if triggers.is_empty() {
        return commands;
    }

    info!(?triggers, "replaying queued triggers as a new run");
    match scheduler.start_run(&triggers) {
        Ok(step) => push_dispatch(&mut commands, step.newly_running),
        Err(err) => error!(?triggers, error = %err, "could not start queued run"),
    }

    commands
}

/// Whether the finished run included the website task and it did not succeed.
///
/// Only the initial website run ever contains this task; watch-triggered
/// runs seed asset tasks directly.
fn website_was_abandoned(scheduler: &Scheduler) -> bool {
    matches!(
        scheduler.state_of(registry::WEBSITE),
        Some(RunState::Failed)
    )
}

fn push_dispatch(commands: &mut Vec<CoreCommand>, tasks: Vec<ScheduledTask>) {
    if !tasks.is_empty() {
        commands.push(CoreCommand::DispatchTasks(tasks));
    }
}
