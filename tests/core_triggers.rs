// tests/core_triggers.rs

//! Trigger semantics of the pure core: merging unrelated triggers into the
//! active run, and queueing re-triggers for replay once the run finishes.

use sitepipe::dag::{Scheduler, pipeline_graph, registry};
use sitepipe::engine::{
    CoreCommand, CoreRuntime, CoreStep, RuntimeEvent, RuntimeOptions, TaskOutcome, TriggerReason,
};

fn watch_mode_core() -> CoreRuntime {
    let scheduler = Scheduler::new(pipeline_graph().unwrap());
    CoreRuntime::new(
        scheduler,
        RuntimeOptions {
            exit_when_idle: false,
        },
    )
}

fn dispatched(step: &CoreStep) -> Vec<String> {
    step.commands
        .iter()
        .flat_map(|c| match c {
            CoreCommand::DispatchTasks(tasks) => tasks.iter().map(|t| t.name.clone()).collect(),
            CoreCommand::RequestExit => Vec::new(),
        })
        .collect()
}

fn trigger(task: &str) -> RuntimeEvent {
    RuntimeEvent::TaskTriggered {
        task: task.to_string(),
        reason: TriggerReason::FileWatch,
    }
}

fn completed(task: &str) -> RuntimeEvent {
    RuntimeEvent::TaskCompleted {
        task: task.to_string(),
        outcome: TaskOutcome::Success,
    }
}

#[test]
fn watch_trigger_pulls_in_the_lint_prerequisite() {
    let mut core = watch_mode_core();

    let step = core.step(trigger(registry::STYLES));
    assert!(step.keep_running);
    // styles waits for its lint gate; only the gate is ready.
    assert_eq!(dispatched(&step), vec![registry::SCSS_LINT.to_string()]);
    assert!(!core.is_idle());
}

#[test]
fn unrelated_trigger_merges_into_the_active_run() {
    let mut core = watch_mode_core();

    core.step(trigger(registry::STYLES));
    let step = core.step(trigger(registry::IMAGES));

    // images has no dependencies and joins the running run immediately.
    assert_eq!(dispatched(&step), vec![registry::IMAGES.to_string()]);
    assert!(core.queue_is_empty());
}

#[test]
fn retrigger_of_a_participating_task_is_replayed_after_the_run() {
    let mut core = watch_mode_core();

    core.step(trigger(registry::STYLES));

    // A second change to the style sources while the run is active.
    let step = core.step(trigger(registry::STYLES));
    assert!(dispatched(&step).is_empty());
    assert!(!core.queue_is_empty());

    let step = core.step(completed(registry::SCSS_LINT));
    assert_eq!(dispatched(&step), vec![registry::STYLES.to_string()]);

    // Finishing the run replays the queued trigger as a fresh run, which
    // lints again from scratch.
    let step = core.step(completed(registry::STYLES));
    assert_eq!(dispatched(&step), vec![registry::SCSS_LINT.to_string()]);
    assert!(core.queue_is_empty());
    assert!(!core.is_idle());
}

#[test]
fn shutdown_stops_the_loop_without_failure() {
    let mut core = watch_mode_core();
    core.step(trigger(registry::STYLES));

    let step = core.step(RuntimeEvent::ShutdownRequested);
    assert!(!step.keep_running);
    assert!(step.failure.is_none());
}

#[test]
fn server_exit_failure_becomes_the_pipeline_failure() {
    let mut core = watch_mode_core();

    let step = core.step(RuntimeEvent::ServerExited {
        outcome: TaskOutcome::Failed(2),
    });
    assert!(!step.keep_running);
    let failure = step.failure.expect("server failure should surface");
    assert!(failure.contains("2"));

    let mut core = watch_mode_core();
    let step = core.step(RuntimeEvent::ServerExited {
        outcome: TaskOutcome::Success,
    });
    assert!(!step.keep_running);
    assert!(step.failure.is_none());
}
