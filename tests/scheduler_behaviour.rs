// tests/scheduler_behaviour.rs

//! Per-run scheduler state machine behaviour against the pipeline graph.

use sitepipe::dag::{RunState, Scheduler, pipeline_graph, registry};
use sitepipe::engine::TaskOutcome;
use sitepipe::errors::PipelineError;

fn scheduler() -> Scheduler {
    Scheduler::new(pipeline_graph().unwrap())
}

fn names(tasks: &[sitepipe::dag::ScheduledTask]) -> Vec<&str> {
    tasks.iter().map(|t| t.name.as_str()).collect()
}

#[test]
fn build_run_starts_with_clean_and_the_lint_gates() {
    let mut s = scheduler();

    let step = s.start_run(&[registry::BUILD.to_string()]).unwrap();
    let mut ready = names(&step.newly_running);
    ready.sort();

    assert_eq!(
        ready,
        vec![registry::CLEAN_ALL, registry::ESLINT, registry::SCSS_LINT]
    );
    // images is ordered after clean-all within this run.
    assert_eq!(s.state_of(registry::IMAGES), Some(RunState::Pending));
}

#[test]
fn clean_completion_releases_the_copy_task() {
    let mut s = scheduler();
    s.start_run(&[registry::BUILD.to_string()]).unwrap();

    let step = s.handle_completion(registry::CLEAN_ALL, TaskOutcome::Success);
    assert_eq!(names(&step.newly_running), vec![registry::IMAGES]);
    assert!(!step.run_finished);
}

#[test]
fn aggregate_target_waits_for_its_whole_set() {
    let mut s = scheduler();
    s.start_run(&[registry::BUILD.to_string()]).unwrap();

    for task in [
        registry::CLEAN_ALL,
        registry::SCSS_LINT,
        registry::ESLINT,
        registry::IMAGES,
        registry::STYLES,
    ] {
        let step = s.handle_completion(task, TaskOutcome::Success);
        assert!(!names(&step.newly_running).contains(&registry::BUILD));
    }

    // The last member of the set releases the aggregate.
    let step = s.handle_completion(registry::SCRIPTS, TaskOutcome::Success);
    assert_eq!(names(&step.newly_running), vec![registry::BUILD]);

    let step = s.handle_completion(registry::BUILD, TaskOutcome::Success);
    assert!(step.run_finished);
    assert!(!step.run_failed);
    assert!(s.is_idle());
}

#[test]
fn lint_failure_abandons_the_dependent_chain() {
    let mut s = scheduler();
    s.start_run(&[registry::BUILD.to_string()]).unwrap();

    let step = s.handle_completion(registry::ESLINT, TaskOutcome::Failed(1));
    assert!(step.newly_failed.contains(&registry::ESLINT.to_string()));
    assert!(step.newly_failed.contains(&registry::SCRIPTS.to_string()));
    assert!(step.newly_failed.contains(&registry::BUILD.to_string()));

    assert_eq!(s.state_of(registry::SCRIPTS), Some(RunState::Failed));
    assert_eq!(s.state_of(registry::BUILD), Some(RunState::Failed));

    // The styles branch is unaffected and keeps running.
    s.handle_completion(registry::SCSS_LINT, TaskOutcome::Success);
    assert_eq!(s.state_of(registry::STYLES), Some(RunState::Pending));

    s.handle_completion(registry::CLEAN_ALL, TaskOutcome::Success);
    s.handle_completion(registry::STYLES, TaskOutcome::Success);
    let step = s.handle_completion(registry::IMAGES, TaskOutcome::Success);

    assert!(step.run_finished);
    assert!(step.run_failed);
}

#[test]
fn results_are_memoized_for_the_run() {
    let mut s = scheduler();
    s.start_run(&[registry::STYLES.to_string()]).unwrap();

    s.handle_completion(registry::SCSS_LINT, TaskOutcome::Success);
    let step = s.handle_completion(registry::STYLES, TaskOutcome::Success);
    assert!(step.run_finished);

    // Terminal states stay readable after the run finishes.
    assert_eq!(s.state_of(registry::STYLES), Some(RunState::Succeeded));
    assert_eq!(s.state_of(registry::SCSS_LINT), Some(RunState::Succeeded));
    // Tasks that never participated report nothing.
    assert_eq!(s.state_of(registry::FONTS), None);
}

#[test]
fn unknown_target_is_rejected_before_any_state_changes() {
    let mut s = scheduler();

    let err = s.start_run(&["bogus".to_string()]).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownTask(name) if name == "bogus"));
    assert!(s.is_idle());
}

#[test]
fn completions_outside_the_active_run_are_ignored() {
    let mut s = scheduler();

    let step = s.handle_completion(registry::STYLES, TaskOutcome::Success);
    assert!(step.newly_running.is_empty());
    assert!(!step.run_finished);
}
