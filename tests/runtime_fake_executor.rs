// tests/runtime_fake_executor.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

use sitepipe::dag::{Scheduler, pipeline_graph, registry};
use sitepipe::engine::{CoreRuntime, Runtime, RuntimeEvent, RuntimeOptions, TriggerReason};
use sitepipe_test_utils::fake_executor::FakeExecutor;

type TestResult = Result<(), Box<dyn Error>>;

fn position(executed: &[String], name: &str) -> usize {
    executed
        .iter()
        .position(|t| t == name)
        .unwrap_or_else(|| panic!("task '{name}' was never executed: {executed:?}"))
}

async fn run_pipeline(
    targets: &[&str],
    failing: &[&str],
    exit_when_idle: bool,
) -> (Result<(), sitepipe::errors::PipelineError>, Vec<String>) {
    let scheduler = Scheduler::new(pipeline_graph().unwrap());

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(16);

    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(rt_tx.clone(), executed.clone()).with_failing(failing);

    for target in targets {
        rt_tx
            .send(RuntimeEvent::TaskTriggered {
                task: target.to_string(),
                reason: TriggerReason::Manual,
            })
            .await
            .unwrap();
    }

    let options = RuntimeOptions { exit_when_idle };
    let core = CoreRuntime::new(scheduler, options);
    let runtime = Runtime::new(core, rt_rx, executor);

    let result = timeout(Duration::from_secs(3), runtime.run())
        .await
        .expect("runtime did not finish within 3 seconds");

    let tasks_run = executed.lock().unwrap().clone();
    (result, tasks_run)
}

#[tokio::test]
async fn build_runs_lints_before_compiles_and_clean_before_assets() -> TestResult {
    init_tracing();

    let (result, executed) = run_pipeline(&[registry::BUILD], &[], true).await;
    result?;

    // Exactly the build set plus its prerequisites; fonts stay out.
    assert_eq!(executed.len(), 7);
    assert!(!executed.contains(&registry::FONTS.to_string()));
    assert!(!executed.contains(&registry::WATCH.to_string()));
    assert!(!executed.contains(&registry::WEBSITE.to_string()));

    assert!(position(&executed, registry::SCSS_LINT) < position(&executed, registry::STYLES));
    assert!(position(&executed, registry::ESLINT) < position(&executed, registry::SCRIPTS));

    let clean = position(&executed, registry::CLEAN_ALL);
    assert!(clean < position(&executed, registry::STYLES));
    assert!(clean < position(&executed, registry::SCRIPTS));
    assert!(clean < position(&executed, registry::IMAGES));

    // The aggregate target runs last, after its whole set.
    assert_eq!(position(&executed, registry::BUILD), executed.len() - 1);

    Ok(())
}

#[tokio::test]
async fn shared_prerequisites_run_once_per_run() -> TestResult {
    init_tracing();

    // styles and build both pull in scss-lint; it must execute exactly once.
    let (result, executed) = run_pipeline(&[registry::STYLES, registry::BUILD], &[], true).await;
    result?;

    let lint_runs = executed
        .iter()
        .filter(|t| t.as_str() == registry::SCSS_LINT)
        .count();
    assert_eq!(lint_runs, 1);

    let style_runs = executed
        .iter()
        .filter(|t| t.as_str() == registry::STYLES)
        .count();
    assert_eq!(style_runs, 1);

    Ok(())
}

#[tokio::test]
async fn failing_lint_abandons_dependent_tasks() -> TestResult {
    init_tracing();

    let (result, executed) = run_pipeline(&[registry::BUILD], &[registry::ESLINT], true).await;

    // The run failed, so the command exits non-zero.
    let err = result.expect_err("expected the build to fail");
    assert!(err.to_string().contains("failed"));

    // scripts requires eslint; build requires scripts. Neither may run.
    assert!(!executed.contains(&registry::SCRIPTS.to_string()));
    assert!(!executed.contains(&registry::BUILD.to_string()));

    // The unrelated branches still complete.
    assert!(executed.contains(&registry::STYLES.to_string()));
    assert!(executed.contains(&registry::IMAGES.to_string()));

    Ok(())
}

#[tokio::test]
async fn website_is_never_dispatched_when_its_build_fails() -> TestResult {
    init_tracing();

    let (result, executed) = run_pipeline(&[registry::WEBSITE], &[registry::STYLES], false).await;

    let err = result.expect_err("expected the website run to fail");
    assert!(err.to_string().contains("website"));

    assert!(!executed.contains(&registry::BUILD.to_string()));
    assert!(!executed.contains(&registry::WEBSITE.to_string()));

    // The lint gate ran and passed before the compile failed.
    assert!(executed.contains(&registry::SCSS_LINT.to_string()));

    Ok(())
}
