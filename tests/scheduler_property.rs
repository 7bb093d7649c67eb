// tests/scheduler_property.rs

//! Property test: for arbitrary target subsets of the pipeline, the dispatch
//! order respects `requires` and in-run `after` edges, contains no
//! duplicates, and covers exactly the transitive requires closure.

use std::collections::HashSet;

use proptest::prelude::*;

use sitepipe::dag::{Scheduler, pipeline_graph, registry};
use sitepipe::engine::TaskOutcome;

const ALL_TASKS: [&str; 10] = [
    registry::SCSS_LINT,
    registry::ESLINT,
    registry::STYLES,
    registry::SCRIPTS,
    registry::IMAGES,
    registry::FONTS,
    registry::CLEAN_ALL,
    registry::BUILD,
    registry::WATCH,
    registry::WEBSITE,
];

/// Requires closure of a target set, computed independently of the scheduler.
fn requires_closure(graph: &sitepipe::dag::TaskGraph, targets: &[String]) -> HashSet<String> {
    let mut closure = HashSet::new();
    let mut stack: Vec<String> = targets.to_vec();
    while let Some(name) = stack.pop() {
        if closure.insert(name.clone()) {
            stack.extend(graph.requires_of(&name).iter().cloned());
        }
    }
    closure
}

proptest! {
    #[test]
    fn dispatch_order_is_consistent_and_complete(
        targets in proptest::sample::subsequence(ALL_TASKS.to_vec(), 1..=10)
    ) {
        let targets: Vec<String> = targets.iter().map(|s| s.to_string()).collect();

        let mut scheduler = Scheduler::new(pipeline_graph().unwrap());
        let step = scheduler.start_run(&targets).unwrap();

        // FIFO simulation: complete tasks in dispatch order, all successful.
        let mut executing: Vec<String> =
            step.newly_running.iter().map(|t| t.name.clone()).collect();
        let mut order: Vec<String> = executing.clone();

        let mut steps = 0;
        while !scheduler.is_idle() {
            steps += 1;
            prop_assert!(steps <= 100, "simulation did not terminate");
            prop_assert!(
                !executing.is_empty(),
                "scheduler stuck: nothing executing but run not finished"
            );

            let task = executing.remove(0);
            let s = scheduler.handle_completion(&task, TaskOutcome::Success);
            for t in &s.newly_running {
                executing.push(t.name.clone());
                order.push(t.name.clone());
            }
        }

        // No task runs twice within a run.
        let dispatched: HashSet<String> = order.iter().cloned().collect();
        prop_assert_eq!(dispatched.len(), order.len());

        let graph = pipeline_graph().unwrap();

        // Every hard dependency was dispatched earlier than its dependent,
        // and in-run ordering predecessors come first too.
        for (i, name) in order.iter().enumerate() {
            for dep in graph.requires_of(name) {
                let pos = order.iter().position(|o| o == dep);
                prop_assert!(
                    matches!(pos, Some(p) if p < i),
                    "{} ran before its dependency {}", name, dep
                );
            }
            for pred in graph.after_of(name) {
                if let Some(p) = order.iter().position(|o| o == pred) {
                    prop_assert!(p < i, "{} ran before its predecessor {}", name, pred);
                }
            }
        }

        // The run covered exactly the transitive requires closure.
        let expected = requires_closure(&graph, &targets);
        prop_assert_eq!(dispatched, expected);
    }
}
