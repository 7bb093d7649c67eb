// src/dag/scheduler.rs

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::dag::graph::TaskGraph;
use crate::dag::task::ScheduledTask;
use crate::engine::{TaskName, TaskOutcome};
use crate::errors::{PipelineError, Result};

/// Per-run state of a task.
///
/// A task moves `Pending -> Running -> {Succeeded, Failed}` within a run and
/// never re-enters `Pending` for the same run: results are memoized by task
/// name until the next run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Part of this run, waiting on dependencies or ordering predecessors.
    Pending,
    /// Dispatched to the executor.
    Running,
    Succeeded,
    /// Failed itself, or was abandoned because a required task failed.
    Failed,
}

impl RunState {
    fn is_terminal(self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed)
    }
}

/// What changed after feeding one trigger or completion into the scheduler.
#[derive(Debug, Clone, Default)]
pub struct SchedulerStep {
    /// Tasks whose dependencies just became satisfied; dispatch these.
    pub newly_running: Vec<ScheduledTask>,
    /// Tasks newly marked failed (the failing task and any abandoned
    /// dependents).
    pub newly_failed: Vec<TaskName>,
    /// Whether this step completed the run.
    pub run_finished: bool,
    /// Whether the finished run contained any failure. Only meaningful when
    /// `run_finished` is true.
    pub run_failed: bool,
}

/// Scheduler holds the immutable task graph plus mutable per-run state.
///
/// A run is seeded from one or more *target* tasks: the transitive
/// `requires` closure of the targets becomes the run's member set. Members
/// start once every `requires` dependency has succeeded and every `after`
/// predecessor that is itself in the run has reached a terminal state.
/// Members with no ordering relation run concurrently.
#[derive(Debug)]
pub struct Scheduler {
    graph: TaskGraph,
    run: BTreeMap<TaskName, RunState>,
    run_counter: u64,
    active: bool,
}

impl Scheduler {
    pub fn new(graph: TaskGraph) -> Self {
        Self {
            graph,
            run: BTreeMap::new(),
            run_counter: 0,
            active: false,
        }
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Returns `true` if there is currently no active run.
    pub fn is_idle(&self) -> bool {
        !self.active
    }

    /// Identifier of the current (or most recent) run; 0 before any run.
    pub fn run_id(&self) -> u64 {
        self.run_counter
    }

    /// Whether the task participates in the active run.
    pub fn in_current_run(&self, task: &str) -> bool {
        self.active && self.run.contains_key(task)
    }

    /// State of a task in the current (or, after a run finishes, the most
    /// recent) run. `None` means the task did not participate.
    pub fn state_of(&self, task: &str) -> Option<RunState> {
        self.run.get(task).copied()
    }

    /// Start a new run seeded from the given targets.
    ///
    /// The run's member set is the transitive `requires` closure of the
    /// targets, deduplicated. Fails on unknown task names before any state
    /// changes.
    pub fn start_run(&mut self, targets: &[TaskName]) -> Result<SchedulerStep> {
        self.ensure_known(targets)?;

        if targets.is_empty() {
            return Ok(SchedulerStep::default());
        }

        self.run.clear();
        self.run_counter += 1;
        self.active = true;
        debug!(run_id = self.run_counter, ?targets, "starting new run");

        for target in targets {
            self.seed_closure(target);
        }

        Ok(self.step_after_change())
    }

    /// Merge extra targets into the active run.
    ///
    /// Tasks already participating keep their state (memoization); only
    /// tasks not yet in the run are added as pending.
    pub fn merge_targets(&mut self, targets: &[TaskName]) -> Result<SchedulerStep> {
        self.ensure_known(targets)?;

        if !self.active {
            warn!(?targets, "merge_targets called with no active run; ignoring");
            return Ok(SchedulerStep::default());
        }

        for target in targets {
            self.seed_closure(target);
        }

        Ok(self.step_after_change())
    }

    /// Record a task's completion and work out what can run next.
    pub fn handle_completion(&mut self, task: &str, outcome: TaskOutcome) -> SchedulerStep {
        if !self.active || !self.run.contains_key(task) {
            warn!(task = %task, "completion for task outside the active run; ignoring");
            return SchedulerStep::default();
        }

        let mut newly_failed = Vec::new();

        match outcome {
            TaskOutcome::Success => {
                self.run.insert(task.to_string(), RunState::Succeeded);
                debug!(task = %task, run_id = self.run_counter, "task succeeded");
            }
            TaskOutcome::Failed(code) => {
                self.run.insert(task.to_string(), RunState::Failed);
                warn!(
                    task = %task,
                    run_id = self.run_counter,
                    exit_code = code,
                    "task failed; abandoning tasks that require it"
                );
                newly_failed.push(task.to_string());
                newly_failed.extend(self.fail_dependents(task));
            }
        }

        let mut step = self.step_after_change();
        step.newly_failed = newly_failed;
        step
    }

    fn ensure_known(&self, targets: &[TaskName]) -> Result<()> {
        for target in targets {
            if !self.graph.contains(target) {
                return Err(PipelineError::UnknownTask(target.clone()));
            }
        }
        Ok(())
    }

    /// Add a target and its transitive `requires` closure to the run.
    fn seed_closure(&mut self, target: &str) {
        let mut stack: Vec<TaskName> = vec![target.to_string()];

        while let Some(name) = stack.pop() {
            if self.run.contains_key(&name) {
                continue;
            }
            self.run.insert(name.clone(), RunState::Pending);
            debug!(task = %name, run_id = self.run_counter, "joined run as pending");
            stack.extend(self.graph.requires_of(&name).iter().cloned());
        }
    }

    /// Mark every in-run task that transitively requires `failed_task` as
    /// failed, returning the abandoned names.
    fn fail_dependents(&mut self, failed_task: &str) -> Vec<TaskName> {
        let mut stack: Vec<TaskName> = self
            .graph
            .dependents_of(failed_task)
            .iter()
            .cloned()
            .collect();

        let mut abandoned = Vec::new();

        while let Some(name) = stack.pop() {
            match self.run.get(&name) {
                Some(RunState::Pending) | Some(RunState::Running) => {
                    self.run.insert(name.clone(), RunState::Failed);
                    debug!(
                        task = %name,
                        "abandoned because a required task failed"
                    );
                    stack.extend(self.graph.dependents_of(&name).iter().cloned());
                    abandoned.push(name);
                }
                // Already terminal, or not participating in this run.
                _ => {}
            }
        }

        abandoned
    }

    /// Collect newly-ready tasks and determine whether the run finished.
    fn step_after_change(&mut self) -> SchedulerStep {
        let newly_running = self.collect_ready();
        let run_finished = self.active && self.all_terminal();

        let mut run_failed = false;
        if run_finished {
            run_failed = self.run.values().any(|s| matches!(s, RunState::Failed));
            self.active = false;
            info!(
                run_id = self.run_counter,
                failed = run_failed,
                "run finished"
            );
        }

        SchedulerStep {
            newly_running,
            newly_failed: Vec::new(),
            run_finished,
            run_failed,
        }
    }

    /// Move every pending task whose prerequisites are satisfied to
    /// `Running` and return it as a [`ScheduledTask`].
    fn collect_ready(&mut self) -> Vec<ScheduledTask> {
        // Decide first, then mutate.
        let candidates: Vec<TaskName> = self
            .run
            .iter()
            .filter_map(|(name, state)| {
                if matches!(state, RunState::Pending) && self.prerequisites_satisfied(name) {
                    Some(name.clone())
                } else {
                    None
                }
            })
            .collect();

        let mut ready = Vec::new();
        for name in candidates {
            let Some(spec) = self.graph.spec(&name) else {
                warn!(task = %name, "task in run missing from graph");
                continue;
            };
            let step = spec.step;
            self.run.insert(name.clone(), RunState::Running);
            debug!(task = %name, run_id = self.run_counter, "prerequisites satisfied; dispatching");
            ready.push(ScheduledTask {
                name,
                step,
                run_id: self.run_counter,
            });
        }

        ready
    }

    fn prerequisites_satisfied(&self, name: &str) -> bool {
        // Every hard dependency is in the run (closure invariant) and must
        // have succeeded.
        for dep in self.graph.requires_of(name) {
            if !matches!(self.run.get(dep), Some(RunState::Succeeded)) {
                return false;
            }
        }

        // Ordering predecessors only gate when they participate in this run,
        // and only until they reach a terminal state.
        for pred in self.graph.after_of(name) {
            if let Some(state) = self.run.get(pred) {
                if !state.is_terminal() {
                    return false;
                }
            }
        }

        true
    }

    fn all_terminal(&self) -> bool {
        self.run.values().all(|s| s.is_terminal())
    }
}
