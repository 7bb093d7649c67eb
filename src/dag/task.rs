// src/dag/task.rs

//! Task definitions: what a task is named, what it needs, and what it does.

use crate::engine::TaskName;

/// The action a task performs when it runs.
///
/// Actions are typed rather than free-form commands: every pipeline step is
/// known at compile time, and the executor maps each kind to its
/// implementation in [`crate::steps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Run the SCSS lint tool over the style sources (skipped when lint is
    /// disabled).
    LintStyles,
    /// Run the JS lint tool over the script sources (skipped when lint is
    /// disabled).
    LintScripts,
    /// Compile the Sass entry point; compressed output in production mode.
    CompileStyles,
    /// Bundle the script entry point; minified output in production mode.
    BundleScripts,
    /// Copy image assets (site + vendored) into the output tree.
    CopyImages,
    /// Copy font assets (site + vendored) into the output tree.
    CopyFonts,
    /// Delete the generated output tree.
    CleanOutput,
    /// Print the site manifest and announce the build.
    AnnounceBuild,
    /// Announce watch mode (the watchers themselves are wired by the
    /// runtime, not by this step).
    AnnounceWatch,
    /// Spawn and supervise the site preview server.
    ServeSite,
}

impl StepKind {
    /// One-line description for the usage summary.
    pub fn describe(self) -> &'static str {
        match self {
            StepKind::LintStyles => "lint the style sources",
            StepKind::LintScripts => "lint the script sources",
            StepKind::CompileStyles => "compile the stylesheet (compressed with --production)",
            StepKind::BundleScripts => "bundle the scripts (minified with --production)",
            StepKind::CopyImages => "copy image assets into the output tree",
            StepKind::CopyFonts => "copy font assets into the output tree",
            StepKind::CleanOutput => "remove the generated output tree",
            StepKind::AnnounceBuild => "clean, lint, compile and copy everything",
            StepKind::AnnounceWatch => "rebuild assets when their sources change",
            StepKind::ServeSite => "build, watch, and run the preview server",
        }
    }
}

/// Static definition of a single task.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub name: TaskName,

    /// Hard dependencies: pulled into any run that includes this task, and
    /// must succeed before this task starts.
    pub requires: Vec<TaskName>,

    /// Ordering-only predecessors: when one of these participates in the
    /// same run, this task waits for it to reach a terminal state, but the
    /// predecessor is never pulled in on this task's account.
    pub after: Vec<TaskName>,

    pub step: StepKind,
}

impl TaskSpec {
    pub fn new(name: impl Into<TaskName>, step: StepKind) -> Self {
        Self {
            name: name.into(),
            requires: Vec::new(),
            after: Vec::new(),
            step,
        }
    }

    pub fn requires(mut self, deps: &[&str]) -> Self {
        self.requires.extend(deps.iter().map(|d| d.to_string()));
        self
    }

    pub fn after(mut self, preds: &[&str]) -> Self {
        self.after.extend(preds.iter().map(|p| p.to_string()));
        self
    }
}

/// Description of a task that the scheduler wants the executor to run now.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub name: TaskName,
    pub step: StepKind,
    /// Monotonically increasing run identifier; all tasks belonging to the
    /// same run share it.
    pub run_id: u64,
}
