// src/watch/profiles.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::Paths;
use crate::dag::registry;
use crate::engine::TaskName;

/// Compiled glob patterns for a single watched task.
///
/// Patterns are relative to the project root; the watcher passes relative
/// paths (e.g. `"assets/styles/base.scss"`) into `matches`.
#[derive(Clone)]
pub struct WatchProfile {
    task: TaskName,
    globs: GlobSet,
}

impl fmt::Debug for WatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchProfile")
            .field("task", &self.task)
            .finish_non_exhaustive()
    }
}

impl WatchProfile {
    /// Name of the task this profile triggers.
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Whether a changed path (relative to the project root) belongs to this
    /// task's sources.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.globs.is_match(rel_path)
    }
}

/// Build the watch profiles for the pipeline: styles, scripts, and images
/// sources each re-trigger their own asset task.
pub fn build_watch_profiles(paths: &Paths) -> Result<Vec<WatchProfile>> {
    let specs: [(&str, String); 3] = [
        (registry::STYLES, paths.styles_glob()),
        (registry::SCRIPTS, paths.scripts_glob()),
        (registry::IMAGES, paths.images_glob()),
    ];

    let mut profiles = Vec::with_capacity(specs.len());
    for (task, pattern) in specs {
        let globs = build_globset(std::slice::from_ref(&pattern))
            .with_context(|| format!("building watch globset for task {task}"))?;
        profiles.push(WatchProfile {
            task: task.to_string(),
            globs,
        });
    }

    Ok(profiles)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
