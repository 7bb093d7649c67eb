#![allow(dead_code)]

use std::sync::Arc;

use sitepipe::config::{BuildFlags, Paths, PathsSection, ToolsSection};
use sitepipe::fs::mock::MockFileSystem;
use sitepipe::manifest::SiteManifest;
use sitepipe::steps::StepContext;

/// Builder for a [`StepContext`] backed by an in-memory filesystem.
///
/// `build` hands back the mock filesystem alongside the context so tests can
/// seed source trees and assert on the resulting output set.
pub struct StepContextBuilder {
    root: String,
    section: PathsSection,
    tools: ToolsSection,
    flags: BuildFlags,
    manifest: SiteManifest,
}

impl StepContextBuilder {
    pub fn new() -> Self {
        Self {
            root: ".".to_string(),
            section: PathsSection::default(),
            tools: ToolsSection::default(),
            flags: BuildFlags::default(),
            manifest: SiteManifest::default(),
        }
    }

    pub fn root(mut self, root: &str) -> Self {
        self.root = root.to_string();
        self
    }

    pub fn production(mut self, val: bool) -> Self {
        self.flags.production = val;
        self
    }

    pub fn test(mut self, val: bool) -> Self {
        self.flags.test = val;
        self
    }

    pub fn paths_section(mut self, section: PathsSection) -> Self {
        self.section = section;
        self
    }

    pub fn build(self) -> (StepContext, MockFileSystem) {
        let fs = MockFileSystem::new();
        let ctx = StepContext {
            flags: self.flags,
            paths: Paths::new(self.root, self.section),
            tools: self.tools,
            manifest: self.manifest,
            fs: Arc::new(fs.clone()),
        };
        (ctx, fs)
    }
}

impl Default for StepContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
