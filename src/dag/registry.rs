// src/dag/registry.rs

//! The fixed pipeline task table.
//!
//! This is the whole pipeline in one place: asset tasks gated by their lint
//! prerequisites, the clean task ordered (but not required) before any task
//! that writes into the output tree, and the aggregate `build` / `website`
//! targets. Cycle and reference checking still runs at construction, the
//! same as for any other graph.

use crate::dag::graph::TaskGraph;
use crate::dag::task::{StepKind, TaskSpec};
use crate::errors::Result;

pub const SCSS_LINT: &str = "scss-lint";
pub const ESLINT: &str = "eslint";
pub const STYLES: &str = "styles";
pub const SCRIPTS: &str = "scripts";
pub const IMAGES: &str = "images";
pub const FONTS: &str = "fonts";
pub const CLEAN_ALL: &str = "clean-all";
pub const BUILD: &str = "build";
pub const WATCH: &str = "watch";
pub const WEBSITE: &str = "website";

/// Build the pipeline task graph.
///
/// The `after = [clean-all]` edges are ordering-only: a build run cleans
/// before compiling and copying, while a watch-triggered `styles` run never
/// pulls the clean task in.
pub fn pipeline_graph() -> Result<TaskGraph> {
    TaskGraph::new(vec![
        TaskSpec::new(SCSS_LINT, StepKind::LintStyles),
        TaskSpec::new(ESLINT, StepKind::LintScripts),
        TaskSpec::new(STYLES, StepKind::CompileStyles)
            .requires(&[SCSS_LINT])
            .after(&[CLEAN_ALL]),
        TaskSpec::new(SCRIPTS, StepKind::BundleScripts)
            .requires(&[ESLINT])
            .after(&[CLEAN_ALL]),
        TaskSpec::new(IMAGES, StepKind::CopyImages).after(&[CLEAN_ALL]),
        TaskSpec::new(FONTS, StepKind::CopyFonts).after(&[CLEAN_ALL]),
        TaskSpec::new(CLEAN_ALL, StepKind::CleanOutput),
        // Fonts are deliberately not part of the build set; they remain
        // individually invocable.
        TaskSpec::new(BUILD, StepKind::AnnounceBuild).requires(&[CLEAN_ALL, STYLES, SCRIPTS, IMAGES]),
        TaskSpec::new(WATCH, StepKind::AnnounceWatch),
        TaskSpec::new(WEBSITE, StepKind::ServeSite).requires(&[BUILD, WATCH]),
    ])
}
