// src/steps/mod.rs

//! Pipeline step implementations.
//!
//! Each [`StepKind`] maps to one function here. Steps receive a shared
//! [`StepContext`] carrying the build flags, the resolved project layout,
//! the external tool names, and the filesystem abstraction; they branch on
//! the flags at invocation time (compressed vs. plain output, lint skip).

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{BuildFlags, Paths, ToolsSection};
use crate::dag::StepKind;
use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::manifest::SiteManifest;

pub mod announce;
pub mod clean;
pub mod copy;
pub mod lint;
pub mod scripts;
pub mod serve;
pub mod styles;
pub mod tool;

/// Everything a step needs to do its work.
///
/// Immutable for the whole run; shared across all steps of the invocation.
#[derive(Debug)]
pub struct StepContext {
    pub flags: BuildFlags,
    pub paths: Paths,
    pub tools: ToolsSection,
    pub manifest: SiteManifest,
    pub fs: Arc<dyn FileSystem>,
}

/// Execute one step.
///
/// `runtime_tx` is only used by the serve step, which reports the preview
/// server's eventual exit back to the runtime.
pub async fn run(
    kind: StepKind,
    ctx: &StepContext,
    runtime_tx: &mpsc::Sender<RuntimeEvent>,
) -> Result<()> {
    match kind {
        StepKind::LintStyles => lint::lint_styles(ctx).await,
        StepKind::LintScripts => lint::lint_scripts(ctx).await,
        StepKind::CompileStyles => styles::compile_styles(ctx).await,
        StepKind::BundleScripts => scripts::bundle_scripts(ctx).await,
        StepKind::CopyImages => copy::copy_images(ctx),
        StepKind::CopyFonts => copy::copy_fonts(ctx),
        StepKind::CleanOutput => clean::clean_output(ctx),
        StepKind::AnnounceBuild => announce::announce_build(ctx),
        StepKind::AnnounceWatch => announce::announce_watch(),
        StepKind::ServeSite => serve::serve_site(ctx, runtime_tx).await,
    }
}
