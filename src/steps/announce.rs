// src/steps/announce.rs

//! Announcement steps for the aggregate targets.
//!
//! These print to stdout on purpose: logs go to stderr, stdout carries the
//! user-facing build summary.

use tracing::info;

use crate::errors::Result;
use crate::steps::StepContext;

/// Runs after the build set has completed; summarizes what was built.
pub fn announce_build(ctx: &StepContext) -> Result<()> {
    println!(
        "{} v{} built into {}",
        ctx.manifest.name,
        ctx.manifest.version,
        ctx.paths.output_root().display()
    );
    Ok(())
}

/// The watchers themselves are wired by the runtime; this step only marks
/// the transition into watch mode.
pub fn announce_watch() -> Result<()> {
    info!("watching asset sources; tasks re-run on change (Ctrl-C to stop)");
    Ok(())
}
