// src/steps/lint.rs

//! Lint steps.
//!
//! Both lint steps are gated on the `test` flag: with `--no-test` they skip
//! the tool invocation entirely and still count as succeeded, so dependent
//! compile steps run unimpeded.

use tracing::info;

use crate::errors::Result;
use crate::steps::StepContext;
use crate::steps::tool::run_tool;

pub async fn lint_styles(ctx: &StepContext) -> Result<()> {
    if !ctx.flags.test {
        info!("lint disabled; skipping scss-lint");
        return Ok(());
    }

    let dir = ctx.paths.styles_dir();
    run_tool(
        &ctx.tools.scss_lint,
        &[dir.display().to_string()],
        "scss-lint",
    )
    .await
}

pub async fn lint_scripts(ctx: &StepContext) -> Result<()> {
    if !ctx.flags.test {
        info!("lint disabled; skipping eslint");
        return Ok(());
    }

    let dir = ctx.paths.scripts_dir();
    run_tool(&ctx.tools.eslint, &[dir.display().to_string()], "eslint").await
}
