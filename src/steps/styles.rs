// src/steps/styles.rs

//! Sass compilation step.

use tracing::info;

use crate::config::{BuildFlags, Paths};
use crate::errors::Result;
use crate::steps::StepContext;
use crate::steps::tool::run_tool;

/// Argument vector for the Sass compiler.
///
/// Production compiles compressed without a source map; development keeps
/// expanded output so the stylesheet stays debuggable.
pub fn sass_args(flags: BuildFlags, paths: &Paths) -> Vec<String> {
    let mut args = vec![
        paths.style_entry().display().to_string(),
        paths.style_output().display().to_string(),
    ];

    if flags.production {
        args.push("--style=compressed".to_string());
        args.push("--no-source-map".to_string());
    } else {
        args.push("--style=expanded".to_string());
    }

    args
}

pub async fn compile_styles(ctx: &StepContext) -> Result<()> {
    ctx.fs.create_dir_all(&ctx.paths.styles_out_dir())?;

    run_tool(&ctx.tools.sass, &sass_args(ctx.flags, &ctx.paths), "styles").await?;

    let out = ctx.paths.style_output();
    if let Ok(meta) = std::fs::metadata(&out) {
        info!(
            output = %out.display(),
            bytes = meta.len(),
            compressed = ctx.flags.production,
            "stylesheet compiled"
        );
    }
    Ok(())
}
