// src/steps/scripts.rs

//! Script bundling step.

use tracing::info;

use crate::config::{BuildFlags, Paths};
use crate::errors::Result;
use crate::steps::StepContext;
use crate::steps::tool::run_tool;

/// Argument vector for the bundler.
///
/// The entry point and its import graph always bundle into one file;
/// production adds minification and drops the source map.
pub fn bundler_args(flags: BuildFlags, paths: &Paths) -> Vec<String> {
    let mut args = vec![
        paths.script_entry().display().to_string(),
        "--bundle".to_string(),
        format!("--outfile={}", paths.script_output().display()),
    ];

    if flags.production {
        args.push("--minify".to_string());
    } else {
        args.push("--sourcemap".to_string());
    }

    args
}

pub async fn bundle_scripts(ctx: &StepContext) -> Result<()> {
    ctx.fs.create_dir_all(&ctx.paths.scripts_out_dir())?;

    run_tool(
        &ctx.tools.bundler,
        &bundler_args(ctx.flags, &ctx.paths),
        "scripts",
    )
    .await?;

    let out = ctx.paths.script_output();
    if let Ok(meta) = std::fs::metadata(&out) {
        info!(
            output = %out.display(),
            bytes = meta.len(),
            minified = ctx.flags.production,
            "scripts bundled"
        );
    }
    Ok(())
}
