// src/steps/clean.rs

//! Clean step: delete the generated output tree wholesale.

use tracing::{debug, info};

use crate::errors::Result;
use crate::steps::StepContext;

pub fn clean_output(ctx: &StepContext) -> Result<()> {
    let out = ctx.paths.output_root();

    if !ctx.fs.is_dir(&out) {
        debug!(dir = %out.display(), "no generated output to clean");
        return Ok(());
    }

    ctx.fs.remove_dir_all(&out)?;
    info!(dir = %out.display(), "removed generated output");
    Ok(())
}
