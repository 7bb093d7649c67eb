// src/steps/copy.rs

//! Asset copy steps for images and fonts.
//!
//! Each step unions one or more source trees (the site's own assets plus any
//! vendored design-system trees) into a single output directory, preserving
//! each file's path relative to its source tree. A missing source tree is
//! skipped, matching how a glob over a nonexistent directory matches nothing.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::steps::StepContext;

pub fn copy_images(ctx: &StepContext) -> Result<()> {
    copy_asset_trees(
        ctx,
        &ctx.paths.image_sources(),
        &ctx.paths.images_out_dir(),
        "images",
    )
}

pub fn copy_fonts(ctx: &StepContext) -> Result<()> {
    copy_asset_trees(
        ctx,
        &ctx.paths.font_sources(),
        &ctx.paths.fonts_out_dir(),
        "fonts",
    )
}

fn copy_asset_trees(
    ctx: &StepContext,
    sources: &[PathBuf],
    dest: &Path,
    what: &str,
) -> Result<()> {
    ctx.fs.create_dir_all(dest)?;

    let mut total = 0;
    for src in sources {
        if !ctx.fs.is_dir(src) {
            debug!(source = %src.display(), "source tree missing; skipping");
            continue;
        }
        total += copy_tree(ctx.fs.as_ref(), src, dest)?;
    }

    info!(count = total, dest = %dest.display(), "copied {}", what);
    Ok(())
}

/// Copy every file under `src_root` into `dest_root`, preserving paths
/// relative to `src_root`. Returns the number of files copied.
fn copy_tree(fs: &dyn FileSystem, src_root: &Path, dest_root: &Path) -> Result<usize> {
    let mut copied = 0;
    let mut stack = vec![src_root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) {
                let rel = path
                    .strip_prefix(src_root)
                    .with_context(|| format!("relativizing {:?} against {:?}", path, src_root))?;
                fs.copy(&path, &dest_root.join(rel))?;
                copied += 1;
            }
        }
    }

    Ok(copied)
}
