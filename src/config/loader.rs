// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::ConfigFile;
use crate::errors::{PipelineError, Result};

/// Load the configuration from a given path, or fall back to defaults when
/// the file does not exist.
///
/// The config file is optional: the built-in defaults describe the
/// conventional site layout, and `Sitepipe.toml` only overrides parts of it.
/// A file that exists but fails to parse is still an error.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();

    let config = if path.is_file() {
        let contents = fs::read_to_string(path)?;
        toml::from_str::<ConfigFile>(&contents)?
    } else {
        ConfigFile::default()
    };

    validate(&config)?;
    Ok(config)
}

fn validate(cfg: &ConfigFile) -> Result<()> {
    // The clean task deletes output_dir wholesale; refuse values that would
    // point it at the project root or beyond.
    let out = &cfg.paths.output_dir;
    let degenerate = out.as_os_str().is_empty()
        || out == Path::new("/")
        || out.components().all(|c| {
            matches!(
                c,
                std::path::Component::CurDir | std::path::Component::ParentDir
            )
        });
    if degenerate {
        return Err(PipelineError::Config(format!(
            "[paths].output_dir must name a dedicated output directory (got {:?})",
            out
        )));
    }

    if cfg.paths.assets_dir.as_os_str().is_empty() {
        return Err(PipelineError::Config(
            "[paths].assets_dir must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Figure out the project root for a given config path.
///
/// - If the config path has a non-empty parent (e.g. "site/Sitepipe.toml"),
///   that directory is the root.
/// - If it's a bare filename like "Sitepipe.toml" (parent = ""), the current
///   working directory is used.
pub fn project_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
