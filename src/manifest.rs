// src/manifest.rs

//! Site manifest (`package.json`) reading.
//!
//! Only `name` and `version` are used, and only for display. A missing or
//! unparsable manifest degrades to placeholders instead of failing the run.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::fs::FileSystem;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// Display-only site metadata.
#[derive(Debug, Clone)]
pub struct SiteManifest {
    pub name: String,
    pub version: String,
}

impl Default for SiteManifest {
    fn default() -> Self {
        Self {
            name: "site".to_string(),
            version: "0.0.0".to_string(),
        }
    }
}

/// Load the site manifest, falling back to defaults when absent or invalid.
pub fn load(fs: &dyn FileSystem, path: &Path) -> SiteManifest {
    let contents = match fs.read_to_string(path) {
        Ok(c) => c,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no site manifest; using defaults");
            return SiteManifest::default();
        }
    };

    match serde_json::from_str::<RawManifest>(&contents) {
        Ok(raw) => {
            let defaults = SiteManifest::default();
            SiteManifest {
                name: raw.name.unwrap_or(defaults.name),
                version: raw.version.unwrap_or(defaults.version),
            }
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "unparsable site manifest; using defaults");
            SiteManifest::default()
        }
    }
}
