// src/config/mod.rs

//! Configuration: the optional `Sitepipe.toml` file, the resolved project
//! layout, and the build mode flags.

pub mod loader;
pub mod model;

pub use loader::{load_or_default, project_root};
pub use model::{BuildFlags, ConfigFile, Paths, PathsSection, ToolsSection};
