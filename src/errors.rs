// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Three broad kinds of failure exist in the pipeline:
//! - validation errors (unknown task names, bad graph wiring, bad config),
//!   reported before any work starts;
//! - tool failures (a lint, compile, or bundle command exiting non-zero),
//!   which abort the owning task;
//! - external process failures (the preview server dying), which end the
//!   `website` task.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error("cycle detected in task graph: {0}")]
    GraphCycle(String),

    #[error("tool '{tool}' exited with code {code}")]
    Tool { tool: String, code: i32 },

    #[error("pipeline run failed: {0}")]
    RunFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipelineError>;
