// src/steps/tool.rs

//! Shared helper for driving an external tool process.

use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use crate::errors::{PipelineError, Result};

/// Run an external tool to completion.
///
/// Stdout is forwarded as info-level log lines and stderr as warnings, so
/// lint violations and compiler diagnostics stay visible. A non-zero exit
/// becomes a [`PipelineError::Tool`] carrying the tool's exit code.
pub async fn run_tool(program: &str, args: &[String], task: &str) -> Result<()> {
    info!(task = %task, tool = %program, ?args, "running tool");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning '{program}' for task '{task}'"))?;

    if let Some(stdout) = child.stdout.take() {
        let task = task.to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(task = %task, "{}", line);
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        let task = task.to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                warn!(task = %task, "{}", line);
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for '{program}' in task '{task}'"))?;

    if status.success() {
        Ok(())
    } else {
        Err(PipelineError::Tool {
            tool: program.to_string(),
            code: status.code().unwrap_or(-1),
        })
    }
}
