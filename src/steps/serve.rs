// src/steps/serve.rs

//! Preview server step.
//!
//! Spawns the static-site generator's development server and supervises it.
//! The step itself completes once the server is up and running (so the
//! surrounding run can finish and watch triggers keep flowing); the server's
//! eventual exit is reported separately as [`RuntimeEvent::ServerExited`]
//! and ends the runtime.

use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::BuildFlags;
use crate::engine::{RuntimeEvent, TaskOutcome};
use crate::errors::Result;
use crate::steps::StepContext;

/// Argument vector for the preview server.
///
/// Draft content stays visible during development and is hidden in
/// production mode.
pub fn server_args(flags: BuildFlags) -> Vec<String> {
    vec![
        "server".to_string(),
        format!("--buildDrafts={}", !flags.production),
    ]
}

pub async fn serve_site(ctx: &StepContext, runtime_tx: &mpsc::Sender<RuntimeEvent>) -> Result<()> {
    let args = server_args(ctx.flags);
    info!(server = %ctx.tools.server, ?args, "starting preview server");

    let mut cmd = Command::new(&ctx.tools.server);
    cmd.args(&args)
        .current_dir(ctx.paths.root())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // A server that cannot start fails the website task right here.
    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning preview server '{}'", ctx.tools.server))?;

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(task = "website", "server: {}", line);
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                warn!(task = "website", "server: {}", line);
            }
        });
    }

    let tx = runtime_tx.clone();
    tokio::spawn(async move {
        let outcome = match child.wait().await {
            Ok(status) if status.success() => TaskOutcome::Success,
            Ok(status) => TaskOutcome::Failed(status.code().unwrap_or(-1)),
            Err(err) => {
                error!(error = %err, "waiting for preview server");
                TaskOutcome::Failed(-1)
            }
        };
        let _ = tx.send(RuntimeEvent::ServerExited { outcome }).await;
    });

    Ok(())
}
