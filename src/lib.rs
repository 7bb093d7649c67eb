// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod steps;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{BuildFlags, Paths};
use crate::dag::registry::{self, pipeline_graph};
use crate::dag::{Scheduler, TaskGraph};
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent, RuntimeOptions, TriggerReason};
use crate::errors::{Error, PipelineError, Result};
use crate::exec::RealExecutorBackend;
use crate::fs::{FileSystem, RealFileSystem};
use crate::manifest::SiteManifest;
use crate::steps::StepContext;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and the resolved project layout
/// - the pipeline task graph, scheduler, and runtime
/// - the executor
/// - (for watch/website) the file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = config::load_or_default(&config_path)?;

    let root = config::project_root(&config_path);
    let paths = Paths::new(root, cfg.paths.clone());
    let flags = BuildFlags {
        production: args.production,
        test: !args.no_test,
    };

    let graph = pipeline_graph()?;

    // Unknown task names are rejected before any work starts.
    for task in &args.tasks {
        if !graph.contains(task) {
            return Err(PipelineError::UnknownTask(task.clone()));
        }
    }

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let site = manifest::load(fs.as_ref(), &paths.manifest_path());

    if args.tasks.is_empty() {
        print_usage(&graph, &site);
        return Ok(());
    }

    debug!(?flags, tasks = ?args.tasks, "starting pipeline");

    let scheduler = Scheduler::new(graph);

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let ctx = Arc::new(StepContext {
        flags,
        paths: paths.clone(),
        tools: cfg.tools.clone(),
        manifest: site,
        fs,
    });
    let executor = RealExecutorBackend::new(rt_tx.clone(), Arc::clone(&ctx));

    // Watch and website mode keep the runtime alive and need file watchers;
    // everything else is a one-shot run.
    let keep_alive = args
        .tasks
        .iter()
        .any(|t| t == registry::WATCH || t == registry::WEBSITE);

    let _watcher_handle = if keep_alive {
        let profiles = watch::build_watch_profiles(&paths)?;
        Some(watch::spawn_watcher(paths.root(), profiles, rt_tx.clone())?)
    } else {
        None
    };

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    // Seed the run with the command-line targets.
    for task in &args.tasks {
        rt_tx
            .send(RuntimeEvent::TaskTriggered {
                task: task.clone(),
                reason: TriggerReason::Manual,
            })
            .await
            .map_err(Error::from)?;
    }

    let options = RuntimeOptions {
        exit_when_idle: !keep_alive,
    };

    // Construct the pure core runtime (single source of truth for semantics)
    // and the async IO shell around it.
    let core = CoreRuntime::new(scheduler, options);
    let runtime = Runtime::new(core, rt_rx, executor);
    runtime.run().await
}

/// Usage summary printed when no task is named.
fn print_usage(graph: &TaskGraph, site: &SiteManifest) {
    println!("{} v{}", site.name, site.version);
    println!();
    println!("usage: sitepipe [--production] [--no-test] TASK...");
    println!();
    println!("tasks:");
    for name in graph.tasks() {
        let Some(spec) = graph.spec(name) else {
            continue;
        };
        println!("  {:<10} {}", name, spec.step.describe());
    }
    println!();
    println!("  --production  compressed styles, minified scripts, drafts hidden");
    println!("  --no-test     skip the lint steps");
}
