// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Build modes are explicit flags (`--production`, `--no-test`) rather than
//! pseudo-tasks that have to be listed before the task they modify: the
//! resulting [`BuildFlags`](crate::config::BuildFlags) are fixed before any
//! task runs, so ordering on the command line never matters.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sitepipe`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sitepipe",
    version,
    about = "Lint, compile, bundle and copy static-site assets.",
    long_about = None
)]
pub struct CliArgs {
    /// Tasks to run (build, watch, website, clean-all, styles, scripts,
    /// images, fonts, scss-lint, eslint).
    ///
    /// With no task, a usage summary is printed.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// Emit production output: compressed styles, minified scripts, and no
    /// draft content on the preview server.
    #[arg(long)]
    pub production: bool,

    /// Skip the lint steps (`scss-lint`, `eslint`) entirely.
    #[arg(long = "no-test")]
    pub no_test: bool,

    /// Path to the config file (TOML).
    ///
    /// Default: `Sitepipe.toml` in the current working directory. A missing
    /// file just means built-in defaults.
    #[arg(long, value_name = "PATH", default_value = "Sitepipe.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SITEPIPE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
