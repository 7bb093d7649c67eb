// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Compiling per-task glob patterns for the watched asset trees.
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//!
//! It does **not** know about the task graph; it only turns filesystem
//! changes into task-level triggers. The scheduler decides what a trigger
//! means for the active run.

pub mod event_handler;
pub mod path_utils;
pub mod profiles;
pub mod watcher;

pub use profiles::{WatchProfile, build_watch_profiles};
pub use watcher::{WatcherHandle, spawn_watcher};
