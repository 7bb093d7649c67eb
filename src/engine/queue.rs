// src/engine/queue.rs

//! Pending trigger queue.
//!
//! A trigger that arrives for a task already participating in the active run
//! cannot join that run (results are memoized per run), so it is remembered
//! here and replayed as the seed of the next run once the current one
//! finishes.

use tracing::debug;

use crate::engine::TaskName;

#[derive(Debug, Default)]
pub struct TriggerQueue {
    pending: Vec<TaskName>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a trigger for replay. Duplicate names collapse into one
    /// pending entry.
    pub fn record_trigger(&mut self, task: &str) {
        if self.pending.iter().any(|t| t == task) {
            debug!(task = %task, "trigger already pending; not queueing again");
            return;
        }
        debug!(task = %task, "queueing trigger for replay after the active run");
        self.pending.push(task.to_string());
    }

    /// Take all pending triggers, leaving the queue empty.
    pub fn drain_pending(&mut self) -> Vec<TaskName> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
