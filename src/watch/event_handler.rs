// src/watch/event_handler.rs

//! Event processing logic for filesystem changes.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::engine::{RuntimeEvent, TriggerReason};
use crate::watch::path_utils::relative_str;
use crate::watch::profiles::WatchProfile;

/// Turn a single changed path into task triggers.
///
/// Every profile whose globs match the path gets one trigger; the asset
/// trees are disjoint, so in practice at most one task fires per path.
/// Triggers are unconditional: no debounce, no content comparison.
pub async fn process_file_change(
    root: &Path,
    path: &Path,
    profiles: &Arc<Vec<WatchProfile>>,
    runtime_tx: &mpsc::Sender<RuntimeEvent>,
) {
    let rel_str = match relative_str(root, path) {
        Some(s) => s,
        None => {
            warn!(
                "could not relativize path {:?} against root {:?}",
                path, root
            );
            return;
        }
    };

    for profile in profiles.iter().filter(|p| p.matches(&rel_str)) {
        let task = profile.task().to_string();
        debug!(task = %task, path = %rel_str, "watch match; triggering task");

        if let Err(err) = runtime_tx
            .send(RuntimeEvent::TaskTriggered {
                task,
                reason: TriggerReason::FileWatch,
            })
            .await
        {
            warn!("failed to send RuntimeEvent::TaskTriggered: {err}");
            // If the runtime channel is closed, there's no point keeping
            // the watcher loop alive.
            return;
        }
    }
}
