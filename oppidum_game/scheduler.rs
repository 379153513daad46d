use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    models::{
        queue::{QueueEntry, QueueTask},
        village::Village,
    },
    queue::QueueEngine,
};

/// The record of one applied queue entry, returned by the sweep as
/// plain data. The caller turns completions into notifications and
/// persistence writes; the sweep itself performs no I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub entry_id: Uuid,
    pub village_id: u32,
    pub player_id: Uuid,
    pub task: QueueTask,
    pub completed_at: DateTime<Utc>,
}

/// Applies every due queue entry of one village. Entries still running
/// at `now` and entries already in a terminal state are skipped, so
/// repeated sweeps at the same instant are no-ops after the first.
pub fn sweep_village(
    engine: &QueueEngine,
    village: &mut Village,
    entries: &mut [QueueEntry],
    now: DateTime<Utc>,
) -> Vec<Completion> {
    let mut completions = Vec::new();

    for entry in entries.iter_mut() {
        if entry.village_id != village.id || !entry.is_due(now) {
            continue;
        }

        // is_due only admits in-progress entries, so completion cannot
        // observe a terminal status here
        if engine.complete(village, entry).is_ok() {
            completions.push(Completion {
                entry_id: entry.id,
                village_id: entry.village_id,
                player_id: entry.player_id,
                task: entry.task.clone(),
                completed_at: entry.completes_at,
            });
        }
    }

    completions
}
