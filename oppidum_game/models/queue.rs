use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oppidum_types::{army::UnitName, buildings::BuildingName, resources::ResourceMap};

/// The work a queue entry performs when it completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueTask {
    UpgradeBuilding {
        building: BuildingName,
        target_level: u8,
    },
    TrainUnits {
        unit: UnitName,
        quantity: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueStatus {
    InProgress,
    Completed,
    Cancelled,
}

/// A pending upgrade or training task with a deterministic completion
/// time. Created in progress; transitioned exactly once to completed or
/// cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: Uuid,
    pub village_id: u32,
    pub player_id: Uuid,
    pub task: QueueTask,
    /// Cost recorded at start time. Refunds are computed from this
    /// snapshot, not from the current cost formula.
    pub cost: ResourceMap,
    pub started_at: DateTime<Utc>,
    pub completes_at: DateTime<Utc>,
    pub status: QueueStatus,
}

impl QueueEntry {
    pub fn new(
        village_id: u32,
        player_id: Uuid,
        task: QueueTask,
        cost: ResourceMap,
        started_at: DateTime<Utc>,
        duration_secs: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            village_id,
            player_id,
            task,
            cost,
            started_at,
            completes_at: started_at + Duration::seconds(duration_secs as i64),
            status: QueueStatus::InProgress,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == QueueStatus::InProgress
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_in_progress() && self.completes_at <= now
    }
}
