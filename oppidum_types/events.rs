use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    BuildingStarted,
    BuildingCompleted,
    BuildingCancelled,
    TrainingStarted,
    TrainingCompleted,
    TrainingCancelled,
    BattleResult,
    SpyReport,
}

impl EventKind {
    /// Wire name delivered to the notification collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::BuildingStarted => "building_started",
            EventKind::BuildingCompleted => "building_completed",
            EventKind::BuildingCancelled => "building_cancelled",
            EventKind::TrainingStarted => "training_started",
            EventKind::TrainingCompleted => "training_completed",
            EventKind::TrainingCancelled => "training_cancelled",
            EventKind::BattleResult => "battle_result",
            EventKind::SpyReport => "spy_report",
        }
    }
}

/// Structured payload handed to the event-emission port for async delivery.
/// The engine never blocks on delivery success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub village_id: u32,
    pub entity_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub details: Value,
}

impl GameEvent {
    pub fn new(
        kind: EventKind,
        village_id: u32,
        entity_id: Uuid,
        timestamp: DateTime<Utc>,
        details: Value,
    ) -> Self {
        Self {
            kind,
            village_id,
            entity_id,
            timestamp,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_wire_names() {
        assert_eq!(EventKind::BuildingStarted.as_str(), "building_started");
        assert_eq!(EventKind::TrainingCompleted.as_str(), "training_completed");
        assert_eq!(EventKind::BattleResult.as_str(), "battle_result");
    }
}
