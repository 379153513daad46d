use uuid::Uuid;

use oppidum_types::{army::UnitName, buildings::BuildingName};

use super::command::Command;

#[derive(Debug, Clone)]
pub struct StartBuildingUpgrade {
    pub player_id: Uuid,
    pub village_id: u32,
    pub building: BuildingName,
}
impl Command for StartBuildingUpgrade {}

#[derive(Debug, Clone)]
pub struct TrainUnits {
    pub player_id: Uuid,
    pub village_id: u32,
    pub unit: UnitName,
    pub quantity: u32,
}
impl Command for TrainUnits {}

/// Cancels a running upgrade or training batch.
#[derive(Debug, Clone)]
pub struct CancelQueueEntry {
    pub player_id: Uuid,
    pub entry_id: Uuid,
}
impl Command for CancelQueueEntry {}

#[derive(Debug, Clone)]
pub struct AttackVillage {
    pub player_id: Uuid,
    pub village_id: u32,
    pub target_village_id: u32,
}
impl Command for AttackVillage {}

#[derive(Debug, Clone)]
pub struct ScoutVillage {
    pub player_id: Uuid,
    pub village_id: u32,
    pub target_village_id: u32,
}
impl Command for ScoutVillage {}
