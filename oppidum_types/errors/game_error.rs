use thiserror::Error;
use uuid::Uuid;

use crate::{
    army::{Tribe, UnitName},
    buildings::BuildingName,
};

/// Errors for domain logic (game rules).
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Not enough resources")]
    NotEnoughResources,

    #[error("{0} is an invalid level")]
    InvalidLevel(u8),

    #[error("{0} is an invalid training quantity")]
    InvalidQuantity(u32),

    #[error("Building requirements not met: requires {building} at level {level}")]
    BuildingRequirementsNotMet { building: BuildingName, level: u8 },

    #[error("{0} is already being upgraded")]
    UpgradeInProgress(BuildingName),

    #[error("A training batch is already running in this village")]
    TrainingInProgress,

    #[error("{0} has already reached max level")]
    BuildingMaxLevelReached(BuildingName),

    #[error("Building {0} not found in this village")]
    BuildingNotFound(BuildingName),

    #[error("Queue entry {0} is not active")]
    EntryNotActive(Uuid),

    #[error("Building queue is full")]
    QueueLimitReached,

    #[error("Unit {unit} cannot be trained by the {tribe:?} tribe")]
    UnitTribeMismatch { unit: UnitName, tribe: Tribe },

    #[error("Village {village_id} not owned by player {player_id}")]
    VillageNotOwned { village_id: u32, player_id: Uuid },

    #[error("No troops available to attack with")]
    NoTroopsToAttack,

    #[error("Cannot attack your own village")]
    CannotAttackOwnVillage,

    #[error("Cannot attack a member of your own alliance")]
    SameAllianceTarget,
}
