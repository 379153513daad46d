use serde_json::json;
use tracing::{info, instrument, warn};

use oppidum_game::{models::queue::QueueTask, queue::QueueEngine};
use oppidum_types::{
    errors::{ApplicationError, GameError},
    events::{EventKind, GameEvent},
};

use crate::cqrs::{CommandContext, CommandHandler, commands::StartBuildingUpgrade};

pub struct StartBuildingUpgradeCommandHandler {}

impl Default for StartBuildingUpgradeCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl StartBuildingUpgradeCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<StartBuildingUpgrade> for StartBuildingUpgradeCommandHandler {
    #[instrument(skip_all, fields(
        village_id = command.village_id,
        building = %command.building,
    ))]
    async fn handle(
        &self,
        command: StartBuildingUpgrade,
        ctx: &CommandContext<'_>,
    ) -> Result<(), ApplicationError> {
        let village_repo = ctx.uow.villages();
        let queue_repo = ctx.uow.queue();

        let mut village = village_repo.get_by_id(command.village_id).await?;
        if village.player_id != command.player_id {
            return Err(GameError::VillageNotOwned {
                village_id: village.id,
                player_id: command.player_id,
            }
            .into());
        }

        let active_upgrades = queue_repo
            .list_in_progress_by_village_id(village.id)
            .await?
            .iter()
            .filter(|e| matches!(e.task, QueueTask::UpgradeBuilding { .. }))
            .count();
        if active_upgrades >= ctx.config.building_queue_limit {
            return Err(GameError::QueueLimitReached.into());
        }

        let engine = QueueEngine::new(&ctx.catalog);
        let entry = engine.start_upgrade(&mut village, command.building, ctx.now)?;

        village_repo.save(&village).await?;
        queue_repo.add(&entry).await?;

        let QueueTask::UpgradeBuilding { target_level, .. } = &entry.task else {
            unreachable!("start_upgrade returns an upgrade task");
        };
        let event = GameEvent::new(
            EventKind::BuildingStarted,
            village.id,
            entry.id,
            ctx.now,
            json!({
                "building": command.building.to_string(),
                "target_level": target_level,
                "completes_at": entry.completes_at,
            }),
        );
        if let Err(error) = ctx.events.publish(event).await {
            warn!(%error, "Failed to publish building_started event");
        }

        info!(entry_id = %entry.id, completes_at = %entry.completes_at, "Building upgrade started");
        Ok(())
    }
}
