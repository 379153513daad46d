use serde_json::json;
use tracing::{info, instrument, warn};

use oppidum_game::queue::QueueEngine;
use oppidum_types::{
    errors::{ApplicationError, GameError},
    events::{EventKind, GameEvent},
};

use crate::cqrs::{CommandContext, CommandHandler, commands::TrainUnits};

pub struct TrainUnitsCommandHandler {}

impl Default for TrainUnitsCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainUnitsCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<TrainUnits> for TrainUnitsCommandHandler {
    #[instrument(skip_all, fields(
        village_id = command.village_id,
        unit = %command.unit,
        quantity = command.quantity,
    ))]
    async fn handle(
        &self,
        command: TrainUnits,
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

        let engine = QueueEngine::new(&ctx.catalog);
        let entry = engine.start_training(&mut village, command.unit, command.quantity, ctx.now)?;

        village_repo.save(&village).await?;
        queue_repo.add(&entry).await?;

        let event = GameEvent::new(
            EventKind::TrainingStarted,
            village.id,
            entry.id,
            ctx.now,
            json!({
                "unit": command.unit.to_string(),
                "quantity": command.quantity,
                "completes_at": entry.completes_at,
            }),
        );
        if let Err(error) = ctx.events.publish(event).await {
            warn!(%error, "Failed to publish training_started event");
        }

        info!(entry_id = %entry.id, completes_at = %entry.completes_at, "Unit training started");
        Ok(())
    }
}
