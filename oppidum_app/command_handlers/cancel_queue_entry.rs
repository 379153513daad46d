use serde_json::json;
use tracing::{info, instrument, warn};

use oppidum_game::{models::queue::QueueTask, queue::QueueEngine};
use oppidum_types::{
    errors::{ApplicationError, GameError},
    events::{EventKind, GameEvent},
};

use crate::cqrs::{CommandContext, CommandHandler, commands::CancelQueueEntry};

pub struct CancelQueueEntryCommandHandler {}

impl Default for CancelQueueEntryCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelQueueEntryCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CancelQueueEntry> for CancelQueueEntryCommandHandler {
    #[instrument(skip_all, fields(entry_id = %command.entry_id))]
    async fn handle(
        &self,
        command: CancelQueueEntry,
        ctx: &CommandContext<'_>,
    ) -> Result<(), ApplicationError> {
        let village_repo = ctx.uow.villages();
        let queue_repo = ctx.uow.queue();

        let mut entry = queue_repo.get_by_id(command.entry_id).await?;
        if entry.player_id != command.player_id {
            return Err(GameError::VillageNotOwned {
                village_id: entry.village_id,
                player_id: command.player_id,
            }
            .into());
        }

        let mut village = village_repo.get_by_id(entry.village_id).await?;
        let engine = QueueEngine::new(&ctx.catalog);
        engine.cancel(&mut village, &mut entry, ctx.now)?;

        village_repo.save(&village).await?;
        queue_repo.save(&entry).await?;

        let (kind, details) = match &entry.task {
            QueueTask::UpgradeBuilding {
                building,
                target_level,
            } => (
                EventKind::BuildingCancelled,
                json!({
                    "building": building.to_string(),
                    "target_level": target_level,
                }),
            ),
            QueueTask::TrainUnits { unit, quantity } => (
                EventKind::TrainingCancelled,
                json!({
                    "unit": unit.to_string(),
                    "quantity": quantity,
                }),
            ),
        };
        let event = GameEvent::new(kind, village.id, entry.id, ctx.now, details);
        if let Err(error) = ctx.events.publish(event).await {
            warn!(%error, "Failed to publish cancellation event");
        }

        info!(entry_id = %entry.id, "Queue entry cancelled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use uuid::Uuid;

    use oppidum_game::{
        catalog::Catalog,
        models::queue::QueueStatus,
        queue::QueueEngine,
        test_utils::{VillageFactoryOptions, village_factory},
    };
    use oppidum_types::{
        Result,
        buildings::BuildingName,
        resources::{Resource, ResourceMap},
    };

    use super::*;
    use crate::{
        config::Config,
        test_utils::tests::{MockEventPublisher, MockUnitOfWork},
        uow::UnitOfWork,
    };

    fn test_context(uow: MockUnitOfWork, events: MockEventPublisher) -> CommandContext<'static> {
        CommandContext {
            uow: Box::new(uow),
            config: Arc::new(Config {
                building_queue_limit: 2,
                sweep_interval_secs: 1,
                sweep_batch_size: 50,
            }),
            catalog: Arc::new(Catalog::standard().unwrap()),
            events: Arc::new(events),
            now: Utc::now(),
        }
    }

    /// Seeds a village with a running iron mine upgrade and returns the
    /// ids needed to cancel it.
    async fn setup_running_upgrade(
        uow: &MockUnitOfWork,
        catalog: &Catalog,
    ) -> Result<(Uuid, u32, Uuid, f64)> {
        let player_id = Uuid::new_v4();
        let mut village = village_factory(VillageFactoryOptions {
            player_id: Some(player_id),
            ..Default::default()
        });
        village
            .stocks
            .add(&ResourceMap::new(1000.0, 1000.0, 1000.0, 1000.0));

        let engine = QueueEngine::new(catalog);
        let entry = engine
            .start_upgrade(&mut village, BuildingName::IronMine, Utc::now())
            .unwrap();
        let wood_after_debit = village.stocks.balance(Resource::Wood).amount;

        let village_id = village.id;
        let entry_id = entry.id;
        uow.villages().save(&village).await?;
        uow.queue().add(&entry).await?;

        Ok((player_id, village_id, entry_id, wood_after_debit))
    }

    #[tokio::test]
    async fn test_cancel_refunds_and_clears_marker() -> Result<()> {
        let mock_uow = MockUnitOfWork::new();
        let events = MockEventPublisher::default();
        let ctx = test_context(mock_uow.clone(), events.clone());
        let (player_id, village_id, entry_id, wood_after_debit) =
            setup_running_upgrade(&mock_uow, &ctx.catalog).await?;

        let handler = CancelQueueEntryCommandHandler::new();
        handler
            .handle(
                CancelQueueEntry {
                    player_id,
                    entry_id,
                },
                &ctx,
            )
            .await?;

        let saved_village = mock_uow.villages().get_by_id(village_id).await?;
        // iron mine costs 100 wood at level 1; half comes back
        assert_eq!(
            saved_village.stocks.balance(Resource::Wood).amount,
            wood_after_debit + 50.0
        );
        assert!(!saved_village.building(BuildingName::IronMine).is_upgrading());

        let saved_entry = mock_uow.queue().get_by_id(entry_id).await?;
        assert_eq!(saved_entry.status, QueueStatus::Cancelled);

        let published = events.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].kind, EventKind::BuildingCancelled);
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_twice_fails() -> Result<()> {
        let mock_uow = MockUnitOfWork::new();
        let events = MockEventPublisher::default();
        let ctx = test_context(mock_uow.clone(), events.clone());
        let (player_id, village_id, entry_id, _) =
            setup_running_upgrade(&mock_uow, &ctx.catalog).await?;

        let handler = CancelQueueEntryCommandHandler::new();
        let command = CancelQueueEntry {
            player_id,
            entry_id,
        };
        handler.handle(command.clone(), &ctx).await?;

        let wood_after_cancel = mock_uow
            .villages()
            .get_by_id(village_id)
            .await?
            .stocks
            .balance(Resource::Wood)
            .amount;

        let result = handler.handle(command, &ctx).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Game(GameError::EntryNotActive(_)))
        ));

        let wood_now = mock_uow
            .villages()
            .get_by_id(village_id)
            .await?
            .stocks
            .balance(Resource::Wood)
            .amount;
        assert_eq!(wood_now, wood_after_cancel, "no double refund");
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_rejects_foreign_player() -> Result<()> {
        let mock_uow = MockUnitOfWork::new();
        let events = MockEventPublisher::default();
        let ctx = test_context(mock_uow.clone(), events.clone());
        let (_owner, _village_id, entry_id, _) =
            setup_running_upgrade(&mock_uow, &ctx.catalog).await?;

        let handler = CancelQueueEntryCommandHandler::new();
        let result = handler
            .handle(
                CancelQueueEntry {
                    player_id: Uuid::new_v4(),
                    entry_id,
                },
                &ctx,
            )
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Game(GameError::VillageNotOwned { .. }))
        ));

        let saved_entry = mock_uow.queue().get_by_id(entry_id).await?;
        assert_eq!(saved_entry.status, QueueStatus::InProgress);
        Ok(())
    }
}
