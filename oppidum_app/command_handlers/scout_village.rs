use rand::Rng;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use oppidum_game::battle;
use oppidum_types::{
    errors::{ApplicationError, GameError},
    events::{EventKind, GameEvent},
};

use crate::cqrs::{CommandContext, CommandHandler, commands::ScoutVillage};

pub struct ScoutVillageCommandHandler {}

impl Default for ScoutVillageCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoutVillageCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<ScoutVillage> for ScoutVillageCommandHandler {
    #[instrument(skip_all, fields(
        village_id = command.village_id,
        target_village_id = command.target_village_id,
    ))]
    async fn handle(
        &self,
        command: ScoutVillage,
        ctx: &CommandContext<'_>,
    ) -> Result<(), ApplicationError> {
        let village_repo = ctx.uow.villages();

        let attacker = village_repo.get_by_id(command.village_id).await?;
        if attacker.player_id != command.player_id {
            return Err(GameError::VillageNotOwned {
                village_id: attacker.id,
                player_id: command.player_id,
            }
            .into());
        }
        let mut defender = village_repo.get_by_id(command.target_village_id).await?;

        // The threshold is deterministic; only the draw is random, and
        // it happens here at the application edge.
        let threshold = battle::spy_defense(&defender);
        let draw = rand::thread_rng().gen_range(1..=100);
        let succeeded = battle::spy_succeeds(threshold, draw);

        let details = if succeeded {
            // a successful spy reads the defender's stocks, so bring
            // them up to date first
            defender.accrue(&ctx.catalog, ctx.now);
            village_repo.save(&defender).await?;

            let amounts = defender.stocks.amounts();
            json!({
                "success": true,
                "spy_defense": threshold,
                "resources": {
                    "wood": amounts.wood,
                    "clay": amounts.clay,
                    "iron": amounts.iron,
                    "crop": amounts.crop,
                },
            })
        } else {
            json!({
                "success": false,
                "spy_defense": threshold,
            })
        };

        let event = GameEvent::new(
            EventKind::SpyReport,
            defender.id,
            Uuid::new_v4(),
            ctx.now,
            details,
        );
        if let Err(error) = ctx.events.publish(event).await {
            warn!(%error, "Failed to publish spy_report event");
        }

        info!(succeeded, threshold, "Spy mission resolved");
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
        test_utils::{VillageFactoryOptions, village_factory},
    };
    use oppidum_types::{Result, buildings::BuildingName};

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

    async fn setup_villages(uow: &MockUnitOfWork, trap_level: u8) -> Result<Uuid> {
        let player_id = Uuid::new_v4();
        let attacker = village_factory(VillageFactoryOptions {
            id: Some(1),
            player_id: Some(player_id),
            ..Default::default()
        });
        let mut defender = village_factory(VillageFactoryOptions {
            id: Some(2),
            ..Default::default()
        });
        defender.building_mut(BuildingName::Trap).level = trap_level;
        uow.villages().save(&attacker).await?;
        uow.villages().save(&defender).await?;
        Ok(player_id)
    }

    #[tokio::test]
    async fn test_scout_succeeds_against_no_traps() -> Result<()> {
        let mock_uow = MockUnitOfWork::new();
        let events = MockEventPublisher::default();
        let ctx = test_context(mock_uow.clone(), events.clone());
        // threshold 0: any draw in [1,100] succeeds
        let player_id = setup_villages(&mock_uow, 0).await?;

        let handler = ScoutVillageCommandHandler::new();
        handler
            .handle(
                ScoutVillage {
                    player_id,
                    village_id: 1,
                    target_village_id: 2,
                },
                &ctx,
            )
            .await?;

        let published = events.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].kind, EventKind::SpyReport);
        assert_eq!(published[0].details["success"], true);
        assert!(published[0].details["resources"].is_object());
        Ok(())
    }

    #[tokio::test]
    async fn test_scout_fails_against_max_traps() -> Result<()> {
        let mock_uow = MockUnitOfWork::new();
        let events = MockEventPublisher::default();
        let ctx = test_context(mock_uow.clone(), events.clone());
        // trap level 20 caps the threshold at 100: no draw can beat it
        let player_id = setup_villages(&mock_uow, 20).await?;

        let handler = ScoutVillageCommandHandler::new();
        handler
            .handle(
                ScoutVillage {
                    player_id,
                    village_id: 1,
                    target_village_id: 2,
                },
                &ctx,
            )
            .await?;

        let published = events.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].details["success"], false);
        assert_eq!(published[0].details["spy_defense"], 100);
        assert!(
            published[0].details.get("resources").is_none(),
            "a failed spy reveals nothing"
        );
        Ok(())
    }
}
