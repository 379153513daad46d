use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use oppidum_game::battle;
use oppidum_types::{
    errors::{ApplicationError, GameError},
    events::{EventKind, GameEvent},
};

use crate::cqrs::{CommandContext, CommandHandler, commands::AttackVillage};

pub struct AttackVillageCommandHandler {}

impl Default for AttackVillageCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackVillageCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<AttackVillage> for AttackVillageCommandHandler {
    #[instrument(skip_all, fields(
        village_id = command.village_id,
        target_village_id = command.target_village_id,
    ))]
    async fn handle(
        &self,
        command: AttackVillage,
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
        let defender = village_repo.get_by_id(command.target_village_id).await?;

        battle::can_attack(&attacker, &defender)?;

        let report = battle::resolve_battle(&ctx.catalog, &attacker.troops, &defender.troops);
        let defensive_bonus = battle::village_defensive_bonus(&defender);
        let protection = battle::resource_protection(&defender);

        // Losses stay in power units; distributing them over unit types
        // and settling plunder belongs to the report consumer.
        let event = GameEvent::new(
            EventKind::BattleResult,
            defender.id,
            Uuid::new_v4(),
            ctx.now,
            json!({
                "attacker_village_id": attacker.id,
                "defender_village_id": defender.id,
                "attacker_power": report.attacker_power,
                "defender_power": report.defender_power,
                "attacker_wins": report.attacker_wins,
                "attacker_losses": report.attacker_losses,
                "defender_losses": report.defender_losses,
                "attacker_carry_capacity": report.attacker_carry_capacity,
                "defender_defensive_bonus": defensive_bonus,
                "defender_resource_protection": protection,
            }),
        );
        if let Err(error) = ctx.events.publish(event).await {
            warn!(%error, "Failed to publish battle_result event");
        }

        info!(
            attacker_wins = report.attacker_wins,
            attacker_power = report.attacker_power,
            defender_power = report.defender_power,
            "Battle resolved"
        );
        Ok(())
    }
}
