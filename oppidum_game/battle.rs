use serde::{Deserialize, Serialize};

use oppidum_types::{buildings::BuildingName, errors::GameError, resources::Resource};

use crate::{
    catalog::Catalog,
    models::village::{TroopStack, Village},
};

/// Defensive bonus rate contributed per level of a building. Buildings
/// without a defensive role contribute nothing.
pub fn building_defense_bonus(name: BuildingName, level: u8) -> f64 {
    let rate = match name {
        BuildingName::Wall => 0.02,
        BuildingName::Watchtower => 0.015,
        BuildingName::Trap => 0.01,
        BuildingName::RallyPoint => 0.005,
        _ => 0.0,
    };

    rate * level as f64
}

/// Additive defensive bonus over all buildings, capped at 50%.
pub fn village_defensive_bonus(village: &Village) -> f64 {
    let total: f64 = village
        .buildings
        .iter()
        .map(|b| building_defense_bonus(b.name, b.level))
        .sum();

    total.min(0.5)
}

/// Spy-defense threshold in percent: trap level x 5, capped at 100.
/// A uniform draw in [1,100] above the threshold means the spy
/// succeeds; the draw itself happens at the calling edge.
pub fn spy_defense(village: &Village) -> u32 {
    (village.building_level(BuildingName::Trap) as u32 * 5).min(100)
}

/// Resolves a spy mission given the defender's threshold and the
/// caller's uniform draw in [1,100].
pub fn spy_succeeds(threshold: u32, draw: u32) -> bool {
    draw > threshold
}

/// Fraction of stored resources shielded from plunder: 1% per
/// warehouse level plus 1% per granary level, capped at 30%.
pub fn resource_protection(village: &Village) -> f64 {
    let levels = village.building_level(BuildingName::Warehouse) as f64
        + village.building_level(BuildingName::Granary) as f64;

    (levels * 0.01).min(0.3)
}

/// Training time reduction: 2% per barracks level, capped at 40%.
pub fn training_speed_bonus(village: &Village) -> f64 {
    (village.building_level(BuildingName::Barracks) as f64 * 0.02).min(0.4)
}

/// Production bonus for one resource kind: 3% per level of the single
/// building feeding that kind, capped at 60%.
pub fn production_bonus(village: &Village, kind: Resource) -> f64 {
    let feeder = match kind {
        Resource::Wood => BuildingName::Woodcutter,
        Resource::Clay => BuildingName::ClayPit,
        Resource::Iron => BuildingName::IronMine,
        Resource::Crop => BuildingName::CropField,
    };

    (village.building_level(feeder) as f64 * 0.03).min(0.6)
}

/// Checks whether an attack order is permitted at all.
pub fn can_attack(attacker: &Village, defender: &Village) -> Result<(), GameError> {
    if attacker.total_troops() == 0 {
        return Err(GameError::NoTroopsToAttack);
    }

    if attacker.player_id == defender.player_id {
        return Err(GameError::CannotAttackOwnVillage);
    }

    if let (Some(a), Some(d)) = (attacker.alliance_id, defender.alliance_id) {
        if a == d {
            return Err(GameError::SameAllianceTarget);
        }
    }

    Ok(())
}

/// Outcome of a single-round battle. Losses are expressed in power
/// units; translating them back into troop counts per unit type is the
/// caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub attacker_power: f64,
    pub defender_power: f64,
    pub attacker_wins: bool,
    pub attacker_losses: f64,
    pub defender_losses: f64,
    /// Total carry capacity of the attacking troops, the upper bound
    /// for plunder settlement.
    pub attacker_carry_capacity: u64,
}

/// Deterministic single-round resolution from troop power. The
/// attacker wins only on strictly greater power; ties favor the
/// defender. The losing side loses 80% of the opposing power, the
/// winning side 10% of it.
pub fn resolve_battle(
    catalog: &Catalog,
    attacker: &[TroopStack],
    defender: &[TroopStack],
) -> BattleReport {
    let attacker_power = attack_power(catalog, attacker);
    let defender_power = defense_power(catalog, defender);
    let attacker_wins = attacker_power > defender_power;

    let (attacker_losses, defender_losses) = if attacker_wins {
        (defender_power * 0.1, attacker_power * 0.8)
    } else {
        (defender_power * 0.8, attacker_power * 0.1)
    };

    let attacker_carry_capacity = attacker
        .iter()
        .map(|s| s.quantity as u64 * catalog.unit(s.unit).capacity as u64)
        .sum();

    BattleReport {
        attacker_power,
        defender_power,
        attacker_wins,
        attacker_losses,
        defender_losses,
        attacker_carry_capacity,
    }
}

fn attack_power(catalog: &Catalog, troops: &[TroopStack]) -> f64 {
    troops
        .iter()
        .map(|s| s.quantity as f64 * catalog.unit(s.unit).attack as f64)
        .sum()
}

fn defense_power(catalog: &Catalog, troops: &[TroopStack]) -> f64 {
    troops
        .iter()
        .map(|s| {
            let unit = catalog.unit(s.unit);
            s.quantity as f64 * (unit.defense_infantry + unit.defense_cavalry) as f64
        })
        .sum()
}
