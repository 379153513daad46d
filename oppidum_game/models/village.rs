use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use oppidum_types::{
    army::{Tribe, UnitName},
    buildings::{BuildingName, BuildingRequirement},
    errors::GameError,
    resources::{Resource, ResourceMap},
};

use crate::{catalog::Catalog, economy};

use super::{buildings::Building, resources::ResourceStocks};

/// A quantity of one unit type stationed in a village.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TroopStack {
    pub unit: UnitName,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Village {
    pub id: u32,
    pub name: String,
    pub player_id: Uuid,
    pub alliance_id: Option<Uuid>,
    pub tribe: Tribe,
    /// Exactly one building per building type; level 0 until built.
    pub buildings: Vec<Building>,
    pub stocks: ResourceStocks,
    pub troops: Vec<TroopStack>,
    /// Set while a training batch is running. A village trains one
    /// batch at a time.
    pub training_started_at: Option<DateTime<Utc>>,
}

impl Village {
    pub fn new(
        id: u32,
        name: String,
        player_id: Uuid,
        tribe: Tribe,
        created_at: DateTime<Utc>,
    ) -> Self {
        let buildings = BuildingName::ALL.iter().map(|n| Building::new(*n)).collect();

        Self {
            id,
            name,
            player_id,
            alliance_id: None,
            tribe,
            buildings,
            stocks: ResourceStocks::new(created_at),
            troops: vec![],
            training_started_at: None,
        }
    }

    /// Returns the building of the given type. Every village carries
    /// one instance per type, so the lookup always succeeds.
    pub fn building(&self, name: BuildingName) -> &Building {
        self.buildings
            .iter()
            .find(|b| b.name == name)
            .unwrap_or_else(|| unreachable!("village is constructed with every building type"))
    }

    pub fn building_mut(&mut self, name: BuildingName) -> &mut Building {
        self.buildings
            .iter_mut()
            .find(|b| b.name == name)
            .unwrap_or_else(|| unreachable!("village is constructed with every building type"))
    }

    pub fn building_level(&self, name: BuildingName) -> u8 {
        self.building(name).level
    }

    /// Checks a prerequisite mapping against current building levels.
    pub fn check_requirements(&self, requirements: &[BuildingRequirement]) -> Result<(), GameError> {
        for BuildingRequirement(required, level) in requirements {
            if self.building_level(*required) < *level {
                return Err(GameError::BuildingRequirementsNotMet {
                    building: *required,
                    level: *level,
                });
            }
        }

        Ok(())
    }

    /// Aggregated hourly production per resource kind over all
    /// contributing buildings at their current levels.
    pub fn production_rates(&self, catalog: &Catalog) -> ResourceMap {
        let mut rates = ResourceMap::default();

        for building in &self.buildings {
            if let Some((kind, base_rate)) = catalog.building(building.name).production {
                *rates.amount_mut(kind) += economy::production_rate(base_rate, building.level);
            }
        }

        rates
    }

    /// Brings resource balances up to `now`. Must run before any read
    /// that reports amounts and before any affordability check.
    pub fn accrue(&mut self, catalog: &Catalog, now: DateTime<Utc>) {
        let rates = self.production_rates(catalog);
        self.stocks.accrue(&rates, now);
    }

    /// Recomputes each resource's storage capacity from warehouse and
    /// granary levels. Runs whenever one of the two changes level.
    pub fn recompute_capacities(&mut self) {
        let warehouse =
            economy::BASE_STORAGE_CAPACITY
                + economy::storage_capacity_contribution(self.building_level(BuildingName::Warehouse));
        let granary = economy::BASE_STORAGE_CAPACITY
            + economy::storage_capacity_contribution(self.building_level(BuildingName::Granary));

        self.stocks.set_capacity(Resource::Wood, warehouse);
        self.stocks.set_capacity(Resource::Clay, warehouse);
        self.stocks.set_capacity(Resource::Iron, warehouse);
        self.stocks.set_capacity(Resource::Crop, granary);
    }

    pub fn add_troops(&mut self, unit: UnitName, quantity: u32) {
        match self.troops.iter_mut().find(|s| s.unit == unit) {
            Some(stack) => stack.quantity += quantity,
            None => self.troops.push(TroopStack { unit, quantity }),
        }
    }

    pub fn troop_quantity(&self, unit: UnitName) -> u32 {
        self.troops
            .iter()
            .find(|s| s.unit == unit)
            .map_or(0, |s| s.quantity)
    }

    pub fn total_troops(&self) -> u32 {
        self.troops.iter().map(|s| s.quantity).sum()
    }

    pub fn is_training(&self) -> bool {
        self.training_started_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{VillageFactoryOptions, village_factory};
    use chrono::Duration;

    #[test]
    fn test_new_village_has_one_building_per_type() {
        let village = village_factory(VillageFactoryOptions::default());

        assert_eq!(village.buildings.len(), BuildingName::ALL.len());
        for name in BuildingName::ALL {
            assert_eq!(village.building_level(name), 0);
        }
        assert_eq!(village.total_troops(), 0);
        assert!(!village.is_training());
    }

    #[test]
    fn test_production_rates_aggregate_built_fields() {
        let catalog = Catalog::standard().unwrap();
        let mut village = village_factory(VillageFactoryOptions::default());

        let rates = village.production_rates(&catalog);
        assert_eq!(rates.wood, 0.0, "level 0 fields produce nothing");

        village.building_mut(BuildingName::Woodcutter).level = 1;
        village.building_mut(BuildingName::CropField).level = 3;

        let rates = village.production_rates(&catalog);
        assert_eq!(rates.wood, 30.0);
        let expected_crop = 30.0 * 1.1f64.powi(2);
        assert!((rates.crop - expected_crop).abs() < 1e-9);
    }

    #[test]
    fn test_accrue_fills_stocks_over_time() {
        let catalog = Catalog::standard().unwrap();
        let start = Utc::now();
        let mut village = village_factory(VillageFactoryOptions {
            created_at: Some(start),
            ..Default::default()
        });
        village.building_mut(BuildingName::Woodcutter).level = 1;

        village.accrue(&catalog, start + Duration::hours(2));
        assert!((village.stocks.balance(Resource::Wood).amount - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_recompute_capacities_from_storage_levels() {
        let mut village = village_factory(VillageFactoryOptions::default());

        village.building_mut(BuildingName::Warehouse).level = 3;
        village.building_mut(BuildingName::Granary).level = 1;
        village.recompute_capacities();

        assert_eq!(village.stocks.balance(Resource::Wood).capacity, 4000.0);
        assert_eq!(village.stocks.balance(Resource::Iron).capacity, 4000.0);
        assert_eq!(village.stocks.balance(Resource::Crop).capacity, 2000.0);
    }

    #[test]
    fn test_check_requirements() {
        let mut village = village_factory(VillageFactoryOptions::default());
        let requirements = [BuildingRequirement(BuildingName::Barracks, 3)];

        let err = village.check_requirements(&requirements).unwrap_err();
        assert!(matches!(
            err,
            GameError::BuildingRequirementsNotMet {
                building: BuildingName::Barracks,
                level: 3
            }
        ));

        village.building_mut(BuildingName::Barracks).level = 3;
        assert!(village.check_requirements(&requirements).is_ok());
    }

    #[test]
    fn test_add_troops_merges_stacks() {
        let mut village = village_factory(VillageFactoryOptions::default());

        village.add_troops(UnitName::Raider, 10);
        village.add_troops(UnitName::Raider, 5);
        village.add_troops(UnitName::Huscarl, 2);

        assert_eq!(village.troop_quantity(UnitName::Raider), 15);
        assert_eq!(village.troop_quantity(UnitName::Huscarl), 2);
        assert_eq!(village.total_troops(), 17);
        assert_eq!(village.troops.len(), 2);
    }
}
