use std::collections::HashMap;

use oppidum_types::{
    army::{Tribe, UnitName, UnitRole},
    buildings::{BuildingGroup, BuildingName, BuildingRequirement},
    errors::CatalogError,
    resources::{Resource, ResourceMap},
};

/// Static definition of a building type. Base values refer to level 1;
/// scaling across levels is the economy module's concern.
#[derive(Debug, Clone)]
pub struct BuildingType {
    pub name: BuildingName,
    pub group: BuildingGroup,
    pub max_level: u8,
    pub base_costs: ResourceMap,
    /// Resource kind fed by this building and its hourly base rate.
    pub production: Option<(Resource, f64)>,
    pub requirements: &'static [BuildingRequirement],
}

/// Static definition of a trainable unit.
#[derive(Debug, Clone)]
pub struct UnitType {
    pub name: UnitName,
    pub tribe: Tribe,
    pub role: UnitRole,
    pub attack: u32,
    pub defense_infantry: u32,
    pub defense_cavalry: u32,
    pub speed: u8,
    pub capacity: u32,
    pub base_costs: ResourceMap,
    pub requirements: &'static [BuildingRequirement],
}

/// The read-only building/unit catalogs. Built once at startup; every
/// key of the closed name enums is present after a successful load, so
/// lookups are infallible from then on.
#[derive(Debug, Clone)]
pub struct Catalog {
    buildings: HashMap<BuildingName, BuildingType>,
    units: HashMap<UnitName, UnitType>,
}

impl Catalog {
    /// Loads the standard catalog and validates it, failing fast on an
    /// inconsistent definition instead of yielding zero values at play
    /// time.
    pub fn standard() -> Result<Self, CatalogError> {
        let buildings = BuildingName::ALL
            .iter()
            .map(|name| (*name, building_data(*name)))
            .collect();
        let units = UnitName::ALL
            .iter()
            .map(|name| (*name, unit_data(*name)))
            .collect();

        let catalog = Self { buildings, units };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn building(&self, name: BuildingName) -> &BuildingType {
        // every enum key is inserted by standard()
        &self.buildings[&name]
    }

    pub fn unit(&self, name: UnitName) -> &UnitType {
        &self.units[&name]
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for name in BuildingName::ALL {
            let building = self
                .buildings
                .get(&name)
                .ok_or(CatalogError::MissingBuilding(name))?;

            if building.max_level == 0 {
                return Err(CatalogError::InvalidMaxLevel(name));
            }

            self.validate_requirements(&name.to_string(), building.requirements)?;
        }

        for name in UnitName::ALL {
            let unit = self.units.get(&name).ok_or(CatalogError::MissingUnit(name))?;
            self.validate_requirements(&name.to_string(), unit.requirements)?;
        }

        Ok(())
    }

    fn validate_requirements(
        &self,
        subject: &str,
        requirements: &[BuildingRequirement],
    ) -> Result<(), CatalogError> {
        for BuildingRequirement(required, level) in requirements {
            let max_level = self
                .buildings
                .get(required)
                .ok_or(CatalogError::MissingBuilding(*required))?
                .max_level;

            if *level > max_level {
                return Err(CatalogError::UnsatisfiableRequirement {
                    subject: subject.to_string(),
                    required: *required,
                    level: *level,
                    max_level,
                });
            }
        }

        Ok(())
    }
}

fn building_data(name: BuildingName) -> BuildingType {
    match name {
        BuildingName::Woodcutter => BuildingType {
            name,
            group: BuildingGroup::Resources,
            max_level: 20,
            base_costs: ResourceMap::new(40.0, 100.0, 50.0, 60.0),
            production: Some((Resource::Wood, 30.0)),
            requirements: &[],
        },
        BuildingName::ClayPit => BuildingType {
            name,
            group: BuildingGroup::Resources,
            max_level: 20,
            base_costs: ResourceMap::new(80.0, 40.0, 80.0, 50.0),
            production: Some((Resource::Clay, 30.0)),
            requirements: &[],
        },
        BuildingName::IronMine => BuildingType {
            name,
            group: BuildingGroup::Resources,
            max_level: 20,
            base_costs: ResourceMap::new(100.0, 80.0, 30.0, 60.0),
            production: Some((Resource::Iron, 30.0)),
            requirements: &[],
        },
        BuildingName::CropField => BuildingType {
            name,
            group: BuildingGroup::Resources,
            max_level: 20,
            base_costs: ResourceMap::new(70.0, 90.0, 70.0, 20.0),
            production: Some((Resource::Crop, 30.0)),
            requirements: &[],
        },
        BuildingName::Warehouse => BuildingType {
            name,
            group: BuildingGroup::Infrastructure,
            max_level: 20,
            base_costs: ResourceMap::new(130.0, 160.0, 90.0, 40.0),
            production: None,
            requirements: &[],
        },
        BuildingName::Granary => BuildingType {
            name,
            group: BuildingGroup::Infrastructure,
            max_level: 20,
            base_costs: ResourceMap::new(80.0, 100.0, 70.0, 20.0),
            production: None,
            requirements: &[],
        },
        BuildingName::Barracks => BuildingType {
            name,
            group: BuildingGroup::Military,
            max_level: 20,
            base_costs: ResourceMap::new(210.0, 140.0, 260.0, 120.0),
            production: None,
            requirements: &[BuildingRequirement(BuildingName::RallyPoint, 1)],
        },
        BuildingName::RallyPoint => BuildingType {
            name,
            group: BuildingGroup::Military,
            max_level: 20,
            base_costs: ResourceMap::new(110.0, 160.0, 90.0, 70.0),
            production: None,
            requirements: &[],
        },
        BuildingName::Wall => BuildingType {
            name,
            group: BuildingGroup::Military,
            max_level: 20,
            base_costs: ResourceMap::new(70.0, 90.0, 170.0, 70.0),
            production: None,
            requirements: &[],
        },
        BuildingName::Watchtower => BuildingType {
            name,
            group: BuildingGroup::Military,
            max_level: 20,
            base_costs: ResourceMap::new(180.0, 250.0, 370.0, 240.0),
            production: None,
            requirements: &[BuildingRequirement(BuildingName::Wall, 3)],
        },
        BuildingName::Trap => BuildingType {
            name,
            group: BuildingGroup::Military,
            max_level: 20,
            base_costs: ResourceMap::new(80.0, 120.0, 70.0, 90.0),
            production: None,
            requirements: &[BuildingRequirement(BuildingName::RallyPoint, 1)],
        },
    }
}

fn unit_data(name: UnitName) -> UnitType {
    match name {
        // --- Norse ---
        UnitName::Raider => UnitType {
            name,
            tribe: Tribe::Norse,
            role: UnitRole::Infantry,
            attack: 60,
            defense_infantry: 20,
            defense_cavalry: 15,
            speed: 7,
            capacity: 60,
            base_costs: ResourceMap::new(95.0, 75.0, 40.0, 40.0),
            requirements: &[BuildingRequirement(BuildingName::Barracks, 1)],
        },
        UnitName::Huscarl => UnitType {
            name,
            tribe: Tribe::Norse,
            role: UnitRole::Infantry,
            attack: 40,
            defense_infantry: 70,
            defense_cavalry: 55,
            speed: 6,
            capacity: 40,
            base_costs: ResourceMap::new(145.0, 70.0, 85.0, 40.0),
            requirements: &[BuildingRequirement(BuildingName::Barracks, 3)],
        },
        UnitName::Hirdman => UnitType {
            name,
            tribe: Tribe::Norse,
            role: UnitRole::Cavalry,
            attack: 90,
            defense_infantry: 25,
            defense_cavalry: 40,
            speed: 14,
            capacity: 80,
            base_costs: ResourceMap::new(175.0, 180.0, 240.0, 115.0),
            requirements: &[BuildingRequirement(BuildingName::Barracks, 10)],
        },
        // --- Frankish ---
        UnitName::Milites => UnitType {
            name,
            tribe: Tribe::Frankish,
            role: UnitRole::Infantry,
            attack: 40,
            defense_infantry: 35,
            defense_cavalry: 50,
            speed: 6,
            capacity: 50,
            base_costs: ResourceMap::new(120.0, 100.0, 150.0, 30.0),
            requirements: &[BuildingRequirement(BuildingName::Barracks, 1)],
        },
        UnitName::Arbalist => UnitType {
            name,
            tribe: Tribe::Frankish,
            role: UnitRole::Infantry,
            attack: 25,
            defense_infantry: 60,
            defense_cavalry: 30,
            speed: 5,
            capacity: 20,
            base_costs: ResourceMap::new(100.0, 130.0, 160.0, 70.0),
            requirements: &[BuildingRequirement(BuildingName::Barracks, 3)],
        },
        UnitName::Paladin => UnitType {
            name,
            tribe: Tribe::Frankish,
            role: UnitRole::Cavalry,
            attack: 55,
            defense_infantry: 100,
            defense_cavalry: 55,
            speed: 10,
            capacity: 110,
            base_costs: ResourceMap::new(370.0, 270.0, 290.0, 75.0),
            requirements: &[BuildingRequirement(BuildingName::Barracks, 10)],
        },
        // --- Saxon ---
        UnitName::Fyrdman => UnitType {
            name,
            tribe: Tribe::Saxon,
            role: UnitRole::Infantry,
            attack: 15,
            defense_infantry: 40,
            defense_cavalry: 50,
            speed: 7,
            capacity: 35,
            base_costs: ResourceMap::new(100.0, 130.0, 55.0, 30.0),
            requirements: &[BuildingRequirement(BuildingName::Barracks, 1)],
        },
        UnitName::Thegn => UnitType {
            name,
            tribe: Tribe::Saxon,
            role: UnitRole::Infantry,
            attack: 65,
            defense_infantry: 35,
            defense_cavalry: 20,
            speed: 7,
            capacity: 45,
            base_costs: ResourceMap::new(140.0, 150.0, 185.0, 60.0),
            requirements: &[BuildingRequirement(BuildingName::Barracks, 3)],
        },
        UnitName::Marchrider => UnitType {
            name,
            tribe: Tribe::Saxon,
            role: UnitRole::Cavalry,
            attack: 100,
            defense_infantry: 25,
            defense_cavalry: 40,
            speed: 16,
            capacity: 75,
            base_costs: ResourceMap::new(350.0, 450.0, 230.0, 60.0),
            requirements: &[BuildingRequirement(BuildingName::Barracks, 10)],
        },
    }
}
