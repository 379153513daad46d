use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub enum BuildingGroup {
    Resources,
    Infrastructure,
    Military,
}

/// A prerequisite on another building: (name, minimum level).
#[derive(Debug, Clone)]
pub struct BuildingRequirement(pub BuildingName, pub u8);

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Deserialize, Serialize)]
pub enum BuildingName {
    Woodcutter,
    ClayPit,
    IronMine,
    CropField,
    Warehouse,
    Granary,
    Barracks,
    RallyPoint,
    Wall,
    Watchtower,
    Trap,
}

impl BuildingName {
    pub const ALL: [BuildingName; 11] = [
        BuildingName::Woodcutter,
        BuildingName::ClayPit,
        BuildingName::IronMine,
        BuildingName::CropField,
        BuildingName::Warehouse,
        BuildingName::Granary,
        BuildingName::Barracks,
        BuildingName::RallyPoint,
        BuildingName::Wall,
        BuildingName::Watchtower,
        BuildingName::Trap,
    ];
}

impl fmt::Display for BuildingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildingName::Woodcutter => "Woodcutter",
            BuildingName::ClayPit => "Clay Pit",
            BuildingName::IronMine => "Iron Mine",
            BuildingName::CropField => "Crop Field",
            BuildingName::Warehouse => "Warehouse",
            BuildingName::Granary => "Granary",
            BuildingName::Barracks => "Barracks",
            BuildingName::RallyPoint => "Rally Point",
            BuildingName::Wall => "Wall",
            BuildingName::Watchtower => "Watchtower",
            BuildingName::Trap => "Trap",
        };

        f.write_str(name)
    }
}
