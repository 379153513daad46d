use thiserror::Error;

use crate::{army::UnitName, buildings::BuildingName};

/// Errors detected while validating the static catalogs at load time.
/// An invalid catalog fails fast at startup instead of silently yielding
/// zero values during play.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Missing catalog entry for building {0}")]
    MissingBuilding(BuildingName),

    #[error("Missing catalog entry for unit {0}")]
    MissingUnit(UnitName),

    #[error("Building {0} has an invalid max level of 0")]
    InvalidMaxLevel(BuildingName),

    #[error("{subject} requires {required} at level {level}, beyond its max level {max_level}")]
    UnsatisfiableRequirement {
        subject: String,
        required: BuildingName,
        level: u8,
        max_level: u8,
    },
}
