use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use oppidum_types::buildings::BuildingName;

/// A building instance owned by a village. Level 0 means the building
/// has not been constructed yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub name: BuildingName,
    pub level: u8,
    /// Set while an upgrade is running; `None` otherwise. At most one
    /// upgrade per building can be active.
    pub upgrade_started_at: Option<DateTime<Utc>>,
}

impl Building {
    pub fn new(name: BuildingName) -> Self {
        Self {
            name,
            level: 0,
            upgrade_started_at: None,
        }
    }

    pub fn is_upgrading(&self) -> bool {
        self.upgrade_started_at.is_some()
    }
}
