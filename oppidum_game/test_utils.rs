use chrono::{DateTime, Utc};
use uuid::Uuid;

use oppidum_types::army::Tribe;

use crate::models::village::Village;

#[derive(Default)]
pub struct VillageFactoryOptions {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub player_id: Option<Uuid>,
    pub alliance_id: Option<Uuid>,
    pub tribe: Option<Tribe>,
    pub created_at: Option<DateTime<Utc>>,
}

pub fn village_factory(options: VillageFactoryOptions) -> Village {
    let mut village = Village::new(
        options.id.unwrap_or(1),
        options.name.unwrap_or_else(|| "Testheim".to_string()),
        options.player_id.unwrap_or_else(Uuid::new_v4),
        options.tribe.unwrap_or(Tribe::Norse),
        options.created_at.unwrap_or_else(Utc::now),
    );
    village.alliance_id = options.alliance_id;
    village
}
