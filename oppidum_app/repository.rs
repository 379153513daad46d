use chrono::{DateTime, Utc};
use uuid::Uuid;

use oppidum_game::models::{queue::QueueEntry, village::Village};
use oppidum_types::errors::ApplicationError;

#[async_trait::async_trait]
pub trait VillageRepository: Send + Sync {
    async fn get_by_id(&self, village_id: u32) -> Result<Village, ApplicationError>;
    async fn list_by_player_id(&self, player_id: Uuid) -> Result<Vec<Village>, ApplicationError>;
    async fn save(&self, village: &Village) -> Result<(), ApplicationError>;
}

#[async_trait::async_trait]
pub trait QueueRepository: Send + Sync {
    async fn add(&self, entry: &QueueEntry) -> Result<(), ApplicationError>;
    async fn get_by_id(&self, entry_id: Uuid) -> Result<QueueEntry, ApplicationError>;
    async fn save(&self, entry: &QueueEntry) -> Result<(), ApplicationError>;
    async fn list_in_progress_by_village_id(
        &self,
        village_id: u32,
    ) -> Result<Vec<QueueEntry>, ApplicationError>;
    /// In-progress entries whose completion time has passed.
    async fn find_due(
        &self,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<QueueEntry>, ApplicationError>;
}
