use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the store collaborators (repositories).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Village {0} not found")]
    VillageNotFound(u32),

    #[error("Queue entry {0} not found")]
    EntryNotFound(Uuid),
}
