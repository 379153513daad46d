pub mod catalog_error;
pub mod game_error;
pub mod store_error;

pub use catalog_error::CatalogError;
pub use game_error::GameError;
pub use store_error::StoreError;

use thiserror::Error;

/// Umbrella error returned by the application layer. Wraps domain,
/// catalog and store errors so handlers can propagate with `?`.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;
