use oppidum_types::{errors::ApplicationError, events::GameEvent};

/// Port for the notification collaborator. Deliveries are
/// fire-and-forget from the engine's point of view: handlers log a
/// failed publish and carry on, they never roll back game state over
/// it.
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: GameEvent) -> Result<(), ApplicationError>;
}
