use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use oppidum_game::catalog::Catalog;
use oppidum_types::errors::ApplicationError;

use crate::{config::Config, events::EventPublisher, uow::UnitOfWork};

/// A marker trait for Command structs.
/// Commands are operations that change the state of the system.
pub trait Command: Send + Sync {}

/// Everything a command handler needs besides the command itself. The
/// current instant is threaded in from the transport edge so handlers
/// never read an ambient clock.
pub struct CommandContext<'a> {
    pub uow: Box<dyn UnitOfWork<'a> + 'a>,
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub events: Arc<dyn EventPublisher>,
    pub now: DateTime<Utc>,
}

/// A trait for handlers that execute Commands.
/// Handlers do not manage the transaction lifecycle (commit/rollback);
/// that is the job of the dispatching layer.
#[async_trait]
pub trait CommandHandler<C: Command> {
    async fn handle(&self, cmd: C, ctx: &CommandContext<'_>) -> Result<(), ApplicationError>;
}
