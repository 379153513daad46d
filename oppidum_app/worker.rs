use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::time;
use tracing::{error, info, warn};

use oppidum_game::{
    catalog::Catalog,
    models::queue::{QueueEntry, QueueTask},
    queue::QueueEngine,
    scheduler::{self, Completion},
};
use oppidum_types::{
    errors::ApplicationError,
    events::{EventKind, GameEvent},
};

use crate::{config::Config, events::EventPublisher, uow::UnitOfWorkProvider};

/// Polls for due queue entries and applies them. The completion sweep
/// itself is the stateless core routine; this worker only supplies the
/// clock, the transaction and the event delivery around it.
pub struct QueueWorker {
    provider: Arc<dyn UnitOfWorkProvider>,
    events: Arc<dyn EventPublisher>,
    catalog: Arc<Catalog>,
    config: Arc<Config>,
}

impl QueueWorker {
    pub fn new(
        provider: Arc<dyn UnitOfWorkProvider>,
        events: Arc<dyn EventPublisher>,
        catalog: Arc<Catalog>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            provider,
            events,
            catalog,
            config,
        }
    }

    /// Run worker loop inside a tokio task.
    pub fn run(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(self.config.sweep_interval_secs));
            info!("Queue worker started");

            loop {
                interval.tick().await;
                if let Err(error) = self.process_due_entries(Utc::now()).await {
                    error!(%error, "Error while processing due queue entries");
                }
            }
        });
    }

    /// One sweep pass at `now`. Entries are grouped per village so each
    /// village is loaded, mutated and saved exactly once.
    pub async fn process_due_entries(&self, now: DateTime<Utc>) -> Result<usize, ApplicationError> {
        let uow = self.provider.tx().await?;
        let village_repo = uow.villages();
        let queue_repo = uow.queue();

        let due = queue_repo
            .find_due(now, self.config.sweep_batch_size)
            .await?;
        if due.is_empty() {
            uow.commit().await?;
            return Ok(0);
        }

        let mut by_village: BTreeMap<u32, Vec<QueueEntry>> = BTreeMap::new();
        for entry in due {
            by_village.entry(entry.village_id).or_default().push(entry);
        }

        let engine = QueueEngine::new(&self.catalog);
        let mut completed = 0;

        for (village_id, mut entries) in by_village {
            let mut village = village_repo.get_by_id(village_id).await?;
            let completions = scheduler::sweep_village(&engine, &mut village, &mut entries, now);

            village_repo.save(&village).await?;
            for entry in &entries {
                queue_repo.save(entry).await?;
            }

            for completion in &completions {
                if let Err(error) = self.events.publish(completion_event(completion)).await {
                    warn!(%error, entry_id = %completion.entry_id, "Failed to publish completion event");
                }
            }
            completed += completions.len();
        }

        uow.commit().await?;
        Ok(completed)
    }
}

fn completion_event(completion: &Completion) -> GameEvent {
    match &completion.task {
        QueueTask::UpgradeBuilding {
            building,
            target_level,
        } => GameEvent::new(
            EventKind::BuildingCompleted,
            completion.village_id,
            completion.entry_id,
            completion.completed_at,
            json!({
                "building": building.to_string(),
                "level": target_level,
            }),
        ),
        QueueTask::TrainUnits { unit, quantity } => GameEvent::new(
            EventKind::TrainingCompleted,
            completion.village_id,
            completion.entry_id,
            completion.completed_at,
            json!({
                "unit": unit.to_string(),
                "quantity": quantity,
            }),
        ),
    }
}
