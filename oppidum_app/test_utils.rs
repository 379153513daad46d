#[cfg(any(test, feature = "test-utils"))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };
    use uuid::Uuid;

    use oppidum_game::models::{queue::QueueEntry, village::Village};
    use oppidum_types::{
        errors::{ApplicationError, StoreError},
        events::GameEvent,
    };

    use crate::{
        events::EventPublisher,
        repository::{QueueRepository, VillageRepository},
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    #[derive(Default, Clone)]
    pub struct MockVillageRepository {
        villages: Arc<Mutex<HashMap<u32, Village>>>,
    }

    #[async_trait]
    impl VillageRepository for MockVillageRepository {
        async fn get_by_id(&self, village_id: u32) -> Result<Village, ApplicationError> {
            let villages = self.villages.lock().unwrap();
            Ok(villages
                .get(&village_id)
                .cloned()
                .ok_or(StoreError::VillageNotFound(village_id))?)
        }

        async fn list_by_player_id(
            &self,
            player_id: Uuid,
        ) -> Result<Vec<Village>, ApplicationError> {
            let villages = self.villages.lock().unwrap();
            Ok(villages
                .values()
                .filter(|v| v.player_id == player_id)
                .cloned()
                .collect())
        }

        async fn save(&self, village: &Village) -> Result<(), ApplicationError> {
            self.villages
                .lock()
                .unwrap()
                .insert(village.id, village.clone());
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockQueueRepository {
        entries: Arc<Mutex<HashMap<Uuid, QueueEntry>>>,
    }

    #[async_trait]
    impl QueueRepository for MockQueueRepository {
        async fn add(&self, entry: &QueueEntry) -> Result<(), ApplicationError> {
            self.entries
                .lock()
                .unwrap()
                .insert(entry.id, entry.clone());
            Ok(())
        }

        async fn get_by_id(&self, entry_id: Uuid) -> Result<QueueEntry, ApplicationError> {
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .get(&entry_id)
                .cloned()
                .ok_or(StoreError::EntryNotFound(entry_id))?)
        }

        async fn save(&self, entry: &QueueEntry) -> Result<(), ApplicationError> {
            self.entries
                .lock()
                .unwrap()
                .insert(entry.id, entry.clone());
            Ok(())
        }

        async fn list_in_progress_by_village_id(
            &self,
            village_id: u32,
        ) -> Result<Vec<QueueEntry>, ApplicationError> {
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .values()
                .filter(|e| e.village_id == village_id && e.is_in_progress())
                .cloned()
                .collect())
        }

        async fn find_due(
            &self,
            now: DateTime<Utc>,
            limit: i64,
        ) -> Result<Vec<QueueEntry>, ApplicationError> {
            let entries = self.entries.lock().unwrap();
            let mut due: Vec<QueueEntry> =
                entries.values().filter(|e| e.is_due(now)).cloned().collect();
            due.sort_by_key(|e| e.completes_at);
            due.truncate(limit as usize);
            Ok(due)
        }
    }

    #[derive(Default, Clone)]
    pub struct MockEventPublisher {
        published: Arc<Mutex<Vec<GameEvent>>>,
    }

    impl MockEventPublisher {
        pub fn published(&self) -> Vec<GameEvent> {
            self.published.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventPublisher for MockEventPublisher {
        async fn publish(&self, event: GameEvent) -> Result<(), ApplicationError> {
            self.published.lock().unwrap().push(event);
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockUnitOfWork {
        villages: MockVillageRepository,
        queue: MockQueueRepository,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn villages(&self) -> Arc<dyn VillageRepository + 'a> {
            Arc::new(self.villages.clone())
        }

        fn queue(&self) -> Arc<dyn QueueRepository + 'a> {
            Arc::new(self.queue.clone())
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            Ok(())
        }
    }

    /// Hands out clones of one shared in-memory state, so a test can
    /// inspect what the worker wrote through a previous transaction.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWorkProvider {
        uow: MockUnitOfWork,
    }

    impl MockUnitOfWorkProvider {
        pub fn uow(&self) -> MockUnitOfWork {
            self.uow.clone()
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn tx<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            Ok(Box::new(self.uow.clone()))
        }
    }
}
