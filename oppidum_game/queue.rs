use chrono::{DateTime, Utc};

use oppidum_types::{army::UnitName, buildings::BuildingName, errors::GameError};

use crate::{
    battle,
    catalog::Catalog,
    economy,
    models::{
        queue::{QueueEntry, QueueStatus, QueueTask},
        village::Village,
    },
};

/// Drives the lifecycle of upgrade and training tasks against a single
/// village. Admission and debit run before the first write, so every
/// failure leaves the village unchanged; the only mutation shared by
/// all paths is the resource accrual catch-up, which is idempotent and
/// due regardless of the outcome.
///
/// The engine performs no I/O. Persisting the mutated village and the
/// returned entries, and emitting notifications, is the caller's job,
/// as is serializing mutations per village: the check-then-write
/// sequences here assume a single writer at a time.
pub struct QueueEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueueEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Starts upgrading a building to its next level.
    pub fn start_upgrade(
        &self,
        village: &mut Village,
        building: BuildingName,
        now: DateTime<Utc>,
    ) -> Result<QueueEntry, GameError> {
        let building_type = self.catalog.building(building);
        let current = village.building(building);

        if current.is_upgrading() {
            return Err(GameError::UpgradeInProgress(building));
        }
        if current.level >= building_type.max_level {
            return Err(GameError::BuildingMaxLevelReached(building));
        }
        village.check_requirements(building_type.requirements)?;

        let target_level = current.level + 1;
        let cost = economy::upgrade_cost(&building_type.base_costs, target_level)?;
        let duration_secs = economy::upgrade_time_secs(target_level)?;

        village.accrue(self.catalog, now);
        village.stocks.spend(&cost)?;

        let entry = QueueEntry::new(
            village.id,
            village.player_id,
            QueueTask::UpgradeBuilding {
                building,
                target_level,
            },
            cost,
            now,
            duration_secs,
        );
        village.building_mut(building).upgrade_started_at = Some(now);

        Ok(entry)
    }

    /// Starts training a batch of units. One batch per village at a
    /// time; the barracks level shortens the duration.
    pub fn start_training(
        &self,
        village: &mut Village,
        unit: UnitName,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<QueueEntry, GameError> {
        let unit_type = self.catalog.unit(unit);

        if unit_type.tribe != village.tribe {
            return Err(GameError::UnitTribeMismatch {
                unit,
                tribe: village.tribe,
            });
        }
        if village.is_training() {
            return Err(GameError::TrainingInProgress);
        }
        village.check_requirements(unit_type.requirements)?;

        let cost = economy::training_cost(&unit_type.base_costs, quantity)?;
        let base_secs = economy::training_time_secs(quantity)?;
        let speedup = battle::training_speed_bonus(village);
        let duration_secs = (base_secs as f64 * (1.0 - speedup)).floor() as u32;

        village.accrue(self.catalog, now);
        village.stocks.spend(&cost)?;

        let entry = QueueEntry::new(
            village.id,
            village.player_id,
            QueueTask::TrainUnits { unit, quantity },
            cost,
            now,
            duration_secs,
        );
        village.training_started_at = Some(now);

        Ok(entry)
    }

    /// Cancels an in-progress task, refunding half of the recorded
    /// cost snapshot. The refund is credited through the capped store,
    /// so it can be lossy when storage is full.
    pub fn cancel(
        &self,
        village: &mut Village,
        entry: &mut QueueEntry,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        if !entry.is_in_progress() {
            return Err(GameError::EntryNotActive(entry.id));
        }

        village.accrue(self.catalog, now);
        village.stocks.add(&(entry.cost * 0.5));

        match entry.task {
            QueueTask::UpgradeBuilding { building, .. } => {
                village.building_mut(building).upgrade_started_at = None;
            }
            QueueTask::TrainUnits { .. } => {
                village.training_started_at = None;
            }
        }
        entry.status = QueueStatus::Cancelled;

        Ok(())
    }

    /// Applies the terminal effect of an in-progress task. The caller
    /// (the completion sweep) guarantees the entry is due; the deadline
    /// is not re-checked here. A second call on the same entry fails
    /// without re-applying anything.
    pub fn complete(
        &self,
        village: &mut Village,
        entry: &mut QueueEntry,
    ) -> Result<(), GameError> {
        if !entry.is_in_progress() {
            return Err(GameError::EntryNotActive(entry.id));
        }

        // integrate production at the pre-completion rates first
        village.accrue(self.catalog, entry.completes_at);

        match entry.task {
            QueueTask::UpgradeBuilding {
                building,
                target_level,
            } => {
                let upgraded = village.building_mut(building);
                upgraded.level = target_level;
                upgraded.upgrade_started_at = None;

                if matches!(building, BuildingName::Warehouse | BuildingName::Granary) {
                    village.recompute_capacities();
                }
            }
            QueueTask::TrainUnits { unit, quantity } => {
                village.add_troops(unit, quantity);
                village.training_started_at = None;
            }
        }
        entry.status = QueueStatus::Completed;

        Ok(())
    }
}
