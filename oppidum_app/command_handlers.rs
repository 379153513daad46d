pub mod attack_village;
pub mod cancel_queue_entry;
pub mod scout_village;
pub mod start_building_upgrade;
pub mod train_units;
