use dotenvy::dotenv;
use std::env;

pub struct Config {
    /// Maximum concurrent building upgrades per village.
    pub building_queue_limit: usize,
    /// Seconds between two completion sweeps of the worker.
    pub sweep_interval_secs: u64,
    /// Maximum due entries picked up per sweep.
    pub sweep_batch_size: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let building_queue_limit = match env::var("OPPIDUM_BUILDING_QUEUE_LIMIT") {
            Ok(val) => val.parse::<usize>().unwrap_or(2).max(1),
            Err(_) => 2,
        };

        let sweep_interval_secs = match env::var("OPPIDUM_SWEEP_INTERVAL_SECS") {
            Ok(val) => val.parse::<u64>().unwrap_or(1).max(1),
            Err(_) => 1,
        };

        let sweep_batch_size = match env::var("OPPIDUM_SWEEP_BATCH_SIZE") {
            Ok(val) => val.parse::<i64>().unwrap_or(50).max(1),
            Err(_) => 50,
        };

        Self {
            building_queue_limit,
            sweep_interval_secs,
            sweep_batch_size,
        }
    }
}
