use oppidum_types::{errors::GameError, resources::ResourceMap};

/// Every resource kind starts with this storage capacity, before any
/// warehouse or granary is built.
pub const BASE_STORAGE_CAPACITY: f64 = 1000.0;

/// Additional storage granted by each warehouse/granary level.
pub const STORAGE_CAPACITY_PER_LEVEL: f64 = 1000.0;

/// Cost and build-time growth per building level. A game-balance
/// constant, not a tunable.
pub const UPGRADE_GROWTH_FACTOR: f64 = 1.5;

/// Production growth per building level.
pub const PRODUCTION_GROWTH_FACTOR: f64 = 1.1;

/// Base duration of a level-1 upgrade and of training a single unit.
pub const BASE_TASK_TIME_SECS: f64 = 60.0;

/// Cost of upgrading a building to `level`: each base cost scaled by
/// 1.5^(level-1). Level 0 is not a valid upgrade target.
pub fn upgrade_cost(base_costs: &ResourceMap, level: u8) -> Result<ResourceMap, GameError> {
    if level < 1 {
        return Err(GameError::InvalidLevel(level));
    }

    Ok(*base_costs * UPGRADE_GROWTH_FACTOR.powi(level as i32 - 1))
}

/// Time to upgrade a building to `level`, in seconds.
pub fn upgrade_time_secs(level: u8) -> Result<u32, GameError> {
    if level < 1 {
        return Err(GameError::InvalidLevel(level));
    }

    let secs = BASE_TASK_TIME_SECS * UPGRADE_GROWTH_FACTOR.powi(level as i32 - 1);
    Ok(secs.floor() as u32)
}

/// Cost of training `quantity` units. Linear in quantity, a distinct
/// policy from the exponential building scale.
pub fn training_cost(base_costs: &ResourceMap, quantity: u32) -> Result<ResourceMap, GameError> {
    if quantity < 1 {
        return Err(GameError::InvalidQuantity(quantity));
    }

    Ok(*base_costs * quantity as f64)
}

/// Time to train `quantity` units, in seconds.
pub fn training_time_secs(quantity: u32) -> Result<u32, GameError> {
    if quantity < 1 {
        return Err(GameError::InvalidQuantity(quantity));
    }

    Ok((BASE_TASK_TIME_SECS * quantity as f64).floor() as u32)
}

/// Hourly production of a resource building at `level`. A building at
/// level 0 is not yet constructed and produces nothing.
pub fn production_rate(base_rate: f64, level: u8) -> f64 {
    if level == 0 {
        return 0.0;
    }

    base_rate * PRODUCTION_GROWTH_FACTOR.powi(level as i32 - 1)
}

/// Storage added by a warehouse or granary at `level`, on top of
/// [`BASE_STORAGE_CAPACITY`].
pub fn storage_capacity_contribution(level: u8) -> f64 {
    STORAGE_CAPACITY_PER_LEVEL * level as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_cost_scales_exponentially() {
        let base = ResourceMap::new(100.0, 80.0, 60.0, 40.0);

        let l1 = upgrade_cost(&base, 1).unwrap();
        assert_eq!(l1.wood, 100.0, "level 1 cost is the base cost");

        let l3 = upgrade_cost(&base, 3).unwrap();
        assert_eq!(l3.wood, 225.0, "100 * 1.5^2");
        assert_eq!(l3.clay, 180.0, "80 * 1.5^2");
    }

    #[test]
    fn test_upgrade_cost_strictly_increasing() {
        let base = ResourceMap::new(100.0, 100.0, 100.0, 100.0);
        let mut previous = 0.0;

        for level in 1..=20u8 {
            let cost = upgrade_cost(&base, level).unwrap().wood;
            assert!(
                cost > previous,
                "cost at level {} should exceed level {}",
                level,
                level - 1
            );
            previous = cost;
        }
    }

    #[test]
    fn test_upgrade_cost_rejects_level_zero() {
        let base = ResourceMap::new(100.0, 100.0, 100.0, 100.0);
        assert!(matches!(
            upgrade_cost(&base, 0),
            Err(GameError::InvalidLevel(0))
        ));
    }

    #[test]
    fn test_upgrade_time() {
        assert_eq!(upgrade_time_secs(1).unwrap(), 60);
        assert_eq!(upgrade_time_secs(2).unwrap(), 90);
        assert_eq!(upgrade_time_secs(3).unwrap(), 135);
        assert!(upgrade_time_secs(0).is_err());
    }

    #[test]
    fn test_training_cost_is_linear() {
        let base = ResourceMap::new(95.0, 75.0, 40.0, 40.0);

        let one = training_cost(&base, 1).unwrap();
        assert_eq!(one.wood, 95.0);

        let ten = training_cost(&base, 10).unwrap();
        assert_eq!(ten.wood, 950.0);
        assert_eq!(ten.crop, 400.0);

        assert!(matches!(
            training_cost(&base, 0),
            Err(GameError::InvalidQuantity(0))
        ));
    }

    #[test]
    fn test_training_time_is_linear() {
        assert_eq!(training_time_secs(1).unwrap(), 60);
        assert_eq!(training_time_secs(25).unwrap(), 1500);
        assert!(training_time_secs(0).is_err());
    }

    #[test]
    fn test_production_rate() {
        assert_eq!(production_rate(30.0, 0), 0.0, "unbuilt field produces nothing");
        assert_eq!(production_rate(30.0, 1), 30.0);

        let l5 = production_rate(30.0, 5);
        let expected = 30.0 * 1.1f64.powi(4);
        assert!((l5 - expected).abs() < 1e-9);
    }

    #[test]
    fn test_storage_capacity_contribution() {
        assert_eq!(storage_capacity_contribution(0), 0.0);
        assert_eq!(storage_capacity_contribution(1), 1000.0);
        assert_eq!(storage_capacity_contribution(7), 7000.0);
    }
}
