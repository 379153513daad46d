use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Deserialize, Serialize)]
pub enum Resource {
    Wood,
    Clay,
    Iron,
    Crop,
}

impl Resource {
    pub const ALL: [Resource; 4] = [Resource::Wood, Resource::Clay, Resource::Iron, Resource::Crop];
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Wood => "wood",
            Resource::Clay => "clay",
            Resource::Iron => "iron",
            Resource::Crop => "crop",
        };

        f.write_str(name)
    }
}

/// An amount for each resource kind. Used for costs, refunds and stock deltas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceMap {
    pub wood: f64,
    pub clay: f64,
    pub iron: f64,
    pub crop: f64,
}

impl ResourceMap {
    pub const fn new(wood: f64, clay: f64, iron: f64, crop: f64) -> Self {
        Self {
            wood,
            clay,
            iron,
            crop,
        }
    }

    pub fn amount(&self, kind: Resource) -> f64 {
        match kind {
            Resource::Wood => self.wood,
            Resource::Clay => self.clay,
            Resource::Iron => self.iron,
            Resource::Crop => self.crop,
        }
    }

    pub fn amount_mut(&mut self, kind: Resource) -> &mut f64 {
        match kind {
            Resource::Wood => &mut self.wood,
            Resource::Clay => &mut self.clay,
            Resource::Iron => &mut self.iron,
            Resource::Crop => &mut self.crop,
        }
    }

    pub fn total(&self) -> f64 {
        self.wood + self.clay + self.iron + self.crop
    }
}

impl core::ops::Mul<f64> for ResourceMap {
    type Output = ResourceMap;

    fn mul(self, rhs: f64) -> Self::Output {
        ResourceMap::new(
            self.wood * rhs,
            self.clay * rhs,
            self.iron * rhs,
            self.crop * rhs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_map_total() {
        let rm = ResourceMap::new(100.0, 200.0, 300.0, 400.0);
        assert_eq!(rm.total(), 1000.0);

        let rm_zero = ResourceMap::default();
        assert_eq!(rm_zero.total(), 0.0);
    }

    #[test]
    fn test_resource_map_scaling() {
        let rm = ResourceMap::new(100.0, 50.0, 80.0, 30.0) * 0.5;
        assert_eq!(rm.wood, 50.0);
        assert_eq!(rm.clay, 25.0);
        assert_eq!(rm.iron, 40.0);
        assert_eq!(rm.crop, 15.0);
    }

    #[test]
    fn test_resource_map_amount_by_kind() {
        let mut rm = ResourceMap::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(rm.amount(Resource::Wood), 1.0);
        assert_eq!(rm.amount(Resource::Crop), 4.0);

        *rm.amount_mut(Resource::Iron) += 7.0;
        assert_eq!(rm.amount(Resource::Iron), 10.0);
    }
}
