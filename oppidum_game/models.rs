pub mod buildings;
pub mod queue;
pub mod resources;
pub mod village;
