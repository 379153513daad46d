pub mod battle;
pub mod catalog;
pub mod economy;
pub mod models;
pub mod queue;
pub mod scheduler;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
