//! Parallel key search: partitioning, dispatch, and aggregation

pub mod aggregate;
pub mod parallel;

pub use aggregate::{SearchState, TOP_CANDIDATES};
pub use parallel::{partition, SearchCoordinator, MAX_WORKERS, PROGRESS_INTERVAL};
