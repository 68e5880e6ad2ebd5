// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use algorithms::optimizer::{OptimizationResponse, OptimizationResult, OutletOptimizer};
pub use algorithms::LocationSolver;
pub use config::OptimizerConfig;
pub use error::{OptimizerError, Result};
pub use models::{Assignment, AssignmentOutcome, DemandPoint, DistanceRecord, Location, Outlet};
pub use utils::road_network::RoadGraph;
