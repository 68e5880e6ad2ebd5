pub mod assignment;
pub mod optimizer;
pub mod reducer;
pub mod relocator;

// Common algorithm traits
use crate::error::Result;
use crate::models::{DemandPoint, Outlet};
use crate::utils::road_network::RoadGraph;

use self::optimizer::OptimizationResult;

/// Trait for outlet location solvers
pub trait LocationSolver {
    /// Choose which outlets to keep and where to put them. `graph` may be
    /// absent, in which case distances are great-circle.
    fn optimize(
        &self,
        outlets: &[Outlet],
        demand_points: &[DemandPoint],
        graph: Option<&RoadGraph>,
    ) -> Result<OptimizationResult>;
}
