// Models module - exports all model types

mod assignment;
mod demand_point;
mod location;
mod outlet;

// Re-export model types
pub use self::assignment::{Assignment, AssignmentOutcome, DistanceRecord};
pub use self::demand_point::{DemandPoint, RegionTag};
pub use self::location::Location;
pub use self::outlet::{Outlet, PLACEHOLDER_POPULATION};

// Common type aliases for improved code readability
pub type DemandId = u32;
pub type OutletId = u32;
pub type Population = u64;
/// Kilometres
pub type Distance = f64;
