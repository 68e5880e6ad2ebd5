// Outlet model: a facility whose location is optimized

use serde::{Deserialize, Serialize};

use crate::models::{Location, OutletId, Population};

/// Population carried by relocated outlets. Relocation does not forward the
/// seeded population, so repeated passes never double count.
pub const PLACEHOLDER_POPULATION: Population = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    /// Unique within a run
    pub id: OutletId,

    pub location: Location,

    /// Not read by assignment or relocation
    pub population: Population,
}

impl Outlet {
    pub fn new(id: OutletId, location: Location, population: Population) -> Self {
        Self {
            id,
            location,
            population,
        }
    }

    /// Outlet produced by relocation
    pub fn relocated(id: OutletId, location: Location) -> Self {
        Self::new(id, location, PLACEHOLDER_POPULATION)
    }
}
