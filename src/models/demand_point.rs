// Demand point model: a weighted point of need

use serde::{Deserialize, Serialize};

use crate::models::{DemandId, Location, Population};

/// Administrative region a demand point falls in, as reported by the
/// external region lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegionTag {
    Named(String),
    #[default]
    Unknown,
    /// The lookup itself failed for this point
    Error,
}

impl RegionTag {
    /// Normalised region name, if there is one
    pub fn name(&self) -> Option<&str> {
        match self {
            RegionTag::Named(name) => Some(name),
            RegionTag::Unknown | RegionTag::Error => None,
        }
    }
}

/// A demand point to be served by some outlet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    /// Unique, stable identifier
    pub id: DemandId,

    pub location: Location,

    /// Always strictly positive once ingested
    pub population: Population,

    #[serde(default)]
    pub region: RegionTag,
}

impl DemandPoint {
    /// Creates a demand point with an unknown region
    pub fn new(id: DemandId, location: Location, population: Population) -> Self {
        Self {
            id,
            location,
            population,
            region: RegionTag::Unknown,
        }
    }

    pub fn with_region(mut self, region: RegionTag) -> Self {
        self.region = region;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_unknown_region() {
        let point = DemandPoint::new(1, Location::new(27.1, 78.0), 5000);
        assert_eq!(point.region, RegionTag::Unknown);
        assert_eq!(point.region.name(), None);
    }

    #[test]
    fn test_with_region() {
        let point = DemandPoint::new(1, Location::new(27.1, 78.0), 5000)
            .with_region(RegionTag::Named("agra".to_string()));
        assert_eq!(point.region.name(), Some("agra"));
    }
}
