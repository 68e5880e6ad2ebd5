// Request ingestion: raw demand centers to typed demand points

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::OptimizerConfig;
use crate::error::{OptimizerError, Result};
use crate::models::{DemandId, DemandPoint, Location, Population, RegionTag};

/// One demand center as it arrives in a request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandCenterInput {
    pub id: Option<DemandId>,

    #[serde(alias = "lat")]
    pub latitude: Option<f64>,

    #[serde(alias = "lon")]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub population: Option<f64>,
}

/// Request body: `{"demandCenters": [...]}` or `{"locations": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRequest {
    #[serde(rename = "demandCenters", alias = "locations")]
    pub demand_centers: Vec<DemandCenterInput>,
}

impl DemandRequest {
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }
}

/// Looks up the administrative region containing a location.
///
/// Point-in-polygon lookup lives outside this crate; callers plug theirs in
/// here. A failed lookup is reported as `RegionTag::Error`, not a panic.
pub trait RegionResolver {
    fn resolve(&self, location: &Location) -> RegionTag;
}

impl<F> RegionResolver for F
where
    F: Fn(&Location) -> RegionTag,
{
    fn resolve(&self, location: &Location) -> RegionTag {
        self(location)
    }
}

/// Resolver for callers without region data
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegionResolver;

impl RegionResolver for NoRegionResolver {
    fn resolve(&self, _location: &Location) -> RegionTag {
        RegionTag::Unknown
    }
}

/// Region name to population table, names normalised on insert and lookup
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    populations: HashMap<String, Population>,
}

impl PopulationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: &str, population: Population) {
        self.populations.insert(normalize_name(region), population);
    }

    pub fn get(&self, region: &str) -> Option<Population> {
        self.populations.get(&normalize_name(region)).copied()
    }

    pub fn len(&self) -> usize {
        self.populations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.populations.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, Population)> for PopulationTable {
    fn from_iter<I: IntoIterator<Item = (S, Population)>>(iter: I) -> Self {
        let mut table = PopulationTable::new();
        for (region, population) in iter {
            table.insert(region.as_ref(), population);
        }
        table
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Turn request entries into demand points.
///
/// Population comes from the entry when it is at least 1. An entry without
/// one is looked up in the region table, falling back to
/// `config.default_population`; an explicit value below 1 takes the default
/// directly. A missing id or coordinate is fatal.
pub fn ingest_demand<R: RegionResolver>(
    request: &DemandRequest,
    resolver: &R,
    table: &PopulationTable,
    config: &OptimizerConfig,
) -> Result<Vec<DemandPoint>> {
    let mut seen = HashSet::new();
    let mut demand_points = Vec::with_capacity(request.demand_centers.len());

    for (row, entry) in request.demand_centers.iter().enumerate() {
        let id = entry
            .id
            .ok_or_else(|| OptimizerError::invalid_input(format!("demand center #{row} has no id")))?;
        let (Some(lat), Some(lon)) = (entry.latitude, entry.longitude) else {
            return Err(OptimizerError::invalid_input(format!(
                "demand center {id} is missing latitude or longitude"
            )));
        };
        let location = Location::new(lat, lon);
        if !location.is_finite() {
            return Err(OptimizerError::InvalidCoordinate {
                kind: "demand point",
                id,
                lat,
                lon,
            });
        }
        if !seen.insert(id) {
            return Err(OptimizerError::DuplicateDemandId(id));
        }

        let region = resolver.resolve(&location);
        let population = resolve_population(id, entry.population, &region, table, config);

        demand_points.push(DemandPoint {
            id,
            location,
            population,
            region,
        });
    }

    log::debug!("Ingested {} demand points", demand_points.len());
    Ok(demand_points)
}

fn resolve_population(
    id: DemandId,
    given: Option<f64>,
    region: &RegionTag,
    table: &PopulationTable,
    config: &OptimizerConfig,
) -> Population {
    match given {
        Some(population) if population.is_finite() && population >= 1.0 => {
            population.round() as Population
        }
        // An explicit value below 1 never consults the region table
        Some(population) if !population.is_nan() => {
            log::warn!(
                "Demand point {} has population {}, using default {}",
                id,
                population,
                config.default_population
            );
            config.default_population
        }
        _ => match region.name().and_then(|name| table.get(name)) {
            Some(population) if population > 0 => population,
            _ => {
                log::warn!(
                    "No population for demand point {} (region {:?}), using default {}",
                    id,
                    region,
                    config.default_population
                );
                config.default_population
            }
        },
    }
}
