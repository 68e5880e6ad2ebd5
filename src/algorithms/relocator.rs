// Outlet relocator: move each outlet to the population-weighted centroid of
// the demand it serves

use std::collections::{HashMap, HashSet};

use crate::error::{OptimizerError, Result};
use crate::models::{Assignment, DemandId, DemandPoint, Location, Outlet, OutletId};

#[derive(Default)]
struct WeightedSum {
    lat: f64,
    lon: f64,
    weight: f64,
}

/// Recompute outlet positions from an assignment table.
///
/// Returns one outlet per input outlet, in input order. An outlet with
/// assigned demand moves to `sum(coord * pop) / sum(pop)` over that demand;
/// one with none keeps its position. Output outlets carry the placeholder
/// population. Duplicate outlet ids and assignments naming an unknown outlet
/// or demand point are rejected.
pub fn relocate(
    assignments: &[Assignment],
    demand_points: &[DemandPoint],
    outlets: &[Outlet],
) -> Result<Vec<Outlet>> {
    let demand_by_id: HashMap<DemandId, &DemandPoint> =
        demand_points.iter().map(|d| (d.id, d)).collect();

    let mut outlet_ids = HashSet::new();
    for outlet in outlets {
        if !outlet_ids.insert(outlet.id) {
            return Err(OptimizerError::DuplicateOutletId(outlet.id));
        }
    }

    let mut sums: HashMap<OutletId, WeightedSum> =
        outlets.iter().map(|o| (o.id, WeightedSum::default())).collect();

    for assignment in assignments {
        let demand = demand_by_id
            .get(&assignment.demand_id)
            .ok_or(OptimizerError::UnknownDemand(assignment.demand_id))?;
        let sum = sums
            .get_mut(&assignment.outlet_id)
            .ok_or(OptimizerError::UnknownOutlet(assignment.outlet_id))?;

        let weight = demand.population as f64;
        sum.lat += demand.location.lat * weight;
        sum.lon += demand.location.lon * weight;
        sum.weight += weight;
    }

    let relocated = outlets
        .iter()
        .map(|outlet| {
            let location = match sums.get(&outlet.id) {
                Some(sum) if sum.weight > 0.0 => {
                    Location::new(sum.lat / sum.weight, sum.lon / sum.weight)
                }
                _ => {
                    log::debug!("Outlet {} serves no demand, keeping its position", outlet.id);
                    outlet.location
                }
            };
            Outlet::relocated(outlet.id, location)
        })
        .collect();

    Ok(relocated)
}
