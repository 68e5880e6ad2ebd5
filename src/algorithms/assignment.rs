// Assignment engine: every demand point goes to its nearest outlet

use std::collections::{HashMap, HashSet};

use crate::error::{OptimizerError, Result};
use crate::models::{
    Assignment, AssignmentOutcome, DemandId, DemandPoint, DistanceRecord, Outlet,
};
use crate::utils::distance::DistanceProvider;

/// Rejects inputs the optimizer cannot work on.
///
/// Both sets empty is accepted (nothing to do); exactly one empty is not.
pub fn validate_inputs(outlets: &[Outlet], demand_points: &[DemandPoint]) -> Result<()> {
    if demand_points.is_empty() && !outlets.is_empty() {
        return Err(OptimizerError::EmptyDemand(outlets.len()));
    }
    if outlets.is_empty() && !demand_points.is_empty() {
        return Err(OptimizerError::NoOutlets(demand_points.len()));
    }

    let mut outlet_ids = HashSet::new();
    for outlet in outlets {
        if !outlet_ids.insert(outlet.id) {
            return Err(OptimizerError::DuplicateOutletId(outlet.id));
        }
        if !outlet.location.is_finite() {
            return Err(OptimizerError::InvalidCoordinate {
                kind: "outlet",
                id: outlet.id,
                lat: outlet.location.lat,
                lon: outlet.location.lon,
            });
        }
    }

    let mut demand_ids = HashSet::new();
    for demand in demand_points {
        if !demand_ids.insert(demand.id) {
            return Err(OptimizerError::DuplicateDemandId(demand.id));
        }
        if !demand.location.is_finite() {
            return Err(OptimizerError::InvalidCoordinate {
                kind: "demand point",
                id: demand.id,
                lat: demand.location.lat,
                lon: demand.location.lon,
            });
        }
        if demand.population == 0 {
            return Err(OptimizerError::NonPositivePopulation(demand.id));
        }
    }

    Ok(())
}

/// Full outlet x demand distance matrix, outlet-major in input order
pub fn distance_matrix<D: DistanceProvider>(
    outlets: &[Outlet],
    demand_points: &[DemandPoint],
    provider: &mut D,
) -> Vec<DistanceRecord> {
    let mut records = Vec::with_capacity(outlets.len() * demand_points.len());
    for outlet in outlets {
        for demand in demand_points {
            records.push(DistanceRecord {
                outlet_id: outlet.id,
                demand_id: demand.id,
                distance: provider.distance(&outlet.location, &demand.location),
            });
        }
    }
    records
}

/// Pick the nearest outlet for each demand point from a distance matrix.
///
/// The first record at the minimum distance wins, so with an outlet-major
/// matrix ties go to the earlier outlet. Demand points with no usable record
/// (none at all, or only NaN distances) are reported as unassigned.
pub fn assign_from_matrix(
    matrix: &[DistanceRecord],
    demand_points: &[DemandPoint],
) -> AssignmentOutcome {
    let mut nearest: HashMap<DemandId, DistanceRecord> = HashMap::new();

    for record in matrix {
        if record.distance.is_nan() {
            continue;
        }
        match nearest.get(&record.demand_id) {
            Some(best) if record.distance >= best.distance => {}
            _ => {
                nearest.insert(record.demand_id, *record);
            }
        }
    }

    let mut outcome = AssignmentOutcome::default();
    for demand in demand_points {
        match nearest.get(&demand.id) {
            Some(record) => outcome.assignments.push(Assignment::from(*record)),
            None => outcome.unassigned.push(demand.id),
        }
    }
    outcome
}

/// Assignment without input validation. An empty outlet set leaves every
/// demand point unassigned.
pub(crate) fn assign_unchecked<D: DistanceProvider>(
    outlets: &[Outlet],
    demand_points: &[DemandPoint],
    provider: &mut D,
) -> AssignmentOutcome {
    let matrix = distance_matrix(outlets, demand_points, provider);
    assign_from_matrix(&matrix, demand_points)
}

/// Assign every demand point to its nearest outlet.
///
/// Unassigned demand points are not an error: they come back in
/// `AssignmentOutcome::unassigned` and the caller decides what to do.
pub fn assign<D: DistanceProvider>(
    outlets: &[Outlet],
    demand_points: &[DemandPoint],
    provider: &mut D,
) -> Result<AssignmentOutcome> {
    validate_inputs(outlets, demand_points)?;

    let outcome = assign_unchecked(outlets, demand_points, provider);
    if !outcome.is_complete() {
        log::warn!("Unassigned demand points: {}", outcome.unassigned.len());
        for demand_id in &outcome.unassigned {
            log::warn!("Demand point {} could not be assigned to an outlet", demand_id);
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use crate::utils::distance::NetworkDistance;

    fn create_test_data() -> (Vec<Outlet>, Vec<DemandPoint>) {
        let outlets = vec![
            Outlet::new(1, Location::new(0.0, 0.0), 1),
            Outlet::new(2, Location::new(0.0, 10.0), 1),
        ];
        let demand = vec![
            DemandPoint::new(1, Location::new(0.0, 1.0), 10),
            DemandPoint::new(2, Location::new(0.0, 9.0), 10),
            DemandPoint::new(3, Location::new(1.0, 0.0), 10),
        ];
        (outlets, demand)
    }

    fn record(outlet_id: u32, demand_id: u32, distance: f64) -> DistanceRecord {
        DistanceRecord {
            outlet_id,
            demand_id,
            distance,
        }
    }

    #[test]
    fn test_assigns_nearest_outlet() {
        let (outlets, demand) = create_test_data();
        let outcome = assign(&outlets, &demand, &mut NetworkDistance::great_circle()).unwrap();

        assert!(outcome.is_complete());
        let pairs: Vec<(u32, u32)> = outcome
            .assignments
            .iter()
            .map(|a| (a.demand_id, a.outlet_id))
            .collect();
        assert_eq!(pairs, vec![(1, 1), (2, 2), (3, 1)]);
    }

    #[test]
    fn test_matrix_is_full() {
        let (outlets, demand) = create_test_data();
        let matrix = distance_matrix(&outlets, &demand, &mut NetworkDistance::great_circle());
        assert_eq!(matrix.len(), 6);
        assert_eq!((matrix[0].outlet_id, matrix[0].demand_id), (1, 1));
        assert_eq!((matrix[5].outlet_id, matrix[5].demand_id), (2, 3));
    }

    #[test]
    fn test_tie_goes_to_first_outlet() {
        let demand = vec![DemandPoint::new(1, Location::new(0.0, 0.0), 1)];
        let matrix = vec![record(5, 1, 2.0), record(3, 1, 2.0), record(9, 1, 2.5)];
        let outcome = assign_from_matrix(&matrix, &demand);
        assert_eq!(outcome.assignments[0].outlet_id, 5);
    }

    #[test]
    fn test_missing_records_are_unassigned() {
        let demand = vec![
            DemandPoint::new(1, Location::new(0.0, 0.0), 1),
            DemandPoint::new(2, Location::new(0.0, 0.0), 1),
            DemandPoint::new(3, Location::new(0.0, 0.0), 1),
        ];
        let matrix = vec![record(1, 1, 1.0), record(1, 3, f64::NAN)];
        let outcome = assign_from_matrix(&matrix, &demand);
        assert_eq!(outcome.assignments.len(), 1);
        assert_eq!(outcome.unassigned, vec![2, 3]);
    }

    #[test]
    fn test_empty_outlets_leave_everything_unassigned() {
        let (_, demand) = create_test_data();
        let outcome = assign_unchecked(&[], &demand, &mut NetworkDistance::great_circle());
        assert!(outcome.assignments.is_empty());
        assert_eq!(outcome.unassigned, vec![1, 2, 3]);
    }

    #[test]
    fn test_validation() {
        let (outlets, demand) = create_test_data();
        assert!(validate_inputs(&[], &[]).is_ok());
        assert!(matches!(
            validate_inputs(&outlets, &[]),
            Err(OptimizerError::EmptyDemand(2))
        ));
        assert!(matches!(
            validate_inputs(&[], &demand),
            Err(OptimizerError::NoOutlets(3))
        ));

        let mut duplicated = outlets.clone();
        duplicated.push(Outlet::new(1, Location::new(5.0, 5.0), 1));
        assert!(matches!(
            validate_inputs(&duplicated, &demand),
            Err(OptimizerError::DuplicateOutletId(1))
        ));

        let mut zero_pop = demand.clone();
        zero_pop[1].population = 0;
        assert!(matches!(
            validate_inputs(&outlets, &zero_pop),
            Err(OptimizerError::NonPositivePopulation(2))
        ));

        let mut bad_coord = demand;
        bad_coord[0].location.lat = f64::NAN;
        assert!(matches!(
            validate_inputs(&outlets, &bad_coord),
            Err(OptimizerError::InvalidCoordinate { id: 1, .. })
        ));
    }
}
