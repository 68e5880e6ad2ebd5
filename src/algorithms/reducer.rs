// Outlet reducer: greedy first-fit removal of redundant outlets

use crate::algorithms::assignment::{assign_unchecked, validate_inputs};
use crate::error::Result;
use crate::models::{AssignmentOutcome, DemandPoint, Outlet, OutletId};
use crate::utils::distance::DistanceProvider;

/// Terminal state of a reduction run
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionResult {
    /// Surviving outlets, in their original relative order
    pub outlets: Vec<Outlet>,

    /// Assignment over the surviving outlets
    pub outcome: AssignmentOutcome,

    /// Removed outlet ids in removal order
    pub removed: Vec<OutletId>,

    /// Outer iterations run
    pub iterations: usize,
}

/// Drop outlets one at a time while every demand point stays assignable.
///
/// Each outer iteration scans the current outlets in ascending id order and
/// simulates removing each one. The first removal that still assigns every
/// demand point is committed and the iteration ends; a rejected simulation is
/// thrown away whole. Stops when an iteration commits nothing or after
/// `max_iterations` iterations. This is first-fit, not best-fit: the result
/// depends on id order and is not guaranteed minimal.
pub fn reduce<D: DistanceProvider>(
    outlets: &[Outlet],
    demand_points: &[DemandPoint],
    provider: &mut D,
    max_iterations: usize,
) -> Result<ReductionResult> {
    validate_inputs(outlets, demand_points)?;

    let mut current_outlets = outlets.to_vec();
    let mut current_outcome = assign_unchecked(&current_outlets, demand_points, provider);
    if !current_outcome.is_complete() {
        log::warn!(
            "Initial assignment leaves {} demand points unassigned",
            current_outcome.unassigned.len()
        );
    }

    let mut removed = Vec::new();
    let mut iterations = 0;

    for iteration in 0..max_iterations {
        iterations = iteration + 1;
        log::info!(
            "Iteration {}: {} outlets remaining",
            iterations,
            current_outlets.len()
        );

        let mut scan_order: Vec<OutletId> = current_outlets.iter().map(|o| o.id).collect();
        scan_order.sort_unstable();

        let mut dropped = None;
        for outlet_id in scan_order {
            let candidate: Vec<Outlet> = current_outlets
                .iter()
                .filter(|o| o.id != outlet_id)
                .cloned()
                .collect();
            let simulated = assign_unchecked(&candidate, demand_points, provider);

            if simulated.is_complete() {
                current_outlets = candidate;
                current_outcome = simulated;
                dropped = Some(outlet_id);
                break;
            }
            log::debug!(
                "Keeping outlet {}: removal strands {} demand points",
                outlet_id,
                simulated.unassigned.len()
            );
        }

        match dropped {
            Some(outlet_id) => {
                log::info!("Outlet {} removed", outlet_id);
                removed.push(outlet_id);
            }
            None => {
                log::warn!("No outlets could be removed. Stopping optimization.");
                break;
            }
        }
    }

    Ok(ReductionResult {
        outlets: current_outlets,
        outcome: current_outcome,
        removed,
        iterations,
    })
}
