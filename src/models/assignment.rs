// Distance and assignment records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{DemandId, Distance, OutletId};

/// One cell of the outlet x demand distance matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub outlet_id: OutletId,
    pub demand_id: DemandId,
    pub distance: Distance,
}

/// A demand point served by its nearest outlet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub outlet_id: OutletId,
    pub demand_id: DemandId,
    pub distance: Distance,
}

impl From<DistanceRecord> for Assignment {
    fn from(record: DistanceRecord) -> Self {
        Self {
            outlet_id: record.outlet_id,
            demand_id: record.demand_id,
            distance: record.distance,
        }
    }
}

/// Result of one assignment pass. `assignments` and `unassigned` partition
/// the demand set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentOutcome {
    /// One record per assigned demand point, in demand input order
    pub assignments: Vec<Assignment>,

    /// Demand points no outlet could be chosen for, in demand input order
    pub unassigned: Vec<DemandId>,
}

impl AssignmentOutcome {
    /// True when every demand point has an outlet
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Demand ids grouped by serving outlet, outlets in ascending id order
    pub fn by_outlet(&self) -> BTreeMap<OutletId, Vec<DemandId>> {
        let mut groups: BTreeMap<OutletId, Vec<DemandId>> = BTreeMap::new();
        for assignment in &self.assignments {
            groups
                .entry(assignment.outlet_id)
                .or_default()
                .push(assignment.demand_id);
        }
        groups
    }

    /// Sum of assignment distances
    pub fn total_distance(&self) -> Distance {
        self.assignments.iter().map(|a| a.distance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(outlet_id: OutletId, demand_id: DemandId, distance: Distance) -> Assignment {
        Assignment {
            outlet_id,
            demand_id,
            distance,
        }
    }

    #[test]
    fn test_by_outlet_groups() {
        let outcome = AssignmentOutcome {
            assignments: vec![
                assignment(2, 1, 1.0),
                assignment(1, 2, 2.0),
                assignment(2, 3, 3.0),
            ],
            unassigned: vec![],
        };

        let groups = outcome.by_outlet();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&1], vec![2]);
        assert_eq!(groups[&2], vec![1, 3]);
        assert_eq!(outcome.total_distance(), 6.0);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_incomplete() {
        let outcome = AssignmentOutcome {
            assignments: vec![],
            unassigned: vec![7],
        };
        assert!(!outcome.is_complete());
    }
}
