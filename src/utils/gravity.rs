// Gravity-model interaction strength between outlets and demand points.
// Reporting only; assignment and reduction never read it.

use serde::{Deserialize, Serialize};

use crate::models::{DemandId, DemandPoint, Distance, Outlet, OutletId, Population};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub outlet_id: OutletId,
    pub demand_id: DemandId,
    pub distance: Distance,
    pub interaction: f64,
}

/// `pop_i * pop_j / distance^2`, or 0 when the distance is 0
pub fn interaction(population_i: Population, population_j: Population, distance: Distance) -> f64 {
    if distance == 0.0 {
        return 0.0;
    }
    (population_i as f64 * population_j as f64) / (distance * distance)
}

/// Interaction for every outlet x demand pair over great-circle distance,
/// outlet-major
pub fn interaction_table(outlets: &[Outlet], demand_points: &[DemandPoint]) -> Vec<Interaction> {
    let mut table = Vec::with_capacity(outlets.len() * demand_points.len());
    for outlet in outlets {
        for demand in demand_points {
            let distance = outlet.location.haversine_km_to(&demand.location);
            table.push(Interaction {
                outlet_id: outlet.id,
                demand_id: demand.id,
                distance,
                interaction: interaction(outlet.population, demand.population, distance),
            });
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    #[test]
    fn test_zero_distance_has_no_interaction() {
        assert_eq!(interaction(10, 20, 0.0), 0.0);
    }

    #[test]
    fn test_inverse_square() {
        assert_eq!(interaction(10, 20, 2.0), 50.0);
        assert_eq!(interaction(10, 20, 1.0), 4.0 * interaction(10, 20, 2.0));
    }

    #[test]
    fn test_table_covers_all_pairs() {
        let outlets = vec![
            Outlet::new(1, Location::new(27.0, 78.0), 1),
            Outlet::new(2, Location::new(28.0, 78.0), 1),
        ];
        let demand = vec![
            DemandPoint::new(1, Location::new(27.0, 78.0), 500),
            DemandPoint::new(2, Location::new(27.5, 78.0), 500),
            DemandPoint::new(3, Location::new(28.0, 78.5), 500),
        ];

        let table = interaction_table(&outlets, &demand);
        assert_eq!(table.len(), 6);
        // outlet 1 sits on demand point 1
        assert_eq!(table[0].distance, 0.0);
        assert_eq!(table[0].interaction, 0.0);
        assert!(table[1].interaction > 0.0);
        assert_eq!((table[3].outlet_id, table[3].demand_id), (2, 1));
    }
}
