// Full optimization pipeline: reduce, then relocate

use serde::{Deserialize, Serialize};

use crate::algorithms::reducer::reduce;
use crate::algorithms::relocator::relocate;
use crate::algorithms::LocationSolver;
use crate::config::OptimizerConfig;
use crate::error::Result;
use crate::models::{Assignment, DemandId, DemandPoint, Outlet, OutletId};
use crate::utils::distance::{DistanceProvider, NetworkDistance};
use crate::utils::ingest::{ingest_demand, DemandRequest, PopulationTable, RegionResolver};
use crate::utils::road_network::RoadGraph;
use crate::utils::seeding::seed_outlets;

/// Output of one optimization request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Final assignment table, computed against the pre-relocation positions
    pub assignments: Vec<Assignment>,

    /// Surviving outlets at their relocated positions
    pub outlets: Vec<Outlet>,

    pub removed: Vec<OutletId>,
    pub iterations: usize,

    /// Demand points the final assignment could not cover
    pub unassigned: Vec<DemandId>,
}

/// Response body returned to the calling layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResponse {
    pub message: String,
    pub assignments: Vec<Assignment>,
    pub optimized_outlets: Vec<Outlet>,
    pub removed_outlets: Vec<OutletId>,
    pub unassigned: Vec<DemandId>,
}

impl From<OptimizationResult> for OptimizationResponse {
    fn from(result: OptimizationResult) -> Self {
        let message = if result.unassigned.is_empty() {
            "Optimization successful!".to_string()
        } else {
            format!(
                "Optimization finished with {} unassigned demand points",
                result.unassigned.len()
            )
        };
        Self {
            message,
            assignments: result.assignments,
            optimized_outlets: result.outlets,
            removed_outlets: result.removed,
            unassigned: result.unassigned,
        }
    }
}

/// Outlet location optimizer
#[derive(Debug, Clone, Default)]
pub struct OutletOptimizer {
    pub config: OptimizerConfig,
}

impl OutletOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Reduce and relocate using any distance provider
    pub fn optimize_with<D: DistanceProvider>(
        &self,
        outlets: &[Outlet],
        demand_points: &[DemandPoint],
        provider: &mut D,
    ) -> Result<OptimizationResult> {
        let reduction = reduce(
            outlets,
            demand_points,
            provider,
            self.config.max_iterations,
        )?;
        let relocated = relocate(&reduction.outcome.assignments, demand_points, &reduction.outlets)?;

        log::info!(
            "Optimization completed: {} of {} outlets kept after {} iterations",
            relocated.len(),
            outlets.len(),
            reduction.iterations
        );

        Ok(OptimizationResult {
            assignments: reduction.outcome.assignments,
            outlets: relocated,
            removed: reduction.removed,
            iterations: reduction.iterations,
            unassigned: reduction.outcome.unassigned,
        })
    }

    /// Ingest a request, seed outlets from it and optimize.
    pub fn run_request<R: RegionResolver>(
        &self,
        request: &DemandRequest,
        graph: Option<&RoadGraph>,
        resolver: &R,
        table: &PopulationTable,
    ) -> Result<OptimizationResponse> {
        let demand_points = ingest_demand(request, resolver, table, &self.config)?;
        let outlets = seed_outlets(&demand_points, self.config.initial_outlets, self.config.seed);
        log::debug!("Initialized {} outlets", outlets.len());

        if graph.is_none() {
            log::warn!("No road graph available, using great-circle distances");
        }

        let result = self.optimize(&outlets, &demand_points, graph)?;
        Ok(result.into())
    }
}

impl LocationSolver for OutletOptimizer {
    fn optimize(
        &self,
        outlets: &[Outlet],
        demand_points: &[DemandPoint],
        graph: Option<&RoadGraph>,
    ) -> Result<OptimizationResult> {
        let mut provider = NetworkDistance::new(graph);
        let result = self.optimize_with(outlets, demand_points, &mut provider)?;
        log::debug!(
            "Distance cache: {} pairs, {} hits",
            provider.cache().len(),
            provider.cache().hits()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use crate::utils::ingest::NoRegionResolver;

    #[test]
    fn test_optimize_moves_outlet_to_centroid() {
        let outlets = vec![
            Outlet::new(1, Location::new(0.0, 0.0), 1),
            Outlet::new(2, Location::new(5.0, 5.0), 1),
        ];
        let demand = vec![
            DemandPoint::new(1, Location::new(0.0, 0.0), 30),
            DemandPoint::new(2, Location::new(0.0, 2.0), 10),
        ];

        let optimizer = OutletOptimizer::default();
        let result = optimizer.optimize(&outlets, &demand, None).unwrap();

        assert_eq!(result.removed, vec![1]);
        assert_eq!(result.outlets.len(), 1);
        assert_eq!(result.outlets[0].id, 2);
        assert!((result.outlets[0].location.lat - 0.0).abs() < 1e-12);
        assert!((result.outlets[0].location.lon - 0.5).abs() < 1e-12);
        assert!(result.unassigned.is_empty());
    }

    #[test]
    fn test_run_request_end_to_end() {
        let request = DemandRequest::from_json(
            r#"{"demandCenters": [
                {"id": 1, "latitude": 27.1767, "longitude": 78.0081, "population": 5000},
                {"id": 2, "latitude": 27.1592, "longitude": 78.3965, "population": 3000},
                {"id": 3, "latitude": 27.2228, "longitude": 78.2473}
            ]}"#,
        )
        .unwrap();

        let optimizer = OutletOptimizer::default();
        let response = optimizer
            .run_request(&request, None, &NoRegionResolver, &PopulationTable::new())
            .unwrap();

        assert_eq!(response.message, "Optimization successful!");
        assert_eq!(response.assignments.len(), 3);
        assert_eq!(response.optimized_outlets.len(), 1);
        assert_eq!(response.removed_outlets.len(), 2);
    }

    #[test]
    fn test_response_message_reports_unassigned() {
        let result = OptimizationResult {
            assignments: vec![],
            outlets: vec![],
            removed: vec![],
            iterations: 1,
            unassigned: vec![4, 5],
        };
        let response = OptimizationResponse::from(result);
        assert!(response.message.contains("2 unassigned"));
    }
}
