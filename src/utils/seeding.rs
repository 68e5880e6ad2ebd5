use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::models::{DemandPoint, Outlet, OutletId};

/// Seed initial outlets by sampling demand points without replacement.
///
/// Takes `min(count, demand_points.len())` points; outlet ids run `1..=n` in
/// sample order and each outlet starts at its sampled point with that
/// point's population. The same seed always gives the same outlets.
pub fn seed_outlets(demand_points: &[DemandPoint], count: usize, seed: u64) -> Vec<Outlet> {
    let n_outlets = count.min(demand_points.len());
    let mut rng = StdRng::seed_from_u64(seed);

    demand_points
        .choose_multiple(&mut rng, n_outlets)
        .enumerate()
        .map(|(i, point)| Outlet::new(i as OutletId + 1, point.location, point.population))
        .collect()
}
