// Distance calculation: road network with great-circle fallback

use std::collections::HashMap;

use crate::models::{Distance, Location};
use crate::utils::road_network::RoadGraph;

/// Road distance between two locations.
///
/// With a graph, this is the shortest path between the nodes nearest each
/// endpoint. Without one, or when the graph is empty or the nodes are
/// disconnected, it is the great-circle distance between the coordinates.
/// Never fails, always non-negative, and exactly 0 for identical points.
pub fn distance(graph: Option<&RoadGraph>, from: &Location, to: &Location) -> Distance {
    let Some(graph) = graph else {
        return from.haversine_km_to(to);
    };

    if graph.is_empty() {
        log::warn!("Road graph has no nodes, falling back to great-circle distance");
        return from.haversine_km_to(to);
    }

    graph.location_distance(from, to).unwrap_or_else(|| {
        log::debug!(
            "No road path between ({}, {}) and ({}, {}), falling back to great-circle distance",
            from.lat,
            from.lon,
            to.lat,
            to.lon
        );
        from.haversine_km_to(to)
    })
}

/// Source of pairwise distances used by the assignment engine
pub trait DistanceProvider {
    fn distance(&mut self, from: &Location, to: &Location) -> Distance;
}

/// Memo of computed distances, scoped to one optimization request.
///
/// Keys are order-independent, so a cached (a, b) answers (b, a).
#[derive(Debug, Clone, Default)]
pub struct DistanceCache {
    entries: HashMap<((u64, u64), (u64, u64)), Distance>,
    hits: usize,
}

impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(from: &Location, to: &Location) -> ((u64, u64), (u64, u64)) {
        let (a, b) = (from.key(), to.key());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn get(&mut self, from: &Location, to: &Location) -> Option<Distance> {
        let cached = self.entries.get(&Self::key(from, to)).copied();
        if cached.is_some() {
            self.hits += 1;
        }
        cached
    }

    pub fn insert(&mut self, from: &Location, to: &Location, distance: Distance) {
        self.entries.insert(Self::key(from, to), distance);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}

/// Distance provider over an optional road graph with a per-request cache
#[derive(Debug)]
pub struct NetworkDistance<'g> {
    graph: Option<&'g RoadGraph>,
    cache: DistanceCache,
}

impl<'g> NetworkDistance<'g> {
    pub fn new(graph: Option<&'g RoadGraph>) -> Self {
        Self {
            graph,
            cache: DistanceCache::new(),
        }
    }

    /// Provider that ignores roads entirely
    pub fn great_circle() -> Self {
        Self::new(None)
    }

    pub fn cache(&self) -> &DistanceCache {
        &self.cache
    }

    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }
}

impl DistanceProvider for NetworkDistance<'_> {
    fn distance(&mut self, from: &Location, to: &Location) -> Distance {
        if let Some(cached) = self.cache.get(from, to) {
            return cached;
        }
        let computed = distance(self.graph, from, to);
        self.cache.insert(from, to, computed);
        computed
    }
}
