use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

use crate::models::{Distance, Location};

/// Road network graph structure.
///
/// Nodes are coordinates (one node per distinct coordinate), edge weights are
/// great-circle kilometres between the endpoints.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    graph: UnGraph<Location, Distance>,
    node_index: HashMap<(u64, u64), NodeIndex>,
}

impl RoadGraph {
    /// Create an empty road network graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a route geometry: consecutive (longitude, latitude)
    /// pairs become edges.
    pub fn from_polyline(coords: &[(f64, f64)]) -> Self {
        let mut road_graph = RoadGraph::new();
        for pair in coords.windows(2) {
            road_graph.add_road(
                Location::from_lon_lat(pair[0]),
                Location::from_lon_lat(pair[1]),
            );
        }
        road_graph
    }

    /// Build a graph from vertex and edge tables.
    ///
    /// `vertices` maps vertex id to (longitude, latitude); `edges` maps edge id
    /// to (start vertex id, end vertex id). Vertices are inserted in ascending id
    /// order. Edges naming unknown vertices are skipped.
    pub fn from_vertices_and_edges(
        vertices: &HashMap<u64, (f64, f64)>,
        edges: &HashMap<u64, (u64, u64)>,
    ) -> Self {
        let mut road_graph = RoadGraph::new();

        let mut vertex_ids: Vec<&u64> = vertices.keys().collect();
        vertex_ids.sort();
        for vertex_id in vertex_ids {
            road_graph.add_node(Location::from_lon_lat(vertices[vertex_id]));
        }

        let mut edge_ids: Vec<&u64> = edges.keys().collect();
        edge_ids.sort();
        for edge_id in edge_ids {
            let (start_id, end_id) = edges[edge_id];
            if let (Some(start_pos), Some(end_pos)) = (vertices.get(&start_id), vertices.get(&end_id))
            {
                road_graph.add_road(
                    Location::from_lon_lat(*start_pos),
                    Location::from_lon_lat(*end_pos),
                );
            } else {
                log::debug!(
                    "Skipping road {} with unknown endpoint ({} -> {})",
                    edge_id,
                    start_id,
                    end_id
                );
            }
        }

        road_graph
    }

    /// Add a node for `location`, or return the existing one
    pub fn add_node(&mut self, location: Location) -> NodeIndex {
        if let Some(index) = self.node_index.get(&location.key()) {
            return *index;
        }
        let index = self.graph.add_node(location);
        self.node_index.insert(location.key(), index);
        index
    }

    /// Add an undirected road between two coordinates, weighted by their
    /// great-circle distance. Re-adding a road replaces its weight.
    pub fn add_road(&mut self, from: Location, to: Location) {
        let start = self.add_node(from);
        let end = self.add_node(to);
        self.graph
            .update_edge(start, end, from.haversine_km_to(&to));
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node_location(&self, node: NodeIndex) -> Option<Location> {
        self.graph.node_weight(node).copied()
    }

    /// Find the road node nearest to a given location.
    ///
    /// Linear scan in insertion order; the first node at the minimum distance
    /// wins ties.
    pub fn find_nearest_node(&self, location: &Location) -> Option<NodeIndex> {
        let mut nearest_node = None;
        let mut min_distance = f64::INFINITY;

        for node in self.graph.node_indices() {
            let distance = self.graph[node].haversine_km_to(location);
            if nearest_node.is_none() || distance < min_distance {
                min_distance = distance;
                nearest_node = Some(node);
            }
        }

        nearest_node
    }

    /// Shortest path length between two nodes, `None` when disconnected.
    ///
    /// The search always runs from the lower node index so the result does
    /// not depend on argument order.
    pub fn shortest_path_distance(&self, a: NodeIndex, b: NodeIndex) -> Option<Distance> {
        if a == b {
            return Some(0.0);
        }
        let (start, goal) = if a.index() <= b.index() { (a, b) } else { (b, a) };

        astar(
            &self.graph,
            start,
            |node| node == goal,
            |edge| *edge.weight(),
            |_| 0.0,
        )
        .map(|(cost, _path)| cost)
    }

    /// Road distance between two arbitrary locations: shortest path between
    /// their nearest nodes. `None` if the graph is empty or the nodes are not
    /// connected.
    pub fn location_distance(&self, from: &Location, to: &Location) -> Option<Distance> {
        let start_node = self.find_nearest_node(from)?;
        let end_node = self.find_nearest_node(to)?;
        self.shortest_path_distance(start_node, end_node)
    }
}
