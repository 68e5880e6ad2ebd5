use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::models::DemandPoint;

use super::road_network::RoadGraph;

/// Rectangle enclosing a set of demand points, handed to whatever acquires
/// the road network
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// `None` for an empty demand set
    pub fn around(demand_points: &[DemandPoint]) -> Option<Self> {
        let first = demand_points.first()?;
        let mut bbox = BoundingBox {
            min_lat: first.location.lat,
            min_lon: first.location.lon,
            max_lat: first.location.lat,
            max_lon: first.location.lon,
        };
        for point in &demand_points[1..] {
            bbox.min_lat = bbox.min_lat.min(point.location.lat);
            bbox.min_lon = bbox.min_lon.min(point.location.lon);
            bbox.max_lat = bbox.max_lat.max(point.location.lat);
            bbox.max_lon = bbox.max_lon.max(point.location.lon);
        }
        Some(bbox)
    }
}

/// Load a road graph from a vertex file (`id lon lat` per line) and an edge
/// file (`id start_id end_id` per line).
///
/// Acquisition failures never reach the optimizer: they are logged and the
/// graph is reported absent.
pub fn load_road_graph<P: AsRef<Path>>(vertices_path: P, edges_path: P) -> Option<RoadGraph> {
    let vertices = match load_road_vertices(vertices_path.as_ref()) {
        Ok(vertices) => vertices,
        Err(e) => {
            log::error!(
                "Failed to load road vertices from {}: {}",
                vertices_path.as_ref().display(),
                e
            );
            return None;
        }
    };
    log::info!("Loaded {} road vertices", vertices.len());

    let edges = match load_road_edges(edges_path.as_ref()) {
        Ok(edges) => edges,
        Err(e) => {
            log::error!(
                "Failed to load road edges from {}: {}",
                edges_path.as_ref().display(),
                e
            );
            return None;
        }
    };
    log::info!("Loaded {} roads", edges.len());

    Some(RoadGraph::from_vertices_and_edges(&vertices, &edges))
}

// Load road vertex data
fn load_road_vertices(path: &Path) -> Result<HashMap<u64, (f64, f64)>, io::Error> {
    let reader = io::BufReader::new(File::open(path)?);
    let mut vertices = HashMap::new();

    for line in reader.lines() {
        let line = line?;
        if let Some((id, longitude, latitude)) = parse_vertex_line(&line) {
            vertices.insert(id, (longitude, latitude));
        }
    }

    Ok(vertices)
}

// Load road edge data
fn load_road_edges(path: &Path) -> Result<HashMap<u64, (u64, u64)>, io::Error> {
    let reader = io::BufReader::new(File::open(path)?);
    let mut edges = HashMap::new();

    for line in reader.lines() {
        let line = line?;
        if let Some((id, start_id, end_id)) = parse_edge_line(&line) {
            edges.insert(id, (start_id, end_id));
        }
    }

    Ok(edges)
}

/// Malformed lines are skipped rather than defaulted to zero
fn parse_vertex_line(line: &str) -> Option<(u64, f64, f64)> {
    let mut parts = line.split_whitespace();
    let id = parts.next()?.parse::<u64>().ok()?;
    let longitude = parts.next()?.parse::<f64>().ok()?;
    let latitude = parts.next()?.parse::<f64>().ok()?;
    if !(longitude.is_finite() && latitude.is_finite()) {
        log::debug!("Skipping vertex {} with non-finite coordinate", id);
        return None;
    }
    Some((id, longitude, latitude))
}

fn parse_edge_line(line: &str) -> Option<(u64, u64, u64)> {
    let mut parts = line.split_whitespace();
    let id = parts.next()?.parse::<u64>().ok()?;
    let start_id = parts.next()?.parse::<u64>().ok()?;
    let end_id = parts.next()?.parse::<u64>().ok()?;
    Some((id, start_id, end_id))
}
