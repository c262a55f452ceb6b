use anyhow::{ensure, Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use velo::{Graph, PointCh};

use super::graph_dir;

#[derive(Serialize)]
struct NearestResponse {
    e: f64,
    n: f64,
    node_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    node: Option<NodeResponse>,
}

#[derive(Serialize)]
struct NodeResponse {
    e: f64,
    n: f64,
    lon: f64,
    lat: f64,
    distance: f64,
    out_degree: u32,
}

pub fn run(data_dir: Option<PathBuf>, e: f64, n: f64, distance: f64, json: bool) -> Result<()> {
    ensure!(
        distance >= 0.0,
        "Search distance must be non-negative, got {distance}"
    );
    let point = PointCh::new(e, n).context("Point outside the graph area")?;
    let dir = graph_dir(data_dir)?;
    let graph = Graph::load_from(&dir)
        .with_context(|| format!("Failed to load graph from {}", dir.display()))?;

    let node_id = graph.node_closest_to(&point, distance);
    let node = node_id.map(|id| {
        let node_point = graph.node_point(id);
        NodeResponse {
            e: node_point.e(),
            n: node_point.n(),
            lon: node_point.lon().to_degrees(),
            lat: node_point.lat().to_degrees(),
            distance: point.distance_to(&node_point),
            out_degree: graph.node_out_degree(id),
        }
    });

    if json {
        let response = NearestResponse { e, n, node_id, node };
        println!("{}", serde_json::to_string(&response)?);
    } else if let (Some(id), Some(node)) = (node_id, node) {
        println!("Node {}", id);
        println!("Position: {:.2}, {:.2}", node.e, node.n);
        println!("Lon/lat: {:.6}°, {:.6}°", node.lon, node.lat);
        println!("Distance: {:.1} m", node.distance);
        println!("Out-degree: {}", node.out_degree);
    } else {
        println!("no node within {} m", distance);
    }

    Ok(())
}
