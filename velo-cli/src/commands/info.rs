use anyhow::{Context, Result};
use std::path::PathBuf;
use velo::data::graph::{
    ATTRIBUTES_FILE, EDGES_FILE, ELEVATIONS_FILE, NODES_FILE, PROFILE_IDS_FILE, SECTORS_FILE,
};
use velo::Graph;

use super::graph_dir;

pub fn run(data_dir: Option<PathBuf>) -> Result<()> {
    let dir = graph_dir(data_dir)?;
    let graph = Graph::load_from(&dir)
        .with_context(|| format!("Failed to load graph from {}", dir.display()))?;

    let edge_count = graph.edge_count() as u32;
    let (mut total_length, mut profiled) = (0.0, 0u32);
    for edge_id in 0..edge_count {
        total_length += graph.edge_length(edge_id);
        if graph.edge_has_profile(edge_id) {
            profiled += 1;
        }
    }

    println!("Graph: {}", dir.display());
    println!();
    println!("Nodes: {}", graph.node_count());
    println!("Edges: {}", edge_count);
    println!("Attribute sets: {}", graph.attribute_sets().len());
    println!("Total edge length: {:.1} km", total_length / 1000.0);
    if edge_count > 0 {
        let profiled_pct = profiled as f64 / edge_count as f64 * 100.0;
        println!("Edges with elevation: {} ({:.1}%)", profiled, profiled_pct);
    }
    println!();

    for file in [
        NODES_FILE,
        EDGES_FILE,
        PROFILE_IDS_FILE,
        ELEVATIONS_FILE,
        SECTORS_FILE,
        ATTRIBUTES_FILE,
    ] {
        let size = std::fs::metadata(dir.join(file))?.len();
        println!("{:<16} {}", file, format_size(size));
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
