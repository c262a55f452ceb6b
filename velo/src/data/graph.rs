//! The road network graph.

use std::path::Path;

use tracing::info;

use crate::data::attribute::AttributeSet;
use crate::data::buffer::GraphBuffer;
use crate::data::edges::{GraphEdges, EDGE_BYTES, ELEVATION_BYTES, PROFILE_ID_BYTES};
use crate::data::nodes::{GraphNodes, NODE_BYTES};
use crate::data::sectors::{GraphSectors, SECTOR_BYTES, SECTOR_COUNT};
use crate::error::{Result, VeloError};
use crate::functions::Function;
use crate::projection::PointCh;

/// Node table file name.
pub const NODES_FILE: &str = "nodes.bin";
/// Edge table file name.
pub const EDGES_FILE: &str = "edges.bin";
/// Profile id table file name.
pub const PROFILE_IDS_FILE: &str = "profile_ids.bin";
/// Elevation sample file name.
pub const ELEVATIONS_FILE: &str = "elevations.bin";
/// Sector table file name.
pub const SECTORS_FILE: &str = "sectors.bin";
/// Attribute set table file name.
pub const ATTRIBUTES_FILE: &str = "attributes.bin";

/// Size of one attribute set in the attribute file.
const ATTRIBUTE_SET_BYTES: usize = 8;

/// A read-only road network: nodes, edges, the sector index and the
/// attribute sets referenced by edges.
///
/// A graph is built once and never modified, so it can be shared freely
/// between threads (typically through an `Arc<Graph>`).
///
/// # Example
///
/// ```ignore
/// use velo::Graph;
///
/// let graph = Graph::load_from("/data/velo")?;
/// println!("{} nodes", graph.node_count());
/// ```
#[derive(Debug)]
pub struct Graph {
    nodes: GraphNodes,
    sectors: GraphSectors,
    edges: GraphEdges,
    attribute_sets: Vec<AttributeSet>,
}

impl Graph {
    /// Assemble a graph from its tables.
    pub fn new(
        nodes: GraphNodes,
        sectors: GraphSectors,
        edges: GraphEdges,
        attribute_sets: Vec<AttributeSet>,
    ) -> Self {
        Self {
            nodes,
            sectors,
            edges,
            attribute_sets,
        }
    }

    /// Load a graph from the directory `base_path`.
    ///
    /// The node, edge, profile id, elevation and sector tables are
    /// memory-mapped; attribute sets are decoded eagerly.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - One of the files is missing ([`VeloError::FileNotFound`])
    /// - A file cannot be opened or memory-mapped
    /// - A file size is not a whole number of records
    /// - The sector table does not have exactly 128×128 entries, the profile
    ///   id table does not have one entry per edge, or an attribute set uses
    ///   unknown bits ([`VeloError::MalformedGraph`])
    pub fn load_from<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let base_path = base_path.as_ref();

        let nodes = GraphNodes::new(GraphBuffer::map_file(
            base_path.join(NODES_FILE),
            NODE_BYTES,
        )?);

        let sectors_buffer = GraphBuffer::map_file(base_path.join(SECTORS_FILE), SECTOR_BYTES)?;
        if sectors_buffer.len() != SECTOR_COUNT * SECTOR_BYTES {
            return Err(VeloError::MalformedGraph {
                reason: format!(
                    "{SECTORS_FILE} has {} sectors, expected {SECTOR_COUNT}",
                    sectors_buffer.len() / SECTOR_BYTES
                ),
            });
        }
        let sectors = GraphSectors::new(sectors_buffer);

        let edges = GraphEdges::new(
            GraphBuffer::map_file(base_path.join(EDGES_FILE), EDGE_BYTES)?,
            GraphBuffer::map_file(base_path.join(PROFILE_IDS_FILE), PROFILE_ID_BYTES)?,
            GraphBuffer::map_file(base_path.join(ELEVATIONS_FILE), ELEVATION_BYTES)?,
        );
        if edges.profile_id_count() != edges.count() {
            return Err(VeloError::MalformedGraph {
                reason: format!(
                    "{PROFILE_IDS_FILE} has {} entries for {} edges",
                    edges.profile_id_count(),
                    edges.count()
                ),
            });
        }

        let attributes =
            GraphBuffer::map_file(base_path.join(ATTRIBUTES_FILE), ATTRIBUTE_SET_BYTES)?;
        let attribute_sets = (0..attributes.len() / ATTRIBUTE_SET_BYTES)
            .map(|i| AttributeSet::new(attributes.i64_at(i * ATTRIBUTE_SET_BYTES) as u64))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| VeloError::MalformedGraph {
                reason: format!("{ATTRIBUTES_FILE}: {e}"),
            })?;
        if let Some(edge_id) = (0..edges.count() as u32)
            .find(|&id| edges.attributes_index(id) as usize >= attribute_sets.len())
        {
            return Err(VeloError::MalformedGraph {
                reason: format!(
                    "edge {edge_id} refers to attribute set {} but {ATTRIBUTES_FILE} has {}",
                    edges.attributes_index(edge_id),
                    attribute_sets.len()
                ),
            });
        }

        info!(
            path = %base_path.display(),
            nodes = nodes.count(),
            edges = edges.count(),
            attribute_sets = attribute_sets.len(),
            "loaded graph"
        );

        Ok(Self::new(nodes, sectors, edges, attribute_sets))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.count()
    }

    /// The distinct attribute sets referenced by edges.
    pub fn attribute_sets(&self) -> &[AttributeSet] {
        &self.attribute_sets
    }

    /// Position of the node.
    pub fn node_point(&self, node_id: u32) -> PointCh {
        PointCh::new_unchecked(self.nodes.node_e(node_id), self.nodes.node_n(node_id))
    }

    /// Number of edges leaving the node.
    pub fn node_out_degree(&self, node_id: u32) -> u32 {
        self.nodes.out_degree(node_id)
    }

    /// Id of the `edge_index`-th edge leaving the node
    /// (`edge_index < node_out_degree(node_id)`).
    pub fn node_out_edge_id(&self, node_id: u32, edge_index: u32) -> u32 {
        self.nodes.edge_id(node_id, edge_index)
    }

    /// Iterate over the ids of the edges leaving the node.
    pub fn node_out_edges(&self, node_id: u32) -> impl Iterator<Item = u32> + '_ {
        (0..self.node_out_degree(node_id)).map(move |i| self.node_out_edge_id(node_id, i))
    }

    /// Id of the node closest to `point` within `search_distance` metres, or
    /// `None` if there is none.
    ///
    /// Only the sectors overlapping the search square are scanned. A node
    /// exactly at `search_distance` qualifies; among equally close nodes the
    /// first one scanned (sector order, then node id) wins.
    pub fn node_closest_to(&self, point: &PointCh, search_distance: f64) -> Option<u32> {
        let mut closest = None;
        let mut min_squared = search_distance * search_distance;
        for sector in self.sectors.sectors_in_area(point, search_distance) {
            for node_id in sector.start_node_id..sector.end_node_id {
                let squared = point.squared_distance_to(&self.node_point(node_id));
                let better = match closest {
                    None => squared <= min_squared,
                    Some(_) => squared < min_squared,
                };
                if better {
                    closest = Some(node_id);
                    min_squared = squared;
                }
            }
        }
        closest
    }

    /// Id of the node the edge leads to.
    pub fn edge_target_node_id(&self, edge_id: u32) -> u32 {
        self.edges.target_node_id(edge_id)
    }

    /// Whether the edge runs against the direction of its source way.
    pub fn edge_is_inverted(&self, edge_id: u32) -> bool {
        self.edges.is_inverted(edge_id)
    }

    /// Attributes of the edge.
    ///
    /// # Panics
    ///
    /// Panics if the edge refers to a missing attribute set, which
    /// [`Graph::load_from`] rejects.
    pub fn edge_attributes(&self, edge_id: u32) -> AttributeSet {
        self.attribute_sets[self.edges.attributes_index(edge_id) as usize]
    }

    /// Length of the edge, in metres.
    pub fn edge_length(&self, edge_id: u32) -> f64 {
        self.edges.length(edge_id)
    }

    /// Positive elevation gain along the edge, in metres.
    pub fn edge_elevation_gain(&self, edge_id: u32) -> f64 {
        self.edges.elevation_gain(edge_id)
    }

    /// Whether elevation samples are stored for the edge.
    pub fn edge_has_profile(&self, edge_id: u32) -> bool {
        self.edges.has_profile(edge_id)
    }

    /// Elevation along the edge as a function of the position on it.
    ///
    /// Edges without a profile return NaN everywhere. A profiled edge of zero
    /// length has a single sample and returns it everywhere.
    pub fn edge_profile(&self, edge_id: u32) -> Function {
        let samples = self.edges.profile_samples(edge_id);
        match samples.len() {
            0 => Function::constant(f64::NAN),
            1 => Function::constant(samples[0] as f64),
            _ => Function::sampled(samples, self.edge_length(edge_id))
                .unwrap_or(Function::constant(f64::NAN)),
        }
    }
}
