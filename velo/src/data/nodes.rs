//! The node table.

use crate::bits;
use crate::data::buffer::GraphBuffer;
use crate::q28_4;

const OFFSET_E: usize = 0;
const OFFSET_N: usize = OFFSET_E + 4;
const OFFSET_OUT_EDGES: usize = OFFSET_N + 4;

/// Size of one node record in bytes.
pub const NODE_BYTES: usize = OFFSET_OUT_EDGES + 4;

/// Nodes of the graph: 12-byte records holding the E and N coordinates
/// (Q28.4) and a word packing the out-degree (top 4 bits) with the id of
/// the first outgoing edge (low 28 bits).
#[derive(Debug)]
pub struct GraphNodes {
    buffer: GraphBuffer,
}

impl GraphNodes {
    pub fn new(buffer: GraphBuffer) -> Self {
        Self { buffer }
    }

    /// Number of nodes.
    pub fn count(&self) -> usize {
        self.buffer.len() / NODE_BYTES
    }

    /// E coordinate of the node, in metres.
    pub fn node_e(&self, node_id: u32) -> f64 {
        q28_4::as_double(self.buffer.i32_at(Self::offset(node_id) + OFFSET_E))
    }

    /// N coordinate of the node, in metres.
    pub fn node_n(&self, node_id: u32) -> f64 {
        q28_4::as_double(self.buffer.i32_at(Self::offset(node_id) + OFFSET_N))
    }

    /// Number of edges leaving the node.
    pub fn out_degree(&self, node_id: u32) -> u32 {
        bits::extract_unsigned(self.out_edges_word(node_id), 28, 4)
    }

    /// Id of the `edge_index`-th edge leaving the node.
    ///
    /// Outgoing edges of a node are stored contiguously, so this is the
    /// first edge id plus `edge_index`.
    pub fn edge_id(&self, node_id: u32, edge_index: u32) -> u32 {
        debug_assert!(
            edge_index < self.out_degree(node_id),
            "edge index {edge_index} out of range for node {node_id}"
        );
        bits::extract_unsigned(self.out_edges_word(node_id), 0, 28) + edge_index
    }

    fn out_edges_word(&self, node_id: u32) -> i32 {
        self.buffer.i32_at(Self::offset(node_id) + OFFSET_OUT_EDGES)
    }

    fn offset(node_id: u32) -> usize {
        node_id as usize * NODE_BYTES
    }
}
