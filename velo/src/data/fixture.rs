//! Small in-memory graphs for unit tests.

use crate::data::attribute::AttributeSet;
use crate::data::buffer::GraphBuffer;
use crate::data::edges::GraphEdges;
use crate::data::graph::Graph;
use crate::data::nodes::GraphNodes;
use crate::data::sectors::{GraphSectors, SECTOR_COUNT};
use crate::projection::PointCh;

struct FixtureEdge {
    from: u32,
    to: u32,
    length: f64,
    inverted: bool,
    attributes: u16,
    samples: Vec<f32>,
}

/// Builds a [`Graph`] from nodes and edges listed by hand.
///
/// Edges must be added grouped by source node, in node order, so that their
/// ids are the order in which they were added. Nodes must be added in
/// sector order (nodes a few hundred metres apart share a sector).
#[derive(Default)]
pub(crate) struct GraphFixture {
    nodes: Vec<(f64, f64)>,
    edges: Vec<FixtureEdge>,
    attribute_sets: Vec<AttributeSet>,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, e: f64, n: f64) -> Self {
        self.nodes.push((e, n));
        self
    }

    pub fn attribute_set(mut self, set: AttributeSet) -> Self {
        self.attribute_sets.push(set);
        self
    }

    pub fn edge(self, from: u32, to: u32, length: f64) -> Self {
        self.push_edge(from, to, length, false, 0, &[])
    }

    pub fn edge_with_attributes(self, from: u32, to: u32, length: f64, attributes: u16) -> Self {
        self.push_edge(from, to, length, false, attributes, &[])
    }

    /// An edge running against the direction of its source way.
    pub fn inverted_edge(self, from: u32, to: u32, length: f64, attributes: u16) -> Self {
        self.push_edge(from, to, length, true, attributes, &[])
    }

    /// An edge with a raw profile; `samples` must hold one sample every 2 m plus one.
    pub fn edge_with_profile(self, from: u32, to: u32, length: f64, samples: &[f32]) -> Self {
        self.push_edge(from, to, length, false, 0, samples)
    }

    /// An inverted edge with a raw profile; `samples` are given in storage
    /// order, i.e. from `to` back to `from`.
    pub fn inverted_edge_with_profile(
        self,
        from: u32,
        to: u32,
        length: f64,
        samples: &[f32],
    ) -> Self {
        self.push_edge(from, to, length, true, 0, samples)
    }

    fn push_edge(
        mut self,
        from: u32,
        to: u32,
        length: f64,
        inverted: bool,
        attributes: u16,
        samples: &[f32],
    ) -> Self {
        if let Some(last) = self.edges.last() {
            assert!(last.from <= from, "edges must be grouped by source node");
        }
        if !samples.is_empty() {
            let fixed_length = (length * 16.0).round() as usize;
            assert_eq!(samples.len(), 1 + fixed_length.div_ceil(32), "sample count");
        }
        self.edges.push(FixtureEdge {
            from,
            to,
            length,
            inverted,
            attributes,
            samples: samples.to_vec(),
        });
        self
    }

    pub fn build(mut self) -> Graph {
        if self.attribute_sets.is_empty() {
            self.attribute_sets.push(AttributeSet::EMPTY);
        }

        let mut nodes = Vec::new();
        for (id, &(e, n)) in self.nodes.iter().enumerate() {
            let id = id as u32;
            let first_edge = self.edges.iter().filter(|edge| edge.from < id).count() as u32;
            let degree = self.edges.iter().filter(|edge| edge.from == id).count() as u32;
            assert!(degree < 16, "out-degree is stored on 4 bits");
            nodes.extend_from_slice(&fixed(e).to_be_bytes());
            nodes.extend_from_slice(&fixed(n).to_be_bytes());
            nodes.extend_from_slice(&(degree << 28 | first_edge).to_be_bytes());
        }

        let node_sectors: Vec<usize> = self
            .nodes
            .iter()
            .map(|&(e, n)| GraphSectors::sector_index_of(&PointCh::new(e, n).unwrap()))
            .collect();
        assert!(
            node_sectors.windows(2).all(|w| w[0] <= w[1]),
            "nodes must be sorted by sector"
        );
        let mut sectors = Vec::new();
        for sector in 0..SECTOR_COUNT {
            let first = node_sectors.iter().filter(|&&s| s < sector).count() as i32;
            let count = node_sectors.iter().filter(|&&s| s == sector).count() as u16;
            sectors.extend_from_slice(&first.to_be_bytes());
            sectors.extend_from_slice(&count.to_be_bytes());
        }

        let mut edges = Vec::new();
        let mut profile_ids = Vec::new();
        let mut elevations: Vec<u8> = Vec::new();
        for edge in &self.edges {
            let target = if edge.inverted {
                !(edge.to as i32)
            } else {
                edge.to as i32
            };
            let gain: f32 = edge
                .samples
                .windows(2)
                .map(|w| (w[1] - w[0]).max(0.0))
                .sum();
            edges.extend_from_slice(&target.to_be_bytes());
            edges.extend_from_slice(&(fixed(edge.length) as u16).to_be_bytes());
            edges.extend_from_slice(&(fixed(gain as f64) as u16).to_be_bytes());
            edges.extend_from_slice(&edge.attributes.to_be_bytes());

            let profile_id = if edge.samples.is_empty() {
                0u32
            } else {
                let first = (elevations.len() / 2) as u32;
                for sample in &edge.samples {
                    elevations.extend_from_slice(&(fixed(*sample as f64) as u16).to_be_bytes());
                }
                1 << 30 | first
            };
            profile_ids.extend_from_slice(&profile_id.to_be_bytes());
        }

        Graph::new(
            GraphNodes::new(GraphBuffer::from(nodes)),
            GraphSectors::new(GraphBuffer::from(sectors)),
            GraphEdges::new(
                GraphBuffer::from(edges),
                GraphBuffer::from(profile_ids),
                GraphBuffer::from(elevations),
            ),
            self.attribute_sets,
        )
    }
}

fn fixed(value: f64) -> i32 {
    (value * 16.0).round() as i32
}
