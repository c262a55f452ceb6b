//! The edge table and the elevation profiles attached to edges.

use crate::bits;
use crate::data::buffer::GraphBuffer;
use crate::math;
use crate::q28_4;

const OFFSET_TARGET: usize = 0;
const OFFSET_LENGTH: usize = OFFSET_TARGET + 4;
const OFFSET_ELEVATION_GAIN: usize = OFFSET_LENGTH + 2;
const OFFSET_ATTRIBUTES: usize = OFFSET_ELEVATION_GAIN + 2;

/// Size of one edge record in bytes.
pub const EDGE_BYTES: usize = OFFSET_ATTRIBUTES + 2;

/// Size of one profile id in bytes.
pub const PROFILE_ID_BYTES: usize = 4;

/// Size of one elevation word in bytes.
pub const ELEVATION_BYTES: usize = 2;

/// Horizontal distance between two profile samples, in metres.
const SAMPLE_SPACING: i32 = 2;

/// How the elevation samples of an edge are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileType {
    /// The edge has no profile.
    None,
    /// Every sample is a Q28.4 value.
    Raw,
    /// A Q28.4 first sample followed by 8-bit Q0.4 deltas, two per word.
    Compressed8,
    /// A Q28.4 first sample followed by 4-bit Q0.4 deltas, four per word.
    Compressed4,
}

impl ProfileType {
    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => ProfileType::Raw,
            2 => ProfileType::Compressed8,
            3 => ProfileType::Compressed4,
            _ => ProfileType::None,
        }
    }

    /// Width of one delta in bits, for compressed profiles.
    fn delta_bits(self) -> Option<u32> {
        match self {
            ProfileType::Compressed8 => Some(8),
            ProfileType::Compressed4 => Some(4),
            ProfileType::None | ProfileType::Raw => None,
        }
    }
}

/// Edges of the graph.
///
/// Each 10-byte record holds:
/// - the target node id as an `i32`, bitwise complemented when the edge runs
///   against the direction of the OpenStreetMap way it comes from
/// - the length (Q28.4, unsigned 16 bits)
/// - the positive elevation gain (Q28.4, unsigned 16 bits)
/// - the index of the edge's attribute set (unsigned 16 bits)
///
/// `profile_ids` has one word per edge: the profile type in the top 2 bits
/// and the index of the first sample in `elevations` in the low 30 bits.
#[derive(Debug)]
pub struct GraphEdges {
    edges: GraphBuffer,
    profile_ids: GraphBuffer,
    elevations: GraphBuffer,
}

impl GraphEdges {
    pub fn new(edges: GraphBuffer, profile_ids: GraphBuffer, elevations: GraphBuffer) -> Self {
        Self {
            edges,
            profile_ids,
            elevations,
        }
    }

    /// Number of edges.
    pub fn count(&self) -> usize {
        self.edges.len() / EDGE_BYTES
    }

    /// Number of entries in the profile id table.
    pub(crate) fn profile_id_count(&self) -> usize {
        self.profile_ids.len() / PROFILE_ID_BYTES
    }

    /// Whether the edge runs against the direction of its source way.
    pub fn is_inverted(&self, edge_id: u32) -> bool {
        self.target_word(edge_id) < 0
    }

    /// Id of the node the edge leads to.
    pub fn target_node_id(&self, edge_id: u32) -> u32 {
        let word = self.target_word(edge_id);
        if word < 0 {
            !word as u32
        } else {
            word as u32
        }
    }

    /// Length of the edge, in metres.
    pub fn length(&self, edge_id: u32) -> f64 {
        q28_4::as_double(self.length_q28_4(edge_id))
    }

    /// Positive elevation gain along the edge, in metres.
    pub fn elevation_gain(&self, edge_id: u32) -> f64 {
        q28_4::as_double(self.edges.u16_at(Self::offset(edge_id) + OFFSET_ELEVATION_GAIN) as i32)
    }

    /// Index of the edge's attribute set.
    pub fn attributes_index(&self, edge_id: u32) -> u16 {
        self.edges.u16_at(Self::offset(edge_id) + OFFSET_ATTRIBUTES)
    }

    pub fn profile_type(&self, edge_id: u32) -> ProfileType {
        ProfileType::from_bits(bits::extract_unsigned(self.profile_id(edge_id), 30, 2))
    }

    pub fn has_profile(&self, edge_id: u32) -> bool {
        self.profile_type(edge_id) != ProfileType::None
    }

    /// Elevation samples of the edge, in metres, spaced evenly from its
    /// start to its end. Empty if the edge has no profile.
    ///
    /// There is one sample every 2 metres, rounded up, plus one. Samples of
    /// inverted edges are stored in way order and returned reversed.
    pub fn profile_samples(&self, edge_id: u32) -> Vec<f32> {
        let profile_type = self.profile_type(edge_id);
        if profile_type == ProfileType::None {
            return Vec::new();
        }

        let profile_id = self.profile_id(edge_id);
        let first = bits::extract_unsigned(profile_id, 0, 30) as usize;
        let count = 1 + math::ceil_div(
            self.length_q28_4(edge_id) as u32,
            q28_4::of_int(SAMPLE_SPACING) as u32,
        ) as usize;

        let mut samples = Vec::with_capacity(count);
        match profile_type.delta_bits() {
            None => {
                for i in 0..count {
                    samples.push(self.raw_sample(first + i));
                }
            }
            Some(delta_bits) => {
                let per_word = (16 / delta_bits) as usize;
                let mut elevation = self.raw_sample(first);
                samples.push(elevation);
                for i in 1..count {
                    // Sample i lives in word ceil(i / per_word), highest bits first.
                    let word = self.elevation_word(first + i.div_ceil(per_word));
                    let slot = (per_word - 1 - (i - 1) % per_word) as u32;
                    let delta = bits::extract_signed(word, slot * delta_bits, delta_bits);
                    elevation += q28_4::as_float(delta);
                    samples.push(elevation);
                }
            }
        }

        if self.is_inverted(edge_id) {
            samples.reverse();
        }
        samples
    }

    fn raw_sample(&self, index: usize) -> f32 {
        q28_4::as_float(self.elevation_word(index))
    }

    /// The elevation word at `index`, zero-extended.
    fn elevation_word(&self, index: usize) -> i32 {
        self.elevations.u16_at(index * ELEVATION_BYTES) as i32
    }

    fn length_q28_4(&self, edge_id: u32) -> i32 {
        self.edges.u16_at(Self::offset(edge_id) + OFFSET_LENGTH) as i32
    }

    fn target_word(&self, edge_id: u32) -> i32 {
        self.edges.i32_at(Self::offset(edge_id) + OFFSET_TARGET)
    }

    fn profile_id(&self, edge_id: u32) -> i32 {
        self.profile_ids.i32_at(edge_id as usize * PROFILE_ID_BYTES)
    }

    fn offset(edge_id: u32) -> usize {
        edge_id as usize * EDGE_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_record(target: i32, length: u16, gain: u16, attributes: u16) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(EDGE_BYTES);
        bytes.extend_from_slice(&target.to_be_bytes());
        bytes.extend_from_slice(&length.to_be_bytes());
        bytes.extend_from_slice(&gain.to_be_bytes());
        bytes.extend_from_slice(&attributes.to_be_bytes());
        bytes
    }

    fn words(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_be_bytes()).collect()
    }

    fn profile_id(profile_type: u32, first: u32) -> Vec<u8> {
        (profile_type << 30 | first).to_be_bytes().to_vec()
    }

    /// Four edges of 17.5 m (10 samples) sharing the profile in `EXPECTED`,
    /// encoded in every possible way.
    fn sample_edges(inverted: bool) -> GraphEdges {
        let target = if inverted { !12 } else { 12 };
        let length = 0x1_18; // 17.5 m
        let mut edges = Vec::new();
        for attributes in 0..4 {
            edges.extend(edge_record(target, length, 0x10, attributes));
        }

        let elevations = words(&[
            0x180C, 0x180D, 0x180E, 0x180E, 0x1810, 0x1810, 0x180F, 0x180F, 0x180F, 0x180F,
            0x0000, // padding before the compressed profiles
            0x180C, 0x0101, 0x0002, 0x00FF, 0x0000, 0x0000, 0x0000, 0x0000,
            0x180C, 0x1102, 0x0F00, 0x0000, // 4-bit deltas
        ]);

        let mut ids = profile_id(0, 0);
        ids.extend(profile_id(1, 0));
        ids.extend(profile_id(2, 11));
        ids.extend(profile_id(3, 19));

        GraphEdges::new(
            GraphBuffer::from(edges),
            GraphBuffer::from(ids),
            GraphBuffer::from(elevations),
        )
    }

    const EXPECTED: [f32; 10] = [
        384.75, 384.8125, 384.875, 384.875, 385.0, 385.0, 384.9375, 384.9375, 384.9375, 384.9375,
    ];

    #[test]
    fn test_edge_fields() {
        let edges = GraphEdges::new(
            GraphBuffer::from(edge_record(!7, 0x100, 0x28, 3)),
            GraphBuffer::from(profile_id(0, 0)),
            GraphBuffer::from(Vec::new()),
        );
        assert_eq!(edges.count(), 1);
        assert!(edges.is_inverted(0));
        assert_eq!(edges.target_node_id(0), 7);
        assert_eq!(edges.length(0), 16.0);
        assert_eq!(edges.elevation_gain(0), 2.5);
        assert_eq!(edges.attributes_index(0), 3);
        assert!(!edges.has_profile(0));
        assert!(edges.profile_samples(0).is_empty());
    }

    #[test]
    fn test_forward_edge() {
        let edges = GraphEdges::new(
            GraphBuffer::from(edge_record(42, 0xFFFF, 0, 0)),
            GraphBuffer::from(profile_id(0, 0)),
            GraphBuffer::from(Vec::new()),
        );
        assert!(!edges.is_inverted(0));
        assert_eq!(edges.target_node_id(0), 42);
        assert_eq!(edges.length(0), 4095.9375);
    }

    #[test]
    fn test_profile_types() {
        let edges = sample_edges(false);
        assert_eq!(edges.profile_type(0), ProfileType::None);
        assert_eq!(edges.profile_type(1), ProfileType::Raw);
        assert_eq!(edges.profile_type(2), ProfileType::Compressed8);
        assert_eq!(edges.profile_type(3), ProfileType::Compressed4);
    }

    #[test]
    fn test_raw_profile() {
        let edges = sample_edges(false);
        assert_eq!(edges.profile_samples(1), EXPECTED);
    }

    #[test]
    fn test_compressed_profiles() {
        let edges = sample_edges(false);
        assert_eq!(edges.profile_samples(2), EXPECTED);
        assert_eq!(edges.profile_samples(3), EXPECTED);
    }

    #[test]
    fn test_inverted_profiles_are_reversed() {
        let edges = sample_edges(true);
        let mut reversed = EXPECTED;
        reversed.reverse();
        for edge_id in 1..4 {
            assert_eq!(edges.profile_samples(edge_id), reversed);
        }
    }

    #[test]
    fn test_zero_length_profile_has_one_sample() {
        let edges = GraphEdges::new(
            GraphBuffer::from(edge_record(1, 0, 0, 0)),
            GraphBuffer::from(profile_id(1, 0)),
            GraphBuffer::from(words(&[0x0100])),
        );
        assert_eq!(edges.profile_samples(0), vec![16.0]);
    }
}
