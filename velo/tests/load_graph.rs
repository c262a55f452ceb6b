use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use velo::data::graph::{
    ATTRIBUTES_FILE, EDGES_FILE, ELEVATIONS_FILE, NODES_FILE, PROFILE_IDS_FILE, SECTORS_FILE,
};
use velo::data::sectors::{GraphSectors, SECTOR_COUNT};
use velo::{
    elevation_profile, Attribute, AttributeSet, CityBikeCostFunction, Graph, PointCh,
    RouteComputer, VeloError,
};

const E: f64 = 2_600_000.0;
const N: f64 = 1_200_000.0;

/// Raw contents of the six graph files.
struct GraphFiles {
    nodes: Vec<u8>,
    edges: Vec<u8>,
    profile_ids: Vec<u8>,
    elevations: Vec<u8>,
    sectors: Vec<u8>,
    attributes: Vec<u8>,
}

fn q28_4(value: f64) -> i32 {
    (value * 16.0).round() as i32
}

fn be16(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

impl GraphFiles {
    /// Three nodes on a small street:
    ///
    /// - node 0 → node 1: 50 m cycleway with an 8-bit delta profile rising
    ///   from 500 m to 512.5 m, and its inverted twin from node 1 to node 0
    /// - node 1 ↔ node 2: 60 m residential street without profile
    fn sample() -> Self {
        let points = [(E, N), (E + 30.0, N + 40.0), (E + 30.0, N + 100.0)];
        // (degree, first edge) per node
        let packed = [(1u32, 0u32), (2, 1), (1, 3)];
        let mut nodes = Vec::new();
        for (&(e, n), &(degree, first)) in points.iter().zip(&packed) {
            nodes.extend_from_slice(&q28_4(e).to_be_bytes());
            nodes.extend_from_slice(&q28_4(n).to_be_bytes());
            nodes.extend_from_slice(&(degree << 28 | first).to_be_bytes());
        }

        // (target word, length, elevation gain, attribute set)
        let records: [(i32, f64, f64, u16); 4] = [
            (1, 50.0, 12.5, 1),
            (!0, 50.0, 0.0, 1),
            (2, 60.0, 0.0, 0),
            (1, 60.0, 0.0, 0),
        ];
        let mut edges = Vec::new();
        for (target, length, gain, attributes) in records {
            edges.extend_from_slice(&target.to_be_bytes());
            edges.extend_from_slice(&(q28_4(length) as u16).to_be_bytes());
            edges.extend_from_slice(&(q28_4(gain) as u16).to_be_bytes());
            edges.extend_from_slice(&attributes.to_be_bytes());
        }

        let compressed8 = 2u32 << 30;
        let profile_ids = [compressed8, compressed8, 0, 0]
            .iter()
            .flat_map(|id| id.to_be_bytes())
            .collect();

        // 26 samples: 500 m, then 25 deltas of +0.5 m, two per word.
        let mut words = vec![q28_4(500.0) as u16];
        words.extend([0x0808; 12]);
        words.push(0x0800);
        let elevations = be16(&words);

        let sector = GraphSectors::sector_index_of(&PointCh::new(E, N).unwrap());
        let mut sectors = Vec::new();
        for index in 0..SECTOR_COUNT {
            let (first, count): (i32, u16) = match index.cmp(&sector) {
                std::cmp::Ordering::Less => (0, 0),
                std::cmp::Ordering::Equal => (0, 3),
                std::cmp::Ordering::Greater => (3, 0),
            };
            sectors.extend_from_slice(&first.to_be_bytes());
            sectors.extend_from_slice(&count.to_be_bytes());
        }

        let attributes = [
            AttributeSet::of(&[Attribute::HighwayResidential]),
            AttributeSet::of(&[Attribute::HighwayCycleway, Attribute::SurfaceAsphalt]),
        ]
        .iter()
        .flat_map(|set| set.bits().to_be_bytes())
        .collect();

        Self {
            nodes,
            edges,
            profile_ids,
            elevations,
            sectors,
            attributes,
        }
    }

    fn write(&self, dir: &Path) {
        fs::write(dir.join(NODES_FILE), &self.nodes).unwrap();
        fs::write(dir.join(EDGES_FILE), &self.edges).unwrap();
        fs::write(dir.join(PROFILE_IDS_FILE), &self.profile_ids).unwrap();
        fs::write(dir.join(ELEVATIONS_FILE), &self.elevations).unwrap();
        fs::write(dir.join(SECTORS_FILE), &self.sectors).unwrap();
        fs::write(dir.join(ATTRIBUTES_FILE), &self.attributes).unwrap();
    }
}

fn load(files: &GraphFiles) -> velo::Result<Graph> {
    let temp_dir = TempDir::new().unwrap();
    files.write(temp_dir.path());
    Graph::load_from(temp_dir.path())
}

fn point(e: f64, n: f64) -> PointCh {
    PointCh::new(e, n).unwrap()
}

#[test]
fn test_load_nodes_and_edges() {
    let graph = load(&GraphFiles::sample()).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.attribute_sets().len(), 2);

    assert_eq!(graph.node_point(1), point(E + 30.0, N + 40.0));
    assert_eq!(graph.node_out_degree(1), 2);
    assert_eq!(graph.node_out_edge_id(1, 1), 2);
    assert_eq!(graph.node_out_edges(1).collect::<Vec<_>>(), vec![1, 2]);

    assert!(!graph.edge_is_inverted(0));
    assert!(graph.edge_is_inverted(1));
    assert_eq!(graph.edge_target_node_id(1), 0);
    assert_eq!(graph.edge_length(0), 50.0);
    assert_eq!(graph.edge_elevation_gain(0), 12.5);
    assert!(graph.edge_attributes(0).contains(Attribute::HighwayCycleway));
    assert!(graph.edge_attributes(2).contains(Attribute::HighwayResidential));
}

#[test]
fn test_load_profiles() {
    let graph = load(&GraphFiles::sample()).unwrap();

    let forward = graph.edge_profile(0);
    assert_eq!(forward.apply(0.0), 500.0);
    assert_eq!(forward.apply(25.0), 506.25);
    assert_eq!(forward.apply(50.0), 512.5);

    let backward = graph.edge_profile(1);
    assert_eq!(backward.apply(0.0), 512.5);
    assert_eq!(backward.apply(50.0), 500.0);

    assert!(graph.edge_profile(2).apply(10.0).is_nan());
}

#[test]
fn test_node_closest_to() {
    let graph = load(&GraphFiles::sample()).unwrap();
    assert_eq!(graph.node_closest_to(&point(E + 29.0, N + 39.0), 10.0), Some(1));
    assert_eq!(graph.node_closest_to(&point(E + 29.0, N + 70.0), 10.0), None);
}

#[test]
fn test_route_on_loaded_graph() {
    let graph = Arc::new(load(&GraphFiles::sample()).unwrap());
    let computer = RouteComputer::new(graph.clone(), CityBikeCostFunction::new(graph));

    let route = computer.best_route_between(0, 2).unwrap().unwrap();
    assert_eq!(route.length(), 110.0);
    assert_eq!(
        route.points().to_vec(),
        vec![point(E, N), point(E + 30.0, N + 40.0), point(E + 30.0, N + 100.0)]
    );

    let profile = elevation_profile(&route, 5.0).unwrap();
    assert_eq!(profile.samples().len(), 23);
    // The street after node 1 has no profile and keeps the last known value.
    assert_eq!(profile.min_elevation(), 500.0);
    assert_eq!(profile.max_elevation(), 511.25);
    assert_eq!(profile.total_ascent(), 11.25);
    assert_eq!(profile.total_descent(), 0.0);
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    GraphFiles::sample().write(temp_dir.path());
    fs::remove_file(temp_dir.path().join(EDGES_FILE)).unwrap();

    match Graph::load_from(temp_dir.path()) {
        Err(VeloError::FileNotFound { path }) => assert!(path.ends_with(EDGES_FILE)),
        other => panic!("Expected FileNotFound error, got {other:?}"),
    }
}

#[test]
fn test_truncated_nodes() {
    let mut files = GraphFiles::sample();
    files.nodes.truncate(30);
    assert!(matches!(
        load(&files),
        Err(VeloError::InvalidFileSize { size: 30, record: 12, .. })
    ));
}

#[test]
fn test_wrong_sector_count() {
    let mut files = GraphFiles::sample();
    files.sectors.truncate(6 * 100);
    assert!(matches!(load(&files), Err(VeloError::MalformedGraph { .. })));
}

#[test]
fn test_missing_profile_ids() {
    let mut files = GraphFiles::sample();
    files.profile_ids.truncate(12);
    assert!(matches!(load(&files), Err(VeloError::MalformedGraph { .. })));
}

#[test]
fn test_unknown_attribute_bits() {
    let mut files = GraphFiles::sample();
    files.attributes.extend_from_slice(&(1u64 << 63).to_be_bytes());
    assert!(matches!(load(&files), Err(VeloError::MalformedGraph { .. })));
}

#[test]
fn test_missing_attribute_set() {
    // Edges 0 and 1 refer to attribute set 1.
    let mut files = GraphFiles::sample();
    files.attributes.truncate(8);
    match load(&files) {
        Err(VeloError::MalformedGraph { reason }) => assert!(reason.contains("edge 0")),
        other => panic!("Expected MalformedGraph error, got {other:?}"),
    }
}
