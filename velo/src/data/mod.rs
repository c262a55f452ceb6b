//! Read-only access to the binary road network.
//!
//! A graph is stored as six big-endian tables in one directory:
//!
//! | File | Record |
//! |------|--------|
//! | `nodes.bin` | 12 bytes: E, N (Q28.4), out-degree + first edge id |
//! | `edges.bin` | 10 bytes: target, length, elevation gain, attribute index |
//! | `profile_ids.bin` | 4 bytes per edge: profile type + first sample |
//! | `elevations.bin` | 2 bytes: raw samples or packed deltas |
//! | `sectors.bin` | 6 bytes × 128 × 128: first node id + node count |
//! | `attributes.bin` | 8 bytes: attribute set bit mask |

pub mod attribute;
pub mod buffer;
pub mod edges;
pub mod graph;
pub mod nodes;
pub mod sectors;

#[cfg(test)]
pub(crate) mod fixture;

pub use attribute::{Attribute, AttributeSet};
pub use buffer::GraphBuffer;
pub use edges::{GraphEdges, ProfileType};
pub use graph::Graph;
pub use nodes::GraphNodes;
pub use sectors::{GraphSectors, Sector};
