//! The sector table: a coarse spatial index over the nodes.

use crate::data::buffer::GraphBuffer;
use crate::math;
use crate::projection::{PointCh, SwissBounds};

const OFFSET_FIRST_NODE: usize = 0;
const OFFSET_NODE_COUNT: usize = OFFSET_FIRST_NODE + 4;

/// Size of one sector record in bytes.
pub const SECTOR_BYTES: usize = OFFSET_NODE_COUNT + 2;

/// Number of sectors along each axis.
pub const SECTORS_PER_SIDE: usize = 128;

/// Total number of sectors.
pub const SECTOR_COUNT: usize = SECTORS_PER_SIDE * SECTORS_PER_SIDE;

const SECTOR_WIDTH: f64 = SwissBounds::WIDTH / SECTORS_PER_SIDE as f64;
const SECTOR_HEIGHT: f64 = SwissBounds::HEIGHT / SECTORS_PER_SIDE as f64;

/// A contiguous range of node ids `[start_node_id, end_node_id)` belonging
/// to one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    pub start_node_id: u32,
    pub end_node_id: u32,
}

/// Sectors of the graph: the bounding rectangle split into a 128×128 grid,
/// each cell storing the id of its first node (4 bytes) and its node count
/// (2 bytes, unsigned). Nodes are sorted by sector, row-major from the
/// south-west corner.
#[derive(Debug)]
pub struct GraphSectors {
    buffer: GraphBuffer,
}

impl GraphSectors {
    pub fn new(buffer: GraphBuffer) -> Self {
        Self { buffer }
    }

    /// Index of the sector containing `point`.
    pub fn sector_index_of(point: &PointCh) -> usize {
        let (x, y) = Self::grid_cell(point.e(), point.n());
        y as usize * SECTORS_PER_SIDE + x as usize
    }

    /// All sectors intersecting the square of half-side `distance` centred on
    /// `center`, row by row from the south-west. Empty if `distance` is
    /// negative or NaN.
    pub fn sectors_in_area(&self, center: &PointCh, distance: f64) -> Vec<Sector> {
        if distance.is_nan() || distance < 0.0 {
            return Vec::new();
        }
        let (x_min, y_min) = Self::grid_cell(center.e() - distance, center.n() - distance);
        let (x_max, y_max) = Self::grid_cell(center.e() + distance, center.n() + distance);

        let columns = (x_max - x_min + 1) as usize;
        let rows = (y_max - y_min + 1) as usize;
        let mut sectors = Vec::with_capacity(columns * rows);
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                sectors.push(self.sector(y as usize * SECTORS_PER_SIDE + x as usize));
            }
        }
        sectors
    }

    fn sector(&self, index: usize) -> Sector {
        let offset = index * SECTOR_BYTES;
        let start_node_id = self.buffer.i32_at(offset + OFFSET_FIRST_NODE) as u32;
        let count = self.buffer.u16_at(offset + OFFSET_NODE_COUNT) as u32;
        Sector {
            start_node_id,
            end_node_id: start_node_id + count,
        }
    }

    /// Grid coordinates of the cell containing `(e, n)`, after clamping the
    /// point to the bounds.
    fn grid_cell(e: f64, n: f64) -> (i32, i32) {
        let last = SECTORS_PER_SIDE as i32 - 1;
        let e = math::clamp(SwissBounds::MIN_E, e, SwissBounds::MAX_E);
        let n = math::clamp(SwissBounds::MIN_N, n, SwissBounds::MAX_N);
        let x = ((e - SwissBounds::MIN_E) / SECTOR_WIDTH) as i32;
        let y = ((n - SwissBounds::MIN_N) / SECTOR_HEIGHT) as i32;
        (math::clamp_int(0, x, last), math::clamp_int(0, y, last))
    }
}
