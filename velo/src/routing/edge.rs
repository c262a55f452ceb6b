//! Edges as seen by a route.

use crate::data::Graph;
use crate::functions::Function;
use crate::math;
use crate::projection::PointCh;

/// One step of a route: a graph edge resolved to explicit endpoints.
///
/// The endpoints are stored explicitly so that an edge can be travelled
/// opposite to its storage direction without touching the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from_node_id: u32,
    to_node_id: u32,
    from_point: PointCh,
    to_point: PointCh,
    length: f64,
    profile: Function,
}

impl Edge {
    pub fn new(
        from_node_id: u32,
        to_node_id: u32,
        from_point: PointCh,
        to_point: PointCh,
        length: f64,
        profile: Function,
    ) -> Self {
        Self {
            from_node_id,
            to_node_id,
            from_point,
            to_point,
            length,
            profile,
        }
    }

    /// Resolve edge `edge_id` of `graph`, going from `from_node_id` to `to_node_id`.
    pub fn of(graph: &Graph, edge_id: u32, from_node_id: u32, to_node_id: u32) -> Self {
        Self::new(
            from_node_id,
            to_node_id,
            graph.node_point(from_node_id),
            graph.node_point(to_node_id),
            graph.edge_length(edge_id),
            graph.edge_profile(edge_id),
        )
    }

    pub fn from_node_id(&self) -> u32 {
        self.from_node_id
    }

    pub fn to_node_id(&self) -> u32 {
        self.to_node_id
    }

    pub fn from_point(&self) -> PointCh {
        self.from_point
    }

    pub fn to_point(&self) -> PointCh {
        self.to_point
    }

    /// Length in metres.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn profile(&self) -> &Function {
        &self.profile
    }

    /// Position along the edge of the projection of `point` onto the line
    /// through the edge's endpoints. May be negative or exceed the length.
    pub fn position_closest_to(&self, point: &PointCh) -> f64 {
        math::projection_length(
            self.from_point.e(),
            self.from_point.n(),
            self.to_point.e(),
            self.to_point.n(),
            point.e(),
            point.n(),
        )
    }

    /// Point at `position` metres along the straight segment between the endpoints.
    pub fn point_at(&self, position: f64) -> PointCh {
        if self.length == 0.0 {
            return self.from_point;
        }
        let t = position / self.length;
        PointCh::new_unchecked(
            math::interpolate(self.from_point.e(), self.to_point.e(), t),
            math::interpolate(self.from_point.n(), self.to_point.n(), t),
        )
    }

    /// Elevation at `position` metres along the edge, NaN if unknown.
    pub fn elevation_at(&self, position: f64) -> f64 {
        self.profile.apply(position)
    }
}
