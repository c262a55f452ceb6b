//! Routes made of a single chain of edges.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::error::{Result, VeloError};
use crate::math;
use crate::projection::PointCh;
use crate::routing::edge::Edge;
use crate::routing::route_point::RoutePoint;

/// A route following one contiguous chain of edges, with no intermediate
/// segment boundaries.
///
/// Cloning is cheap: the edges, points and position table are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRoute {
    edges: Arc<[Edge]>,
    /// `positions[i]` is the position of the start of edge `i`; the last
    /// entry is the length of the route.
    positions: Arc<[f64]>,
    points: Arc<[PointCh]>,
}

/// Where a position falls in the position table.
enum Location {
    /// Exactly on node `i` (the start of edge `i`, or the end of the route
    /// when `i` is the edge count).
    Node(usize),
    /// Strictly inside edge `i`, at the given local position.
    Edge(usize, f64),
}

impl SingleRoute {
    /// Create a route from its edges, in travel order.
    ///
    /// # Errors
    ///
    /// Returns [`VeloError::InvalidArgument`] if `edges` is empty.
    pub fn new(edges: Vec<Edge>) -> Result<Self> {
        if edges.is_empty() {
            return Err(VeloError::InvalidArgument(
                "a route needs at least one edge".into(),
            ));
        }

        let mut positions = Vec::with_capacity(edges.len() + 1);
        positions.push(0.0);
        let mut points = Vec::with_capacity(edges.len() + 1);
        let mut total = 0.0;
        for edge in &edges {
            total += edge.length();
            positions.push(total);
            points.push(edge.from_point());
        }
        if let Some(last) = edges.last() {
            points.push(last.to_point());
        }

        Ok(Self {
            edges: edges.into(),
            positions: positions.into(),
            points: points.into(),
        })
    }

    /// Always 0: a single route is one segment.
    pub fn index_of_segment_at(&self, _position: f64) -> usize {
        0
    }

    /// Length in metres.
    pub fn length(&self) -> f64 {
        self.positions[self.positions.len() - 1]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The nodes of the route: the start of every edge, then the end of the last one.
    pub fn points(&self) -> &[PointCh] {
        &self.points
    }

    /// Point at `position` metres from the start, clamped to the route.
    pub fn point_at(&self, position: f64) -> PointCh {
        match self.locate(position) {
            Location::Node(i) => self.points[i],
            Location::Edge(i, local) => self.edges[i].point_at(local),
        }
    }

    /// Elevation at `position` metres from the start, clamped to the route.
    pub fn elevation_at(&self, position: f64) -> f64 {
        match self.locate(position) {
            Location::Node(i) if i == self.edges.len() => {
                let last = &self.edges[i - 1];
                last.elevation_at(last.length())
            }
            Location::Node(i) => self.edges[i].elevation_at(0.0),
            Location::Edge(i, local) => self.edges[i].elevation_at(local),
        }
    }

    /// Id of the node closest to `position` along the route.
    ///
    /// Inside an edge, the start node wins up to and including the midpoint.
    pub fn node_closest_to(&self, position: f64) -> u32 {
        match self.locate(position) {
            Location::Node(i) if i == self.edges.len() => self.edges[i - 1].to_node_id(),
            Location::Node(i) => self.edges[i].from_node_id(),
            Location::Edge(i, local) => {
                let edge = &self.edges[i];
                if local <= edge.length() / 2.0 {
                    edge.from_node_id()
                } else {
                    edge.to_node_id()
                }
            }
        }
    }

    /// The point of the route closest to `point`.
    ///
    /// On ties, the edge nearest the start of the route wins.
    pub fn point_closest_to(&self, point: &PointCh) -> RoutePoint {
        let mut closest = RoutePoint::NONE;
        for (edge, start) in self.edges.iter().zip(self.positions.iter()) {
            let local = math::clamp(0.0, edge.position_closest_to(point), edge.length());
            let candidate = edge.point_at(local);
            let distance = point.distance_to(&candidate);
            if distance < closest.distance_to_reference() {
                closest = RoutePoint::new(candidate, start + local, distance);
            }
        }
        closest
    }

    fn locate(&self, position: f64) -> Location {
        let position = math::clamp(0.0, position, self.length());
        let search = self
            .positions
            .binary_search_by(|p| p.partial_cmp(&position).unwrap_or(Ordering::Less));
        match search {
            Ok(i) => Location::Node(i),
            Err(i) => {
                let edge = i.saturating_sub(1).min(self.edges.len() - 1);
                Location::Edge(edge, position - self.positions[edge])
            }
        }
    }
}
