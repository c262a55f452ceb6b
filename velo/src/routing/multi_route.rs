//! Routes made of consecutive sub-routes.

use std::sync::Arc;

use crate::error::{Result, VeloError};
use crate::math;
use crate::projection::PointCh;
use crate::routing::edge::Edge;
use crate::routing::route::Route;
use crate::routing::route_point::RoutePoint;

/// A route made of segments travelled one after the other, each of which
/// may itself be a multi-route.
///
/// The end of each segment is expected to be the start of the next.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRoute {
    segments: Arc<[Route]>,
    length: f64,
}

impl MultiRoute {
    /// # Errors
    ///
    /// Returns [`VeloError::InvalidArgument`] if `segments` is empty.
    pub fn new(segments: Vec<Route>) -> Result<Self> {
        if segments.is_empty() {
            return Err(VeloError::InvalidArgument(
                "a multi-route needs at least one segment".into(),
            ));
        }
        let length = segments.iter().map(Route::length).sum();
        Ok(Self {
            segments: segments.into(),
            length,
        })
    }

    pub fn segments(&self) -> &[Route] {
        &self.segments
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn index_of_segment_at(&self, position: f64) -> usize {
        let mut position = math::clamp(0.0, position, self.length);
        let mut index = 0;
        let last = self.segments.len() - 1;
        for (i, segment) in self.segments.iter().enumerate() {
            if i == last || position <= segment.length() {
                return index + segment.index_of_segment_at(position);
            }
            // Skip every leaf of this segment.
            index += segment.index_of_segment_at(segment.length()) + 1;
            position -= segment.length();
        }
        index
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.segments
            .iter()
            .flat_map(|segment| segment.edges().into_owned())
            .collect()
    }

    pub fn points(&self) -> Vec<PointCh> {
        let mut points = Vec::new();
        for segment in self.segments.iter() {
            let segment_points = segment.points();
            // The first point of each segment repeats the last of the previous one.
            let skip = usize::from(!points.is_empty());
            points.extend_from_slice(&segment_points[skip..]);
        }
        points
    }

    pub fn point_at(&self, position: f64) -> PointCh {
        let (segment, local) = self.segment_at(position);
        segment.point_at(local)
    }

    pub fn elevation_at(&self, position: f64) -> f64 {
        let (segment, local) = self.segment_at(position);
        segment.elevation_at(local)
    }

    pub fn node_closest_to(&self, position: f64) -> u32 {
        let (segment, local) = self.segment_at(position);
        segment.node_closest_to(local)
    }

    pub fn point_closest_to(&self, point: &PointCh) -> RoutePoint {
        let mut closest = RoutePoint::NONE;
        let mut offset = 0.0;
        for segment in self.segments.iter() {
            let candidate = segment.point_closest_to(point).with_position_shifted_by(offset);
            closest = closest.min(candidate);
            offset += segment.length();
        }
        closest
    }

    /// The segment containing `position` and the position local to it.
    /// Boundaries belong to the earlier segment.
    fn segment_at(&self, position: f64) -> (&Route, f64) {
        let mut position = math::clamp(0.0, position, self.length);
        let mut index = 0;
        while index + 1 < self.segments.len() && position > self.segments[index].length() {
            position -= self.segments[index].length();
            index += 1;
        }
        (&self.segments[index], position)
    }
}
