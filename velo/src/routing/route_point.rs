//! The point of a route closest to some reference point.

use crate::projection::PointCh;

/// A point of a route, its position along the route and its distance to the
/// reference point it was found for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePoint {
    point: Option<PointCh>,
    position: f64,
    distance_to_reference: f64,
}

impl RoutePoint {
    /// No point at all, infinitely far from any reference.
    pub const NONE: RoutePoint = RoutePoint {
        point: None,
        position: f64::NAN,
        distance_to_reference: f64::INFINITY,
    };

    pub fn new(point: PointCh, position: f64, distance_to_reference: f64) -> Self {
        Self {
            point: Some(point),
            position,
            distance_to_reference,
        }
    }

    /// The point, `None` for [`RoutePoint::NONE`].
    pub fn point(&self) -> Option<PointCh> {
        self.point
    }

    /// Position along the route, in metres.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn distance_to_reference(&self) -> f64 {
        self.distance_to_reference
    }

    /// The same point with its position shifted by `difference` metres.
    pub fn with_position_shifted_by(self, difference: f64) -> Self {
        if difference == 0.0 {
            return self;
        }
        Self {
            position: self.position + difference,
            ..self
        }
    }

    /// The closer of `self` and `that`, preferring `self` on ties.
    pub fn min(self, that: RoutePoint) -> RoutePoint {
        if self.distance_to_reference <= that.distance_to_reference {
            self
        } else {
            that
        }
    }
}
