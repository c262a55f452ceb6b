//! The closed set of route shapes.

use std::borrow::Cow;

use crate::projection::PointCh;
use crate::routing::edge::Edge;
use crate::routing::multi_route::MultiRoute;
use crate::routing::route_point::RoutePoint;
use crate::routing::single_route::SingleRoute;

/// A route: either a single chain of edges or a sequence of sub-routes.
///
/// Positions are in metres from the start of the route and are clamped to
/// `[0, length]` by every query.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Single(SingleRoute),
    Multi(MultiRoute),
}

impl Route {
    /// Index of the single-route segment containing `position`, counting
    /// the leaves of nested routes from 0.
    pub fn index_of_segment_at(&self, position: f64) -> usize {
        match self {
            Route::Single(route) => route.index_of_segment_at(position),
            Route::Multi(route) => route.index_of_segment_at(position),
        }
    }

    /// Length in metres.
    pub fn length(&self) -> f64 {
        match self {
            Route::Single(route) => route.length(),
            Route::Multi(route) => route.length(),
        }
    }

    /// All edges, in travel order.
    pub fn edges(&self) -> Cow<'_, [Edge]> {
        match self {
            Route::Single(route) => Cow::Borrowed(route.edges()),
            Route::Multi(route) => Cow::Owned(route.edges()),
        }
    }

    /// All nodes, in travel order, without repeating segment junctions.
    pub fn points(&self) -> Cow<'_, [PointCh]> {
        match self {
            Route::Single(route) => Cow::Borrowed(route.points()),
            Route::Multi(route) => Cow::Owned(route.points()),
        }
    }

    pub fn point_at(&self, position: f64) -> PointCh {
        match self {
            Route::Single(route) => route.point_at(position),
            Route::Multi(route) => route.point_at(position),
        }
    }

    /// Elevation at `position`, NaN where the underlying edge has no profile.
    pub fn elevation_at(&self, position: f64) -> f64 {
        match self {
            Route::Single(route) => route.elevation_at(position),
            Route::Multi(route) => route.elevation_at(position),
        }
    }

    pub fn node_closest_to(&self, position: f64) -> u32 {
        match self {
            Route::Single(route) => route.node_closest_to(position),
            Route::Multi(route) => route.node_closest_to(position),
        }
    }

    /// The point of the route closest to `point`, the earliest one on ties.
    pub fn point_closest_to(&self, point: &PointCh) -> RoutePoint {
        match self {
            Route::Single(route) => route.point_closest_to(point),
            Route::Multi(route) => route.point_closest_to(point),
        }
    }
}

impl From<SingleRoute> for Route {
    fn from(route: SingleRoute) -> Self {
        Route::Single(route)
    }
}

impl From<MultiRoute> for Route {
    fn from(route: MultiRoute) -> Self {
        Route::Multi(route)
    }
}
