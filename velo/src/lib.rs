//! # velo - road network routing
//!
//! Library for planning bicycle routes on a compact road network graph, with
//! elevation profiles along the computed routes.
//!
//! ## Features
//!
//! - **Fast loading**: the graph tables are memory-mapped, nothing is parsed up front
//! - **Compact**: lengths and elevations are 16-bit fixed point, profiles are delta-compressed
//! - **A\* routing**: pluggable per-edge cost factors, city bike costs included
//! - **Elevation profiles**: evenly spaced samples with ascent, descent and extremes
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use velo::{elevation_profile, CityBikeCostFunction, Graph, PointCh, RouteComputer};
//!
//! let graph = Arc::new(Graph::load_from("/data/velo")?);
//! let from = graph.node_closest_to(&PointCh::new(2_532_697.0, 1_152_350.0)?, 500.0);
//! let to = graph.node_closest_to(&PointCh::new(2_538_659.0, 1_154_350.0)?, 500.0);
//!
//! let computer = RouteComputer::new(graph.clone(), CityBikeCostFunction::new(graph));
//! if let (Some(from), Some(to)) = (from, to) {
//!     if let Some(route) = computer.best_route_between(from, to)? {
//!         let profile = elevation_profile(&route, 5.0)?;
//!         println!("{:.0} m, {:.0} m ascent", route.length(), profile.total_ascent());
//!     }
//! }
//! ```
//!
//! ## Graph Format
//!
//! A graph is a directory of six big-endian binary tables, described in
//! [`data`]. Coordinates are Swiss CH1903+ / LV95 east and north values in
//! metres, stored in Q28.4 fixed point (see [`q28_4`]).

pub mod bits;
pub mod data;
pub mod error;
pub mod functions;
pub mod math;
pub mod planner;
pub mod projection;
pub mod q28_4;
pub mod routing;

// Re-export main types at crate root for convenience
pub use data::{Attribute, AttributeSet, Graph};
pub use error::{Result, VeloError};
pub use functions::Function;
pub use planner::{CacheStats, PlannedRoute, RoutePlanner, RoutePlannerBuilder, Waypoint};
pub use projection::{PointCh, SwissBounds};
pub use routing::{
    elevation_profile, CityBikeCostFunction, CostFunction, Edge, ElevationProfile, MultiRoute,
    Route, RouteComputer, RoutePoint, SingleRoute,
};
