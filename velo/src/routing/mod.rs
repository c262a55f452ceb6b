//! Routes and how they are computed.
//!
//! - [`Edge`]: a graph edge with explicit endpoints
//! - [`Route`]: a [`SingleRoute`] chain of edges or a [`MultiRoute`] of sub-routes
//! - [`RouteComputer`]: A* search for the lowest-cost route between two nodes
//! - [`elevation_profile`]: evenly spaced elevation samples along a route

pub mod computer;
pub mod cost;
pub mod edge;
pub mod elevation;
pub mod multi_route;
pub mod route;
pub mod route_point;
pub mod single_route;

pub use computer::RouteComputer;
pub use cost::{CityBikeCostFunction, CostFunction};
pub use edge::Edge;
pub use elevation::{elevation_profile, ElevationProfile};
pub use multi_route::MultiRoute;
pub use route::Route;
pub use route_point::RoutePoint;
pub use single_route::SingleRoute;
