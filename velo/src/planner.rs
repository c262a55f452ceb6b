//! Route planning through a list of waypoints, with leg caching.
//!
//! [`RoutePlanner`] snaps points to graph nodes, computes the route between
//! every pair of consecutive waypoints and joins the legs into a single
//! [`Route`] with its [`ElevationProfile`]. Legs are cached, so moving one
//! waypoint only recomputes the two legs that touch it.
//!
//! ```ignore
//! use velo::{PointCh, RoutePlannerBuilder};
//!
//! let planner = RoutePlannerBuilder::new("/data/velo").cache_size(200).build()?;
//! let waypoints: Vec<_> = [(2_532_697.0, 1_152_350.0), (2_538_659.0, 1_154_350.0)]
//!     .into_iter()
//!     .filter_map(|(e, n)| planner.waypoint_at(PointCh::new(e, n).ok()?))
//!     .collect();
//! if let Some(planned) = planner.plan(&waypoints)? {
//!     println!("{:.0} m, {:.0} m ascent", planned.route.length(), planned.profile.total_ascent());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::sync::Cache;
use tracing::{debug, warn};

use crate::data::Graph;
use crate::error::{Result, VeloError};
use crate::projection::PointCh;
use crate::routing::{
    elevation_profile, CityBikeCostFunction, CostFunction, ElevationProfile, MultiRoute, Route,
    RouteComputer,
};

/// Default number of legs kept in the cache.
pub const DEFAULT_CACHE_SIZE: u64 = 100;
/// Default maximum distance between elevation profile samples, in metres.
pub const DEFAULT_MAX_STEP_LENGTH: f64 = 5.0;
/// Default radius around a point in which a waypoint node is searched, in metres.
pub const DEFAULT_SEARCH_DISTANCE: f64 = 500.0;

/// Statistics about leg cache usage.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of legs currently in the cache.
    pub entry_count: u64,
    /// Number of legs served from the cache.
    pub hit_count: u64,
    /// Number of legs computed.
    pub miss_count: u64,
}

impl CacheStats {
    /// Calculate the cache hit rate (0.0 to 1.0).
    ///
    /// Returns 0.0 if no legs have been requested.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

/// A point chosen by the user and the graph node it was snapped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub point: PointCh,
    pub node_id: u32,
}

/// A planned route and its elevation profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    pub route: Route,
    pub profile: ElevationProfile,
}

/// Plans routes through waypoints on a shared graph.
pub struct RoutePlanner<C = CityBikeCostFunction> {
    computer: RouteComputer<C>,
    /// Computed legs keyed by (start node, end node); `None` when unreachable.
    leg_cache: Cache<(u32, u32), Option<Route>>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    max_step_length: f64,
    search_distance: f64,
}

impl RoutePlanner<CityBikeCostFunction> {
    /// Create a planner using city bike costs and default settings.
    pub fn new(graph: Arc<Graph>, cache_size: u64) -> Self {
        RoutePlannerBuilder::new("")
            .cache_size(cache_size)
            .build_for(graph.clone(), CityBikeCostFunction::new(graph))
    }

    /// Create a builder for more configuration options.
    pub fn builder<P: AsRef<Path>>(data_dir: P) -> RoutePlannerBuilder {
        RoutePlannerBuilder::new(data_dir)
    }
}

impl<C: CostFunction> RoutePlanner<C> {
    pub fn graph(&self) -> &Arc<Graph> {
        self.computer.graph()
    }

    /// Maximum distance between elevation profile samples, in metres.
    pub fn max_step_length(&self) -> f64 {
        self.max_step_length
    }

    /// Radius used by [`Self::waypoint_at`], in metres.
    pub fn search_distance(&self) -> f64 {
        self.search_distance
    }

    /// Snap `point` to the closest node within the search distance.
    pub fn waypoint_at(&self, point: PointCh) -> Option<Waypoint> {
        self.graph()
            .node_closest_to(&point, self.search_distance)
            .map(|node_id| Waypoint { point, node_id })
    }

    /// Plan a route through `waypoints`, in order.
    ///
    /// Consecutive waypoints on the same node contribute no leg.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(planned))` - the joined legs and their elevation profile
    /// - `Ok(None)` - fewer than two distinct waypoints, or some leg is unreachable
    pub fn plan(&self, waypoints: &[Waypoint]) -> Result<Option<PlannedRoute>> {
        let mut legs = Vec::with_capacity(waypoints.len().saturating_sub(1));
        for pair in waypoints.windows(2) {
            let (from, to) = (pair[0].node_id, pair[1].node_id);
            if from == to {
                continue;
            }
            match self.leg(from, to)? {
                Some(leg) => legs.push(leg),
                None => {
                    warn!(from, to, "No route between waypoints");
                    return Ok(None);
                }
            }
        }
        if legs.is_empty() {
            return Ok(None);
        }

        let route = Route::from(MultiRoute::new(legs)?);
        let profile = elevation_profile(&route, self.max_step_length)?;
        Ok(Some(PlannedRoute { route, profile }))
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.leg_cache.entry_count(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }

    /// Get the maximum cache size.
    pub fn cache_capacity(&self) -> u64 {
        self.leg_cache.policy().max_capacity().unwrap_or(0)
    }

    /// Drop every cached leg.
    pub fn clear_cache(&self) {
        self.leg_cache.invalidate_all();
    }

    fn leg(&self, from: u32, to: u32) -> Result<Option<Route>> {
        if let Some(leg) = self.leg_cache.get(&(from, to)) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            debug!(from, to, "Leg cache hit");
            return Ok(leg);
        }

        self.miss_count.fetch_add(1, Ordering::Relaxed);
        debug!(from, to, "Leg cache miss");
        let leg = self.computer.best_route_between(from, to)?;
        self.leg_cache.insert((from, to), leg.clone());
        Ok(leg)
    }
}

/// Builder for creating a [`RoutePlanner`] with custom configuration.
///
/// # Example
///
/// ```ignore
/// use velo::RoutePlannerBuilder;
///
/// let planner = RoutePlannerBuilder::new("/data/velo")
///     .cache_size(100)
///     .max_step_length(2.0)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct RoutePlannerBuilder {
    data_dir: PathBuf,
    cache_size: u64,
    max_step_length: f64,
    search_distance: f64,
}

impl RoutePlannerBuilder {
    /// Create a new builder for the graph in `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            cache_size: DEFAULT_CACHE_SIZE,
            max_step_length: DEFAULT_MAX_STEP_LENGTH,
            search_distance: DEFAULT_SEARCH_DISTANCE,
        }
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `VELO_DATA_DIR` | Directory containing the graph files | Required |
    /// | `VELO_CACHE_SIZE` | Maximum legs in cache | 100 |
    /// | `VELO_MAX_STEP` | Maximum elevation sample spacing (m) | 5.0 |
    /// | `VELO_SEARCH_DISTANCE` | Waypoint snapping radius (m) | 500.0 |
    ///
    /// Unparseable values fall back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error if `VELO_DATA_DIR` is not set.
    pub fn from_env() -> Result<Self> {
        let data_dir = std::env::var("VELO_DATA_DIR").map_err(|_| {
            VeloError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "VELO_DATA_DIR environment variable not set",
            ))
        })?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            cache_size: env_or("VELO_CACHE_SIZE", DEFAULT_CACHE_SIZE),
            max_step_length: env_or("VELO_MAX_STEP", DEFAULT_MAX_STEP_LENGTH),
            search_distance: env_or("VELO_SEARCH_DISTANCE", DEFAULT_SEARCH_DISTANCE),
        })
    }

    /// Set the graph directory.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the maximum number of legs kept in the cache.
    pub fn cache_size(mut self, size: u64) -> Self {
        self.cache_size = size;
        self
    }

    /// Set the maximum spacing of elevation profile samples, in metres.
    pub fn max_step_length(mut self, length: f64) -> Self {
        self.max_step_length = length;
        self
    }

    /// Set the radius in which waypoints are snapped to nodes, in metres.
    pub fn search_distance(mut self, distance: f64) -> Self {
        self.search_distance = distance;
        self
    }

    /// Load the graph and build a planner with city bike costs.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be loaded, the maximum step
    /// length is not positive, or the search distance is negative or not
    /// finite.
    pub fn build(self) -> Result<RoutePlanner> {
        self.check()?;
        let graph = Arc::new(Graph::load_from(&self.data_dir)?);
        let cost_function = CityBikeCostFunction::new(graph.clone());
        Ok(self.build_for(graph, cost_function))
    }

    /// Build a planner over an already loaded graph; the data directory is ignored.
    pub fn build_for<C: CostFunction>(
        self,
        graph: Arc<Graph>,
        cost_function: C,
    ) -> RoutePlanner<C> {
        RoutePlanner {
            computer: RouteComputer::new(graph, cost_function),
            leg_cache: Cache::builder().max_capacity(self.cache_size).build(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
            max_step_length: self.max_step_length,
            search_distance: self.search_distance,
        }
    }

    fn check(&self) -> Result<()> {
        if self.max_step_length.is_nan() || self.max_step_length <= 0.0 {
            return Err(VeloError::InvalidArgument(format!(
                "maximum step length must be positive, got {}",
                self.max_step_length
            )));
        }
        if !self.search_distance.is_finite() || self.search_distance < 0.0 {
            return Err(VeloError::InvalidArgument(format!(
                "search distance must be finite and non-negative, got {}",
                self.search_distance
            )));
        }
        Ok(())
    }
}

/// Index of the leg containing `position` on `route`, a route planned
/// through `waypoints`.
///
/// Legs between waypoints on the same node are empty and absent from the
/// route, but still counted here, so the result indexes `waypoints.windows(2)`.
pub fn non_empty_segment_index(waypoints: &[Waypoint], route: &Route, position: f64) -> usize {
    let mut index = route.index_of_segment_at(position);
    let mut i = 0;
    while i <= index && i + 1 < waypoints.len() {
        if waypoints[i].node_id == waypoints[i + 1].node_id {
            index += 1;
        }
        i += 1;
    }
    index
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
