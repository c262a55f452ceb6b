use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use velo::{ElevationProfile, PlannedRoute, PointCh, RoutePlannerBuilder, Waypoint};

#[derive(Serialize)]
struct RouteResponse {
    waypoints: Vec<WaypointResponse>,
    route: Option<RouteSummary>,
}

#[derive(Serialize)]
struct WaypointResponse {
    e: f64,
    n: f64,
    node_id: u32,
}

#[derive(Serialize)]
struct RouteSummary {
    length: f64,
    edges: usize,
    total_ascent: f64,
    total_descent: f64,
    min_elevation: f64,
    max_elevation: f64,
    /// Route nodes as [e, n] pairs
    points: Vec<[f64; 2]>,
}

impl From<&PlannedRoute> for RouteSummary {
    fn from(planned: &PlannedRoute) -> Self {
        let profile = &planned.profile;
        Self {
            length: planned.route.length(),
            edges: planned.route.edges().len(),
            total_ascent: profile.total_ascent(),
            total_descent: profile.total_descent(),
            min_elevation: profile.min_elevation(),
            max_elevation: profile.max_elevation(),
            points: planned
                .route
                .points()
                .iter()
                .map(|p| [p.e(), p.n()])
                .collect(),
        }
    }
}

/// Parse an `E,N` pair.
pub fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (e, n) = s
        .split_once(',')
        .ok_or_else(|| format!("expected E,N but got '{s}'"))?;
    let e = e.trim().parse().map_err(|_| format!("invalid E coordinate '{e}'"))?;
    let n = n.trim().parse().map_err(|_| format!("invalid N coordinate '{n}'"))?;
    Ok((e, n))
}

pub fn run(
    data_dir: Option<PathBuf>,
    cache_size: u64,
    points: Vec<(f64, f64)>,
    max_step: f64,
    search_distance: f64,
    json: bool,
    profile_path: Option<PathBuf>,
) -> Result<()> {
    // Build the planner
    let builder = match data_dir {
        Some(dir) => RoutePlannerBuilder::new(dir),
        None => RoutePlannerBuilder::from_env().context(
            "VELO_DATA_DIR environment variable not set. Use --data-dir or set VELO_DATA_DIR",
        )?,
    };
    let planner = builder
        .cache_size(cache_size)
        .max_step_length(max_step)
        .search_distance(search_distance)
        .build()
        .context("Failed to create route planner")?;

    // Snap every point to the road network
    let mut waypoints: Vec<Waypoint> = Vec::with_capacity(points.len());
    for (e, n) in points {
        let point = PointCh::new(e, n)
            .with_context(|| format!("Waypoint {e},{n} is outside the graph area"))?;
        match planner.waypoint_at(point) {
            Some(waypoint) => waypoints.push(waypoint),
            None => bail!("No road within {search_distance} m of waypoint {e},{n}"),
        }
    }

    let planned = planner.plan(&waypoints).context("Failed to plan route")?;
    let stats = planner.cache_stats();
    tracing::debug!(
        waypoints = waypoints.len(),
        legs_computed = stats.miss_count,
        found = planned.is_some(),
        "Planned route"
    );

    if let (Some(planned), Some(path)) = (&planned, &profile_path) {
        write_profile(&planned.profile, path)?;
    }

    // Output result
    if json {
        let response = RouteResponse {
            waypoints: waypoints
                .iter()
                .map(|w| WaypointResponse {
                    e: w.point.e(),
                    n: w.point.n(),
                    node_id: w.node_id,
                })
                .collect(),
            route: planned.as_ref().map(RouteSummary::from),
        };
        println!("{}", serde_json::to_string(&response)?);
    } else if let Some(planned) = &planned {
        let summary = RouteSummary::from(planned);
        println!("Length: {:.0} m ({} edges)", summary.length, summary.edges);
        println!("Ascent: {:.0} m", summary.total_ascent);
        println!("Descent: {:.0} m", summary.total_descent);
        println!(
            "Elevation: {:.0} m to {:.0} m",
            summary.min_elevation, summary.max_elevation
        );
        if let Some(path) = &profile_path {
            println!("Profile written to {}", path.display());
        }
    } else {
        println!("no route");
    }

    Ok(())
}

/// Write the profile as `position,elevation` rows, one per sample.
fn write_profile(profile: &ElevationProfile, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create profile file {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer.write_record(["position", "elevation"])?;

    let samples = profile.samples();
    let step = profile.length() / (samples.len() - 1) as f64;
    for (i, elevation) in samples.iter().enumerate() {
        writer.write_record(&[format!("{:.2}", i as f64 * step), format!("{:.2}", elevation)])?;
    }
    writer.flush()?;
    Ok(())
}
