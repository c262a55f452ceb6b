//! Basic example demonstrating velo route planning.
//!
//! Run with: cargo run --example basic -- /path/to/graph

use std::env;
use velo::{PointCh, RoutePlanner, VeloError};

fn main() -> Result<(), VeloError> {
    // Get graph directory from command line
    let data_dir = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example basic -- /path/to/graph");
        std::process::exit(1);
    });

    let planner = RoutePlanner::builder(&data_dir).cache_size(10).build()?;

    // Lausanne: station, cathedral, EPFL
    let places = [
        ("Gare de Lausanne", 2_537_900.0, 1_152_170.0),
        ("Cathédrale", 2_538_330.0, 1_152_890.0),
        ("EPFL", 2_533_100.0, 1_152_350.0),
    ];

    let mut waypoints = Vec::new();
    for (name, e, n) in places {
        match planner.waypoint_at(PointCh::new(e, n)?) {
            Some(waypoint) => {
                println!("{}: node {}", name, waypoint.node_id);
                waypoints.push(waypoint);
            }
            None => println!("{}: no road nearby", name),
        }
    }

    match planner.plan(&waypoints)? {
        Some(planned) => {
            println!("\nRoute:");
            println!("  Length: {:.0} m", planned.route.length());
            println!("  Ascent: {:.0} m", planned.profile.total_ascent());
            println!("  Descent: {:.0} m", planned.profile.total_descent());
        }
        None => println!("\nNo route found"),
    }

    // Planning the same legs again is served from the cache
    planner.plan(&waypoints)?;

    let stats = planner.cache_stats();
    println!("\nCache statistics:");
    println!("  Cached legs: {}", stats.entry_count);
    println!("  Hits: {}", stats.hit_count);
    println!("  Misses: {}", stats.miss_count);
    println!("  Hit rate: {:.1}%", stats.hit_rate() * 100.0);

    Ok(())
}
