pub mod info;
pub mod nearest;
pub mod route;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// The graph directory from `--data-dir`, or else from `VELO_DATA_DIR`.
fn graph_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir),
        None => {
            let dir = std::env::var("VELO_DATA_DIR").context(
                "VELO_DATA_DIR environment variable not set. Use --data-dir or set VELO_DATA_DIR",
            )?;
            Ok(PathBuf::from(dir))
        }
    }
}
