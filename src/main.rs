mod charts;
mod color;
mod data;

use std::path::Path;

use anyhow::Result;
use log::info;

use data::loader;

fn main() -> Result<()> {
    env_logger::init();

    let dirs = loader::default_search_dirs();

    match loader::load_engine_log(&dirs)? {
        Some(samples) => {
            info!("engine log: {} samples", samples.len());
            charts::engine::render(&samples, Path::new("EngineMetrics.png"))?;
        }
        None => info!("no engine log found; skipping engine charts"),
    }

    match loader::load_nav_log(&dirs)? {
        Some(samples) => {
            info!("navigation log: {} samples", samples.len());
            charts::navigation::render(&samples, Path::new("Navegation.png"))?;
            charts::minkowski::render(&samples, Path::new("MinkowsiSum.png"))?;
        }
        None => info!("no navigation log found; skipping navigation charts"),
    }

    Ok(())
}
