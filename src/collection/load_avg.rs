//! Data collection for load average.
//!
//! Linux reads the kernel's loadavg text directly; everywhere else goes
//! through sysinfo. Unlike the other samplers, a failure here is fatal to the
//! process, so errors propagate instead of degrading to a sentinel.

use std::path::Path;

use super::error::{CollectionError, CollectionResult};

pub type LoadAvgHarvest = [f32; 3];

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        pub fn get_load_avg(path: &Path) -> CollectionResult<LoadAvgHarvest> {
            let contents = std::fs::read_to_string(path)?;
            parse_load_avg(&contents)
        }
    } else {
        pub fn get_load_avg(_path: &Path) -> CollectionResult<LoadAvgHarvest> {
            let load_avg = sysinfo::System::load_average();

            Ok([
                load_avg.one as f32,
                load_avg.five as f32,
                load_avg.fifteen as f32,
            ])
        }
    }
}

/// Parses the 1, 5, and 15-minute averages, the first three
/// whitespace-separated fields of the loadavg line.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_load_avg(contents: &str) -> CollectionResult<LoadAvgHarvest> {
    let mut parts = contents.split_whitespace();

    let mut load_avg = [0.0; 3];
    for entry in load_avg.iter_mut() {
        *entry = parts
            .next()
            .ok_or_else(|| CollectionError::from_str("truncated loadavg line"))?
            .parse()?;
    }

    Ok(load_avg)
}
