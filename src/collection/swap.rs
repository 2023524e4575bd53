//! Swap activity, pulled from the `pswpin` and `pswpout` counters of
//! `/proc/vmstat`.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::error::CollectionResult;

/// Reported when the vmstat source cannot be read.
pub const FAILURE_READING: f64 = -1.0;

/// Pages swapped in plus pages swapped out since boot. A cumulative count,
/// not a rate; counters the kernel does not report read as zero.
pub fn get_swap_activity(path: &Path) -> CollectionResult<f64> {
    let mut pages_in: u64 = 0;
    let mut pages_out: u64 = 0;

    for line in BufReader::new(File::open(path)?).lines() {
        let line = line?;
        if let Some(rest) = line.strip_prefix("pswpin ") {
            pages_in = rest.trim().parse()?;
        } else if let Some(rest) = line.strip_prefix("pswpout ") {
            pages_out = rest.trim().parse()?;
        }
    }

    Ok((pages_in + pages_out) as f64)
}
