//! Memory utilization, pulled from the `MemTotal` and `MemFree` lines of
//! `/proc/meminfo`.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::error::{CollectionError, CollectionResult};

/// Reported when the meminfo source cannot be read.
pub const FAILURE_READING: f64 = -1.0;

/// Percentage of physical memory in use: `100 - free/total`. A meminfo
/// without a usable `MemTotal` reads as zero rather than dividing by it.
pub fn get_mem_usage(path: &Path) -> CollectionResult<f64> {
    let mut mem_total = 0;
    let mut mem_free = 0;

    for line in BufReader::new(File::open(path)?).lines() {
        let line = line?;
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            mem_total = parse_kb_value(rest)?;
        } else if let Some(rest) = line.strip_prefix("MemFree:") {
            mem_free = parse_kb_value(rest)?;
            // MemTotal precedes MemFree in the kernel's layout, so the scan
            // can stop here.
            break;
        }
    }

    Ok(usage_percent(mem_total, mem_free))
}

/// Parses the numeric part of a ` <value> kB` meminfo field.
fn parse_kb_value(rest: &str) -> CollectionResult<u64> {
    Ok(rest
        .split_whitespace()
        .next()
        .ok_or_else(|| CollectionError::from_str("empty meminfo field"))?
        .parse()?)
}

fn usage_percent(mem_total: u64, mem_free: u64) -> f64 {
    if mem_total > 0 {
        100.0 - (mem_free as f64 / mem_total as f64) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_meminfo(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn computes_used_percentage() {
        let file = write_meminfo(
            "MemTotal:       1000 kB\nMemFree:         250 kB\nMemAvailable:    400 kB\n",
        );

        assert_eq!(get_mem_usage(file.path()).unwrap(), 75.0);
    }

    #[test]
    fn missing_total_reads_as_zero() {
        let file = write_meminfo("MemFree:         250 kB\nBuffers:          64 kB\n");

        assert_eq!(get_mem_usage(file.path()).unwrap(), 0.0);
    }

    #[test]
    fn empty_source_reads_as_zero() {
        let file = write_meminfo("");

        assert_eq!(get_mem_usage(file.path()).unwrap(), 0.0);
    }

    #[test]
    fn unreadable_source_is_an_error() {
        assert!(get_mem_usage(Path::new("/nonexistent/meminfo")).is_err());
    }

    #[test]
    fn garbage_value_is_an_error() {
        let file = write_meminfo("MemTotal: lots kB\nMemFree: 250 kB\n");

        assert!(get_mem_usage(file.path()).is_err());
    }
}
