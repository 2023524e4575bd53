//! Disk I/O data collection, pulled from `/proc/diskstats`.
//!
//! https://www.kernel.org/doc/Documentation/iostats.txt
//! https://www.kernel.org/doc/Documentation/ABI/testing/procfs-diskstats

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use super::error::{CollectionError, CollectionResult};

/// Reported when the diskstats source cannot be read, or the target device
/// is missing from it.
pub const FAILURE_READING: f64 = -1.0;

/// Cumulative counters for one block device, pulled from its diskstats line.
///
/// Follows the format used in Linux 2.6+. Discard counters (4.18+) and flush
/// counters (5.5+) read as zero on kernels that predate them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IoStats {
    name: String,
    read_count: u64,
    sectors_read: u64,
    write_count: u64,
    sectors_written: u64,
    discard_count: u64,
    flush_count: u64,
}

impl IoStats {
    /// Sectors read plus sectors written, scaled down to kilobyte units.
    /// Cumulative since boot, not a per-second figure.
    pub fn io_rate_kb(&self) -> f64 {
        (self.sectors_read + self.sectors_written) as f64 / 1024.0
    }

    /// Completed read, write, discard, and flush requests, halved.
    pub fn io_activity(&self) -> f64 {
        (self.read_count + self.write_count + self.discard_count + self.flush_count) as f64 / 2.0
    }
}

impl FromStr for IoStats {
    type Err = CollectionError;

    fn from_str(s: &str) -> CollectionResult<IoStats> {
        fn next_part<'a>(iter: &mut impl Iterator<Item = &'a str>) -> Result<&'a str, io::Error> {
            iter.next()
                .ok_or_else(|| io::Error::from(io::ErrorKind::InvalidData))
        }

        fn next_counter<'a>(iter: &mut impl Iterator<Item = &'a str>) -> CollectionResult<u64> {
            Ok(next_part(iter)?.parse()?)
        }

        // Treats a missing trailing field as zero, for counters older
        // kernels do not report.
        fn next_counter_or_zero<'a>(
            iter: &mut impl Iterator<Item = &'a str>,
        ) -> CollectionResult<u64> {
            match iter.next() {
                Some(part) => Ok(part.parse()?),
                None => Ok(0),
            }
        }

        // Skip the major and minor numbers.
        let mut parts = s.split_whitespace().skip(2);

        let name = next_part(&mut parts)?.to_string();

        let read_count = next_counter(&mut parts)?;
        let _reads_merged = next_counter(&mut parts)?;
        let sectors_read = next_counter(&mut parts)?;
        let _read_time_ms = next_counter(&mut parts)?;
        let write_count = next_counter(&mut parts)?;
        let _writes_merged = next_counter(&mut parts)?;
        let sectors_written = next_counter(&mut parts)?;

        // Write time, in-flight count, io time, and weighted io time sit
        // between the write and discard blocks.
        let mut parts = parts.skip(4);
        let discard_count = next_counter_or_zero(&mut parts)?;

        // Likewise discards merged, sectors discarded, and discard time
        // before the flush block.
        let mut parts = parts.skip(3);
        let flush_count = next_counter_or_zero(&mut parts)?;

        Ok(IoStats {
            name,
            read_count,
            sectors_read,
            write_count,
            sectors_written,
            discard_count,
            flush_count,
        })
    }
}

/// Scans the diskstats records at `path` for `device` and returns its
/// cumulative counters. Records that do not parse are skipped; a device that
/// never shows up is an explicit [`CollectionError::NoSuchDevice`].
pub fn target_io_stats(path: &Path, device: &str) -> CollectionResult<IoStats> {
    for line in BufReader::new(File::open(path)?).lines() {
        if let Ok(stats) = IoStats::from_str(&line?) {
            if stats.name == device {
                return Ok(stats);
            }
        }
    }

    Err(CollectionError::NoSuchDevice(device.to_string()))
}

/// Disk I/O volume for `device` in kilobytes.
pub fn get_io_rate(path: &Path, device: &str) -> CollectionResult<f64> {
    Ok(target_io_stats(path, device)?.io_rate_kb())
}

/// Completed I/O requests for `device`.
pub fn get_io_activity(path: &Path, device: &str) -> CollectionResult<f64> {
    Ok(target_io_stats(path, device)?.io_activity())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    // Two devices on a post-5.5 kernel, 20 fields each.
    const DISKSTATS: &str = "\
   8       0 sda 4000 55 204800 900 2000 77 102400 1200 0 800 2100 100 0 51200 30 64 10
   8       1 sda1 3900 50 204000 890 1900 70 101000 1100 0 790 2000 90 0 51000 25 60 9
 259       0 nvme0n1 9000 12 512000 700 7000 34 256000 650 0 500 1400 300 1 76800 40 128 22
";

    fn write_diskstats() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{DISKSTATS}").unwrap();
        file
    }

    #[test]
    fn selects_only_the_matching_device() {
        let file = write_diskstats();

        let stats = target_io_stats(file.path(), "nvme0n1").unwrap();
        assert_eq!(stats.name, "nvme0n1");
        assert_eq!(stats.read_count, 9000);
        assert_eq!(stats.sectors_read, 512_000);
        assert_eq!(stats.write_count, 7000);
        assert_eq!(stats.sectors_written, 256_000);
        assert_eq!(stats.discard_count, 300);
        assert_eq!(stats.flush_count, 128);
    }

    #[test]
    fn prefix_device_names_do_not_match() {
        // `sda` must not be mistaken for `sda1` even though it sorts first.
        let file = write_diskstats();

        let stats = target_io_stats(file.path(), "sda1").unwrap();
        assert_eq!(stats.sectors_read, 204_000);
    }

    #[test]
    fn io_rate_scales_sector_counters_to_kilobytes() {
        let file = write_diskstats();

        let rate = get_io_rate(file.path(), "sda").unwrap();
        assert_eq!(rate, (204_800 + 102_400) as f64 / 1024.0);
    }

    #[test]
    fn io_activity_halves_the_request_counters() {
        let file = write_diskstats();

        let activity = get_io_activity(file.path(), "sda").unwrap();
        assert_eq!(activity, (4000 + 2000 + 100 + 64) as f64 / 2.0);
    }

    #[test]
    fn missing_device_is_an_explicit_error() {
        let file = write_diskstats();

        match target_io_stats(file.path(), "sdz") {
            Err(CollectionError::NoSuchDevice(device)) => assert_eq!(device, "sdz"),
            other => panic!("expected NoSuchDevice, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_source_is_an_error() {
        assert!(target_io_stats(Path::new("/nonexistent/diskstats"), "sda").is_err());
    }

    #[test]
    fn pre_discard_kernels_read_zero_for_newer_counters() {
        // 14 fields, as written by kernels before 4.18.
        let line = "   8       0 sda 4000 55 204800 900 2000 77 102400 1200 0 800 2100";

        let stats = IoStats::from_str(line).unwrap();
        assert_eq!(stats.discard_count, 0);
        assert_eq!(stats.flush_count, 0);
        assert_eq!(stats.io_activity(), (4000 + 2000) as f64 / 2.0);
    }
}
